use std::sync::Arc;

use clap::Args;

use crate::backend::PostgrestClient;
use crate::cli::utils::output_rows;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::filter::FilterData;
use crate::services::PortfolioService;

#[derive(Args, Debug)]
pub struct QueryArgs {
    #[arg(help = "Collection name (properties, units, leases, tenants, owners)")]
    pub collection: String,

    #[arg(short, long, help = "Free-text search across the collection's search columns")]
    pub q: Option<String>,

    #[arg(long, help = "Rows to return (1-500, default 25)")]
    pub limit: Option<String>,

    #[arg(long, help = "Rows to skip")]
    pub offset: Option<String>,

    #[arg(long, help = "Sort, e.g. name.desc (default id.asc)")]
    pub order: Option<String>,

    #[arg(long, help = "Columns to return (default *)")]
    pub select: Option<String>,

    #[arg(long, help = "Include request diagnostics")]
    pub debug: bool,
}

impl From<QueryArgs> for FilterData {
    fn from(args: QueryArgs) -> Self {
        FilterData {
            q: args.q,
            limit: args.limit,
            offset: args.offset,
            order: args.order,
            select: args.select,
            debug: args.debug.then(|| "1".to_string()),
        }
    }
}

pub async fn handle(args: QueryArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let client = PostgrestClient::new(config.backend.clone())?;
    let service = PortfolioService::new(Arc::new(config), Arc::new(client));

    let collection = args.collection.clone();
    let result = service.lookup(&collection, &args.into()).await?;

    if let OutputFormat::Text = output_format {
        match result.total {
            Some(total) => eprintln!("{}: {} of {} rows", result.collection, result.items.len(), total),
            None => eprintln!("{}: {} rows", result.collection, result.items.len()),
        }
    }
    output_rows(&output_format, &serde_json::to_value(&result)?, &result.items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: QueryArgs,
    }

    #[test]
    fn test_args_become_filter_data() {
        let harness = Harness::parse_from(["portfolio", "units", "-q", "4B", "--limit", "5", "--debug"]);
        let data: FilterData = harness.args.into();
        assert_eq!(data.q.as_deref(), Some("4B"));
        assert_eq!(data.limit.as_deref(), Some("5"));
        assert!(data.debug_enabled());
        assert!(data.order.is_none());
    }
}
