use serde_json::json;

use crate::cli::OutputFormat;
use crate::config::AppConfig;

pub fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    match output_format {
        OutputFormat::Json => {
            let collections: Vec<_> = config
                .collections
                .iter()
                .map(|c| json!({ "name": c.name, "table": c.table, "search_columns": c.search_columns }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&json!({ "collections": collections }))?);
        }
        OutputFormat::Text => {
            for c in config.collections.iter() {
                let search = if c.search_columns.is_empty() {
                    "(no search)".to_string()
                } else {
                    c.search_columns.join(", ")
                };
                println!("{:<12} -> {:<16} {}", c.name, c.table, search);
            }
        }
    }
    Ok(())
}
