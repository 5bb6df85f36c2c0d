use std::time::Duration;

use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

pub async fn handle(url: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let ping_url = format!("{}/ping", url.trim_end_matches('/'));

    let response = client
        .get(&ping_url)
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("{} is unreachable: {}", url, e))?;

    if !response.status().is_success() {
        anyhow::bail!("{} answered {}", ping_url, response.status());
    }

    output_success(
        &output_format,
        &format!("{} is up", url),
        Some(json!({ "url": url, "status": response.status().as_u16() })),
    )
}
