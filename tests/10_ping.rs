mod common;

use anyhow::Result;
use portfolio_api::config::AppConfig;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn ping_responds_ok() -> Result<()> {
    let base_url = common::start_app(AppConfig::development()).await?;
    let client = reqwest::Client::new();

    for path in ["/ping", "/api/ping"] {
        let res = client.get(format!("{}{}", base_url, path)).send().await?;
        assert_eq!(res.status(), StatusCode::OK, "{}", path);
        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body, json!({ "ok": true }));
    }

    Ok(())
}

#[tokio::test]
async fn legal_stubs_return_fixed_payloads() -> Result<()> {
    let base_url = common::start_app(AppConfig::development()).await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/legal/export/cases", base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({ "export": "cases", "status": "ok" }));

    let res = client.get(format!("{}/api/legal/cases", base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!([]));

    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    let base_url = common::start_app(AppConfig::development()).await?;
    let body = reqwest::get(format!("{}/", base_url)).await?.json::<serde_json::Value>().await?;

    assert_eq!(body["name"], "Portfolio API");
    assert!(body["endpoints"]["portfolio"].as_str().unwrap_or("").starts_with("/portfolio/"));
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_json_404() -> Result<()> {
    let base_url = common::start_app(AppConfig::development()).await?;
    let res = reqwest::get(format!("{}/nope", base_url)).await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["error"].as_str().unwrap_or("").contains("/nope"), "{}", body);
    Ok(())
}
