//! Operator probe: lists the account's projects so the `PROJECT_ID` value
//! for the report run can be found. Needs only `TAPIT_API_KEY`.

use serde_json::Value;
use tapit_stats::config::{DEFAULT_API_BASE, ENV_API_BASE, ENV_API_TOKEN};
use tapit_stats::core::decode;
use tapit_stats::utils::error::{ReportError, Result};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let token = std::env::var(ENV_API_TOKEN).map_err(|_| ReportError::MissingConfigError {
        field: ENV_API_TOKEN.to_string(),
    })?;
    let api_base =
        std::env::var(ENV_API_BASE).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

    let client = reqwest::Client::new();
    let body: Value = client
        .get(format!("{}/v1/projects", api_base.trim_end_matches('/')))
        .bearer_auth(&token)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let projects = decode::decode_list_envelope(&body)?;

    println!("=== YOUR PROJECTS ===");
    for project in projects {
        let name = project
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("(unnamed)");
        let id = match project.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => "?".to_string(),
        };
        let description = project
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("none");

        println!("📁 Name: {}", name);
        println!("   ID: {}", id);
        println!("   Description: {}", description);
        println!();
    }

    Ok(())
}
