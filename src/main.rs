use tapit_stats::utils::logger;
use tapit_stats::{EnvConfig, ReportEngine, StatsPipeline};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logger::init_logger();

    tracing::info!("🚀 Starting tapit-stats report run");

    let config = match EnvConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration error: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let pipeline = match StatsPipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("❌ Could not build the HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let engine = ReportEngine::new(pipeline);
    match engine.run().await {
        Ok(()) => tracing::info!("✅ Report run finished"),
        Err(e) => {
            // No retry; the next scheduled invocation is the retry.
            tracing::error!("❌ Report delivery failed: {}", e);
        }
    }
}
