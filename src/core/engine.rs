use crate::domain::model::Report;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs one full pass. A listing failure degrades to an empty report;
    /// exactly one notification send is attempted either way.
    pub async fn run(&self) -> Result<()> {
        tracing::info!("📥 Listing project links...");
        let stats = match self.pipeline.list().await {
            Ok(links) => {
                tracing::info!("✅ {} links matched the name filter", links.len());
                self.pipeline.aggregate(links).await
            }
            Err(e) => {
                tracing::error!("❌ Link listing failed: {}", e);
                Vec::new()
            }
        };

        let report = Report::new(stats);
        tracing::info!(
            "📤 Sending report ({} links, {} clicks total)",
            report.stats.len(),
            report.total
        );
        self.pipeline.notify(&report).await
    }
}
