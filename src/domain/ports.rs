use crate::domain::model::{Link, LinkStat, Report};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn api_base(&self) -> &str;
    fn api_token(&self) -> &str;
    fn project_id(&self) -> &str;
    fn webhook_url(&self) -> &str;
    fn link_prefix(&self) -> &str;
    fn page_size(&self) -> u32;
    fn lookback_days(&self) -> u32;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Lists the project's links whose name passes the configured filter.
    async fn list(&self) -> Result<Vec<Link>>;

    /// Resolves a click count per link. Infallible: per-link failures
    /// degrade to a zero count.
    async fn aggregate(&self, links: Vec<Link>) -> Vec<LinkStat>;

    /// Renders the report and posts it to the webhook.
    async fn notify(&self, report: &Report) -> Result<()>;
}
