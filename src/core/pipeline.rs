use crate::core::{decode, message};
use crate::domain::model::{Link, LinkStat, Report, StatsWindow};
use crate::domain::ports::{ConfigProvider, Pipeline};
use crate::utils::error::{ReportError, Result};
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;

/// Sender display name on the webhook payload.
const WEBHOOK_USERNAME: &str = "Tap.it Stats Bot";

/// Applied to every outbound request; the transport default is unbounded.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct StatsPipeline<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> StatsPipeline<C> {
    pub fn new(config: C) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { config, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base().trim_end_matches('/'), path)
    }

    async fn fetch_link_clicks(&self, link: &Link) -> Result<u64> {
        let window = StatsWindow::ending_today(self.config.lookback_days());
        let url = self.endpoint(&format!("/v1/stats/links/{}", link.id));

        tracing::debug!(
            "Requesting stats: {} ({} to {})",
            url,
            window.start,
            window.end
        );
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.config.api_token())
            .query(&[
                ("start_date", window.start.to_string()),
                ("end_date", window.end.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        decode::decode_click_total(&body).ok_or_else(|| ReportError::MalformedResponseError {
            reason: format!("stats response for link {} carries no click total", link.id),
        })
    }
}

#[async_trait::async_trait]
impl<C: ConfigProvider> Pipeline for StatsPipeline<C> {
    async fn list(&self) -> Result<Vec<Link>> {
        let url = self.endpoint("/v1/links");
        let page_size = self.config.page_size().to_string();

        tracing::debug!("Listing links: {} (page size {})", url, page_size);
        let response = self
            .client
            .get(&url)
            .bearer_auth(self.config.api_token())
            .query(&[
                ("project_id", self.config.project_id()),
                ("page_size", page_size.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        let links = decode::decode_link_list(&body)?;

        // Pagination past the first page is not implemented; a full page
        // means the listing may be truncated.
        if links.len() as u64 >= u64::from(self.config.page_size()) {
            tracing::warn!(
                "⚠️ Listing returned a full page ({} links); any further pages were not fetched",
                links.len()
            );
        }

        let prefix = self.config.link_prefix();
        Ok(links
            .into_iter()
            .filter(|link| link.name.starts_with(prefix))
            .collect())
    }

    async fn aggregate(&self, links: Vec<Link>) -> Vec<LinkStat> {
        let mut stats = Vec::with_capacity(links.len());
        for link in links {
            let clicks = match link.clicks_direct {
                Some(count) => count,
                None => {
                    tracing::info!("📊 Fetching stats for {}...", link.name);
                    match self.fetch_link_clicks(&link).await {
                        Ok(count) => count,
                        Err(e) => {
                            tracing::warn!(
                                "❌ Stats for {} unavailable ({}); counting 0",
                                link.name,
                                e
                            );
                            0
                        }
                    }
                }
            };
            stats.push(LinkStat {
                name: link.name,
                clicks,
            });
        }
        stats
    }

    async fn notify(&self, report: &Report) -> Result<()> {
        let content = message::render_report(
            report,
            self.config.link_prefix(),
            Utc::now().date_naive(),
        );
        let payload = serde_json::json!({
            "content": content,
            "username": WEBHOOK_USERNAME,
        });

        let response = self
            .client
            .post(self.config.webhook_url())
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReportError::DeliveryError {
                status: response.status().as_u16(),
            });
        }

        tracing::info!("✅ Report delivered to webhook");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    struct MockConfig {
        api_base: String,
        webhook_url: String,
    }

    impl MockConfig {
        fn new(server: &MockServer) -> Self {
            Self {
                api_base: server.base_url(),
                webhook_url: server.url("/webhook"),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn api_base(&self) -> &str {
            &self.api_base
        }

        fn api_token(&self) -> &str {
            "secret-token"
        }

        fn project_id(&self) -> &str {
            "proj-1"
        }

        fn webhook_url(&self) -> &str {
            &self.webhook_url
        }

        fn link_prefix(&self) -> &str {
            "EMPIRE"
        }

        fn page_size(&self) -> u32 {
            100
        }

        fn lookback_days(&self) -> u32 {
            30
        }
    }

    fn pipeline(server: &MockServer) -> StatsPipeline<MockConfig> {
        StatsPipeline::new(MockConfig::new(server)).unwrap()
    }

    #[tokio::test]
    async fn test_list_sends_auth_and_query_parameters() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/links")
                .query_param("project_id", "proj-1")
                .query_param("page_size", "100")
                .header("authorization", "Bearer secret-token");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!([{"id": "1", "name": "EMPIRE-a"}]));
        });

        let result = pipeline(&server).list().await.unwrap();

        api_mock.assert();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "EMPIRE-a");
    }

    #[tokio::test]
    async fn test_list_accepts_wrapped_envelopes() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/v1/links");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"items": [
                    {"id": "1", "name": "EMPIRE-a", "clicks": 120},
                    {"id": "2", "name": "EMPIRE-b"}
                ]}));
        });

        let result = pipeline(&server).list().await.unwrap();

        api_mock.assert();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].clicks_direct, Some(120));
        assert_eq!(result[1].clicks_direct, None);
    }

    #[tokio::test]
    async fn test_list_filter_is_an_anchored_prefix_match() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/links");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!([
                    {"id": "1", "name": "EMPIRE-a"},
                    {"id": "2", "name": "other-EMPIRE"},
                    {"id": "3", "name": "empire-lower"},
                    {"id": "4", "name": "EMPIREb"}
                ]));
        });

        let result = pipeline(&server).list().await.unwrap();

        let names: Vec<&str> = result.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["EMPIRE-a", "EMPIREb"]);
    }

    #[tokio::test]
    async fn test_list_unknown_object_shape_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/links");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"results": []}));
        });

        let result = pipeline(&server).list().await;
        assert!(matches!(
            result,
            Err(ReportError::MalformedResponseError { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_http_failure_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/links");
            then.status(500);
        });

        let result = pipeline(&server).list().await;
        assert!(matches!(result, Err(ReportError::ApiError(_))));
    }

    #[tokio::test]
    async fn test_aggregate_uses_direct_count_without_stats_request() {
        let server = MockServer::start();
        let stats_mock = server.mock(|when, then| {
            when.method(GET).path("/v1/stats/links/1");
            then.status(200).json_body(json!([{"total_clicks": 999}]));
        });

        let links = vec![Link {
            id: "1".to_string(),
            name: "EMPIRE-a".to_string(),
            clicks_direct: Some(120),
        }];
        let result = pipeline(&server).aggregate(links).await;

        stats_mock.assert_hits(0);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].clicks, 120);
    }

    #[tokio::test]
    async fn test_aggregate_sums_period_entries() {
        let server = MockServer::start();
        let stats_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/stats/links/1")
                .query_param_exists("start_date")
                .query_param_exists("end_date")
                .header("authorization", "Bearer secret-token");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!([{"total_clicks": 10}, {"total_clicks": 15}]));
        });

        let links = vec![Link {
            id: "1".to_string(),
            name: "EMPIRE-a".to_string(),
            clicks_direct: None,
        }];
        let result = pipeline(&server).aggregate(links).await;

        stats_mock.assert();
        assert_eq!(result[0].clicks, 25);
    }

    #[tokio::test]
    async fn test_aggregate_accepts_summary_object() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/stats/links/1");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"total_clicks": 42}));
        });

        let links = vec![Link {
            id: "1".to_string(),
            name: "EMPIRE-a".to_string(),
            clicks_direct: None,
        }];
        let result = pipeline(&server).aggregate(links).await;

        assert_eq!(result[0].clicks, 42);
    }

    #[tokio::test]
    async fn test_aggregate_degrades_failed_link_to_zero() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/stats/links/1");
            then.status(404);
        });
        server.mock(|when, then| {
            when.method(GET).path("/v1/stats/links/2");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!([{"total_clicks": 25}]));
        });

        let links = vec![
            Link {
                id: "1".to_string(),
                name: "EMPIRE-a".to_string(),
                clicks_direct: None,
            },
            Link {
                id: "2".to_string(),
                name: "EMPIRE-b".to_string(),
                clicks_direct: None,
            },
        ];
        let result = pipeline(&server).aggregate(links).await;

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].clicks, 0);
        assert_eq!(result[1].clicks, 25);
    }

    #[tokio::test]
    async fn test_aggregate_degrades_malformed_stats_to_zero() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/stats/links/1");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!("not a stats payload"));
        });

        let links = vec![Link {
            id: "1".to_string(),
            name: "EMPIRE-a".to_string(),
            clicks_direct: None,
        }];
        let result = pipeline(&server).aggregate(links).await;

        assert_eq!(result[0].clicks, 0);
    }

    #[tokio::test]
    async fn test_notify_posts_content_and_username() {
        let server = MockServer::start();
        let report = Report::new(vec![LinkStat {
            name: "EMPIRE-a".to_string(),
            clicks: 120,
        }]);
        let expected = message::render_report(&report, "EMPIRE", Utc::now().date_naive());

        let webhook_mock = server.mock(|when, then| {
            when.method(POST).path("/webhook").json_body(json!({
                "content": expected,
                "username": "Tap.it Stats Bot",
            }));
            then.status(204);
        });

        pipeline(&server).notify(&report).await.unwrap();

        webhook_mock.assert();
    }

    #[tokio::test]
    async fn test_notify_failure_status_is_a_delivery_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/webhook");
            then.status(403);
        });

        let report = Report::new(vec![]);
        let result = pipeline(&server).notify(&report).await;

        assert!(matches!(
            result,
            Err(ReportError::DeliveryError { status: 403 })
        ));
    }
}
