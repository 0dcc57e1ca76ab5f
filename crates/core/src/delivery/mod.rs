use anyhow::{Context, Result};
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::Settings;
use crate::domain::report::Report;
use crate::render::RenderedArtifact;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PATH: &str = "/v1/send";
const DEFAULT_RETRIES: u32 = 3;
const DEFAULT_FROM: &str = "noreply@restaurant-analytics.local";

/// Delivery side effect for a finished report. Failures here never fail the
/// generation that requested them; the caller records `email_sent: false` and
/// moves on.
#[async_trait::async_trait]
pub trait ReportMailer: Send + Sync {
    fn mailer_name(&self) -> &'static str;

    async fn send_report(
        &self,
        to: &str,
        report: &Report,
        html_body: &str,
        attachment: Option<&RenderedArtifact>,
    ) -> Result<()>;
}

/// Posts the rendered report to a JSON mail API. Endpoint, credentials and
/// retry budget come from Settings and environment overrides.
#[derive(Debug, Clone)]
pub struct HttpMailerClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    from: String,
    path: String,
    retries: u32,
}

impl HttpMailerClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings.require_mail_api_base_url()?.to_string();
        let api_key = settings.mail_api_key.clone();
        let from = settings
            .mail_from
            .clone()
            .unwrap_or_else(|| DEFAULT_FROM.to_string());

        let timeout_secs = std::env::var("MAIL_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let retries = std::env::var("MAIL_API_RETRIES")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_RETRIES);

        let path = std::env::var("MAIL_API_SEND_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PATH.to_string());

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build mail api http client")?;

        Ok(Self {
            http,
            base_url,
            api_key,
            from,
            path,
            retries,
        })
    }

    fn url(&self) -> String {
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };

        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &self.api_key {
            headers.insert("x-api-key", HeaderValue::from_str(api_key)?);
        }
        Ok(headers)
    }

    fn payload(
        &self,
        to: &str,
        report: &Report,
        html_body: &str,
        attachment: Option<&RenderedArtifact>,
    ) -> Value {
        let mut payload = json!({
            "from": self.from,
            "to": to,
            "subject": format!("Restaurant Analytics Report - {}", report.restaurant_name),
            "html": html_body,
        });
        if let Some(artifact) = attachment {
            payload["attachments"] = json!([{
                "filename": artifact.file_name,
                "contentType": artifact.content_type,
                "content": base64::engine::general_purpose::STANDARD.encode(&artifact.bytes),
            }]);
        }
        payload
    }
}

#[async_trait::async_trait]
impl ReportMailer for HttpMailerClient {
    fn mailer_name(&self) -> &'static str {
        "http_mail_api"
    }

    async fn send_report(
        &self,
        to: &str,
        report: &Report,
        html_body: &str,
        attachment: Option<&RenderedArtifact>,
    ) -> Result<()> {
        let url = self.url();
        let headers = self.headers()?;
        let payload = self.payload(to, report, html_body, attachment);

        let mut last_err: Option<anyhow::Error> = None;
        for attempt in 1..=self.retries.max(1) {
            let result = self
                .http
                .post(url.as_str())
                .headers(headers.clone())
                .json(&payload)
                .send()
                .await;

            match result {
                Ok(response) => match response.error_for_status() {
                    Ok(_) => return Ok(()),
                    Err(e) => {
                        tracing::warn!(attempt, error = %e, "mail api rejected request");
                        last_err = Some(anyhow::Error::new(e));
                    }
                },
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "mail api request failed");
                    last_err = Some(anyhow::Error::new(e));
                }
            }
        }

        Err(last_err
            .unwrap_or_else(|| anyhow::anyhow!("mail api request failed"))
            .context(format!("sending report email via {url} failed")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::{AnalyticsSummary, PeriodWindow};
    use chrono::{NaiveDate, Utc};

    fn client(base_url: &str, path: &str) -> HttpMailerClient {
        HttpMailerClient {
            http: reqwest::Client::new(),
            base_url: base_url.to_string(),
            api_key: None,
            from: DEFAULT_FROM.to_string(),
            path: path.to_string(),
            retries: 1,
        }
    }

    fn report() -> Report {
        Report {
            restaurant_id: "r-1".to_string(),
            restaurant_name: "Golden Bowl".to_string(),
            period: PeriodWindow {
                start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            },
            summary: AnalyticsSummary {
                total_sales: 0.0,
                total_orders: 0.0,
                average_basket: 0.0,
                net_delivery_gross: 0.0,
                net_delivery_gross_percentage: 0.0,
                total_ad_spend: 0.0,
                total_ad_sales: 0.0,
                ad_roi: 0.0,
                total_promotion_spend: 0.0,
                total_promotion_sales: 0.0,
                promotion_roi: 0.0,
            },
            recommendations: vec!["Keep going.".to_string()],
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn url_joins_base_and_path() {
        assert_eq!(
            client("https://mail.example.com/", "/v1/send").url(),
            "https://mail.example.com/v1/send"
        );
        assert_eq!(
            client("https://mail.example.com", "v1/send").url(),
            "https://mail.example.com/v1/send"
        );
    }

    #[test]
    fn payload_carries_subject_and_optional_attachment() {
        let c = client("https://mail.example.com", "/v1/send");
        let report = report();

        let bare = c.payload("owner@example.com", &report, "<html/>", None);
        assert_eq!(
            bare["subject"],
            "Restaurant Analytics Report - Golden Bowl"
        );
        assert!(bare.get("attachments").is_none());

        let artifact = RenderedArtifact {
            content_type: "text/plain; charset=utf-8",
            file_name: "restaurant-report-x.txt".to_string(),
            bytes: b"hello".to_vec(),
        };
        let with = c.payload("owner@example.com", &report, "<html/>", Some(&artifact));
        assert_eq!(with["attachments"][0]["filename"], "restaurant-report-x.txt");
        assert_eq!(with["attachments"][0]["content"], "aGVsbG8=");
    }
}
