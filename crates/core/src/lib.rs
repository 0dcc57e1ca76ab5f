pub mod delivery;
pub mod domain;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod report;

pub mod config {
    use anyhow::Context;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub mail_api_base_url: Option<String>,
        pub mail_api_key: Option<String>,
        pub mail_from: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                mail_api_base_url: std::env::var("MAIL_API_BASE_URL").ok(),
                mail_api_key: std::env::var("MAIL_API_KEY").ok(),
                mail_from: std::env::var("MAIL_FROM").ok(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        pub fn require_mail_api_base_url(&self) -> anyhow::Result<&str> {
            self.mail_api_base_url
                .as_deref()
                .context("MAIL_API_BASE_URL is required")
        }
    }
}
