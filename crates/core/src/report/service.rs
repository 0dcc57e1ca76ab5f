use uuid::Uuid;

use crate::config::Settings;
use crate::delivery::{HttpMailerClient, ReportMailer};
use crate::domain::report::{Report, RestaurantData};
use crate::error::ReportError;
use crate::render::text::TextRenderer;
use crate::render::{html, RenderSink, RenderedArtifact};
use crate::report::{build_report, store::ReportStore};

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub email: Option<String>,
}

/// What `generate` hands back synchronously. The report body is never part of
/// it; callers fetch the stored value by id.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub report_id: Uuid,
    pub download_url: Option<String>,
    pub email_sent: Option<bool>,
}

/// One instance per process, constructed at startup and passed to request
/// handlers by reference. Owns the store, the document sink and the optional
/// mail delivery client.
pub struct ReportService {
    store: ReportStore,
    document: Box<dyn RenderSink>,
    mailer: Option<Box<dyn ReportMailer>>,
}

impl ReportService {
    pub fn new(document: Box<dyn RenderSink>, mailer: Option<Box<dyn ReportMailer>>) -> Self {
        Self {
            store: ReportStore::default(),
            document,
            mailer,
        }
    }

    /// Text document sink; mail delivery only when MAIL_API_BASE_URL is set.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let mailer: Option<Box<dyn ReportMailer>> = if settings.mail_api_base_url.is_some() {
            Some(Box::new(HttpMailerClient::from_settings(settings)?))
        } else {
            None
        };
        Ok(Self::new(Box::new(TextRenderer), mailer))
    }

    /// Builds and stores the report, renders the document artifact, and
    /// optionally attempts email delivery. Delivery failure is partial
    /// success (`email_sent: Some(false)`); a render failure is an error but
    /// the stored report survives it.
    pub async fn generate(
        &self,
        data: RestaurantData,
        options: GenerateOptions,
    ) -> anyhow::Result<GenerateOutcome> {
        let report = build_report(&data);
        let report_id = Uuid::new_v4();
        self.store.insert(report_id, report.clone());
        tracing::info!(%report_id, restaurant = %report.restaurant_name, "report stored");

        let bytes = self
            .document
            .render(&report)
            .map_err(|e| ReportError::Render(format!("{e:#}")))?;
        self.store.put_artifact(
            report_id,
            RenderedArtifact {
                content_type: self.document.content_type(),
                file_name: self.document.file_name(report_id),
                bytes,
            },
        );
        let download_url = Some(format!("/report/{report_id}/download"));

        let email_sent = match options.email.as_deref() {
            Some(email) => Some(self.deliver_email(email, report_id, &report).await),
            None => None,
        };

        Ok(GenerateOutcome {
            report_id,
            download_url,
            email_sent,
        })
    }

    pub fn get_report(&self, report_id: Uuid) -> Result<Report, ReportError> {
        self.store.get(report_id).ok_or(ReportError::ReportNotFound)
    }

    pub fn get_artifact(&self, report_id: Uuid) -> Result<RenderedArtifact, ReportError> {
        self.store
            .get_artifact(report_id)
            .ok_or(ReportError::ArtifactNotFound)
    }

    async fn deliver_email(&self, email: &str, report_id: Uuid, report: &Report) -> bool {
        let Some(mailer) = &self.mailer else {
            tracing::warn!(%report_id, "email requested but no mailer is configured");
            return false;
        };

        let html_body = match html::render_email(report) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(%report_id, error = %e, "email body render failed");
                return false;
            }
        };

        let attachment = self.store.get_artifact(report_id);
        match mailer
            .send_report(email, report, &html_body, attachment.as_ref())
            .await
        {
            Ok(()) => {
                tracing::info!(%report_id, mailer = mailer.mailer_name(), "report email sent");
                true
            }
            Err(e) => {
                tracing::error!(%report_id, error = %ReportError::Delivery(format!("{e:#}")), "report email delivery failed");
                false
            }
        }
    }
}
