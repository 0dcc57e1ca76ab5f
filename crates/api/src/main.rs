use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use platewatch_core::domain::report::Report;
use platewatch_core::domain::snapshot::RawSnapshot;
use platewatch_core::error::ReportError;
use platewatch_core::pipeline;
use platewatch_core::report::service::{GenerateOptions, ReportService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = platewatch_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let service = Arc::new(ReportService::from_settings(&settings)?);
    let state = AppState { service };

    let app = Router::new()
        .route("/health", get(health))
        .route("/generate-report", post(generate_report))
        .route("/report/:report_id", get(get_report))
        .route("/report/:report_id/download", get(download_report))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // The capture extension posts from the platform's origin.
        .layer(CorsLayer::permissive());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3001);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[derive(Clone)]
struct AppState {
    service: Arc<ReportService>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateReportRequest {
    #[serde(default)]
    captured_data: Vec<RawSnapshot>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateReportResponse {
    success: bool,
    report_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email_sent: Option<bool>,
}

#[derive(Debug, Serialize)]
struct ReportResponse {
    success: bool,
    report: Report,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn error_response(status: StatusCode, error: &str, message: Option<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            success: false,
            error: error.to_string(),
            message,
        }),
    )
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn generate_report(
    State(state): State<AppState>,
    Json(request): Json<GenerateReportRequest>,
) -> Result<Json<GenerateReportResponse>, ApiError> {
    let restaurant_data = pipeline::process_captured_data(&request.captured_data)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, &e.to_string(), None))?;

    let options = GenerateOptions {
        email: request.email,
    };

    match state.service.generate(restaurant_data, options).await {
        Ok(outcome) => Ok(Json(GenerateReportResponse {
            success: true,
            report_id: outcome.report_id,
            download_url: outcome.download_url,
            email_sent: outcome.email_sent,
        })),
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "report generation failed");
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate report",
                Some(format!("{e:#}")),
            ))
        }
    }
}

async fn get_report(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
) -> Result<Json<ReportResponse>, ApiError> {
    let report_id = parse_report_id(&report_id)?;
    let report = state.service.get_report(report_id).map_err(|e| {
        error_response(StatusCode::NOT_FOUND, &e.to_string(), None)
    })?;

    Ok(Json(ReportResponse {
        success: true,
        report,
    }))
}

async fn download_report(
    State(state): State<AppState>,
    Path(report_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let report_id = parse_report_id(&report_id)?;
    let artifact = state.service.get_artifact(report_id).map_err(|e| {
        error_response(StatusCode::NOT_FOUND, &e.to_string(), None)
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, artifact.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", artifact.file_name),
            ),
        ],
        artifact.bytes,
    ))
}

// A malformed id can only ever miss the store, so it maps to the same
// not-found class as an unknown one.
fn parse_report_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| {
        error_response(
            StatusCode::NOT_FOUND,
            &ReportError::ReportNotFound.to_string(),
            None,
        )
    })
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(
    settings: &platewatch_core::config::Settings,
) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
