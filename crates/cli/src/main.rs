use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use platewatch_core::domain::snapshot::RawSnapshot;
use platewatch_core::pipeline;
use platewatch_core::render::html::HtmlRenderer;
use platewatch_core::render::text::TextRenderer;
use platewatch_core::render::RenderSink;
use platewatch_core::report::service::{GenerateOptions, ReportService};

#[derive(Debug, Parser)]
#[command(name = "platewatch_cli")]
struct Args {
    /// Path to a JSON array of captured snapshots.
    #[arg(long)]
    input: PathBuf,

    /// Also deliver the report to this address (requires MAIL_API_BASE_URL).
    #[arg(long)]
    email: Option<String>,

    /// Document format for the written artifact.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Directory the rendered artifact is written to.
    #[arg(long, default_value = "reports")]
    out_dir: PathBuf,

    /// Aggregate and print the summary without writing or sending anything.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Html,
}

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

    let args = Args::parse();

    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {} failed", args.input.display()))?;
    let captured: Vec<RawSnapshot> =
        serde_json::from_str(&raw).context("input is not a JSON array of snapshots")?;

    let restaurant_data = pipeline::process_captured_data(&captured)?;
    tracing::info!(
        restaurant = %restaurant_data.restaurant_name,
        start = %restaurant_data.period.start_date,
        end = %restaurant_data.period.end_date,
        sales_days = restaurant_data.sales.len(),
        ad_days = restaurant_data.ads.len(),
        promotions = restaurant_data.promotions.len(),
        "capture batch aggregated"
    );

    if args.dry_run {
        let report = platewatch_core::report::build_report(&restaurant_data);
        for (i, recommendation) in report.recommendations.iter().enumerate() {
            tracing::info!(dry_run = true, "recommendation {}: {}", i + 1, recommendation);
        }
        tracing::info!(
            dry_run = true,
            total_sales = report.summary.total_sales,
            total_orders = report.summary.total_orders,
            ad_roi = report.summary.ad_roi,
            "dry-run complete; nothing written"
        );
        return Ok(());
    }

    let document: Box<dyn RenderSink> = match args.format {
        Format::Text => Box::new(TextRenderer),
        Format::Html => Box::new(HtmlRenderer),
    };
    let mailer = if settings.mail_api_base_url.is_some() {
        Some(Box::new(platewatch_core::delivery::HttpMailerClient::from_settings(&settings)?)
            as Box<dyn platewatch_core::delivery::ReportMailer>)
    } else {
        None
    };
    let service = ReportService::new(document, mailer);

    let outcome = service
        .generate(restaurant_data, GenerateOptions { email: args.email })
        .await;

    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            return Err(err);
        }
    };

    let artifact = service.get_artifact(outcome.report_id)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {} failed", args.out_dir.display()))?;
    let path = args.out_dir.join(&artifact.file_name);
    std::fs::write(&path, &artifact.bytes)
        .with_context(|| format!("writing {} failed", path.display()))?;

    tracing::info!(
        report_id = %outcome.report_id,
        path = %path.display(),
        email_sent = ?outcome.email_sent,
        "report written"
    );

    Ok(())
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
