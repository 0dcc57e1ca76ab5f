use std::fmt::Write;

use uuid::Uuid;

use crate::domain::report::Report;
use crate::render::{format_count, format_currency, RenderSink};

/// Plain-text document sink: title and identity, the five-row performance
/// summary, conditional advertising and promotion blocks, the numbered
/// recommendation list and a generation footer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl RenderSink for TextRenderer {
    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn file_name(&self, report_id: Uuid) -> String {
        format!("restaurant-report-{report_id}.txt")
    }

    fn render(&self, report: &Report) -> anyhow::Result<Vec<u8>> {
        let mut out = String::new();
        let summary = &report.summary;

        writeln!(out, "Restaurant Analytics Report")?;
        writeln!(out, "{}", report.restaurant_name)?;
        writeln!(
            out,
            "Period: {} to {}",
            report.period.start_date, report.period.end_date
        )?;
        writeln!(out)?;

        writeln!(out, "Performance Summary")?;
        writeln!(out, "  Total Sales:        {}", format_currency(summary.total_sales))?;
        writeln!(out, "  Total Orders:       {}", format_count(summary.total_orders))?;
        writeln!(out, "  Average Basket:     ${:.2}", summary.average_basket)?;
        writeln!(
            out,
            "  Net Delivery Gross: {}",
            format_currency(summary.net_delivery_gross)
        )?;
        writeln!(
            out,
            "  NDG Percentage:     {:.1}%",
            summary.net_delivery_gross_percentage
        )?;

        if summary.total_ad_spend > 0.0 {
            writeln!(out)?;
            writeln!(out, "Advertising Performance")?;
            writeln!(out, "  Ad Spend: {}", format_currency(summary.total_ad_spend))?;
            writeln!(out, "  Ad Sales: {}", format_currency(summary.total_ad_sales))?;
            writeln!(out, "  Ad ROI:   {:.1}%", summary.ad_roi)?;
        }

        if summary.total_promotion_spend > 0.0 {
            writeln!(out)?;
            writeln!(out, "Promotion Performance")?;
            writeln!(
                out,
                "  Promotion Spend: {}",
                format_currency(summary.total_promotion_spend)
            )?;
            writeln!(
                out,
                "  Promotion Sales: {}",
                format_currency(summary.total_promotion_sales)
            )?;
            writeln!(out, "  Promotion ROI:   {:.1}%", summary.promotion_roi)?;
        }

        writeln!(out)?;
        writeln!(out, "Recommendations")?;
        for (i, recommendation) in report.recommendations.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, recommendation)?;
        }

        writeln!(out)?;
        writeln!(out, "Generated on {}", report.generated_at.to_rfc3339())?;

        Ok(out.into_bytes())
    }
}
