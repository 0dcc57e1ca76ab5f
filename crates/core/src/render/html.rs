use std::fmt::Write;

use uuid::Uuid;

use crate::domain::report::Report;
use crate::render::{format_count, format_currency, RenderSink};

/// HTML variant of the report document, also used as the email body. Renders
/// the identical data with the same conditional-block logic as the text sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl RenderSink for HtmlRenderer {
    fn content_type(&self) -> &'static str {
        "text/html; charset=utf-8"
    }

    fn file_name(&self, report_id: Uuid) -> String {
        format!("restaurant-report-{report_id}.html")
    }

    fn render(&self, report: &Report) -> anyhow::Result<Vec<u8>> {
        Ok(render_email(report)?.into_bytes())
    }
}

pub fn render_email(report: &Report) -> Result<String, std::fmt::Error> {
    let summary = &report.summary;
    let mut html = String::new();

    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html>")?;
    writeln!(
        html,
        "<head><style>\
         body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}\
         .header {{ background: #00D4AA; color: white; padding: 20px; text-align: center; }}\
         .content {{ padding: 20px; }}\
         .metric {{ background: #f8f9fa; padding: 15px; margin: 10px 0; border-radius: 5px; }}\
         .recommendation {{ background: #e3f2fd; padding: 15px; margin: 10px 0; border-radius: 5px; }}\
         .footer {{ background: #f8f9fa; padding: 20px; text-align: center; font-size: 12px; color: #666; }}\
         </style></head>"
    )?;
    writeln!(html, "<body>")?;

    writeln!(html, "<div class=\"header\">")?;
    writeln!(html, "<h1>Restaurant Analytics Report</h1>")?;
    writeln!(html, "<h2>{}</h2>", escape(&report.restaurant_name))?;
    writeln!(
        html,
        "<p>Period: {} to {}</p>",
        report.period.start_date, report.period.end_date
    )?;
    writeln!(html, "</div>")?;

    writeln!(html, "<div class=\"content\">")?;
    writeln!(html, "<h3>Performance Summary</h3>")?;
    metric_row(&mut html, "Total Sales", &format_currency(summary.total_sales))?;
    metric_row(&mut html, "Total Orders", &format_count(summary.total_orders))?;
    metric_row(
        &mut html,
        "Average Basket",
        &format!("${:.2}", summary.average_basket),
    )?;
    metric_row(
        &mut html,
        "Net Delivery Gross",
        &format!(
            "{} ({:.1}%)",
            format_currency(summary.net_delivery_gross),
            summary.net_delivery_gross_percentage
        ),
    )?;

    if summary.total_ad_spend > 0.0 {
        writeln!(html, "<h3>Advertising Performance</h3>")?;
        metric_row(&mut html, "Ad Spend", &format_currency(summary.total_ad_spend))?;
        metric_row(&mut html, "Ad Sales", &format_currency(summary.total_ad_sales))?;
        metric_row(&mut html, "Ad ROI", &format!("{:.1}%", summary.ad_roi))?;
    }

    if summary.total_promotion_spend > 0.0 {
        writeln!(html, "<h3>Promotion Performance</h3>")?;
        metric_row(
            &mut html,
            "Promotion Spend",
            &format_currency(summary.total_promotion_spend),
        )?;
        metric_row(
            &mut html,
            "Promotion Sales",
            &format_currency(summary.total_promotion_sales),
        )?;
        metric_row(
            &mut html,
            "Promotion ROI",
            &format!("{:.1}%", summary.promotion_roi),
        )?;
    }

    writeln!(html, "<h3>Recommendations</h3>")?;
    for recommendation in &report.recommendations {
        writeln!(
            html,
            "<div class=\"recommendation\">{}</div>",
            escape(recommendation)
        )?;
    }
    writeln!(html, "</div>")?;

    writeln!(html, "<div class=\"footer\">")?;
    writeln!(
        html,
        "<p>Generated on {}</p>",
        report.generated_at.to_rfc3339()
    )?;
    writeln!(html, "<p>Restaurant Analytics Tool</p>")?;
    writeln!(html, "</div>")?;

    writeln!(html, "</body>")?;
    writeln!(html, "</html>")?;

    Ok(html)
}

fn metric_row(html: &mut String, label: &str, value: &str) -> std::fmt::Result {
    writeln!(
        html,
        "<div class=\"metric\"><strong>{}:</strong> {}</div>",
        escape(label),
        escape(value)
    )
}

// Minimal escaping; the restaurant name and recommendations are the only
// free-text fields that reach the markup.
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
