pub mod html;
pub mod text;

use uuid::Uuid;

use crate::domain::report::Report;

/// A rendered report document, kept in memory for the life of the process and
/// keyed 1:1 by report id.
#[derive(Debug, Clone)]
pub struct RenderedArtifact {
    pub content_type: &'static str,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Pure document producer over a finished [`Report`]. Sinks never recompute
/// or mutate business data; everything they need is already on the value.
pub trait RenderSink: Send + Sync {
    fn content_type(&self) -> &'static str;

    fn file_name(&self, report_id: Uuid) -> String;

    fn render(&self, report: &Report) -> anyhow::Result<Vec<u8>>;
}

pub(crate) fn format_currency(value: f64) -> String {
    format!("${}", group_thousands(value))
}

pub(crate) fn format_count(value: f64) -> String {
    group_thousands(value)
}

fn group_thousands(value: f64) -> String {
    let (int_part, frac_part) = if value.fract().abs() < 1e-9 {
        (format!("{:.0}", value.abs()), String::new())
    } else {
        let fixed = format!("{:.2}", value.abs());
        match fixed.split_once('.') {
            Some((i, f)) => (i.to_string(), format!(".{f}")),
            None => (fixed, String::new()),
        }
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1500.0), "1,500");
        assert_eq!(group_thousands(1234567.0), "1,234,567");
    }

    #[test]
    fn keeps_cents_only_when_present() {
        assert_eq!(format_currency(1500.0), "$1,500");
        assert_eq!(format_currency(1500.5), "$1,500.50");
        assert_eq!(group_thousands(-1200.25), "-1,200.25");
    }
}
