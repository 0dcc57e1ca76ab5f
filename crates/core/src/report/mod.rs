pub mod service;
pub mod store;

use chrono::Utc;

use crate::domain::report::{Report, RestaurantData};
use crate::pipeline::{recommend, summary};

/// Composes the immutable report value: whole-period summary plus the
/// rule-based recommendations. Id assignment and persistence happen in the
/// service; the report itself carries no identifier.
pub fn build_report(data: &RestaurantData) -> Report {
    let summary = summary::summarize(data);
    let recommendations = recommend::generate_recommendations(&summary);

    Report {
        restaurant_id: data.restaurant_id.clone(),
        restaurant_name: data.restaurant_name.clone(),
        period: data.period,
        summary,
        recommendations,
        generated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::RawSnapshot;
    use crate::pipeline;
    use serde_json::json;

    #[test]
    fn report_carries_identity_period_and_bounded_recommendations() {
        let captured: Vec<RawSnapshot> = vec![serde_json::from_value(json!({
            "timestamp": "2024-01-01T09:00:00Z",
            "data": {
                "restaurant": {"id": "r-1", "name": "Golden Bowl"},
                "ads": {"adSpend": 100, "adSales": 400},
            },
        }))
        .unwrap()];

        let data = pipeline::process_captured_data(&captured).unwrap();
        let report = build_report(&data);

        assert_eq!(report.restaurant_name, "Golden Bowl");
        assert_eq!(report.period, data.period);
        assert_eq!(report.summary.ad_roi, 300.0);
        assert!(report.recommendations[0].contains("performing excellently"));
        assert!((1..=3).contains(&report.recommendations.len()));
    }
}
