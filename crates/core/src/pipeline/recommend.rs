use crate::domain::report::AnalyticsSummary;

const MAX_RECOMMENDATIONS: usize = 3;

/// Deterministic rule table over the period summary. Categories are evaluated
/// in a fixed order (ad ROI, promotion ROI, NDG%), each category emits at
/// most one message, and the final list is truncated to the first three in
/// that order. A summary that trips no rule gets one generic fallback, so the
/// result always holds 1..=3 entries.
pub fn generate_recommendations(summary: &AnalyticsSummary) -> Vec<String> {
    let mut recommendations = Vec::new();

    if summary.ad_roi > 200.0 {
        recommendations.push(format!(
            "Your ads are performing excellently ({:.0}% ROI). Consider increasing your ad budget to scale successful campaigns.",
            summary.ad_roi
        ));
    } else if summary.ad_roi > 100.0 {
        recommendations.push(format!(
            "Your ads are profitable ({:.0}% ROI). Monitor performance and consider moderate budget increases.",
            summary.ad_roi
        ));
    } else if summary.ad_roi > 0.0 {
        recommendations.push(format!(
            "Your ads are barely profitable ({:.0}% ROI). Review targeting and creative to improve performance.",
            summary.ad_roi
        ));
    } else if summary.total_ad_spend > 0.0 {
        recommendations.push(format!(
            "Your ads are losing money ({:.0}% ROI). Consider pausing campaigns and optimizing before restarting.",
            summary.ad_roi
        ));
    }

    if summary.promotion_roi > 300.0 {
        recommendations.push(format!(
            "Your promotions are highly effective ({:.0}% ROI). Scale successful offers and test similar promotions.",
            summary.promotion_roi
        ));
    } else if summary.promotion_roi > 100.0 {
        recommendations.push(format!(
            "Your promotions are working well ({:.0}% ROI). Continue with current strategy and test new offers.",
            summary.promotion_roi
        ));
    } else if summary.promotion_roi > 0.0 {
        recommendations.push(format!(
            "Your promotions need optimization ({:.0}% ROI). Review offer terms and targeting.",
            summary.promotion_roi
        ));
    } else if summary.total_promotion_spend > 0.0 {
        recommendations.push(format!(
            "Your promotions are not profitable ({:.0}% ROI). Consider pausing and redesigning offers.",
            summary.promotion_roi
        ));
    }

    // NDG% is only meaningful once there are sales; without the guard an
    // all-zero period would read as "low NDG" instead of "no data".
    if summary.total_sales > 0.0 {
        if summary.net_delivery_gross_percentage < 70.0 {
            recommendations.push(format!(
                "Your Net Delivery Gross is low ({:.1}%). Consider optimizing menu pricing or reducing delivery fees.",
                summary.net_delivery_gross_percentage
            ));
        } else if summary.net_delivery_gross_percentage > 85.0 {
            recommendations.push(format!(
                "Excellent Net Delivery Gross ({:.1}%). Your pricing strategy is working well.",
                summary.net_delivery_gross_percentage
            ));
        }
    }

    if recommendations.is_empty() {
        recommendations.push(
            "Continue monitoring your performance metrics. Focus on improving ad ROI and promotion effectiveness."
                .to_string(),
        );
    }

    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> AnalyticsSummary {
        AnalyticsSummary {
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
        }
    }

    #[test]
    fn all_zero_summary_gets_exactly_the_fallback() {
        let recs = generate_recommendations(&summary());
        assert_eq!(recs.len(), 1);
        assert!(recs[0].starts_with("Continue monitoring"));
    }

    #[test]
    fn ad_roi_bands_are_mutually_exclusive() {
        let mut s = summary();
        s.total_ad_spend = 100.0;

        s.ad_roi = 300.0;
        assert!(generate_recommendations(&s)[0].contains("performing excellently"));

        // Exactly 200 falls into the profitable band, not excellent.
        s.ad_roi = 200.0;
        assert!(generate_recommendations(&s)[0].contains("are profitable"));

        s.ad_roi = 50.0;
        assert!(generate_recommendations(&s)[0].contains("barely profitable"));

        s.ad_roi = -40.0;
        assert!(generate_recommendations(&s)[0].contains("losing money"));
    }

    #[test]
    fn negative_ad_roi_without_spend_is_silent() {
        let mut s = summary();
        s.ad_roi = 0.0;
        s.total_ad_spend = 0.0;
        let recs = generate_recommendations(&s);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].starts_with("Continue monitoring"));
    }

    #[test]
    fn promotion_bands_follow_ad_messages_in_order() {
        let mut s = summary();
        s.total_ad_spend = 100.0;
        s.ad_roi = 300.0;
        s.total_promotion_spend = 50.0;
        s.promotion_roi = 400.0;

        let recs = generate_recommendations(&s);
        assert_eq!(recs.len(), 2);
        assert!(recs[0].contains("ads"));
        assert!(recs[1].contains("promotions are highly effective"));
    }

    #[test]
    fn ndg_fires_only_with_sales() {
        let mut s = summary();
        s.total_sales = 1000.0;
        s.net_delivery_gross = 500.0;
        s.net_delivery_gross_percentage = 50.0;
        let recs = generate_recommendations(&s);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("Net Delivery Gross is low (50.0%)"));

        s.net_delivery_gross_percentage = 90.0;
        assert!(generate_recommendations(&s)[0].contains("Excellent Net Delivery Gross"));

        // 70..=85 is the quiet band.
        s.net_delivery_gross_percentage = 75.0;
        assert!(generate_recommendations(&s)[0].starts_with("Continue monitoring"));
    }

    #[test]
    fn never_more_than_three_and_never_zero() {
        let mut s = summary();
        s.total_sales = 1000.0;
        s.total_ad_spend = 100.0;
        s.ad_roi = 250.0;
        s.total_promotion_spend = 50.0;
        s.promotion_roi = 350.0;
        s.net_delivery_gross_percentage = 40.0;

        let recs = generate_recommendations(&s);
        assert_eq!(recs.len(), 3);

        let empty = generate_recommendations(&summary());
        assert!(!empty.is_empty());
    }
}
