use crate::domain::report::{AnalyticsSummary, RestaurantData};
use crate::pipeline::aggregate::{guarded_div, roi_percent};

/// Folds the aggregated per-day series into whole-period totals, then
/// recomputes each ratio once over the totals. Averaging the per-day ratios
/// instead would weight low-volume days the same as high-volume ones.
pub fn summarize(data: &RestaurantData) -> AnalyticsSummary {
    let total_sales: f64 = data.sales.iter().map(|s| s.total_sales).sum();
    let total_orders: f64 = data.sales.iter().map(|s| s.total_orders).sum();
    let net_delivery_gross: f64 = data.sales.iter().map(|s| s.net_delivery_gross).sum();

    let total_ad_spend: f64 = data.ads.iter().map(|a| a.ad_spend).sum();
    let total_ad_sales: f64 = data.ads.iter().map(|a| a.ad_sales).sum();

    let total_promotion_spend: f64 = data.promotions.iter().map(|p| p.promotion_spend).sum();
    let total_promotion_sales: f64 = data.promotions.iter().map(|p| p.promotion_sales).sum();

    AnalyticsSummary {
        total_sales,
        total_orders,
        average_basket: guarded_div(total_sales, total_orders),
        net_delivery_gross,
        net_delivery_gross_percentage: guarded_div(net_delivery_gross, total_sales) * 100.0,
        total_ad_spend,
        total_ad_sales,
        ad_roi: roi_percent(total_ad_sales, total_ad_spend),
        total_promotion_spend,
        total_promotion_sales,
        promotion_roi: roi_percent(total_promotion_sales, total_promotion_spend),
    }
}
