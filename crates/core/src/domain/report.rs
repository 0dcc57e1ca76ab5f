use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::metrics::{DailyAdMetric, DailySalesMetric, PromotionRecord};

/// Calendar window covered by a capture batch, min/max over all parseable
/// snapshot timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Full aggregation output for one restaurant over one capture window.
/// Immutable once built; owned by the pipeline run that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantData {
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub period: PeriodWindow,
    pub sales: Vec<DailySalesMetric>,
    pub ads: Vec<DailyAdMetric>,
    pub promotions: Vec<PromotionRecord>,
    pub captured_at: DateTime<Utc>,
}

/// Whole-period totals and ratios, computed once over the aggregated arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_sales: f64,
    pub total_orders: f64,
    pub average_basket: f64,
    pub net_delivery_gross: f64,
    pub net_delivery_gross_percentage: f64,
    pub total_ad_spend: f64,
    pub total_ad_sales: f64,
    #[serde(rename = "adROI")]
    pub ad_roi: f64,
    pub total_promotion_spend: f64,
    pub total_promotion_sales: f64,
    #[serde(rename = "promotionROI")]
    pub promotion_roi: f64,
}

/// The generated analytical artifact for one restaurant over one period.
/// Carries between 1 and 3 recommendations, always.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub period: PeriodWindow,
    pub summary: AnalyticsSummary,
    pub recommendations: Vec<String>,
    pub generated_at: DateTime<Utc>,
}
