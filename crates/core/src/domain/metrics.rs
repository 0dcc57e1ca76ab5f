use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-day sales rollup. Ratios are derived once after all observations for
/// the day are summed, never incrementally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySalesMetric {
    pub date: NaiveDate,
    pub total_sales: f64,
    pub total_orders: f64,
    pub average_basket: f64,
    pub net_delivery_gross: f64,
    pub net_delivery_gross_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAdMetric {
    pub date: NaiveDate,
    pub ad_spend: f64,
    pub ad_sales: f64,
    pub ad_orders: f64,
    #[serde(rename = "adROI")]
    pub ad_roi: f64,
    pub impressions: f64,
    pub clicks: f64,
    pub ctr: f64,
    pub cpc: f64,
}

/// One record per promotion mention per snapshot; never merged across days or
/// snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionRecord {
    pub date: NaiveDate,
    pub promotion_name: String,
    pub promotion_type: PromotionType,
    pub promotion_spend: f64,
    pub promotion_sales: f64,
    pub promotion_orders: f64,
    #[serde(rename = "promotionROI")]
    pub promotion_roi: f64,
    pub redemption_count: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionType {
    Discount,
    FreeDelivery,
    Bogo,
    Other,
}

impl PromotionType {
    /// Maps the scraper's free-text promotion type; unknown or missing values
    /// collapse to `Other`.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("discount") => PromotionType::Discount,
            Some("free_delivery") => PromotionType::FreeDelivery,
            Some("bogo") => PromotionType::Bogo,
            _ => PromotionType::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotion_type_defaults_to_other() {
        assert_eq!(PromotionType::from_raw(None), PromotionType::Other);
        assert_eq!(PromotionType::from_raw(Some("flash_sale")), PromotionType::Other);
        assert_eq!(
            PromotionType::from_raw(Some("free_delivery")),
            PromotionType::FreeDelivery
        );
    }

    #[test]
    fn metric_serializes_with_wire_names() {
        let metric = DailyAdMetric {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ad_spend: 100.0,
            ad_sales: 400.0,
            ad_orders: 10.0,
            ad_roi: 300.0,
            impressions: 5000.0,
            clicks: 50.0,
            ctr: 1.0,
            cpc: 2.0,
        };
        let value = serde_json::to_value(&metric).unwrap();
        assert_eq!(value["adROI"], 300.0);
        assert_eq!(value["adSpend"], 100.0);
        assert_eq!(value["date"], "2024-01-01");
    }
}
