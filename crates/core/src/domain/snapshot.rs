use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One timestamped page capture from the browser extension. The scraper is a
/// best-effort producer: any fragment may be missing, numbers may arrive as
/// strings, and whole records may be empty. Nothing here is trusted beyond
/// its shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSnapshot {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub data: Option<SnapshotData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotData {
    #[serde(default)]
    pub restaurant: Option<RestaurantFragment>,
    #[serde(default)]
    pub sales: Option<SalesFragment>,
    #[serde(default)]
    pub ads: Option<AdsFragment>,
    #[serde(default)]
    pub promotions: Option<Vec<PromotionFragment>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantFragment {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesFragment {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_sales: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_orders: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub net_delivery_gross: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdsFragment {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ad_spend: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ad_sales: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ad_orders: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub impressions: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub clicks: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionFragment {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub spend: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub sales: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub orders: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub roi: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub redemptions: Option<f64>,
}

/// Accepts a JSON number or a numeric string; anything else (null, objects,
/// garbage text) degrades to `None` rather than failing the whole batch.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
