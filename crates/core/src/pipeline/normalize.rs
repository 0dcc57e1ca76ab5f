use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::snapshot::{
    AdsFragment, PromotionFragment, RawSnapshot, RestaurantFragment, SalesFragment,
};

/// A captured record reduced to its usable parts: a UTC calendar date (when
/// the timestamp parses) plus borrowed fragments. Pure view, no side effects.
#[derive(Debug, Clone, Copy)]
pub struct Observation<'a> {
    pub date: Option<NaiveDate>,
    pub restaurant: Option<&'a RestaurantFragment>,
    pub sales: Option<&'a SalesFragment>,
    pub ads: Option<&'a AdsFragment>,
    pub promotions: &'a [PromotionFragment],
}

pub fn normalize(raw: &RawSnapshot) -> Observation<'_> {
    let data = raw.data.as_ref();
    Observation {
        date: capture_date(raw),
        restaurant: data.and_then(|d| d.restaurant.as_ref()),
        sales: data.and_then(|d| d.sales.as_ref()),
        ads: data.and_then(|d| d.ads.as_ref()),
        promotions: data
            .and_then(|d| d.promotions.as_deref())
            .unwrap_or_default(),
    }
}

/// Truncates the snapshot timestamp to its UTC calendar date. Accepts RFC
/// 3339 with a bare-date fallback; anything else yields `None` and the
/// snapshot drops out of date-keyed aggregation.
pub fn capture_date(raw: &RawSnapshot) -> Option<NaiveDate> {
    let ts = raw.timestamp.as_deref()?.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    NaiveDate::parse_from_str(ts, "%Y-%m-%d").ok()
}
