use chrono::NaiveDate;
use std::collections::HashMap;

use crate::domain::metrics::{DailyAdMetric, DailySalesMetric, PromotionRecord, PromotionType};
use crate::domain::report::PeriodWindow;
use crate::pipeline::normalize::Observation;

const UNKNOWN_PROMOTION_NAME: &str = "Unknown Promotion";

/// Groups sales fragments by calendar date and sums them, then derives the
/// per-day ratios in a second pass. Ratios are never accumulated
/// incrementally; summing first keeps the result independent of intermediate
/// rounding.
///
/// Output order is the first-seen order of each date. Hash maps do not
/// guarantee iteration order, so the order lives in the `Vec` and the map
/// only carries indices into it.
pub fn aggregate_sales(observations: &[Observation<'_>]) -> Vec<DailySalesMetric> {
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();
    let mut days: Vec<DailySalesMetric> = Vec::new();

    for obs in observations {
        let (Some(date), Some(sales)) = (obs.date, obs.sales) else {
            continue;
        };
        let slot = *index.entry(date).or_insert_with(|| {
            days.push(DailySalesMetric {
                date,
                total_sales: 0.0,
                total_orders: 0.0,
                average_basket: 0.0,
                net_delivery_gross: 0.0,
                net_delivery_gross_percentage: 0.0,
            });
            days.len() - 1
        });

        let day = &mut days[slot];
        day.total_sales += sales.total_sales.unwrap_or(0.0);
        day.total_orders += sales.total_orders.unwrap_or(0.0);
        day.net_delivery_gross += sales.net_delivery_gross.unwrap_or(0.0);
    }

    for day in &mut days {
        day.average_basket = guarded_div(day.total_sales, day.total_orders);
        day.net_delivery_gross_percentage =
            guarded_div(day.net_delivery_gross, day.total_sales) * 100.0;
    }

    days
}

/// Same grouping pattern as [`aggregate_sales`] for the ad fragments.
pub fn aggregate_ads(observations: &[Observation<'_>]) -> Vec<DailyAdMetric> {
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();
    let mut days: Vec<DailyAdMetric> = Vec::new();

    for obs in observations {
        let (Some(date), Some(ads)) = (obs.date, obs.ads) else {
            continue;
        };
        let slot = *index.entry(date).or_insert_with(|| {
            days.push(DailyAdMetric {
                date,
                ad_spend: 0.0,
                ad_sales: 0.0,
                ad_orders: 0.0,
                ad_roi: 0.0,
                impressions: 0.0,
                clicks: 0.0,
                ctr: 0.0,
                cpc: 0.0,
            });
            days.len() - 1
        });

        let day = &mut days[slot];
        day.ad_spend += ads.ad_spend.unwrap_or(0.0);
        day.ad_sales += ads.ad_sales.unwrap_or(0.0);
        day.ad_orders += ads.ad_orders.unwrap_or(0.0);
        day.impressions += ads.impressions.unwrap_or(0.0);
        day.clicks += ads.clicks.unwrap_or(0.0);
    }

    for day in &mut days {
        day.ad_roi = roi_percent(day.ad_sales, day.ad_spend);
        day.ctr = guarded_div(day.clicks, day.impressions) * 100.0;
        day.cpc = guarded_div(day.ad_spend, day.clicks);
    }

    days
}

/// Flattens every promotion mention into one record per entry. Promotions are
/// deliberately not merged across snapshots or days; the same offer seen on
/// two captures yields two records.
pub fn aggregate_promotions(observations: &[Observation<'_>]) -> Vec<PromotionRecord> {
    let mut records = Vec::new();

    for obs in observations {
        let Some(date) = obs.date else {
            continue;
        };
        for promo in obs.promotions {
            records.push(PromotionRecord {
                date,
                promotion_name: promo
                    .name
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .unwrap_or(UNKNOWN_PROMOTION_NAME)
                    .to_string(),
                promotion_type: PromotionType::from_raw(promo.kind.as_deref()),
                promotion_spend: promo.spend.unwrap_or(0.0),
                promotion_sales: promo.sales.unwrap_or(0.0),
                promotion_orders: promo.orders.unwrap_or(0.0),
                promotion_roi: promo.roi.unwrap_or(0.0),
                redemption_count: promo.redemptions.unwrap_or(0.0),
            });
        }
    }

    records
}

/// Min/max calendar date over all observations with a parseable timestamp.
/// `None` when nothing in the batch carried one; the caller must guard.
///
/// The window spans every timestamped snapshot, including those that carried
/// no data fragment, so it can be wider than the data-bearing days. That
/// matches the capture producer's contract and is kept on purpose.
pub fn determine_date_range(observations: &[Observation<'_>]) -> Option<PeriodWindow> {
    let mut dates = observations.iter().filter_map(|obs| obs.date);
    let first = dates.next()?;
    let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
    Some(PeriodWindow {
        start_date: start,
        end_date: end,
    })
}

pub(crate) fn guarded_div(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

pub(crate) fn roi_percent(sales: f64, spend: f64) -> f64 {
    if spend > 0.0 {
        (sales - spend) / spend * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::RawSnapshot;
    use crate::pipeline::normalize::normalize;
    use serde_json::json;

    fn snapshots(values: Vec<serde_json::Value>) -> Vec<RawSnapshot> {
        values
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap())
            .collect()
    }

    #[test]
    fn merges_same_day_sales_and_derives_ratios_after_summing() {
        let raws = snapshots(vec![
            json!({
                "timestamp": "2024-01-01T09:00:00Z",
                "data": {"sales": {"totalSales": 1000, "totalOrders": 20}},
            }),
            json!({
                "timestamp": "2024-01-01T21:00:00Z",
                "data": {"sales": {"totalSales": 500, "totalOrders": 10}},
            }),
        ]);
        let observations: Vec<_> = raws.iter().map(normalize).collect();

        let days = aggregate_sales(&observations);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].total_sales, 1500.0);
        assert_eq!(days[0].total_orders, 30.0);
        assert_eq!(days[0].average_basket, 50.0);
    }

    #[test]
    fn preserves_first_seen_date_order() {
        let raws = snapshots(vec![
            json!({"timestamp": "2024-01-03T09:00:00Z", "data": {"sales": {"totalSales": 3}}}),
            json!({"timestamp": "2024-01-01T09:00:00Z", "data": {"sales": {"totalSales": 1}}}),
            json!({"timestamp": "2024-01-03T18:00:00Z", "data": {"sales": {"totalSales": 30}}}),
            json!({"timestamp": "2024-01-02T09:00:00Z", "data": {"sales": {"totalSales": 2}}}),
        ]);
        let observations: Vec<_> = raws.iter().map(normalize).collect();

        let days = aggregate_sales(&observations);
        let order: Vec<String> = days.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(order, vec!["2024-01-03", "2024-01-01", "2024-01-02"]);
        assert_eq!(days[0].total_sales, 33.0);
    }

    #[test]
    fn zero_orders_day_has_zero_basket_not_nan() {
        let raws = snapshots(vec![json!({
            "timestamp": "2024-01-01T09:00:00Z",
            "data": {"sales": {"totalSales": 100}},
        })]);
        let observations: Vec<_> = raws.iter().map(normalize).collect();

        let days = aggregate_sales(&observations);
        assert_eq!(days[0].average_basket, 0.0);
        assert!(days[0].average_basket.is_finite());
    }

    #[test]
    fn ad_ratios_are_guarded_and_derived_from_totals() {
        let raws = snapshots(vec![
            json!({
                "timestamp": "2024-01-01T09:00:00Z",
                "data": {"ads": {"adSpend": 100, "adSales": 400, "impressions": 5000, "clicks": 50}},
            }),
            json!({
                "timestamp": "2024-01-02T09:00:00Z",
                "data": {"ads": {"adSales": 50}},
            }),
        ]);
        let observations: Vec<_> = raws.iter().map(normalize).collect();

        let days = aggregate_ads(&observations);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].ad_roi, 300.0);
        assert_eq!(days[0].ctr, 1.0);
        assert_eq!(days[0].cpc, 2.0);
        // Day two has no spend, impressions or clicks: every ratio guards to 0.
        assert_eq!(days[1].ad_roi, 0.0);
        assert_eq!(days[1].ctr, 0.0);
        assert_eq!(days[1].cpc, 0.0);
    }

    #[test]
    fn promotions_flatten_one_record_per_mention_with_defaults() {
        let raws = snapshots(vec![
            json!({
                "timestamp": "2024-01-01T09:00:00Z",
                "data": {"promotions": [
                    {"name": "20% Off", "type": "discount", "spend": 50, "sales": 200},
                    {},
                ]},
            }),
            json!({
                "timestamp": "2024-01-02T09:00:00Z",
                "data": {"promotions": [{"name": "20% Off", "type": "discount"}]},
            }),
        ]);
        let observations: Vec<_> = raws.iter().map(normalize).collect();

        let records = aggregate_promotions(&observations);
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].promotion_name, UNKNOWN_PROMOTION_NAME);
        assert_eq!(records[1].promotion_type, PromotionType::Other);
        assert_eq!(records[1].promotion_spend, 0.0);
        // Same offer on two days stays two records.
        assert_eq!(records[0].promotion_name, records[2].promotion_name);
    }

    #[test]
    fn date_range_spans_all_timestamped_snapshots_even_empty_ones() {
        let raws = snapshots(vec![
            json!({"timestamp": "2024-01-05T09:00:00Z"}),
            json!({"timestamp": "not a date", "data": {"sales": {"totalSales": 1}}}),
            json!({"timestamp": "2024-01-02T09:00:00Z", "data": {"sales": {"totalSales": 1}}}),
        ]);
        let observations: Vec<_> = raws.iter().map(normalize).collect();

        let window = determine_date_range(&observations).unwrap();
        assert_eq!(window.start_date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(window.end_date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn date_range_is_none_without_parseable_timestamps() {
        let raws = snapshots(vec![json!({"data": {"sales": {"totalSales": 1}}})]);
        let observations: Vec<_> = raws.iter().map(normalize).collect();
        assert!(determine_date_range(&observations).is_none());
    }
}
