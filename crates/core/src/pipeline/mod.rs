pub mod aggregate;
pub mod normalize;
pub mod recommend;
pub mod summary;

use chrono::Utc;

use crate::domain::report::RestaurantData;
use crate::domain::snapshot::RawSnapshot;
use crate::error::ReportError;
use crate::pipeline::normalize::Observation;

/// Runs the full capture-to-aggregation pipeline: normalize every snapshot,
/// resolve the restaurant identity, derive the period window, and build the
/// per-day series.
///
/// Identity comes from the first snapshot carrying a non-empty restaurant
/// name; a missing id degrades to `"unknown"`. A batch with no identity or no
/// parseable timestamp at all is unprocessable.
pub fn process_captured_data(captured: &[RawSnapshot]) -> Result<RestaurantData, ReportError> {
    if captured.is_empty() {
        return Err(ReportError::EmptyCapture);
    }

    let observations: Vec<Observation<'_>> = captured.iter().map(normalize::normalize).collect();

    let identity = observations
        .iter()
        .find_map(|obs| {
            let restaurant = obs.restaurant?;
            let name = restaurant.name.as_deref()?.trim();
            if name.is_empty() {
                return None;
            }
            Some((restaurant.id.clone(), name.to_string()))
        })
        .ok_or(ReportError::NoRestaurantIdentity)?;

    let period =
        aggregate::determine_date_range(&observations).ok_or(ReportError::EmptyCapture)?;

    Ok(RestaurantData {
        restaurant_id: identity.0.unwrap_or_else(|| "unknown".to_string()),
        restaurant_name: identity.1,
        period,
        sales: aggregate::aggregate_sales(&observations),
        ads: aggregate::aggregate_ads(&observations),
        promotions: aggregate::aggregate_promotions(&observations),
        captured_at: Utc::now(),
    })
}
