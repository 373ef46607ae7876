//! Travel fee calculation.
//!
//! Bookings inside the service radius travel free. Beyond it, each helper is
//! charged a flat minimum for the first band of extra miles and a fixed
//! amount for every started increment after that.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::TravelPolicy;
use crate::models::TravelFeeResult;

/// Message used for bookings inside the service radius.
pub const WITHIN_SERVICE_AREA_MESSAGE: &str = "within our service area - no travel fee";

/// Calculates the travel surcharge for a booking.
///
/// This function is total. Callers are expected to pass a non-negative
/// distance; a negative one simply falls inside the service area. Fees too
/// large for a `Decimal` saturate at `Decimal::MAX`, so callers taking
/// untrusted input should bound it first (the HTTP API caps both values).
///
/// With the standard policy (15 mile radius, $40 for the first 10 miles
/// over, $10 per started 10 miles after that):
///
/// | distance | miles over | fee per helper |
/// |----------|------------|----------------|
/// | 15.0     | 0          | $0             |
/// | 15.01    | 0.01       | $40            |
/// | 25.0     | 10         | $40            |
/// | 35.0     | 20         | $50            |
/// | 35.5     | 20.5       | $60            |
///
/// The fee uses the unrounded distance; the result reports the distance
/// rounded to 0.1 mile.
///
/// # Example
///
/// ```
/// use event_pricing::calculation::calculate_travel_fee;
/// use event_pricing::config::PricingConfig;
/// use rust_decimal::Decimal;
///
/// let config = PricingConfig::standard();
/// let result = calculate_travel_fee(config.travel(), 35.0, 2);
///
/// assert!(!result.is_within_service_area);
/// assert_eq!(result.travel_fee_per_helper, Decimal::new(50, 0));
/// assert_eq!(result.total_travel_fee, Decimal::new(100, 0));
/// ```
pub fn calculate_travel_fee(
    policy: &TravelPolicy,
    distance_miles: f64,
    num_helpers: u32,
) -> TravelFeeResult {
    let display_distance = (distance_miles * 10.0).round() / 10.0;

    if distance_miles <= policy.service_radius_miles {
        return TravelFeeResult {
            is_within_service_area: true,
            distance_miles: display_distance,
            travel_fee_per_helper: Decimal::ZERO,
            total_travel_fee: Decimal::ZERO,
            message: WITHIN_SERVICE_AREA_MESSAGE.to_string(),
        };
    }

    let miles_over = distance_miles - policy.service_radius_miles;
    let fee_per_helper = if miles_over <= policy.minimum_band_miles {
        policy.minimum_fee_per_helper
    } else {
        let increments =
            ((miles_over - policy.minimum_band_miles) / policy.increment_miles).ceil() as i64;
        Decimal::from(increments)
            .checked_mul(policy.increment_fee_per_helper)
            .and_then(|extra| extra.checked_add(policy.minimum_fee_per_helper))
            .unwrap_or(Decimal::MAX)
    }
    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let total_travel_fee = fee_per_helper
        .checked_mul(Decimal::from(num_helpers))
        .unwrap_or(Decimal::MAX);

    let over_display = (miles_over * 10.0).round() / 10.0;
    let charge = if num_helpers == 1 {
        format!("travel fee of ${fee_per_helper} applies")
    } else {
        format!(
            "travel fee of ${fee_per_helper} per helper (${total_travel_fee} total for {num_helpers} helpers) applies"
        )
    };
    let message = format!(
        "{:.1} miles is {:.1} miles beyond our {}-mile service area - {}",
        display_distance, over_display, policy.service_radius_miles, charge
    );

    TravelFeeResult {
        is_within_service_area: false,
        distance_miles: display_distance,
        travel_fee_per_helper: fee_per_helper,
        total_travel_fee,
        message,
    }
}
