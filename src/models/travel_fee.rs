//! Travel fee result model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The travel surcharge for one booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelFeeResult {
    /// True when the distance is inside the free service radius.
    pub is_within_service_area: bool,
    /// Driving distance, rounded to 0.1 mile for display.
    pub distance_miles: f64,
    /// Whole-dollar fee charged per helper.
    #[serde(with = "rust_decimal::serde::float")]
    pub travel_fee_per_helper: Decimal,
    /// `travel_fee_per_helper * num_helpers`.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_travel_fee: Decimal,
    /// Customer-facing explanation.
    pub message: String,
}
