//! Core data models for the pricing engine.
//!
//! Every model is an immutable value object produced by a pure calculation.

mod deposit;
mod estimate;
mod money;
mod special_date;
mod travel_fee;

pub use deposit::{DepositCalculation, DepositQuote};
pub use estimate::EstimateResult;
pub use money::{cents_to_dollars, dollars_to_cents, round_currency};
pub use special_date::{RuleKind, SpecialDateEntry, SpecialDateResolution, SpecialDateRule};
pub use travel_fee::TravelFeeResult;
