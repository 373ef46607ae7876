//! Calculation logic for the pricing engine.
//!
//! This module contains the pure pricing functions: the year-based rate
//! lookup, computed holidays and special-date resolution, the event cost
//! estimate, travel fee tiering, deposit selection on the professional-amount
//! lattice, and the special-date calendar listing.
//!
//! Every function reads an immutable configuration and its arguments only,
//! so all of them are safe to call concurrently without synchronization.

mod calendar;
mod deposit;
mod estimate;
mod holidays;
mod rate_table;
mod special_date;
mod travel_fee;

pub use calendar::{MAX_CALENDAR_YEARS, special_date_calendar};
pub use deposit::{
    MANUAL_OVERRIDE, calculate_deposit_from_dollars, calculate_deposit_from_estimate,
    resolve_deposit,
};
pub use estimate::{BASE_BLOCK_HOURS, calculate_estimate};
pub use holidays::{holiday_on, holidays_for_year, thanksgiving_day};
pub use rate_table::{RateLookup, rates_for_year};
pub use special_date::{resolve_date_key, resolve_special_date};
pub use travel_fee::{WITHIN_SERVICE_AREA_MESSAGE, calculate_travel_fee};
