//! HTTP API module for the pricing engine.
//!
//! This module exposes the estimate, deposit and travel fee calculators over
//! a small JSON API, plus read-only views of the loaded schedule.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{DEFAULT_CALENDAR_YEARS, create_router};
pub use request::{
    DepositRequest, EstimateRequest, MAX_DISTANCE_MILES, MAX_HELPERS, SpecialDatesQuery,
    TravelFeeRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, DepositBreakdown, DepositResponse, EstimateResponse,
    HealthResponse, SpecialDatesResponse,
};
pub use state::AppState;
