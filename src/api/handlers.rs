//! HTTP request handlers for the pricing API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Datelike, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    MAX_CALENDAR_YEARS, calculate_deposit_from_dollars, calculate_estimate, calculate_travel_fee,
    rates_for_year, resolve_deposit, special_date_calendar,
};
use crate::config::PricingConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::round_currency;

use super::request::{DepositRequest, EstimateRequest, SpecialDatesQuery, TravelFeeRequest};
use super::response::{
    ApiError, ApiErrorResponse, DepositBreakdown, DepositResponse, EstimateResponse,
    HealthResponse, SpecialDatesResponse,
};
use super::state::AppState;

/// Years listed by `GET /special-dates` when the query does not say.
pub const DEFAULT_CALENDAR_YEARS: u32 = 3;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/estimate", post(estimate_handler))
        .route("/deposit", post(deposit_handler))
        .route("/travel-fee", post(travel_fee_handler))
        .route("/special-dates", get(special_dates_handler))
        .route("/rates/:year", get(rates_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Handler for POST /estimate.
///
/// Prices the event, recommends a deposit for the total, and adds the
/// travel fee when a distance is supplied.
async fn estimate_handler(
    State(state): State<AppState>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing estimate request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match build_estimate(state.pricing(), &request) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                date = %response.estimate.date_key,
                num_helpers = response.estimate.num_helpers,
                total_cost = %response.estimate.total_cost,
                rate_type = ?response.estimate.rate_type,
                deposit_cents = response.deposit.calculation.value,
                duration_us = start_time.elapsed().as_micros(),
                "Estimate calculated"
            );
            json_ok(response)
        }
        Err(err) => engine_failure(correlation_id, err),
    }
}

fn build_estimate(
    config: &PricingConfig,
    request: &EstimateRequest,
) -> EngineResult<EstimateResponse> {
    let num_helpers = request.helpers()?;
    let distance = request.distance()?;

    let estimate = calculate_estimate(
        config,
        request.event_date,
        request.duration_hours,
        num_helpers,
    )?;
    let calculation = calculate_deposit_from_dollars(config.deposit(), estimate.total_cost);
    let deposit = DepositBreakdown::new(config.deposit(), calculation);

    let travel_fee =
        distance.map(|miles| calculate_travel_fee(config.travel(), miles, num_helpers));
    let total_with_travel = travel_fee
        .as_ref()
        .map(|travel| {
            estimate
                .total_cost
                .checked_add(travel.total_travel_fee)
                .map(round_currency)
                .ok_or_else(|| {
                    EngineError::invalid_input(
                        "distance_miles",
                        "estimate plus travel fee is too large to price",
                    )
                })
        })
        .transpose()?;

    Ok(EstimateResponse {
        estimate,
        deposit,
        travel_fee,
        total_with_travel,
    })
}

/// Handler for POST /deposit.
async fn deposit_handler(
    State(state): State<AppState>,
    payload: Result<Json<DepositRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing deposit request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let estimate_cents = match request.estimate_in_cents() {
        Ok(cents) => cents,
        Err(err) => return engine_failure(correlation_id, err),
    };
    let quote = resolve_deposit(
        state.pricing().deposit(),
        estimate_cents,
        request.manual_override_cents(),
    );

    info!(
        correlation_id = %correlation_id,
        estimate_cents,
        deposit_cents = quote.deposit_cents,
        picked_by = %quote.picked_by,
        "Deposit resolved"
    );
    json_ok(DepositResponse::from(quote))
}

/// Handler for POST /travel-fee.
async fn travel_fee_handler(
    State(state): State<AppState>,
    payload: Result<Json<TravelFeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing travel fee request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let (distance_miles, num_helpers) = match request.inputs() {
        Ok(inputs) => inputs,
        Err(err) => return engine_failure(correlation_id, err),
    };
    let result = calculate_travel_fee(state.pricing().travel(), distance_miles, num_helpers);

    info!(
        correlation_id = %correlation_id,
        distance_miles,
        num_helpers,
        total_travel_fee = %result.total_travel_fee,
        "Travel fee calculated"
    );
    json_ok(result)
}

/// Handler for GET /special-dates.
///
/// Lists the special-date tables for operational checks.
async fn special_dates_handler(
    State(state): State<AppState>,
    query: Result<Query<SpecialDatesQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Bad special-dates query");
            return error_response(ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            )));
        }
    };

    let from_year = query.from_year.unwrap_or_else(|| Utc::now().year());
    let years = query
        .years
        .unwrap_or(DEFAULT_CALENDAR_YEARS)
        .min(MAX_CALENDAR_YEARS);
    let entries = special_date_calendar(state.pricing().special_dates(), from_year, years);

    info!(
        correlation_id = %correlation_id,
        from_year,
        years,
        entries = entries.len(),
        "Special-date calendar listed"
    );
    json_ok(SpecialDatesResponse {
        from_year,
        years,
        entries,
    })
}

/// Handler for GET /rates/:year.
async fn rates_handler(
    State(state): State<AppState>,
    year: Result<Path<i32>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match year {
        Ok(Path(year)) => json_ok(rates_for_year(state.pricing().rates(), year)),
        Err(rejection) => engine_failure(
            correlation_id,
            EngineError::invalid_input("year", rejection.body_text()),
        ),
    }
}

/// Handler for GET /health.
async fn health_handler(State(state): State<AppState>) -> Response {
    json_ok(HealthResponse {
        status: "ok".to_string(),
        business: state.config().business().clone(),
    })
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn engine_failure(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request rejected"
    );
    error_response(err.into())
}

fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    error_response(ApiErrorResponse::bad_request(error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::new(ConfigLoader::standard())
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = create_router(create_test_state())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_estimate_returns_200() {
        let (status, json) = send(post_json(
            "/estimate",
            json!({"eventDate": "2025-06-15", "durationHours": 4, "numHelpers": 2}),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["estimate"]["totalCost"], 550.0);
        assert!(json.get("travelFee").is_none());
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let request = Request::builder()
            .method("POST")
            .uri("/estimate")
            .header("Content-Type", "application/json")
            .body(Body::from("{ not json"))
            .unwrap();
        let (status, json) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_duration_is_validation_error() {
        let (status, json) = send(post_json(
            "/estimate",
            json!({"eventDate": "2025-06-15", "numHelpers": 2}),
        ))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_oversized_travel_inputs_are_invalid_input() {
        let bodies = [
            json!({"distanceMiles": 1e300, "numHelpers": 1}),
            json!({"distanceMiles": 35.0, "numHelpers": 4_294_967_295u64}),
            json!({"distanceMiles": 1e300, "numHelpers": 4_294_967_294u64}),
        ];
        for body in bodies {
            let (status, json) = send(post_json("/travel-fee", body.clone())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(json["code"], "INVALID_INPUT");
        }
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["business"]["code"], "standard");
    }

    #[tokio::test]
    async fn test_non_numeric_rate_year_is_invalid_input() {
        let request = Request::builder()
            .uri("/rates/next")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "INVALID_INPUT");
    }
}
