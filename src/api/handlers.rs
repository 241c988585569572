//! HTTP request handlers for the PPh21 Withholding Engine API.
//!
//! This module contains the handler functions for all endpoints.

use std::time::Instant;

use axum::{
    Form, Json, Router,
    extract::{
        State,
        rejection::{FormRejection, JsonRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_tax_with;
use crate::models::CalculationResult;

use super::request::{CalculationRequest, TaxForm, TaxInput};
use super::response::ApiErrorResponse;
use super::state::AppState;
use super::view::render_page;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler).post(form_handler))
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

/// Handler for GET / : the empty calculator form.
async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(render_page(state.regulation(), None))
}

/// Handler for POST / : form submission rendered back as HTML.
///
/// Any invalid input yields a bare `400 Bad Request`.
async fn form_handler(
    State(state): State<AppState>,
    payload: Result<Form<TaxForm>, FormRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing form submission");

    let form = match payload {
        Ok(Form(form)) => form,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection,
                "Form rejected"
            );
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let input = match TaxInput::try_from(form) {
        Ok(input) => input,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Invalid form input"
            );
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let result = perform_calculation(&state, &input, correlation_id);
    Html(render_page(state.regulation(), Some((&input, &result)))).into_response()
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a JSON calculation request and returns the calculation result.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "JSON rejected"
            );
            return ApiErrorResponse::invalid_input().into_response();
        }
    };

    let input = match TaxInput::try_from(request) {
        Ok(input) => input,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Invalid calculation input"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let result = perform_calculation(&state, &input, correlation_id);
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(result),
    )
        .into_response()
}

fn perform_calculation(
    state: &AppState,
    input: &TaxInput,
    correlation_id: Uuid,
) -> CalculationResult {
    let start_time = Instant::now();
    let result = calculate_tax_with(
        state.contributions(),
        input.salary,
        input.bonus,
        input.status,
    );
    info!(
        correlation_id = %correlation_id,
        status = %input.status,
        category = %result.tax_rate_category,
        taxable_income = %result.taxable_income,
        total_tax = %result.total_tax,
        duration_us = start_time.elapsed().as_micros(),
        "Calculation completed successfully"
    );
    result
}
