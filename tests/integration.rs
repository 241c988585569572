//! Integration tests for the PPh21 Withholding Engine.
//!
//! This test suite covers:
//! - End-to-end scenarios through the library entry point
//! - Bracket boundary handling
//! - Short-circuit on income within PTKP
//! - The calculator page and JSON endpoint
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use pph21_engine::api::{AppState, create_router};
use pph21_engine::calculation::{calculate_tax, calculate_tax_with, calculate_yearly_tax};
use pph21_engine::config::ConfigLoader;
use pph21_engine::models::{TaxRateCategory, TaxpayerStatus};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/pp58_2023").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn json_decimal(value: &Value) -> Decimal {
    decimal(value.as_str().expect("decimal fields serialize as strings"))
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_form(router: Router, body: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, String::from_utf8(body_bytes.to_vec()).unwrap())
}

// =============================================================================
// Scenario 1: TK/0, salary 10,000,000, no bonus
// =============================================================================

#[test]
fn test_scenario_single_no_dependents_contributions() {
    let result = calculate_tax(decimal("10000000"), Decimal::ZERO, TaxpayerStatus::Tk0);

    assert_eq!(result.tax_rate_category, TaxRateCategory::A);
    assert_eq!(result.employer_insurance_contribution.jkk, decimal("24000"));
    assert_eq!(result.employer_insurance_contribution.jkm, decimal("30000"));
    assert_eq!(result.employer_insurance_contribution.bpjskes, decimal("400000"));
    assert_eq!(result.employee_insurance_contribution.jht, decimal("200000"));
    assert_eq!(result.employee_insurance_contribution.jp, decimal("95596"));
    assert_eq!(result.employee_insurance_contribution.bpjskes, None);
}

#[test]
fn test_scenario_single_no_dependents_income_and_tax() {
    let result = calculate_tax(decimal("10000000"), Decimal::ZERO, TaxpayerStatus::Tk0);

    assert_eq!(result.gross_monthly_income, decimal("10454000"));
    assert_eq!(result.occupational_expense, decimal("500000"));
    assert_eq!(result.net_monthly_income, decimal("9658404"));
    assert_eq!(result.net_yearly_income, decimal("115900848"));
    assert_eq!(result.non_taxable_income, decimal("54000000"));
    assert_eq!(result.taxable_income, decimal("61900848"));

    assert_eq!(result.regular_month_tax, decimal("193168.08"));
    assert_eq!(result.bonus_month_tax, decimal("193168.08"));
    assert_eq!(result.december_month_tax, decimal("1160278.32"));
    assert_eq!(result.total_tax, decimal("3285127.2"));
    assert_eq!(result.total_tax, calculate_yearly_tax(result.taxable_income));
}

#[tokio::test]
async fn test_scenario_single_no_dependents_via_json() {
    let router = create_router_for_test();
    let request = json!({
        "status": "TK/0",
        "salary": "10000000",
        "bonus": "0"
    });

    let (status, json) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["tax_rate_category"], "A");
    assert_eq!(json_decimal(&json["taxable_income"]), decimal("61900848"));
    assert_eq!(json_decimal(&json["total_tax"]), decimal("3285127.2"));
    assert_eq!(
        json_decimal(&json["employee_insurance_contribution"]["jp"]),
        decimal("95596")
    );
    assert!(json["employee_insurance_contribution"].get("bpjskes").is_none());
}

#[tokio::test]
async fn test_json_bonus_defaults_to_zero() {
    let router = create_router_for_test();
    let request = json!({
        "status": "TK/0",
        "salary": "10000000"
    });

    let (status, json) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_decimal(&json["total_tax"]), decimal("3285127.2"));
}

// =============================================================================
// Scenario 2: taxable income exactly at the first bracket limit
// =============================================================================

#[test]
fn test_scenario_taxable_income_at_bracket_limit() {
    // No salary, so the whole bonus is taxable above the K/3 PTKP of 72M.
    let result = calculate_tax(Decimal::ZERO, decimal("132000000"), TaxpayerStatus::K3);

    assert_eq!(result.taxable_income, decimal("60000000"));
    assert_eq!(result.total_tax, decimal("3000000"));
    assert_eq!(calculate_yearly_tax(decimal("60000000")), decimal("3000000"));
    assert_eq!(calculate_yearly_tax(decimal("60000001")), decimal("3000000.15"));
}

// =============================================================================
// Scenario 3: K/3 with no income
// =============================================================================

#[test]
fn test_scenario_married_three_dependents_no_income() {
    let result = calculate_tax(Decimal::ZERO, Decimal::ZERO, TaxpayerStatus::K3);

    assert_eq!(result.tax_rate_category, TaxRateCategory::C);
    assert_eq!(result.employer_insurance_contribution.total(), Decimal::ZERO);
    assert_eq!(result.employee_insurance_contribution.total(), Decimal::ZERO);
    assert_eq!(result.non_taxable_income, decimal("72000000"));
    assert_eq!(result.taxable_income, Decimal::ZERO);
    assert_eq!(result.regular_month_tax, Decimal::ZERO);
    assert_eq!(result.bonus_month_tax, Decimal::ZERO);
    assert_eq!(result.december_month_tax, Decimal::ZERO);
    assert_eq!(result.total_tax, Decimal::ZERO);
}

#[tokio::test]
async fn test_scenario_married_three_dependents_via_json() {
    let router = create_router_for_test();
    let request = json!({
        "status": "K/3",
        "salary": "0",
        "bonus": "0"
    });

    let (status, json) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["tax_rate_category"], "C");
    assert_eq!(json_decimal(&json["total_tax"]), Decimal::ZERO);
}

// =============================================================================
// Reconciliation
// =============================================================================

#[test]
fn test_large_bonus_produces_negative_december_with_warning() {
    let result = calculate_tax(decimal("5000000"), decimal("60000000"), TaxpayerStatus::Tk0);

    assert_eq!(result.regular_month_tax, Decimal::ZERO);
    assert_eq!(result.bonus_month_tax, decimal("13611286.5"));
    assert_eq!(result.taxable_income, decimal("63787800"));
    assert_eq!(result.total_tax, decimal("3568170"));
    assert_eq!(result.december_month_tax, decimal("-10043116.5"));
    assert!(result.has_december_refund());
    assert!(
        result
            .audit_trace
            .warnings
            .iter()
            .any(|w| w.code == "NEGATIVE_DECEMBER_RECONCILIATION")
    );
}

#[test]
fn test_loaded_config_matches_builtin_parameters() {
    let loader = ConfigLoader::load("./config/pp58_2023").expect("Failed to load config");
    let salary = decimal("23750000");
    let bonus = decimal("40000000");

    for status in TaxpayerStatus::ALL {
        let loaded = calculate_tax_with(loader.contributions(), salary, bonus, status);
        let builtin = calculate_tax(salary, bonus, status);
        assert_eq!(loaded, builtin, "status {status}");
    }
}

// =============================================================================
// Calculator page
// =============================================================================

#[tokio::test]
async fn test_get_renders_empty_form() {
    let router = create_router_for_test();

    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let page = String::from_utf8(body_bytes.to_vec()).unwrap();

    assert!(page.contains("name=\"status\""));
    assert!(page.contains("name=\"salary\""));
    assert!(page.contains("name=\"bonus\""));
    assert!(!page.contains("class=\"result\""));
}

#[tokio::test]
async fn test_form_submission_renders_formatted_result() {
    let router = create_router_for_test();

    let (status, page) = post_form(router, "status=TK%2F0&salary=10000000&bonus=0").await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("class=\"result\""));
    assert!(page.contains("Rp\u{a0}61.900.848,00"));
    assert!(page.contains("Rp\u{a0}3.285.127,20"));
    assert!(page.contains("<option value=\"TK/0\" selected>"));
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_form_invalid_status_returns_400_without_body() {
    let router = create_router_for_test();

    let (status, body) = post_form(router, "status=X%2F9&salary=10000000&bonus=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_form_negative_bonus_returns_400_without_body() {
    let router = create_router_for_test();

    let (status, body) = post_form(router, "status=TK%2F0&salary=10000000&bonus=-1").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_json_invalid_status_returns_400() {
    let router = create_router_for_test();
    let request = json!({
        "status": "X/9",
        "salary": "10000000",
        "bonus": "0"
    });

    let (status, json) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_json_negative_salary_returns_400() {
    let router = create_router_for_test();
    let request = json!({
        "status": "K/0",
        "salary": "-5000000",
        "bonus": "0"
    });

    let (status, json) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_json_missing_status_returns_400() {
    let router = create_router_for_test();
    let request = json!({
        "salary": "10000000"
    });

    let (status, json) = post_calculate(router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");
}
