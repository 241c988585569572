//! Request types for the PPh21 Withholding Engine API.
//!
//! Both the HTML form and the JSON endpoint are converted into a validated
//! [`TaxInput`] before any calculation runs.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::MAX_AMOUNT;
use crate::error::{EngineError, EngineResult};
use crate::models::TaxpayerStatus;

/// Form submission from the HTML page.
///
/// Fields are optional so that a missing field is reported as invalid input
/// rather than an extractor rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxForm {
    /// Taxpayer status code (e.g., "TK/0").
    #[serde(default)]
    pub status: Option<String>,
    /// Monthly salary as typed by the user.
    #[serde(default)]
    pub salary: Option<String>,
    /// One-time bonus as typed by the user.
    #[serde(default)]
    pub bonus: Option<String>,
}

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Taxpayer status code (e.g., "K/1").
    pub status: String,
    /// Monthly salary.
    pub salary: Decimal,
    /// One-time bonus.
    #[serde(default)]
    pub bonus: Decimal,
}

/// Validated calculation input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxInput {
    /// Taxpayer status.
    pub status: TaxpayerStatus,
    /// Monthly salary, non-negative.
    pub salary: Decimal,
    /// One-time bonus, non-negative.
    pub bonus: Decimal,
}

/// Parses a user-typed amount, rejecting blanks, non-numbers, negatives and
/// amounts above [`MAX_AMOUNT`].
///
/// # Examples
///
/// ```
/// use pph21_engine::api::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("salary", Some(" 7500000 ")).unwrap(), Decimal::new(7_500_000, 0));
/// assert!(parse_amount("salary", Some("abc")).is_err());
/// assert!(parse_amount("bonus", None).is_err());
/// ```
pub fn parse_amount(field: &str, raw: Option<&str>) -> EngineResult<Decimal> {
    let invalid = || EngineError::InvalidAmount {
        field: field.to_string(),
        value: raw.unwrap_or_default().to_string(),
    };

    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(invalid());
    }
    let amount = Decimal::from_str(trimmed).map_err(|_| invalid())?;
    validate_amount(field, amount)
}

fn validate_amount(field: &str, amount: Decimal) -> EngineResult<Decimal> {
    let negative = amount.is_sign_negative() && !amount.is_zero();
    if negative || amount > MAX_AMOUNT {
        return Err(EngineError::InvalidAmount {
            field: field.to_string(),
            value: amount.to_string(),
        });
    }
    Ok(amount)
}

impl TryFrom<TaxForm> for TaxInput {
    type Error = EngineError;

    fn try_from(form: TaxForm) -> Result<Self, Self::Error> {
        let status = form.status.as_deref().unwrap_or_default().parse()?;
        let salary = parse_amount("salary", form.salary.as_deref())?;
        let bonus = parse_amount("bonus", form.bonus.as_deref())?;
        Ok(TaxInput {
            status,
            salary,
            bonus,
        })
    }
}

impl TryFrom<CalculationRequest> for TaxInput {
    type Error = EngineError;

    fn try_from(req: CalculationRequest) -> Result<Self, Self::Error> {
        Ok(TaxInput {
            status: req.status.parse()?,
            salary: validate_amount("salary", req.salary)?,
            bonus: validate_amount("bonus", req.bonus)?,
        })
    }
}
