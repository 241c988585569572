//! Occupational expense (biaya jabatan) deduction.

use rust_decimal::Decimal;

use crate::config::ContributionParameters;
use crate::models::AuditStep;

/// The result of the occupational expense step, including the audit step.
#[derive(Debug, Clone)]
pub struct OccupationalExpenseResult {
    /// The monthly deduction.
    pub amount: Decimal,
    /// Whether the monthly cap limited the deduction.
    pub capped: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the monthly occupational expense deduction.
///
/// The deduction is `rate` of gross monthly income, limited to
/// `monthly_cap` (5% and 500,000 under PMK 168/2023).
///
/// # Examples
///
/// ```
/// use pph21_engine::calculation::calculate_occupational_expense;
/// use pph21_engine::config::ContributionParameters;
/// use rust_decimal::Decimal;
///
/// let params = ContributionParameters::default();
/// let result = calculate_occupational_expense(Decimal::new(4_000_000, 0), &params, 1);
/// assert_eq!(result.amount, Decimal::new(200_000, 0));
/// assert!(!result.capped);
/// ```
pub fn calculate_occupational_expense(
    gross_monthly_income: Decimal,
    params: &ContributionParameters,
    step_number: u32,
) -> OccupationalExpenseResult {
    let config = &params.occupational_expense;
    let uncapped = gross_monthly_income * config.rate;
    let capped = uncapped > config.monthly_cap;
    let amount = uncapped.min(config.monthly_cap);

    let reasoning = if capped {
        format!(
            "{} x {} = {} exceeds the monthly cap, deduction limited to {}",
            gross_monthly_income.normalize(),
            config.rate.normalize(),
            uncapped.normalize(),
            config.monthly_cap.normalize()
        )
    } else {
        format!(
            "{} x {} = {}",
            gross_monthly_income.normalize(),
            config.rate.normalize(),
            amount.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "occupational_expense".to_string(),
        rule_name: "Occupational Expense Deduction".to_string(),
        regulation_ref: "PMK 168/2023 Pasal 8".to_string(),
        input: serde_json::json!({
            "gross_monthly_income": gross_monthly_income.normalize().to_string(),
            "rate": config.rate.normalize().to_string(),
            "monthly_cap": config.monthly_cap.normalize().to_string()
        }),
        output: serde_json::json!({
            "occupational_expense": amount.normalize().to_string(),
            "capped": capped
        }),
        reasoning,
    };

    OccupationalExpenseResult {
        amount,
        capped,
        audit_step,
    }
}
