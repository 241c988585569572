//! Calculation result models for the PPh21 Withholding Engine.
//!
//! This module contains the [`CalculationResult`] type and the audit trace
//! recorded alongside it. Every field is derived from the inputs alone, so
//! two calculations with the same inputs produce equal results.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeInsuranceContribution, EmployerInsuranceContribution, TaxRateCategory};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The regulation the rule comes from (e.g., "PP 58/2023").
    pub regulation_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag results that are valid but deserve attention, such as a
/// negative December reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use pph21_engine::models::AuditTrace;
///
/// let trace = AuditTrace::default();
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of a PPh21 calculation.
///
/// Monthly figures describe one regular month; yearly figures cover the
/// whole January-December cycle including the bonus. Tax is withheld at the
/// regular-month amount for ten months, at the bonus-month amount once, and
/// December carries the reconciliation against the annual liability.
///
/// `december_month_tax` is a balancing figure and may be negative when the
/// earlier withholding exceeded the annual liability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// TER category selected from the taxpayer status.
    pub tax_rate_category: TaxRateCategory,
    /// Employer-paid insurance contributions.
    pub employer_insurance_contribution: EmployerInsuranceContribution,
    /// Employee-paid insurance contributions.
    pub employee_insurance_contribution: EmployeeInsuranceContribution,
    /// Monthly occupational expense deduction (biaya jabatan).
    pub occupational_expense: Decimal,
    /// Salary plus employer contributions for one month.
    pub gross_monthly_income: Decimal,
    /// Gross monthly income for twelve months plus the bonus.
    pub gross_yearly_income: Decimal,
    /// Monthly income after employee contributions and occupational expense.
    pub net_monthly_income: Decimal,
    /// Net monthly income for twelve months plus the bonus.
    pub net_yearly_income: Decimal,
    /// Non-taxable income threshold (PTKP) for the status.
    pub non_taxable_income: Decimal,
    /// Yearly income subject to the progressive rates, never negative.
    pub taxable_income: Decimal,
    /// Tax withheld in each of the ten regular months.
    pub regular_month_tax: Decimal,
    /// Tax withheld in the month the bonus is paid.
    pub bonus_month_tax: Decimal,
    /// December reconciliation amount.
    pub december_month_tax: Decimal,
    /// Total tax for the year.
    pub total_tax: Decimal,
    /// Salary received in a regular month after contributions and tax.
    pub regular_month_take_home_pay: Decimal,
    /// Salary and bonus received in the bonus month after contributions and tax.
    pub bonus_month_take_home_pay: Decimal,
    /// Salary received in December after contributions and reconciliation.
    pub december_take_home_pay: Decimal,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl CalculationResult {
    /// Tax withheld across the ten regular months.
    pub fn regular_months_tax(&self) -> Decimal {
        self.regular_month_tax * Decimal::TEN
    }

    /// Returns true when December refunds over-withheld tax.
    pub fn has_december_refund(&self) -> bool {
        self.december_month_tax < Decimal::ZERO
    }
}
