//! PPh21 calculation for a January-December cycle.
//!
//! Ten regular months are withheld at the TER rate for the net monthly
//! income, the bonus month at the TER rate for net income plus bonus, and
//! December settles the difference against the progressive yearly tax.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::config::ContributionParameters;
use crate::models::{AuditStep, AuditTrace, AuditWarning, CalculationResult, TaxpayerStatus};

use super::insurance::calculate_insurance_contributions;
use super::occupational_expense::calculate_occupational_expense;
use super::progressive::calculate_yearly_tax_with_audit;
use super::rate_table::calculate_monthly_withholding;
use super::status_mapping::{PTKP_REF, resolve_status};

/// Number of months in the simulated tax year.
pub const MONTHS_PER_YEAR: i64 = 12;

/// Number of months withheld at the regular-month amount.
pub const REGULAR_MONTHS: i64 = 10;

/// Largest salary or bonus accepted by the calculation, 10^15 rupiah.
///
/// Yearly figures stay far inside the `Decimal` range for amounts up to
/// this bound.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Calculates PPh21 with the statutory contribution parameters.
///
/// `salary` is the monthly salary and `bonus` a one-time payment made in a
/// single month between January and November. Both must lie within
/// `0..=MAX_AMOUNT`; larger amounts overflow the yearly arithmetic.
///
/// # Examples
///
/// ```
/// use pph21_engine::calculation::calculate_tax;
/// use pph21_engine::models::{TaxRateCategory, TaxpayerStatus};
/// use rust_decimal::Decimal;
///
/// let result = calculate_tax(Decimal::new(10_000_000, 0), Decimal::ZERO, TaxpayerStatus::Tk0);
///
/// assert_eq!(result.tax_rate_category, TaxRateCategory::A);
/// assert_eq!(result.taxable_income, Decimal::new(61_900_848, 0));
/// assert_eq!(result.total_tax, Decimal::new(32_851_272, 1));
/// ```
pub fn calculate_tax(salary: Decimal, bonus: Decimal, status: TaxpayerStatus) -> CalculationResult {
    calculate_tax_with(&ContributionParameters::default(), salary, bonus, status)
}

/// Calculates PPh21 with the given contribution parameters.
pub fn calculate_tax_with(
    params: &ContributionParameters,
    salary: Decimal,
    bonus: Decimal,
    status: TaxpayerStatus,
) -> CalculationResult {
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let status_lookup = resolve_status(status, step_number);
    let category = status_lookup.category;
    let non_taxable_income = status_lookup.non_taxable_income;
    steps.push(status_lookup.audit_step);
    step_number += 1;

    let contributions = calculate_insurance_contributions(salary, params, step_number);
    let employer_insurance_contribution = contributions.employer;
    let employee_insurance_contribution = contributions.employee;
    step_number += contributions.audit_steps.len() as u32;
    steps.extend(contributions.audit_steps);

    let employer_addition = employer_insurance_contribution.total();
    let employee_deduction = employee_insurance_contribution.total();
    let gross_monthly_income = salary + employer_addition;

    let occupational = calculate_occupational_expense(gross_monthly_income, params, step_number);
    let occupational_expense = occupational.amount;
    steps.push(occupational.audit_step);
    step_number += 1;

    let months = Decimal::from(MONTHS_PER_YEAR);
    let net_monthly_income = gross_monthly_income - employee_deduction - occupational_expense;
    let net_yearly_income = net_monthly_income * months + bonus;
    let gross_yearly_income = gross_monthly_income * months + bonus;
    let taxable_income = (net_yearly_income - non_taxable_income).max(Decimal::ZERO);

    steps.push(AuditStep {
        step_number,
        rule_id: "taxable_income".to_string(),
        rule_name: "Taxable Income".to_string(),
        regulation_ref: PTKP_REF.to_string(),
        input: serde_json::json!({
            "net_monthly_income": net_monthly_income.normalize().to_string(),
            "bonus": bonus.normalize().to_string(),
            "non_taxable_income": non_taxable_income.normalize().to_string()
        }),
        output: serde_json::json!({
            "net_yearly_income": net_yearly_income.normalize().to_string(),
            "taxable_income": taxable_income.normalize().to_string()
        }),
        reasoning: format!(
            "max({} x 12 + {} - {}, 0) = {}",
            net_monthly_income.normalize(),
            bonus.normalize(),
            non_taxable_income.normalize(),
            taxable_income.normalize()
        ),
    });
    step_number += 1;

    debug!(
        status = %status,
        category = %category,
        net_monthly_income = %net_monthly_income,
        taxable_income = %taxable_income,
        "Resolved taxable income"
    );

    if taxable_income.is_zero() {
        debug!(status = %status, "Income within PTKP, no tax withheld");
        let take_home = salary - employee_deduction;
        return CalculationResult {
            tax_rate_category: category,
            employer_insurance_contribution,
            employee_insurance_contribution,
            occupational_expense,
            gross_monthly_income,
            gross_yearly_income,
            net_monthly_income,
            net_yearly_income,
            non_taxable_income,
            taxable_income,
            regular_month_tax: Decimal::ZERO,
            bonus_month_tax: Decimal::ZERO,
            december_month_tax: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            regular_month_take_home_pay: take_home,
            bonus_month_take_home_pay: take_home + bonus,
            december_take_home_pay: take_home,
            audit_trace: AuditTrace { steps, warnings },
        };
    }

    let regular =
        calculate_monthly_withholding(category, net_monthly_income, "regular_month", step_number);
    let regular_month_tax = regular.tax;
    steps.push(regular.audit_step);
    step_number += 1;

    let bonus_month_income = net_monthly_income + bonus;
    let bonus_month =
        calculate_monthly_withholding(category, bonus_month_income, "bonus_month", step_number);
    let bonus_month_tax = bonus_month.tax;
    steps.push(bonus_month.audit_step);
    step_number += 1;

    let yearly = calculate_yearly_tax_with_audit(taxable_income, step_number);
    let yearly_tax = yearly.tax;
    steps.push(yearly.audit_step);
    step_number += 1;

    let regular_months_tax = regular_month_tax * Decimal::from(REGULAR_MONTHS);
    let december_month_tax = yearly_tax - regular_months_tax - bonus_month_tax;
    let total_tax = regular_months_tax + bonus_month_tax + december_month_tax;

    steps.push(AuditStep {
        step_number,
        rule_id: "december_reconciliation".to_string(),
        rule_name: "December Reconciliation".to_string(),
        regulation_ref: "PMK 168/2023 Pasal 15".to_string(),
        input: serde_json::json!({
            "yearly_tax": yearly_tax.normalize().to_string(),
            "regular_month_tax": regular_month_tax.normalize().to_string(),
            "bonus_month_tax": bonus_month_tax.normalize().to_string()
        }),
        output: serde_json::json!({
            "december_month_tax": december_month_tax.normalize().to_string(),
            "total_tax": total_tax.normalize().to_string()
        }),
        reasoning: format!(
            "{} - {} x 10 - {} = {}",
            yearly_tax.normalize(),
            regular_month_tax.normalize(),
            bonus_month_tax.normalize(),
            december_month_tax.normalize()
        ),
    });

    if december_month_tax < Decimal::ZERO {
        debug!(
            status = %status,
            december_month_tax = %december_month_tax,
            "Withholding exceeded yearly tax"
        );
        warnings.push(AuditWarning {
            code: "NEGATIVE_DECEMBER_RECONCILIATION".to_string(),
            message: format!(
                "Withholding before December exceeded the yearly tax by {}",
                (-december_month_tax).normalize()
            ),
            severity: "medium".to_string(),
        });
    }

    let take_home = salary - employee_deduction;

    CalculationResult {
        tax_rate_category: category,
        employer_insurance_contribution,
        employee_insurance_contribution,
        occupational_expense,
        gross_monthly_income,
        gross_yearly_income,
        net_monthly_income,
        net_yearly_income,
        non_taxable_income,
        taxable_income,
        regular_month_tax,
        bonus_month_tax,
        december_month_tax,
        total_tax,
        regular_month_take_home_pay: take_home - regular_month_tax,
        bonus_month_take_home_pay: take_home + bonus - bonus_month_tax,
        december_take_home_pay: take_home - december_month_tax,
        audit_trace: AuditTrace { steps, warnings },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_yearly_tax;
    use crate::models::TaxRateCategory;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_tk0_ten_million_no_bonus() {
        let result = calculate_tax(dec("10000000"), Decimal::ZERO, TaxpayerStatus::Tk0);

        assert_eq!(result.tax_rate_category, TaxRateCategory::A);
        assert_eq!(result.employer_insurance_contribution.jkk, dec("24000"));
        assert_eq!(result.employer_insurance_contribution.jkm, dec("30000"));
        assert_eq!(result.employer_insurance_contribution.bpjskes, dec("400000"));
        assert_eq!(result.employee_insurance_contribution.jht, dec("200000"));
        assert_eq!(result.employee_insurance_contribution.jp, dec("95596"));
        assert_eq!(result.gross_monthly_income, dec("10454000"));
        assert_eq!(result.occupational_expense, dec("500000"));
        assert_eq!(result.net_monthly_income, dec("9658404"));
        assert_eq!(result.net_yearly_income, dec("115900848"));
        assert_eq!(result.non_taxable_income, dec("54000000"));
        assert_eq!(result.taxable_income, dec("61900848"));
        assert_eq!(result.regular_month_tax, dec("193168.08"));
        assert_eq!(result.bonus_month_tax, dec("193168.08"));
        assert_eq!(result.december_month_tax, dec("1160278.32"));
        assert_eq!(result.total_tax, dec("3285127.2"));
        assert_eq!(result.total_tax, calculate_yearly_tax(result.taxable_income));
    }

    #[test]
    fn test_take_home_pay() {
        let result = calculate_tax(dec("10000000"), Decimal::ZERO, TaxpayerStatus::Tk0);

        assert_eq!(result.regular_month_take_home_pay, dec("9511235.92"));
        assert_eq!(result.bonus_month_take_home_pay, dec("9511235.92"));
        assert_eq!(result.december_take_home_pay, dec("8544125.68"));
    }

    #[test]
    fn test_bonus_month_uses_higher_bracket() {
        let result = calculate_tax(dec("10000000"), dec("20000000"), TaxpayerStatus::Tk0);

        // 9,658,404 + 20,000,000 = 29,658,404 falls in the 28,000,001 row (12%)
        assert_eq!(result.bonus_month_tax, dec("3559008.48"));
        assert_eq!(result.net_yearly_income, dec("135900848"));
        assert_eq!(result.taxable_income, dec("81900848"));
        assert_eq!(result.total_tax, dec("6285127.2"));
        assert_eq!(
            result.december_month_tax,
            dec("6285127.2") - dec("1931680.8") - dec("3559008.48")
        );
    }

    #[test]
    fn test_k3_zero_income_short_circuits() {
        let result = calculate_tax(Decimal::ZERO, Decimal::ZERO, TaxpayerStatus::K3);

        assert_eq!(result.tax_rate_category, TaxRateCategory::C);
        assert_eq!(result.employer_insurance_contribution.total(), Decimal::ZERO);
        assert_eq!(result.employee_insurance_contribution.total(), Decimal::ZERO);
        assert_eq!(result.non_taxable_income, dec("72000000"));
        assert_eq!(result.taxable_income, Decimal::ZERO);
        assert_eq!(result.regular_month_tax, Decimal::ZERO);
        assert_eq!(result.bonus_month_tax, Decimal::ZERO);
        assert_eq!(result.december_month_tax, Decimal::ZERO);
        assert_eq!(result.total_tax, Decimal::ZERO);
    }

    #[test]
    fn test_income_within_ptkp_records_no_withholding_steps() {
        // Net yearly income 68,189,604 stays under the K/3 PTKP of 72,000,000
        let result = calculate_tax(dec("5900000"), Decimal::ZERO, TaxpayerStatus::K3);

        assert_eq!(result.net_yearly_income, dec("68189604"));
        assert_eq!(result.taxable_income, Decimal::ZERO);
        assert_eq!(result.regular_month_tax, Decimal::ZERO);
        assert_eq!(result.regular_month_take_home_pay, dec("5723000"));
        assert!(
            result
                .audit_trace
                .steps
                .iter()
                .all(|step| step.rule_id != "regular_month_withholding")
        );
    }

    #[test]
    fn test_negative_december_is_reported_and_warned() {
        // A bonus pushes the bonus month into a high TER row while the
        // yearly liability stays modest.
        let result = calculate_tax(dec("5000000"), dec("60000000"), TaxpayerStatus::Tk0);

        assert!(result.december_month_tax < Decimal::ZERO);
        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert_eq!(
            result.audit_trace.warnings[0].code,
            "NEGATIVE_DECEMBER_RECONCILIATION"
        );
        assert_eq!(
            result.total_tax,
            result.regular_month_tax * Decimal::TEN
                + result.bonus_month_tax
                + result.december_month_tax
        );
        assert_eq!(result.total_tax, calculate_yearly_tax(result.taxable_income));
    }

    #[test]
    fn test_audit_steps_are_sequential() {
        let result = calculate_tax(dec("10000000"), dec("5000000"), TaxpayerStatus::K1);
        let steps = &result.audit_trace.steps;

        let rule_ids: Vec<&str> = steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(
            rule_ids,
            vec![
                "status_lookup",
                "employer_contribution",
                "employee_contribution",
                "occupational_expense",
                "taxable_income",
                "regular_month_withholding",
                "bonus_month_withholding",
                "yearly_progressive_tax",
                "december_reconciliation",
            ]
        );
        for (index, step) in steps.iter().enumerate() {
            assert_eq!(step.step_number, index as u32 + 1);
        }
    }

    #[test]
    fn test_employee_health_reduces_net_income() {
        let mut params = ContributionParameters::default();
        params.employee.bpjskes_rate = Some(dec("0.01"));

        let with_health =
            calculate_tax_with(&params, dec("10000000"), Decimal::ZERO, TaxpayerStatus::Tk0);
        let without = calculate_tax(dec("10000000"), Decimal::ZERO, TaxpayerStatus::Tk0);

        assert_eq!(
            without.net_monthly_income - with_health.net_monthly_income,
            dec("100000")
        );
    }

    #[test]
    fn test_maximum_amounts_stay_in_range() {
        let result = calculate_tax(MAX_AMOUNT, MAX_AMOUNT, TaxpayerStatus::K3);

        assert_eq!(MAX_AMOUNT, dec("1000000000000000"));
        assert!(result.taxable_income > Decimal::ZERO);
        assert_eq!(result.total_tax, calculate_yearly_tax(result.taxable_income));
        assert_eq!(
            result.total_tax,
            result.regular_month_tax * Decimal::TEN
                + result.bonus_month_tax
                + result.december_month_tax
        );
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let first = calculate_tax(dec("23456789.5"), dec("1234567"), TaxpayerStatus::Tk2);
        let second = calculate_tax(dec("23456789.5"), dec("1234567"), TaxpayerStatus::Tk2);
        assert_eq!(first, second);
    }
}
