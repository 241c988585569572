//! Taxpayer status lookups.
//!
//! Maps each PTKP status to its TER category and its yearly non-taxable
//! income threshold. Both mappings are exhaustive matches, so a new status
//! variant does not compile until every mapping covers it.

use rust_decimal::Decimal;

use crate::models::{AuditStep, TaxRateCategory, TaxpayerStatus};

/// Regulation reference for the status to category mapping.
pub const TER_CATEGORY_REF: &str = "PP 58/2023 Pasal 2";

/// Regulation reference for the PTKP amounts.
pub const PTKP_REF: &str = "PMK 101/PMK.010/2016";

/// Returns the TER category for a taxpayer status.
///
/// # Examples
///
/// ```
/// use pph21_engine::calculation::get_tax_rate_category;
/// use pph21_engine::models::{TaxRateCategory, TaxpayerStatus};
///
/// assert_eq!(get_tax_rate_category(TaxpayerStatus::K0), TaxRateCategory::A);
/// assert_eq!(get_tax_rate_category(TaxpayerStatus::K3), TaxRateCategory::C);
/// ```
pub fn get_tax_rate_category(status: TaxpayerStatus) -> TaxRateCategory {
    match status {
        TaxpayerStatus::Tk0 | TaxpayerStatus::Tk1 | TaxpayerStatus::K0 => TaxRateCategory::A,
        TaxpayerStatus::Tk2 | TaxpayerStatus::Tk3 | TaxpayerStatus::K1 | TaxpayerStatus::K2 => {
            TaxRateCategory::B
        }
        TaxpayerStatus::K3 => TaxRateCategory::C,
    }
}

/// Returns the yearly non-taxable income (PTKP) for a taxpayer status.
///
/// The base allowance is 54,000,000 with 4,500,000 added for marriage and
/// for each dependent.
pub fn get_non_taxable_income(status: TaxpayerStatus) -> Decimal {
    let amount: i64 = match status {
        TaxpayerStatus::Tk0 => 54_000_000,
        TaxpayerStatus::Tk1 => 58_500_000,
        TaxpayerStatus::Tk2 => 63_000_000,
        TaxpayerStatus::Tk3 => 67_500_000,
        TaxpayerStatus::K0 => 58_500_000,
        TaxpayerStatus::K1 => 63_000_000,
        TaxpayerStatus::K2 => 67_500_000,
        TaxpayerStatus::K3 => 72_000_000,
    };
    Decimal::new(amount, 0)
}

/// The result of resolving a taxpayer status, including the audit step.
#[derive(Debug, Clone)]
pub struct StatusLookupResult {
    /// The TER category for monthly withholding.
    pub category: TaxRateCategory,
    /// The yearly non-taxable income threshold.
    pub non_taxable_income: Decimal,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Resolves the category and PTKP for a status and records the decision.
pub fn resolve_status(status: TaxpayerStatus, step_number: u32) -> StatusLookupResult {
    let category = get_tax_rate_category(status);
    let non_taxable_income = get_non_taxable_income(status);

    let audit_step = AuditStep {
        step_number,
        rule_id: "status_lookup".to_string(),
        rule_name: "Taxpayer Status Lookup".to_string(),
        regulation_ref: format!("{}; {}", TER_CATEGORY_REF, PTKP_REF),
        input: serde_json::json!({
            "status": status.code()
        }),
        output: serde_json::json!({
            "tax_rate_category": category.label(),
            "non_taxable_income": non_taxable_income.to_string()
        }),
        reasoning: format!(
            "Status {} uses TER category {} with PTKP {}",
            status, category, non_taxable_income
        ),
    };

    StatusLookupResult {
        category,
        non_taxable_income,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_category_for_every_status() {
        let expected = [
            (TaxpayerStatus::Tk0, TaxRateCategory::A),
            (TaxpayerStatus::Tk1, TaxRateCategory::A),
            (TaxpayerStatus::Tk2, TaxRateCategory::B),
            (TaxpayerStatus::Tk3, TaxRateCategory::B),
            (TaxpayerStatus::K0, TaxRateCategory::A),
            (TaxpayerStatus::K1, TaxRateCategory::B),
            (TaxpayerStatus::K2, TaxRateCategory::B),
            (TaxpayerStatus::K3, TaxRateCategory::C),
        ];
        for (status, category) in expected {
            assert_eq!(get_tax_rate_category(status), category, "status {}", status);
        }
    }

    #[test]
    fn test_non_taxable_income_for_every_status() {
        let expected = [
            (TaxpayerStatus::Tk0, "54000000"),
            (TaxpayerStatus::Tk1, "58500000"),
            (TaxpayerStatus::Tk2, "63000000"),
            (TaxpayerStatus::Tk3, "67500000"),
            (TaxpayerStatus::K0, "58500000"),
            (TaxpayerStatus::K1, "63000000"),
            (TaxpayerStatus::K2, "67500000"),
            (TaxpayerStatus::K3, "72000000"),
        ];
        for (status, amount) in expected {
            assert_eq!(get_non_taxable_income(status), dec(amount), "status {}", status);
        }
    }

    #[test]
    fn test_non_taxable_income_follows_allowance_formula() {
        for status in TaxpayerStatus::ALL {
            let additions = i64::from(status.dependents()) + i64::from(status.is_married());
            let expected = Decimal::new(54_000_000 + 4_500_000 * additions, 0);
            assert_eq!(get_non_taxable_income(status), expected);
        }
    }

    #[test]
    fn test_resolve_status_records_audit_step() {
        let result = resolve_status(TaxpayerStatus::K1, 1);

        assert_eq!(result.category, TaxRateCategory::B);
        assert_eq!(result.non_taxable_income, dec("63000000"));
        assert_eq!(result.audit_step.step_number, 1);
        assert_eq!(result.audit_step.rule_id, "status_lookup");
        assert_eq!(result.audit_step.input["status"], "K/1");
        assert_eq!(result.audit_step.output["tax_rate_category"], "B");
        assert!(result.audit_step.reasoning.contains("63000000"));
    }
}
