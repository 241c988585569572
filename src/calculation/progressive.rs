//! Progressive yearly income tax (UU 7/2021 Pasal 17).
//!
//! The annual liability is computed on taxable income (already reduced by
//! PTKP) with five marginal brackets. Each bracket taxes only the part of
//! the income between its lower and upper cumulative limits.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::AuditStep;

/// Regulation reference for the progressive rates.
pub const PROGRESSIVE_RATES_REF: &str = "UU 7/2021 Pasal 17 ayat (1)";

/// A marginal tax bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBracket {
    /// Cumulative upper limit of the bracket; `None` for the open top bracket.
    pub upper_limit: Option<Decimal>,
    /// Marginal rate applied within the bracket.
    pub rate: Decimal,
}

/// The five brackets in ascending order.
pub const PROGRESSIVE_BRACKETS: [TaxBracket; 5] = [
    TaxBracket {
        upper_limit: Some(dec!(60000000)),
        rate: dec!(0.05),
    },
    TaxBracket {
        upper_limit: Some(dec!(250000000)),
        rate: dec!(0.15),
    },
    TaxBracket {
        upper_limit: Some(dec!(500000000)),
        rate: dec!(0.25),
    },
    TaxBracket {
        upper_limit: Some(dec!(5000000000)),
        rate: dec!(0.30),
    },
    TaxBracket {
        upper_limit: None,
        rate: dec!(0.35),
    },
];

/// The share of taxable income that fell into one bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketPortion {
    /// The bracket the income fell into.
    pub bracket: TaxBracket,
    /// Income taxed at this bracket's rate.
    pub amount: Decimal,
    /// `amount` multiplied by the bracket rate.
    pub tax: Decimal,
}

/// Splits taxable income across the brackets it reaches.
///
/// Brackets the income never reaches are omitted, so zero income yields an
/// empty breakdown.
pub fn yearly_tax_breakdown(taxable_income: Decimal) -> Vec<BracketPortion> {
    let mut portions = Vec::new();
    let mut lower = Decimal::ZERO;

    for bracket in PROGRESSIVE_BRACKETS {
        if taxable_income <= lower {
            break;
        }
        let upper = bracket
            .upper_limit
            .map_or(taxable_income, |limit| limit.min(taxable_income));
        let amount = upper - lower;
        portions.push(BracketPortion {
            bracket,
            amount,
            tax: amount * bracket.rate,
        });
        match bracket.upper_limit {
            Some(limit) => lower = limit,
            None => break,
        }
    }

    portions
}

/// Computes the yearly tax on taxable income.
///
/// # Examples
///
/// ```
/// use pph21_engine::calculation::calculate_yearly_tax;
/// use rust_decimal::Decimal;
///
/// // Fully inside the 5% bracket
/// assert_eq!(calculate_yearly_tax(Decimal::new(50_000_000, 0)), Decimal::new(2_500_000, 0));
///
/// // 60M at 5% plus 40M at 15%
/// assert_eq!(calculate_yearly_tax(Decimal::new(100_000_000, 0)), Decimal::new(9_000_000, 0));
/// ```
pub fn calculate_yearly_tax(taxable_income: Decimal) -> Decimal {
    yearly_tax_breakdown(taxable_income)
        .iter()
        .map(|portion| portion.tax)
        .sum()
}

/// The result of the yearly tax step, including the audit step.
#[derive(Debug, Clone)]
pub struct YearlyTaxResult {
    /// The annual tax liability.
    pub tax: Decimal,
    /// How the taxable income was split across brackets.
    pub portions: Vec<BracketPortion>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the yearly tax and records the bracket breakdown.
pub fn calculate_yearly_tax_with_audit(
    taxable_income: Decimal,
    step_number: u32,
) -> YearlyTaxResult {
    let portions = yearly_tax_breakdown(taxable_income);
    let tax: Decimal = portions.iter().map(|portion| portion.tax).sum();

    let brackets: Vec<serde_json::Value> = portions
        .iter()
        .map(|portion| {
            serde_json::json!({
                "upper_limit": portion.bracket.upper_limit.map(|limit| limit.to_string()),
                "rate": portion.bracket.rate.normalize().to_string(),
                "amount": portion.amount.normalize().to_string(),
                "tax": portion.tax.normalize().to_string()
            })
        })
        .collect();

    let reasoning = if portions.is_empty() {
        "No taxable income, no yearly tax".to_string()
    } else {
        let terms: Vec<String> = portions
            .iter()
            .map(|portion| {
                format!(
                    "{} x {}",
                    portion.amount.normalize(),
                    portion.bracket.rate.normalize()
                )
            })
            .collect();
        format!("{} = {}", terms.join(" + "), tax.normalize())
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "yearly_progressive_tax".to_string(),
        rule_name: "Yearly Progressive Tax".to_string(),
        regulation_ref: PROGRESSIVE_RATES_REF.to_string(),
        input: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string()
        }),
        output: serde_json::json!({
            "brackets": brackets,
            "yearly_tax": tax.normalize().to_string()
        }),
        reasoning,
    };

    YearlyTaxResult {
        tax,
        portions,
        audit_step,
    }
}
