//! Monthly withholding rate tables (TER).
//!
//! Each TER category owns a table of (threshold, rate) entries ordered by
//! descending threshold. The applicable rate for an income is the rate of
//! the first entry whose threshold does not exceed that income, which is the
//! greatest threshold at or below it. Every table ends with a zero-rate
//! entry at threshold 0, so any non-negative income resolves to a rate.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{AuditStep, TaxRateCategory};

/// Regulation reference for the TER tables.
pub const TER_TABLE_REF: &str = "PP 58/2023 Lampiran";

/// A single row of a TER table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateTableEntry {
    /// Lowest monthly income this rate applies to.
    pub threshold: Decimal,
    /// Withholding rate as a fraction of monthly income.
    pub rate: Decimal,
}

const fn ter(threshold: u32, rate: Decimal) -> RateTableEntry {
    RateTableEntry {
        threshold: Decimal::from_parts(threshold, 0, 0, false, 0),
        rate,
    }
}

/// Category A monthly rates.
static TER_A: &[RateTableEntry] = &[
    ter(1_400_000_001, dec!(0.34)),
    ter(910_000_001, dec!(0.33)),
    ter(695_000_001, dec!(0.32)),
    ter(550_000_001, dec!(0.31)),
    ter(454_000_001, dec!(0.30)),
    ter(337_000_001, dec!(0.29)),
    ter(206_000_001, dec!(0.28)),
    ter(157_000_001, dec!(0.27)),
    ter(125_000_001, dec!(0.26)),
    ter(103_000_001, dec!(0.25)),
    ter(89_000_001, dec!(0.24)),
    ter(77_500_001, dec!(0.23)),
    ter(68_600_001, dec!(0.22)),
    ter(62_200_001, dec!(0.21)),
    ter(56_300_001, dec!(0.20)),
    ter(51_400_001, dec!(0.19)),
    ter(47_800_001, dec!(0.18)),
    ter(43_850_001, dec!(0.17)),
    ter(39_100_001, dec!(0.16)),
    ter(35_400_001, dec!(0.15)),
    ter(32_400_001, dec!(0.14)),
    ter(30_050_001, dec!(0.13)),
    ter(28_000_001, dec!(0.12)),
    ter(26_450_001, dec!(0.11)),
    ter(24_150_001, dec!(0.10)),
    ter(19_750_001, dec!(0.09)),
    ter(16_950_001, dec!(0.08)),
    ter(15_100_001, dec!(0.07)),
    ter(13_750_001, dec!(0.06)),
    ter(12_500_001, dec!(0.05)),
    ter(11_600_001, dec!(0.04)),
    ter(11_050_001, dec!(0.035)),
    ter(10_700_001, dec!(0.03)),
    ter(10_350_001, dec!(0.025)),
    ter(10_050_001, dec!(0.0225)),
    ter(9_650_001, dec!(0.02)),
    ter(8_550_001, dec!(0.0175)),
    ter(7_500_001, dec!(0.015)),
    ter(6_750_001, dec!(0.0125)),
    ter(6_300_001, dec!(0.01)),
    ter(5_950_001, dec!(0.0075)),
    ter(5_650_001, dec!(0.005)),
    ter(5_400_001, dec!(0.0025)),
    ter(0, dec!(0)),
];

/// Category B monthly rates.
static TER_B: &[RateTableEntry] = &[
    ter(1_405_000_001, dec!(0.34)),
    ter(957_000_001, dec!(0.33)),
    ter(704_000_001, dec!(0.32)),
    ter(555_000_001, dec!(0.31)),
    ter(459_000_001, dec!(0.30)),
    ter(374_000_001, dec!(0.29)),
    ter(211_000_001, dec!(0.28)),
    ter(163_000_001, dec!(0.27)),
    ter(129_000_001, dec!(0.26)),
    ter(109_000_001, dec!(0.25)),
    ter(93_000_001, dec!(0.24)),
    ter(80_000_001, dec!(0.23)),
    ter(71_000_001, dec!(0.22)),
    ter(64_000_001, dec!(0.21)),
    ter(58_500_001, dec!(0.20)),
    ter(53_800_001, dec!(0.19)),
    ter(49_500_001, dec!(0.18)),
    ter(45_800_001, dec!(0.17)),
    ter(41_100_001, dec!(0.16)),
    ter(37_100_001, dec!(0.15)),
    ter(33_950_001, dec!(0.14)),
    ter(31_450_001, dec!(0.13)),
    ter(29_350_001, dec!(0.12)),
    ter(27_700_001, dec!(0.11)),
    ter(26_000_001, dec!(0.10)),
    ter(21_850_001, dec!(0.09)),
    ter(18_450_001, dec!(0.08)),
    ter(16_400_001, dec!(0.07)),
    ter(14_950_001, dec!(0.06)),
    ter(13_600_001, dec!(0.05)),
    ter(12_600_001, dec!(0.04)),
    ter(11_600_001, dec!(0.03)),
    ter(11_250_001, dec!(0.025)),
    ter(10_750_001, dec!(0.02)),
    ter(9_200_001, dec!(0.015)),
    ter(7_300_001, dec!(0.01)),
    ter(6_850_001, dec!(0.0075)),
    ter(6_500_001, dec!(0.005)),
    ter(6_200_001, dec!(0.0025)),
    ter(0, dec!(0)),
];

/// Category C monthly rates.
static TER_C: &[RateTableEntry] = &[
    ter(1_419_000_001, dec!(0.34)),
    ter(965_000_001, dec!(0.33)),
    ter(709_000_001, dec!(0.32)),
    ter(561_000_001, dec!(0.31)),
    ter(463_000_001, dec!(0.30)),
    ter(390_000_001, dec!(0.29)),
    ter(221_000_001, dec!(0.28)),
    ter(169_000_001, dec!(0.27)),
    ter(134_000_001, dec!(0.26)),
    ter(110_000_001, dec!(0.25)),
    ter(95_600_001, dec!(0.24)),
    ter(83_200_001, dec!(0.23)),
    ter(74_500_001, dec!(0.22)),
    ter(66_700_001, dec!(0.21)),
    ter(60_400_001, dec!(0.20)),
    ter(55_800_001, dec!(0.19)),
    ter(51_200_001, dec!(0.18)),
    ter(47_400_001, dec!(0.17)),
    ter(43_000_001, dec!(0.16)),
    ter(38_900_001, dec!(0.15)),
    ter(35_400_001, dec!(0.14)),
    ter(32_600_001, dec!(0.13)),
    ter(30_100_001, dec!(0.12)),
    ter(28_100_001, dec!(0.11)),
    ter(26_600_001, dec!(0.10)),
    ter(22_700_001, dec!(0.09)),
    ter(19_500_001, dec!(0.08)),
    ter(17_050_001, dec!(0.07)),
    ter(15_550_001, dec!(0.06)),
    ter(14_150_001, dec!(0.05)),
    ter(12_950_001, dec!(0.04)),
    ter(12_050_001, dec!(0.03)),
    ter(11_200_001, dec!(0.02)),
    ter(10_950_001, dec!(0.0175)),
    ter(9_800_001, dec!(0.015)),
    ter(8_850_001, dec!(0.0125)),
    ter(7_800_001, dec!(0.01)),
    ter(7_350_001, dec!(0.0075)),
    ter(6_950_001, dec!(0.005)),
    ter(6_600_001, dec!(0.0025)),
    ter(0, dec!(0)),
];

/// Returns the TER table for a category, ordered by descending threshold.
pub fn rate_table(category: TaxRateCategory) -> &'static [RateTableEntry] {
    match category {
        TaxRateCategory::A => TER_A,
        TaxRateCategory::B => TER_B,
        TaxRateCategory::C => TER_C,
    }
}

/// Finds the table entry that applies to a monthly income.
///
/// Incomes below every threshold (only possible for negative input) fall
/// back to the zero-rate floor entry.
pub fn find_rate_entry(category: TaxRateCategory, income: Decimal) -> RateTableEntry {
    let table = rate_table(category);
    // Thresholds descend, so entries above the income form a prefix.
    let index = table.partition_point(|entry| entry.threshold > income);
    table
        .get(index)
        .or_else(|| table.last())
        .copied()
        .unwrap_or(RateTableEntry {
            threshold: Decimal::ZERO,
            rate: Decimal::ZERO,
        })
}

/// Resolves the withholding rate for a monthly income.
///
/// # Examples
///
/// ```
/// use pph21_engine::calculation::resolve_rate;
/// use pph21_engine::models::TaxRateCategory;
/// use rust_decimal::Decimal;
///
/// // 9,658,404 falls in the 9,650,001 row of category A
/// let rate = resolve_rate(TaxRateCategory::A, Decimal::new(9_658_404, 0));
/// assert_eq!(rate, Decimal::new(2, 2));
///
/// // Below the first non-zero threshold nothing is withheld
/// assert_eq!(resolve_rate(TaxRateCategory::C, Decimal::new(6_600_000, 0)), Decimal::ZERO);
/// ```
pub fn resolve_rate(category: TaxRateCategory, income: Decimal) -> Decimal {
    find_rate_entry(category, income).rate
}

/// The result of applying a TER rate to one month's income.
#[derive(Debug, Clone)]
pub struct MonthlyWithholdingResult {
    /// The resolved rate.
    pub rate: Decimal,
    /// Income multiplied by the rate.
    pub tax: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the withholding for one month of income.
///
/// `month` names the month kind in the audit trail (e.g., "regular_month").
pub fn calculate_monthly_withholding(
    category: TaxRateCategory,
    income: Decimal,
    month: &str,
    step_number: u32,
) -> MonthlyWithholdingResult {
    let entry = find_rate_entry(category, income);
    let tax = income * entry.rate;

    let audit_step = AuditStep {
        step_number,
        rule_id: format!("{}_withholding", month),
        rule_name: format!("TER Withholding ({})", month.replace('_', " ")),
        regulation_ref: TER_TABLE_REF.to_string(),
        input: serde_json::json!({
            "tax_rate_category": category.label(),
            "income": income.normalize().to_string()
        }),
        output: serde_json::json!({
            "threshold": entry.threshold.to_string(),
            "rate": entry.rate.normalize().to_string(),
            "tax": tax.normalize().to_string()
        }),
        reasoning: format!(
            "Category {} row from {}: {} x {} = {}",
            category,
            entry.threshold,
            income.normalize(),
            entry.rate.normalize(),
            tax.normalize()
        ),
    };

    MonthlyWithholdingResult {
        rate: entry.rate,
        tax,
        audit_step,
    }
}
