//! Calculation logic for the PPh21 Withholding Engine.
//!
//! This module contains the calculation functions for monthly and yearly
//! PPh21, including taxpayer status lookup, social insurance contributions,
//! the occupational expense deduction, TER rate resolution, progressive
//! yearly tax and the December reconciliation.

mod insurance;
mod occupational_expense;
mod pph21;
mod progressive;
mod rate_table;
mod status_mapping;

pub use insurance::{
    InsuranceContributionResult, calculate_employee_contribution,
    calculate_employer_contribution, calculate_insurance_contributions,
};
pub use occupational_expense::{OccupationalExpenseResult, calculate_occupational_expense};
pub use pph21::{MAX_AMOUNT, MONTHS_PER_YEAR, REGULAR_MONTHS, calculate_tax, calculate_tax_with};
pub use progressive::{
    BracketPortion, PROGRESSIVE_BRACKETS, PROGRESSIVE_RATES_REF, TaxBracket, YearlyTaxResult,
    calculate_yearly_tax, calculate_yearly_tax_with_audit, yearly_tax_breakdown,
};
pub use rate_table::{
    MonthlyWithholdingResult, RateTableEntry, TER_TABLE_REF, calculate_monthly_withholding,
    find_rate_entry, rate_table, resolve_rate,
};
pub use status_mapping::{
    PTKP_REF, StatusLookupResult, TER_CATEGORY_REF, get_non_taxable_income,
    get_tax_rate_category, resolve_status,
};
