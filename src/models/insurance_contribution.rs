//! Social insurance contribution records.
//!
//! Employer-paid contributions are added to gross income; employee-paid
//! contributions are deducted when computing net income.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monthly contributions paid by the employer on top of salary.
///
/// # Example
///
/// ```
/// use pph21_engine::models::EmployerInsuranceContribution;
/// use rust_decimal::Decimal;
///
/// let contribution = EmployerInsuranceContribution {
///     jkk: Decimal::new(24_000, 0),
///     jkm: Decimal::new(30_000, 0),
///     bpjskes: Decimal::new(400_000, 0),
/// };
/// assert_eq!(contribution.total(), Decimal::new(454_000, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerInsuranceContribution {
    /// Work-accident insurance (Jaminan Kecelakaan Kerja).
    pub jkk: Decimal,
    /// Death insurance (Jaminan Kematian).
    pub jkm: Decimal,
    /// National health insurance (BPJS Kesehatan), employer share.
    pub bpjskes: Decimal,
}

impl EmployerInsuranceContribution {
    /// Sum of all employer components.
    pub fn total(&self) -> Decimal {
        self.jkk + self.jkm + self.bpjskes
    }
}

/// Monthly contributions withheld from the employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInsuranceContribution {
    /// Old-age savings (Jaminan Hari Tua), employee share.
    pub jht: Decimal,
    /// Pension fund (Jaminan Pensiun), employee share.
    pub jp: Decimal,
    /// Health insurance employee share, present only when configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpjskes: Option<Decimal>,
}

impl EmployeeInsuranceContribution {
    /// Sum of all employee components.
    pub fn total(&self) -> Decimal {
        self.jht + self.jp + self.bpjskes.unwrap_or(Decimal::ZERO)
    }
}
