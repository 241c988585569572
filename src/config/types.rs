//! Configuration types for PPh21 calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Metadata about the regulation the configuration implements.
#[derive(Debug, Clone, Deserialize)]
pub struct RegulationMetadata {
    /// The regulation identifier (e.g., "PP 58/2023").
    pub code: String,
    /// The human-readable name of the regulation.
    pub name: String,
    /// The date from which the regulation applies.
    pub effective_date: NaiveDate,
    /// URL to the official regulation text.
    pub source_url: String,
}

impl Default for RegulationMetadata {
    fn default() -> Self {
        Self {
            code: "PP 58/2023".to_string(),
            name: "Tarif Pemotongan Pajak Penghasilan Pasal 21".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            source_url: "https://peraturan.bpk.go.id/Details/272607/pp-no-58-tahun-2023"
                .to_string(),
        }
    }
}

/// Employer contribution rates, as fractions of salary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmployerRates {
    /// Work-accident insurance rate.
    pub jkk_rate: Decimal,
    /// Death insurance rate.
    pub jkm_rate: Decimal,
    /// Health insurance rate, applied to the capped salary.
    pub bpjskes_rate: Decimal,
}

/// Employee contribution rates, as fractions of salary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmployeeRates {
    /// Old-age savings rate.
    pub jht_rate: Decimal,
    /// Pension rate, applied to the capped salary.
    pub jp_rate: Decimal,
    /// Health insurance rate on the capped salary; absent means not withheld.
    #[serde(default)]
    pub bpjskes_rate: Option<Decimal>,
}

/// Maximum salary bases for capped contributions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SalaryCaps {
    /// Salary cap for health insurance contributions.
    pub bpjskes: Decimal,
    /// Salary cap for pension contributions.
    pub jp: Decimal,
}

/// Occupational expense (biaya jabatan) deduction parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OccupationalExpenseConfig {
    /// Fraction of gross monthly income that may be deducted.
    pub rate: Decimal,
    /// Maximum monthly deduction.
    pub monthly_cap: Decimal,
}

/// All parameters feeding the insurance and deduction steps.
///
/// The default is the statutory configuration in force for PP 58/2023.
///
/// # Example
///
/// ```
/// use pph21_engine::config::ContributionParameters;
/// use rust_decimal::Decimal;
///
/// let params = ContributionParameters::default();
/// assert_eq!(params.caps.jp, Decimal::new(9_559_600, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContributionParameters {
    /// Employer contribution rates.
    pub employer: EmployerRates,
    /// Employee contribution rates.
    pub employee: EmployeeRates,
    /// Salary caps for capped contributions.
    pub caps: SalaryCaps,
    /// Occupational expense deduction.
    pub occupational_expense: OccupationalExpenseConfig,
}

impl Default for ContributionParameters {
    fn default() -> Self {
        Self {
            employer: EmployerRates {
                jkk_rate: dec!(0.0024),
                jkm_rate: dec!(0.003),
                bpjskes_rate: dec!(0.04),
            },
            employee: EmployeeRates {
                jht_rate: dec!(0.02),
                jp_rate: dec!(0.01),
                bpjskes_rate: None,
            },
            caps: SalaryCaps {
                bpjskes: dec!(12000000),
                jp: dec!(9559600),
            },
            occupational_expense: OccupationalExpenseConfig {
                rate: dec!(0.05),
                monthly_cap: dec!(500000),
            },
        }
    }
}

/// The complete regulation configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct RegulationConfig {
    /// Regulation metadata.
    metadata: RegulationMetadata,
    /// Contribution and deduction parameters.
    contributions: ContributionParameters,
}

impl RegulationConfig {
    /// Creates a new RegulationConfig from its component parts.
    pub fn new(metadata: RegulationMetadata, contributions: ContributionParameters) -> Self {
        Self {
            metadata,
            contributions,
        }
    }

    /// Returns the regulation metadata.
    pub fn regulation(&self) -> &RegulationMetadata {
        &self.metadata
    }

    /// Returns the contribution parameters.
    pub fn contributions(&self) -> &ContributionParameters {
        &self.contributions
    }
}
