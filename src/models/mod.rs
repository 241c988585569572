//! Core data models for the PPh21 Withholding Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod insurance_contribution;
mod taxpayer_status;

pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, CalculationResult};
pub use insurance_contribution::{EmployeeInsuranceContribution, EmployerInsuranceContribution};
pub use taxpayer_status::{TaxRateCategory, TaxpayerStatus};
