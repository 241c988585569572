//! PPh21 Withholding Engine
//!
//! This crate computes Indonesian employment income tax withholding (PPh21)
//! for a January-December cycle with one bonus event, using the effective
//! rate tables (TER) of PP 58/2023 for monthly withholding and the
//! progressive rates of UU 7/2021 for the year-end reconciliation.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
