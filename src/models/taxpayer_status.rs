//! Taxpayer status and rate category types.
//!
//! This module defines the closed set of PTKP statuses (marital status and
//! number of dependents) and the three TER categories derived from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Marital status and dependent count of a taxpayer.
///
/// `TK` is single (tidak kawin), `K` is married (kawin); the digit is the
/// number of dependents, capped at three.
///
/// # Example
///
/// ```
/// use pph21_engine::models::TaxpayerStatus;
///
/// let status: TaxpayerStatus = "K/2".parse().unwrap();
/// assert_eq!(status, TaxpayerStatus::K2);
/// assert_eq!(status.to_string(), "K/2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxpayerStatus {
    /// Single, no dependents.
    #[serde(rename = "TK/0")]
    Tk0,
    /// Single, one dependent.
    #[serde(rename = "TK/1")]
    Tk1,
    /// Single, two dependents.
    #[serde(rename = "TK/2")]
    Tk2,
    /// Single, three dependents.
    #[serde(rename = "TK/3")]
    Tk3,
    /// Married, no dependents.
    #[serde(rename = "K/0")]
    K0,
    /// Married, one dependent.
    #[serde(rename = "K/1")]
    K1,
    /// Married, two dependents.
    #[serde(rename = "K/2")]
    K2,
    /// Married, three dependents.
    #[serde(rename = "K/3")]
    K3,
}

impl TaxpayerStatus {
    /// Every status, in form display order.
    pub const ALL: [TaxpayerStatus; 8] = [
        TaxpayerStatus::Tk0,
        TaxpayerStatus::Tk1,
        TaxpayerStatus::Tk2,
        TaxpayerStatus::Tk3,
        TaxpayerStatus::K0,
        TaxpayerStatus::K1,
        TaxpayerStatus::K2,
        TaxpayerStatus::K3,
    ];

    /// Returns the status code as written on tax forms (e.g., "TK/0").
    pub fn code(&self) -> &'static str {
        match self {
            TaxpayerStatus::Tk0 => "TK/0",
            TaxpayerStatus::Tk1 => "TK/1",
            TaxpayerStatus::Tk2 => "TK/2",
            TaxpayerStatus::Tk3 => "TK/3",
            TaxpayerStatus::K0 => "K/0",
            TaxpayerStatus::K1 => "K/1",
            TaxpayerStatus::K2 => "K/2",
            TaxpayerStatus::K3 => "K/3",
        }
    }

    /// Returns true if the taxpayer is married.
    pub fn is_married(&self) -> bool {
        matches!(
            self,
            TaxpayerStatus::K0 | TaxpayerStatus::K1 | TaxpayerStatus::K2 | TaxpayerStatus::K3
        )
    }

    /// Returns the number of dependents (0 to 3).
    pub fn dependents(&self) -> u8 {
        match self {
            TaxpayerStatus::Tk0 | TaxpayerStatus::K0 => 0,
            TaxpayerStatus::Tk1 | TaxpayerStatus::K1 => 1,
            TaxpayerStatus::Tk2 | TaxpayerStatus::K2 => 2,
            TaxpayerStatus::Tk3 | TaxpayerStatus::K3 => 3,
        }
    }
}

impl fmt::Display for TaxpayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TaxpayerStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaxpayerStatus::ALL
            .into_iter()
            .find(|status| status.code() == s)
            .ok_or_else(|| EngineError::InvalidStatus {
                value: s.to_string(),
            })
    }
}

/// TER (tarif efektif rata-rata) category selecting the monthly rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxRateCategory {
    /// TK/0, TK/1 and K/0.
    A,
    /// TK/2, TK/3, K/1 and K/2.
    B,
    /// K/3.
    C,
}

impl TaxRateCategory {
    /// Returns the plain label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            TaxRateCategory::A => "A",
            TaxRateCategory::B => "B",
            TaxRateCategory::C => "C",
        }
    }
}

impl fmt::Display for TaxRateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
