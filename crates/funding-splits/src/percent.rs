//! Fixed-point percentages.
//!
//! A percent is stored as an integer share of a protocol-defined total so it
//! never drifts through floating point. Splits use parts per billion, v1 mods
//! and funding-cycle rates use parts per ten thousand.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{MAX_FEE, MAX_PERMYRIAD, SPLITS_TOTAL_PERCENT},
    errors::{ErrorCode, Result},
    utils::{format_decimal, parse_decimal},
};

/// Integer share of `TOTAL`, always in `0..=TOTAL`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct FixedPercent<const TOTAL: u64>(u64);

/// Percent per billion
pub type SplitPercent = FixedPercent<SPLITS_TOTAL_PERCENT>;
/// Percent per ten thousand
pub type Permyriad = FixedPercent<MAX_PERMYRIAD>;
/// Protocol fee per billion
pub type FeePercent = FixedPercent<MAX_FEE>;

impl<const TOTAL: u64> FixedPercent<TOTAL> {
    pub const ZERO: Self = Self(0);
    pub const FULL: Self = Self(TOTAL);

    pub fn new(value: u64) -> Result<Self> {
        if value > TOTAL {
            return Err(ErrorCode::PercentOutOfRange {
                value: value as u128,
                total: TOTAL,
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Number of decimals a human-scale percentage carries at this scale,
    /// e.g. 7 for parts per billion ("12.3456789")
    pub fn percentage_decimals() -> u32 {
        let mut unit = TOTAL / 100;
        let mut decimals = 0;
        while unit >= 10 {
            unit /= 10;
            decimals += 1;
        }
        decimals
    }

    /// Convert a human-scale percentage (0-100) to fixed point, rounding to
    /// the nearest unit
    pub fn from_percentage(percentage: f64) -> Result<Self> {
        let scaled = scale_percentage(percentage, TOTAL)?;
        if scaled > TOTAL as u128 {
            return Err(ErrorCode::PercentOutOfRange {
                value: scaled,
                total: TOTAL,
            });
        }
        Ok(Self(scaled as u64))
    }

    /// Human-scale percentage (0-100)
    pub fn to_percentage(self) -> f64 {
        self.0 as f64 * 100.0 / TOTAL as f64
    }

    /// Parse a human-scale decimal percentage ("12.5") exactly
    pub fn parse_percentage(input: &str) -> Result<Self> {
        let value = parse_decimal(input, Self::percentage_decimals())
            .ok_or(ErrorCode::InvalidPercentage)?;
        if value > TOTAL as u128 {
            return Err(ErrorCode::PercentOutOfRange { value, total: TOTAL });
        }
        Ok(Self(value as u64))
    }

    /// Exact human-scale decimal, inverse of [`Self::parse_percentage`]
    pub fn format_percentage(self) -> String {
        format_decimal(self.0 as u128, Self::percentage_decimals())
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        let sum = self.0.checked_add(other.0)?;
        (sum <= TOTAL).then_some(Self(sum))
    }

    /// Remaining share up to 100%
    pub fn complement(self) -> Self {
        Self(TOTAL - self.0)
    }
}

/// Scale a human-scale percentage onto a fixed-point total without an upper
/// bound. Rejects NaN, infinities and negatives.
pub(crate) fn scale_percentage(percentage: f64, total: u64) -> Result<u128> {
    if !percentage.is_finite() || percentage < 0.0 {
        return Err(ErrorCode::InvalidPercentage);
    }
    let scaled = (percentage * total as f64 / 100.0).round();
    if scaled >= u128::MAX as f64 {
        return Err(ErrorCode::MathOverflow);
    }
    Ok(scaled as u128)
}

impl<const TOTAL: u64> TryFrom<u64> for FixedPercent<TOTAL> {
    type Error = ErrorCode;

    fn try_from(value: u64) -> Result<Self> {
        Self::new(value)
    }
}

impl<const TOTAL: u64> From<FixedPercent<TOTAL>> for u64 {
    fn from(percent: FixedPercent<TOTAL>) -> u64 {
        percent.0
    }
}

impl<const TOTAL: u64> fmt::Display for FixedPercent<TOTAL> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.format_percentage())
    }
}
