//! Wad amounts: non-negative 18-decimal fixed point held in wei units.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    constants::WAD_DECIMALS,
    errors::{ErrorCode, Result},
    utils::{format_decimal, parse_decimal, round_decimals},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub const fn from_wei(wei: u128) -> Self {
        Self(wei)
    }

    pub const fn wei(self) -> u128 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Parse a decimal string ("1000", "0.5") into a wad. Digits past the
    /// 18th decimal are rounded half-up.
    pub fn parse(input: &str) -> Result<Self> {
        parse_decimal(input, WAD_DECIMALS)
            .map(Self)
            .ok_or_else(|| ErrorCode::InvalidAmount(input.to_string()))
    }

    /// Round half-up to `decimals` places
    pub fn round_dp(self, decimals: u32) -> Result<Self> {
        round_decimals(self.0, WAD_DECIMALS, decimals)
            .map(Self)
            .ok_or(ErrorCode::MathOverflow)
    }

    pub fn checked_add(self, other: Self) -> Result<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(ErrorCode::MathOverflow)
    }

    pub fn checked_sub(self, other: Self) -> Result<Self> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(ErrorCode::MathUnderflow)
    }
}

impl FromStr for Amount {
    type Err = ErrorCode;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Amount {
    type Error = ErrorCode;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> String {
        amount.to_string()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_decimal(self.0, WAD_DECIMALS))
    }
}
