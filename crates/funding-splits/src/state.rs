use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::{
    constants::{MAX_PERMYRIAD, SPLITS_TOTAL_PERCENT},
    errors::{ErrorCode, Result},
    percent::{Permyriad, SplitPercent},
};

/// 20-byte EVM account address
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; 20]);

impl Address {
    pub const ZERO: Self = Self([0u8; 20]);

    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// EIP-55 mixed-case checksum encoding
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = Keccak256::digest(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl FromStr for Address {
    type Err = ErrorCode;

    /// Accepts 40 hex digits with an optional `0x` prefix. Mixed-case input
    /// must carry a valid EIP-55 checksum; all-lower or all-upper is taken
    /// as-is.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != 40 {
            return Err(ErrorCode::InvalidAddress(s.to_string()));
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| ErrorCode::InvalidAddress(s.to_string()))?;
        let address = Self(bytes);

        let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
        if has_lower && has_upper && &address.to_checksum()[2..] != digits {
            return Err(ErrorCode::AddressChecksumMismatch(s.to_string()));
        }

        Ok(address)
    }
}

impl TryFrom<String> for Address {
    type Error = ErrorCode;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> String {
        address.to_checksum()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

/// Anything holding a fixed-point share of a payout group
pub trait Allocation {
    /// Fixed-point value representing 100%
    const TOTAL_PERCENT: u64;

    fn beneficiary(&self) -> Option<&Address>;

    fn percent_value(&self) -> u64;
}

/// Payout or reserved-token split (v2+ protocol)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    /// Wallet receiving the split (may be empty when routed to a project)
    pub beneficiary: Option<Address>,
    /// Share of the distribution limit
    pub percent: SplitPercent,
    /// Receive claimed ERC-20 tokens rather than unclaimed balances
    pub prefer_claimed: bool,
    /// Unix timestamp before which the split cannot be changed
    pub locked_until: Option<u64>,
    /// Project receiving the split as a payment
    pub project_id: Option<u64>,
    /// Allocator contract receiving the split
    pub allocator: Option<Address>,
}

impl Split {
    /// Routed to another project; such payouts are exempt from the protocol fee
    pub fn is_project_split(&self) -> bool {
        self.project_id.is_some_and(|id| id != 0)
    }

    pub fn is_locked(&self, now: u64) -> bool {
        self.locked_until.is_some_and(|until| until > now)
    }
}

impl Allocation for Split {
    const TOTAL_PERCENT: u64 = SPLITS_TOTAL_PERCENT;

    fn beneficiary(&self) -> Option<&Address> {
        self.beneficiary.as_ref()
    }

    fn percent_value(&self) -> u64 {
        self.percent.value()
    }
}

/// Payout mod (v1 protocol)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutMod {
    pub beneficiary: Option<Address>,
    pub percent: Permyriad,
    pub prefer_unstaked: bool,
    pub locked_until: Option<u64>,
    pub project_id: Option<u64>,
    pub allocator: Option<Address>,
}

impl Allocation for PayoutMod {
    const TOTAL_PERCENT: u64 = MAX_PERMYRIAD;

    fn beneficiary(&self) -> Option<&Address> {
        self.beneficiary.as_ref()
    }

    fn percent_value(&self) -> u64 {
        self.percent.value()
    }
}

/// Reserved-ticket mod (v1 protocol)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketMod {
    pub beneficiary: Option<Address>,
    pub percent: Permyriad,
    pub prefer_unstaked: bool,
    pub locked_until: Option<u64>,
}

impl Allocation for TicketMod {
    const TOTAL_PERCENT: u64 = MAX_PERMYRIAD;

    fn beneficiary(&self) -> Option<&Address> {
        self.beneficiary.as_ref()
    }

    fn percent_value(&self) -> u64 {
        self.percent.value()
    }
}
