use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorCode {
    #[error("Percent {value} exceeds the fixed-point total of {total}")]
    PercentOutOfRange { value: u128, total: u64 },

    #[error("Percentage must be a finite, non-negative number")]
    InvalidPercentage,

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Distribution limit cannot be zero")]
    ZeroDistributionLimit,

    #[error("Split percentages must not exceed 100% (total {total} of {max})")]
    SplitsExceedTotal { total: u64, max: u64 },

    #[error("Split percentage cannot be zero")]
    ZeroPercentage,

    #[error("Duplicate beneficiary address: {0}")]
    DuplicateBeneficiary(String),

    #[error("Invalid address: {0:?}")]
    InvalidAddress(String),

    #[error("Bad address checksum: {0}")]
    AddressChecksumMismatch(String),

    #[error("Split {index} is locked until {locked_until}")]
    SplitLocked { index: usize, locked_until: u64 },

    #[error("No split at index {0}")]
    SplitNotFound(usize),

    #[error("Token count {count} exceeds total supply {supply}")]
    TokenCountExceedsSupply { count: String, supply: String },

    #[error("CSV contains splits with 0% percent (line {line})")]
    CsvZeroPercent { line: usize },

    #[error("CSV contains multiple splits for the same beneficiary: {0}")]
    CsvDuplicateBeneficiaries(String),

    #[error("CSV line {line}: expected at most {expected} fields, found {found}")]
    CsvFieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("CSV line {line}: missing {field}")]
    CsvMissingField { line: usize, field: &'static str },

    #[error("CSV line {line}: invalid {field} {value:?}")]
    CsvInvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Math overflow")]
    MathOverflow,

    #[error("Math underflow")]
    MathUnderflow,
}

pub type Result<T> = std::result::Result<T, ErrorCode>;
