use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    constants::{AMOUNT_PRECISION, DEFAULT_FEE_PERCENT, WAD_DECIMALS},
    errors::{ErrorCode, Result},
    percent::FeePercent,
};

/// Display and fee settings, loadable from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// Decimal places shown for payout amounts
    pub display_precision: u32,
    /// Protocol fee per billion
    pub fee_percentage: FeePercent,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            display_precision: AMOUNT_PRECISION,
            fee_percentage: FeePercent::new(DEFAULT_FEE_PERCENT).unwrap_or_default(),
        }
    }
}

impl AllocationConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ErrorCode::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ErrorCode::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.display_precision > WAD_DECIMALS {
            return Err(ErrorCode::InvalidConfig(format!(
                "display_precision {} exceeds {} decimals",
                self.display_precision, WAD_DECIMALS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AllocationConfig::default();
        assert_eq!(config.display_precision, 4);
        assert_eq!(config.fee_percentage.format_percentage(), "2.5");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AllocationConfig::from_toml_str("display_precision = 2").unwrap();
        assert_eq!(config.display_precision, 2);
        assert_eq!(config.fee_percentage, AllocationConfig::default().fee_percentage);
    }

    #[test]
    fn fee_is_range_checked() {
        let err = AllocationConfig::from_toml_str("fee_percentage = 2000000000").unwrap_err();
        assert!(matches!(err, ErrorCode::InvalidConfig(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("splits.toml");
        fs::write(&path, "display_precision = 6\nfee_percentage = 50000000\n").unwrap();

        let config = AllocationConfig::load(&path).unwrap();
        assert_eq!(config.display_precision, 6);
        assert_eq!(config.fee_percentage.format_percentage(), "5");

        let missing = AllocationConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ErrorCode::InvalidConfig(_)));
    }

    #[test]
    fn precision_is_bounded() {
        let err = AllocationConfig::from_toml_str("display_precision = 19").unwrap_err();
        assert!(matches!(err, ErrorCode::InvalidConfig(_)));
    }
}
