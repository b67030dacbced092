//! Client configuration
//!
//! Loaded from a TOML file or string, with `MARKET_*` environment overrides.
//! Connection settings are carried for the ledger collaborator; the crate
//! itself never opens a connection.

use std::{env, fs, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

use crate::error::ConfigError;

type Result<T> = std::result::Result<T, ConfigError>;

pub const DEFAULT_PROGRAM_ID: &str = "6d5P8J92SyZFc1Cz3EHJzjySTkjzxaJDwizfQQUzXNev";
pub const DEFAULT_BASE_MINT: &str = "CSXXfV4qSUJRCbYnk21Wm6mPDZUvYN2aWUjAaxoeViTS";
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base58 address of the market program
    pub program_id: String,
    /// Base58 address of the pool token mint
    pub base_mint: String,
    pub rpc_url: String,
    pub commitment: String,
    /// Markets created before this unix time are hidden. 0 shows everything.
    pub market_cutoff_timestamp: i64,
    /// Reject accounts whose tag is not the market discriminator
    pub validate_discriminator: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            program_id: DEFAULT_PROGRAM_ID.to_string(),
            base_mint: DEFAULT_BASE_MINT.to_string(),
            rpc_url: DEFAULT_RPC_URL.to_string(),
            commitment: "confirmed".to_string(),
            market_cutoff_timestamp: 0,
            validate_discriminator: true,
        }
    }
}

impl ClientConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Defaults overridden by `MARKET_PROGRAM_ID`, `MARKET_BASE_MINT`,
    /// `MARKET_RPC_URL` and `MARKET_CUTOFF_TIMESTAMP`.
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from any key lookup (environment, CLI, test map).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("MARKET_PROGRAM_ID") {
            self.program_id = v;
        }
        if let Some(v) = lookup("MARKET_BASE_MINT") {
            self.base_mint = v;
        }
        if let Some(v) = lookup("MARKET_RPC_URL") {
            self.rpc_url = v;
        }
        if let Some(v) = lookup("MARKET_CUTOFF_TIMESTAMP") {
            self.market_cutoff_timestamp = v.parse().map_err(|_| ConfigError::InvalidValue {
                field: "market_cutoff_timestamp",
                value: v.clone(),
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        self.program_id()?;
        self.base_mint()?;
        Ok(())
    }

    pub fn program_id(&self) -> Result<Pubkey> {
        parse_pubkey("program_id", &self.program_id)
    }

    pub fn base_mint(&self) -> Result<Pubkey> {
        parse_pubkey("base_mint", &self.base_mint)
    }
}

fn parse_pubkey(field: &'static str, value: &str) -> Result<Pubkey> {
    Pubkey::from_str(value).map_err(|_| ConfigError::InvalidPubkey {
        field,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.program_id().unwrap(), crate::id());
        assert!(config.validate_discriminator);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ClientConfig::from_toml_str(
            r#"
            market_cutoff_timestamp = 1700000000
            validate_discriminator = false
            "#,
        )
        .unwrap();
        assert_eq!(config.market_cutoff_timestamp, 1_700_000_000);
        assert!(!config.validate_discriminator);
        assert_eq!(config.base_mint, DEFAULT_BASE_MINT);
    }

    #[test]
    fn test_invalid_pubkey_rejected() {
        let err = ClientConfig::from_toml_str(r#"program_id = "not-a-key""#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPubkey { field: "program_id", .. }));
    }

    #[test]
    fn test_overrides() {
        let mint = Pubkey::new_unique().to_string();
        let vars: HashMap<&str, String> = [
            ("MARKET_BASE_MINT", mint.clone()),
            ("MARKET_CUTOFF_TIMESTAMP", "42".to_string()),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::default()
            .with_overrides(|k| vars.get(k).cloned())
            .unwrap();
        assert_eq!(config.base_mint, mint);
        assert_eq!(config.market_cutoff_timestamp, 42);

        let bad = ClientConfig::default()
            .with_overrides(|k| (k == "MARKET_CUTOFF_TIMESTAMP").then(|| "soon".to_string()));
        assert!(matches!(bad, Err(ConfigError::InvalidValue { .. })));
    }
}
