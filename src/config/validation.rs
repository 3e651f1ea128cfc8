//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0)
//! - Check every contract address is a 20-byte hex string before any call uses it
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoaderConfig → Result<(), Vec<ValidationError>>

use crate::blockchain::types::is_well_formed_address;
use crate::config::schema::LoaderConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &LoaderConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.blockchain.rpc_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "blockchain.rpc_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new("blockchain.rpc_url", e.to_string())),
    }

    if config.blockchain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "blockchain.rpc_timeout_secs",
            "must be greater than 0",
        ));
    }

    if !is_well_formed_address(&config.gnosis.safe_address) {
        errors.push(ValidationError::new(
            "gnosis.safe_address",
            format!("'{}' is not a 0x-prefixed 20-byte hex address", config.gnosis.safe_address),
        ));
    }

    // Collection addresses may be left empty to skip the collection.
    for (field, value) in [
        ("gnosis.oni_ronin_address", &config.gnosis.oni_ronin_address),
        ("gnosis.puft_address", &config.gnosis.puft_address),
    ] {
        if !value.is_empty() && !is_well_formed_address(value) {
            errors.push(ValidationError::new(
                field,
                format!("'{}' is not a 0x-prefixed 20-byte hex address", value),
            ));
        }
    }

    match url::Url::parse(&config.gnosis.ipfs_gateway) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::new(
            "gnosis.ipfs_gateway",
            "must be an http(s) URL",
        )),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&LoaderConfig::default()).is_ok());
    }

    #[test]
    fn test_overlong_safe_address_rejected() {
        let mut config = LoaderConfig::default();
        config.gnosis.safe_address = "0x1715f37113C56d7361b1191AEE2B45DA020a85E9A".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "gnosis.safe_address");
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = LoaderConfig::default();
        config.blockchain.rpc_url = "ws://localhost:8546".to_string();
        config.blockchain.rpc_timeout_secs = 0;
        config.gnosis.puft_address = "not-an-address".to_string();
        config.gnosis.ipfs_gateway = "ipfs://".to_string();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "blockchain.rpc_url",
                "blockchain.rpc_timeout_secs",
                "gnosis.puft_address",
                "gnosis.ipfs_gateway",
            ]
        );
    }

    #[test]
    fn test_empty_collection_address_allowed() {
        let mut config = LoaderConfig::default();
        config.gnosis.oni_ronin_address = String::new();
        config.gnosis.puft_address = "0x0000000000000000000000000000000000000001".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
