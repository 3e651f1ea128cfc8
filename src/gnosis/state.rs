//! Load states published to the store.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::nft::types::ResolvedToken;

/// A Safe owner with its ENS name, when one resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerInfo {
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Everything a successful load produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GnosisData {
    /// Wei, as a decimal string.
    pub balance: String,
    pub owners: Vec<OwnerInfo>,
    pub threshold: u64,
    pub oni_tokens: Vec<ResolvedToken>,
    pub puft_token_ids: Vec<u64>,
}

/// State of one load attempt.
///
/// Serialized as `{"state": "Error", "message": ..}`, `{"state": "Loading"}` or
/// `{"state": "Loaded", "gnosisData": {..}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state")]
pub enum GnosisLoadResult {
    Error {
        message: String,
    },
    Loading,
    Loaded {
        #[serde(rename = "gnosisData")]
        gnosis_data: GnosisData,
    },
}

impl GnosisLoadResult {
    /// Short state name, for logs.
    pub fn state(&self) -> &'static str {
        match self {
            Self::Error { .. } => "Error",
            Self::Loading => "Loading",
            Self::Loaded { .. } => "Loaded",
        }
    }

    /// Whether no further state follows in this attempt.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_and_loading_shape() {
        let error = GnosisLoadResult::Error {
            message: "no wallet".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({ "state": "Error", "message": "no wallet" })
        );
        assert_eq!(
            serde_json::to_value(GnosisLoadResult::Loading).unwrap(),
            json!({ "state": "Loading" })
        );
    }

    #[test]
    fn test_loaded_shape() {
        let loaded = GnosisLoadResult::Loaded {
            gnosis_data: GnosisData {
                balance: "5000000000000000000".to_string(),
                owners: vec![
                    OwnerInfo {
                        address: Address::with_last_byte(1),
                        name: Some("alice.eth".to_string()),
                    },
                    OwnerInfo {
                        address: Address::with_last_byte(2),
                        name: None,
                    },
                ],
                threshold: 2,
                oni_tokens: Vec::new(),
                puft_token_ids: vec![3, 9],
            },
        };

        let value = serde_json::to_value(&loaded).unwrap();
        assert_eq!(value["state"], "Loaded");
        let data = &value["gnosisData"];
        assert_eq!(data["balance"], "5000000000000000000");
        assert_eq!(data["threshold"], 2);
        assert_eq!(data["owners"][0]["name"], "alice.eth");
        assert!(data["owners"][1].get("name").is_none());
        assert_eq!(data["oniTokens"], json!([]));
        assert_eq!(data["puftTokenIds"], json!([3, 9]));

        let back: GnosisLoadResult = serde_json::from_value(value).unwrap();
        assert_eq!(back, loaded);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!GnosisLoadResult::Loading.is_terminal());
        assert!(GnosisLoadResult::Error {
            message: String::new()
        }
        .is_terminal());
        assert_eq!(GnosisLoadResult::Loading.state(), "Loading");
    }
}
