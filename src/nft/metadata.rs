//! Token metadata fetching.
//!
//! `ipfs://` URIs are rewritten onto the configured HTTP gateway; `http(s)`
//! URIs are fetched as-is.

use std::time::Duration;

use crate::nft::types::{NftError, NftResult};

/// HTTP client for token metadata documents.
#[derive(Debug, Clone)]
pub struct MetadataFetcher {
    http: reqwest::Client,
    gateway: url::Url,
}

impl MetadataFetcher {
    /// Create a fetcher using `gateway` for IPFS content.
    pub fn new(gateway: &str, timeout: Duration) -> NftResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NftError::Fetch {
                uri: gateway.to_string(),
                reason: e.to_string(),
            })?;
        Self::with_client(http, gateway)
    }

    /// Create a fetcher around an existing HTTP client.
    pub fn with_client(http: reqwest::Client, gateway: &str) -> NftResult<Self> {
        let mut gateway: url::Url = gateway
            .parse()
            .map_err(|e| NftError::UnsupportedUri(format!("gateway '{}': {}", gateway, e)))?;
        // Url::join drops the last segment unless the path ends with '/'.
        if !gateway.path().ends_with('/') {
            let path = format!("{}/", gateway.path());
            gateway.set_path(&path);
        }

        Ok(Self { http, gateway })
    }

    /// Map a token URI to the HTTP URL it is fetched from.
    pub fn http_url(&self, uri: &str) -> NftResult<url::Url> {
        if let Some(rest) = uri.strip_prefix("ipfs://") {
            let rest = rest.strip_prefix("ipfs/").unwrap_or(rest);
            return self
                .gateway
                .join(rest)
                .map_err(|_| NftError::UnsupportedUri(uri.to_string()));
        }

        match url::Url::parse(uri) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(url),
            _ => Err(NftError::UnsupportedUri(uri.to_string())),
        }
    }

    /// Fetch and parse the JSON metadata behind `uri`.
    pub async fn fetch(&self, uri: &str) -> NftResult<serde_json::Value> {
        let url = self.http_url(uri)?;
        let fetch_error = |reason: String| NftError::Fetch {
            uri: uri.to_string(),
            reason,
        };

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP {}", status)));
        }

        let body = response.text().await.map_err(|e| fetch_error(e.to_string()))?;
        tracing::debug!(%url, bytes = body.len(), "Fetched token metadata");

        serde_json::from_str(&body).map_err(|e| NftError::Metadata {
            uri: uri.to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher(gateway: &str) -> MetadataFetcher {
        MetadataFetcher::new(gateway, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_ipfs_uri_goes_through_gateway() {
        let f = fetcher("https://ipfs.io/ipfs/");
        assert_eq!(
            f.http_url("ipfs://QmHash/12.json").unwrap().as_str(),
            "https://ipfs.io/ipfs/QmHash/12.json"
        );
        assert_eq!(
            f.http_url("ipfs://ipfs/QmHash/12.json").unwrap().as_str(),
            "https://ipfs.io/ipfs/QmHash/12.json"
        );
    }

    #[test]
    fn test_gateway_without_trailing_slash() {
        let f = fetcher("https://gateway.example.org/ipfs");
        assert_eq!(
            f.http_url("ipfs://QmHash/1").unwrap().as_str(),
            "https://gateway.example.org/ipfs/QmHash/1"
        );
    }

    #[test]
    fn test_http_uri_passthrough() {
        let f = fetcher("https://ipfs.io/ipfs/");
        assert_eq!(
            f.http_url("https://api.example.org/token/3").unwrap().as_str(),
            "https://api.example.org/token/3"
        );
    }

    #[test]
    fn test_unsupported_uri() {
        let f = fetcher("https://ipfs.io/ipfs/");
        assert!(matches!(
            f.http_url("ar://abc"),
            Err(NftError::UnsupportedUri(_))
        ));
        assert!(matches!(
            f.http_url("data:application/json,{}"),
            Err(NftError::UnsupportedUri(_))
        ));
    }
}
