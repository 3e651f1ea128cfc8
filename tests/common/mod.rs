//! Shared mocks for the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use gnosis_loader::blockchain::{BlockchainError, BlockchainResult, NameResolver};
use gnosis_loader::gnosis::GnosisSources;
use gnosis_loader::nft::{NftError, NftResult, OwnedTokens, ResolvedToken, TokenMetadata};
use gnosis_loader::safe::SafeReader;

pub const SAFE: Address = Address::new([0x5a; 20]);
pub const OWNER_A: Address = Address::new([0xaa; 20]);
pub const OWNER_B: Address = Address::new([0xbb; 20]);

fn rpc_error(message: &str) -> BlockchainError {
    BlockchainError::Rpc(message.to_string())
}

/// Safe with canned answers. `fail` names a read that errors with its message.
#[derive(Default)]
pub struct MockSafe {
    pub balance: U256,
    pub owners: Vec<Address>,
    pub modules: Vec<Address>,
    pub threshold: u64,
    pub fail: Option<(&'static str, &'static str)>,
    pub calls: Mutex<Vec<&'static str>>,
}

impl MockSafe {
    fn record(&self, call: &'static str) -> BlockchainResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.fail {
            Some((name, message)) if name == call => Err(rpc_error(message)),
            _ => Ok(()),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SafeReader for MockSafe {
    async fn get_balance(&self) -> BlockchainResult<U256> {
        self.record("getBalance")?;
        Ok(self.balance)
    }

    async fn get_owners(&self) -> BlockchainResult<Vec<Address>> {
        self.record("getOwners")?;
        Ok(self.owners.clone())
    }

    async fn get_modules(&self) -> BlockchainResult<Vec<Address>> {
        self.record("getModules")?;
        Ok(self.modules.clone())
    }

    async fn is_owner(&self, address: Address) -> BlockchainResult<bool> {
        self.record("isOwner")?;
        Ok(self.owners.contains(&address))
    }

    async fn get_threshold(&self) -> BlockchainResult<u64> {
        self.record("getThreshold")?;
        Ok(self.threshold)
    }
}

/// Reverse records; addresses missing from both maps have no name.
#[derive(Default)]
pub struct MockNames {
    pub names: HashMap<Address, String>,
    pub failing: Vec<Address>,
}

#[async_trait]
impl NameResolver for MockNames {
    async fn lookup_address(&self, address: Address) -> BlockchainResult<Option<String>> {
        if self.failing.contains(&address) {
            return Err(rpc_error("rate limited"));
        }
        Ok(self.names.get(&address).cloned())
    }
}

/// Enumerable collection; `broken_uri` makes resolving that token fail.
#[derive(Default)]
pub struct MockOni {
    pub token_ids: Vec<u64>,
    pub enumeration_error: Option<&'static str>,
    pub broken_uri: Option<u64>,
}

pub fn resolved(token_id: u64) -> ResolvedToken {
    ResolvedToken {
        token_id,
        uri: format!("ipfs://QmOni/{}", token_id),
        metadata: serde_json::json!({ "name": format!("Oni #{}", token_id) }),
    }
}

#[async_trait]
impl OwnedTokens for MockOni {
    async fn token_ids_owned_by(&self, owner: Address) -> NftResult<Vec<u64>> {
        assert_eq!(owner, SAFE);
        match self.enumeration_error {
            Some(message) => Err(NftError::Blockchain(rpc_error(message))),
            None => Ok(self.token_ids.clone()),
        }
    }
}

#[async_trait]
impl TokenMetadata for MockOni {
    async fn fully_resolve_uri(&self, token_id: u64) -> NftResult<ResolvedToken> {
        if self.broken_uri == Some(token_id) {
            return Err(NftError::Fetch {
                uri: format!("ipfs://QmOni/{}", token_id),
                reason: "HTTP 504 Gateway Timeout".to_string(),
            });
        }
        Ok(resolved(token_id))
    }
}

/// Puft collection returning fixed IDs or an error.
#[derive(Default)]
pub struct MockPuft {
    pub token_ids: Vec<u64>,
    pub error: Option<&'static str>,
}

#[async_trait]
impl OwnedTokens for MockPuft {
    async fn token_ids_owned_by(&self, owner: Address) -> NftResult<Vec<u64>> {
        assert_eq!(owner, SAFE);
        match self.error {
            Some(message) => Err(NftError::Blockchain(rpc_error(message))),
            None => Ok(self.token_ids.clone()),
        }
    }
}

pub fn sources(safe: Arc<MockSafe>, names: MockNames, oni: MockOni, puft: MockPuft) -> GnosisSources {
    GnosisSources {
        safe_address: SAFE,
        safe,
        names: Arc::new(names),
        oni: Arc::new(oni),
        puft: Arc::new(puft),
    }
}

/// Serve fixed responses by request path on an ephemeral port.
///
/// Unknown paths get a 404.
pub async fn start_metadata_server(routes: Vec<(&'static str, u16, &'static str)>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let routes = routes.clone();
                    tokio::spawn(async move {
                        let mut reader = BufReader::new(socket);
                        let mut request_line = String::new();
                        if reader.read_line(&mut request_line).await.is_err() {
                            return;
                        }
                        // Drain headers.
                        loop {
                            let mut line = String::new();
                            match reader.read_line(&mut line).await {
                                Ok(0) => break,
                                Ok(_) if line == "\r\n" => break,
                                Ok(_) => continue,
                                Err(_) => return,
                            }
                        }

                        let path = request_line.split_whitespace().nth(1).unwrap_or("/");
                        let (status, body) = routes
                            .iter()
                            .find(|(p, _, _)| *p == path)
                            .map(|(_, status, body)| (*status, *body))
                            .unwrap_or((404, "not found"));
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            _ => "200 OK",
                        };

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let mut socket = reader.into_inner();
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
