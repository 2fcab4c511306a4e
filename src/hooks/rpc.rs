use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How long a submitted transaction may stay unconfirmed before the plant
/// action is abandoned. The devnet cluster usually confirms within a couple
/// of seconds.
const CONFIRM_POLL_MS: u32 = 500;
const CONFIRM_MAX_POLLS: u32 = 60;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("rpc transport: {0}")]
    Transport(String),
    #[error("rpc error {code}: {message}")]
    Node { code: i64, message: String },
    #[error("transaction failed on chain: {0}")]
    TransactionFailed(String),
    #[error("confirmation timed out after {0}ms")]
    ConfirmTimeout(u32),
    #[error("malformed rpc reply: {0}")]
    Malformed(String),
}

#[derive(Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'static str,
    pub params: Vec<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<NodeError>,
}

#[derive(Deserialize, Debug)]
pub struct NodeError {
    pub code: i64,
    pub message: String,
}

#[derive(Deserialize)]
struct BlockhashResult {
    value: BlockhashValue,
}

#[derive(Deserialize)]
struct BlockhashValue {
    blockhash: String,
}

#[derive(Deserialize)]
struct SignatureStatusesResult {
    value: Vec<Option<SignatureStatus>>,
}

#[derive(Deserialize)]
struct SignatureStatus {
    err: Option<serde_json::Value>,
    #[serde(rename = "confirmationStatus")]
    confirmation_status: Option<String>,
}

/// Thin handle to a Solana JSON-RPC endpoint. Built once in the app shell
/// and passed down through context so nothing reaches for a global.
#[derive(Clone)]
pub struct ChainClient {
    http: reqwest::Client,
    rpc_url: String,
}

impl ChainClient {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            rpc_url: rpc_url.into(),
        }
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &'static str,
        params: Vec<serde_json::Value>,
    ) -> Result<T, RpcError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let response = self
            .http
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        let rpc_response: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| RpcError::Malformed(e.to_string()))?;

        if let Some(error) = rpc_response.error {
            return Err(RpcError::Node {
                code: error.code,
                message: error.message,
            });
        }

        rpc_response
            .result
            .ok_or_else(|| RpcError::Malformed(format!("{method}: empty result")))
    }

    pub async fn latest_blockhash(&self) -> Result<String, RpcError> {
        let result: BlockhashResult = self.call("getLatestBlockhash", vec![]).await?;
        Ok(result.value.blockhash)
    }

    /// Poll until the signature reaches at least `confirmed` commitment.
    ///
    /// The original flow waited on confirmation with no bound; a stalled
    /// cluster would suspend the action forever, so this polls with a hard
    /// timeout instead.
    pub async fn confirm_signature(&self, signature: &str) -> Result<(), RpcError> {
        for _ in 0..CONFIRM_MAX_POLLS {
            let result: SignatureStatusesResult = self
                .call(
                    "getSignatureStatuses",
                    vec![
                        serde_json::json!([signature]),
                        serde_json::json!({ "searchTransactionHistory": false }),
                    ],
                )
                .await?;

            if let Some(Some(status)) = result.value.first() {
                if let Some(err) = &status.err {
                    return Err(RpcError::TransactionFailed(err.to_string()));
                }
                match status.confirmation_status.as_deref() {
                    Some("confirmed") | Some("finalized") => return Ok(()),
                    _ => {}
                }
            }

            gloo_timers::future::TimeoutFuture::new(CONFIRM_POLL_MS).await;
        }

        Err(RpcError::ConfirmTimeout(CONFIRM_POLL_MS * CONFIRM_MAX_POLLS))
    }
}
