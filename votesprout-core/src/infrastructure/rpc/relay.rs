//! Client side of the paymaster proxy routes (`/sponsor`, `/send`, `/receipt`).

use crate::domain::aa::{Sponsorship, UserOperation};
use crate::foundation::VoteSproutError;
use crate::infrastructure::rpc::SponsorRelay;
use alloy::primitives::Address;
use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendBody {
    user_op_hash: String,
}

#[derive(Deserialize)]
struct ReceiptBody {
    #[serde(default)]
    receipt: Option<Value>,
}

pub struct ProxyRelayClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProxyRelayClient {
    pub fn new(base_url: &str) -> Self {
        Self { client: reqwest::Client::new(), base_url: base_url.trim_end_matches('/').to_string() }
    }

    /// POST `body` to `route`. Non-2xx replies become `fail(<server error text>)`.
    async fn post<T: DeserializeOwned>(
        &self,
        route: &str,
        body: Value,
        fail: impl FnOnce(String) -> VoteSproutError,
    ) -> Result<T, VoteSproutError> {
        let url = format!("{}{}", self.base_url, route);
        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!("relay reply route={} status={} bytes={}", route, status.as_u16(), bytes.len());
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("{route} returned http {}", status.as_u16()));
            return Err(fail(message));
        }
        serde_json::from_slice(&bytes).map_err(|err| fail(format!("{route}: unexpected response: {err}")))
    }
}

#[async_trait]
impl SponsorRelay for ProxyRelayClient {
    async fn sponsor(&self, user_operation: &UserOperation, entry_point: Address) -> Result<Sponsorship, VoteSproutError> {
        self.post("/sponsor", json!({ "userOperation": user_operation, "entryPoint": entry_point }), VoteSproutError::SponsorshipFailed).await
    }

    async fn send(&self, user_operation: &UserOperation, entry_point: Address) -> Result<String, VoteSproutError> {
        let body: SendBody =
            self.post("/send", json!({ "userOperation": user_operation, "entryPoint": entry_point }), VoteSproutError::SubmissionFailed).await?;
        Ok(body.user_op_hash)
    }

    async fn receipt(&self, user_op_hash: &str) -> Result<Option<Value>, VoteSproutError> {
        let body: ReceiptBody = self.post("/receipt", json!({ "userOpHash": user_op_hash }), VoteSproutError::NetworkError).await?;
        Ok(body.receipt.filter(|receipt| !receipt.is_null()))
    }
}
