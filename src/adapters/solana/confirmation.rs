//! Confirmation polling for airdrop signatures.
//!
//! Polls `getSignatureStatuses` until the signature reaches the target
//! commitment. The whole wait runs under a deadline, so it always terminates.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::adapters::{RpcRequest, RpcTransport};
use crate::config::AirdropConfig;
use crate::error::{AirdropError, Result};
use super::keys::Signature;

/// Commitment levels, weakest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

/// A signature observed at or beyond the target commitment.
#[derive(Clone, Debug, PartialEq)]
pub struct Confirmation {
    pub slot: u64,
    pub status: Commitment,
    /// On-chain execution error, verbatim from the node
    pub err: Option<Value>,
}

/// Wire shape of one entry in `getSignatureStatuses().value`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignatureStatus {
    slot: u64,
    #[serde(default)]
    confirmations: Option<u64>,
    #[serde(default)]
    err: Option<Value>,
    #[serde(default)]
    confirmation_status: Option<Commitment>,
}

impl SignatureStatus {
    fn commitment(&self) -> Commitment {
        match (self.confirmation_status, self.confirmations) {
            (Some(c), _) => c,
            // Older nodes omit the status; null confirmations means rooted.
            (None, None) => Commitment::Finalized,
            (None, Some(_)) => Commitment::Processed,
        }
    }
}

/// Waits for an airdrop signature to be confirmed.
pub struct ConfirmationPoller {
    transport: Arc<dyn RpcTransport>,
    poll_interval: Duration,
    timeout: Duration,
    target: Commitment,
}

impl ConfirmationPoller {
    pub fn new(transport: Arc<dyn RpcTransport>, poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            transport,
            poll_interval,
            timeout,
            target: Commitment::Confirmed,
        }
    }

    pub fn from_config(transport: Arc<dyn RpcTransport>, config: &AirdropConfig) -> Self {
        Self::new(transport, config.poll_interval(), config.confirmation_timeout())
    }

    pub fn with_target(mut self, target: Commitment) -> Self {
        self.target = target;
        self
    }

    /// Wait for the target commitment, then fail if the transaction errored on-chain.
    pub async fn confirm(&self, signature: &Signature) -> Result<Confirmation> {
        let confirmation = self.wait_for_confirmation(signature).await?;
        if let Some(err) = &confirmation.err {
            warn!(%signature, %err, "transaction failed on-chain");
            return Err(AirdropError::TransactionFailed(err.to_string()));
        }
        info!(%signature, slot = confirmation.slot, status = ?confirmation.status, "transaction confirmed");
        Ok(confirmation)
    }

    /// Poll until the target commitment is reached or the deadline passes.
    ///
    /// RPC failures while polling are treated as transient; the last one is
    /// reported in the timeout detail.
    pub async fn wait_for_confirmation(&self, signature: &Signature) -> Result<Confirmation> {
        let mut last_error: Option<String> = None;
        let mut attempts = 0u32;

        let polled = tokio::time::timeout(self.timeout, async {
            loop {
                attempts += 1;
                match self.poll_once(signature).await {
                    Ok(Some(confirmation)) => return confirmation,
                    Ok(None) => {}
                    Err(reason) => {
                        warn!(%signature, attempt = attempts, %reason, "status query failed");
                        last_error = Some(reason);
                    }
                }
                tokio::time::sleep(self.poll_interval).await;
            }
        })
        .await;

        match polled {
            Ok(confirmation) => Ok(confirmation),
            Err(_) => {
                let mut detail = format!(
                    "signature {} not confirmed within {:?} ({} attempts)",
                    signature, self.timeout, attempts
                );
                if let Some(reason) = last_error {
                    detail.push_str(&format!("; last error: {}", reason));
                }
                warn!(%detail, "confirmation deadline elapsed");
                Err(AirdropError::ConfirmationTimeout(detail))
            }
        }
    }

    /// One status query. `Ok(None)` means not yet at the target commitment.
    async fn poll_once(&self, signature: &Signature) -> core::result::Result<Option<Confirmation>, String> {
        let request = RpcRequest::new(
            "getSignatureStatuses",
            serde_json::json!([[signature.to_string()], {"searchTransactionHistory": false}]),
        );

        let response = self.transport.call(request).await.map_err(|e| e.to_string())?;

        if let Some(error) = response.error {
            return Err(error.to_string());
        }

        let entry = response
            .result
            .as_ref()
            .and_then(|r| r.get("value"))
            .and_then(|v| v.as_array())
            .and_then(|statuses| statuses.first())
            .cloned()
            .ok_or_else(|| "malformed signature status response".to_string())?;

        if entry.is_null() {
            debug!(%signature, "signature not yet seen");
            return Ok(None);
        }

        let status: SignatureStatus = serde_json::from_value(entry)
            .map_err(|e| format!("malformed signature status: {}", e))?;
        let commitment = status.commitment();

        if commitment < self.target {
            debug!(%signature, ?commitment, "waiting for higher commitment");
            return Ok(None);
        }

        Ok(Some(Confirmation {
            slot: status.slot,
            status: commitment,
            err: status.err,
        }))
    }
}
