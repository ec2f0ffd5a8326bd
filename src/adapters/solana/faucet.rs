//! Faucet airdrop requests.
//!
//! One `requestAirdrop` round trip per call. No internal retry: a failed
//! request is reported and the user decides whether to resubmit.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::adapters::{RpcRequest, RpcTransport, TransportError};
use crate::error::{AirdropError, Result};
use crate::types::AirdropRequest;
use super::keys::{Pubkey, Signature};

/// Faucet client for requesting test SOL.
pub struct FaucetClient {
    transport: Arc<dyn RpcTransport>,
}

impl FaucetClient {
    /// Create a faucet client over an established connection.
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    /// Submit an airdrop for a validated request.
    ///
    /// Returns the transaction signature once the faucet accepts.
    pub async fn request(&self, request: &AirdropRequest) -> Result<Signature> {
        self.request_airdrop(request.address(), request.lamports()).await
    }

    /// Request `lamports` for `wallet` via the RPC node's faucet.
    pub async fn request_airdrop(&self, wallet: &Pubkey, lamports: u64) -> Result<Signature> {
        info!(
            endpoint = %self.transport.endpoint(),
            wallet = %wallet,
            lamports,
            "requesting airdrop"
        );

        let request = RpcRequest::new(
            "requestAirdrop",
            serde_json::json!([wallet.to_string(), lamports]),
        );

        let response = self.transport.call(request).await.map_err(|e| match e {
            TransportError::Unreachable(reason) => {
                warn!(%reason, "faucet endpoint unreachable");
                AirdropError::NetworkUnreachable(reason)
            }
            TransportError::Status { code, body } => {
                warn!(code, %body, "faucet declined with HTTP status");
                AirdropError::FaucetRejected(format!("HTTP {}: {}", code, body))
            }
        })?;

        if let Some(error) = response.error {
            warn!(code = error.code, message = %error.message, "faucet declined");
            return Err(AirdropError::FaucetRejected(error.to_string()));
        }

        let sig_str = response
            .result
            .as_ref()
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                AirdropError::FaucetRejected("malformed airdrop response: missing signature".to_string())
            })?;

        let signature = Signature::from_base58(sig_str).ok_or_else(|| {
            AirdropError::FaucetRejected(format!("malformed airdrop response: bad signature '{}'", sig_str))
        })?;

        debug!(%signature, "airdrop accepted");
        Ok(signature)
    }
}
