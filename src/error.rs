//! Error types for airdrop operations.
//!
//! Every variant is terminal for the request that produced it; nothing here is
//! retried automatically. The carried string is the detail shown to the user.

use thiserror::Error;

/// Errors that can end an airdrop request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AirdropError {
    /// Address text is empty, not base58, or not a 32-byte public key
    #[error("{0}")]
    InvalidAddress(String),
    /// Amount text is not a positive finite decimal
    #[error("{0}")]
    InvalidAmount(String),
    /// Unknown network or unusable runtime configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Transport-level failure reaching the RPC endpoint
    #[error("Network unreachable: {0}")]
    NetworkUnreachable(String),
    /// The faucet answered but declined the request
    #[error("Airdrop rejected: {0}")]
    FaucetRejected(String),
    /// No confirmation observed before the deadline
    #[error("Confirmation timed out: {0}")]
    ConfirmationTimeout(String),
    /// The transaction landed but failed on-chain
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}

/// Fieldless view of [`AirdropError`], for matching on the taxonomy alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidAddress,
    InvalidAmount,
    Configuration,
    NetworkUnreachable,
    FaucetRejected,
    ConfirmationTimeout,
    TransactionFailed,
}

impl AirdropError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAddress(_) => ErrorKind::InvalidAddress,
            Self::InvalidAmount(_) => ErrorKind::InvalidAmount,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::NetworkUnreachable(_) => ErrorKind::NetworkUnreachable,
            Self::FaucetRejected(_) => ErrorKind::FaucetRejected,
            Self::ConfirmationTimeout(_) => ErrorKind::ConfirmationTimeout,
            Self::TransactionFailed(_) => ErrorKind::TransactionFailed,
        }
    }

    /// True for errors detected locally, before any network traffic.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidAddress(_) | Self::InvalidAmount(_))
    }
}

/// Result type alias for airdrop operations.
pub type Result<T> = core::result::Result<T, AirdropError>;
