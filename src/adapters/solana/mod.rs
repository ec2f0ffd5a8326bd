//! Solana test-network adapter.
//!
//! Talks to the public testnet/devnet RPC nodes over HTTP JSON-RPC: requests
//! faucet airdrops and tracks the resulting signature to `confirmed`.

mod keys;
mod http;
mod faucet;
mod confirmation;

pub use keys::{Pubkey, Signature, PUBKEY_BYTES, SIGNATURE_BYTES};
pub use http::{HttpConnector, HttpTransport};
pub use faucet::FaucetClient;
pub use confirmation::{Commitment, Confirmation, ConfirmationPoller};

/// Testnet RPC endpoint
pub const TESTNET_RPC_URL: &str = "https://api.testnet.solana.com";

/// Devnet RPC endpoint
pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";

/// Lamports per SOL
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;
