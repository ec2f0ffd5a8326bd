//! # Sol Nalka
//!
//! Refill a development wallet with test SOL from the public testnet/devnet
//! faucets, and follow the airdrop until it is confirmed.
//!
//! ## Pipeline
//!
//! One request at a time flows through:
//!
//! - **Validation**: address and amount text become an [`AirdropRequest`]
//! - **Resolution**: the network picks its RPC endpoint and advisory limit
//! - **Request**: `requestAirdrop` returns a transaction signature
//! - **Confirmation**: the signature is polled until `confirmed` or a deadline
//!
//! [`AirdropController`] drives the pipeline and reports progress as
//! [`StatusEvent`]s.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sol_nalka::{AirdropConfig, AirdropController, RawAirdropInput};
//!
//! # async fn run() -> sol_nalka::Result<()> {
//! let (controller, mut events) = AirdropController::with_http(AirdropConfig::default())?;
//!
//! tokio::spawn(async move {
//!     while let Some(event) = events.recv().await {
//!         println!("{}", event.message());
//!     }
//! });
//!
//! let input = RawAirdropInput::new("11111111111111111111111111111111", "1", "devnet");
//! let outcome = controller.submit(input).await;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod network;
pub mod runtime;
pub mod types;
pub mod validator;

pub use adapters::solana::{Commitment, Confirmation, Pubkey, Signature, LAMPORTS_PER_SOL};
pub use config::AirdropConfig;
pub use error::{AirdropError, ErrorKind, Result};
pub use network::{NetworkProfile, NetworkResolver};
pub use runtime::{AirdropController, LifecycleState, StatusEvent, SubmitOutcome};
pub use types::{AirdropReceipt, AirdropRequest, Network, RawAirdropInput};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
