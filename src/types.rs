//! Core data types for an airdrop request.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::adapters::solana::{Pubkey, Signature, LAMPORTS_PER_SOL};
use crate::error::AirdropError;

/// Test networks served by a public faucet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Testnet,
    Devnet,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Testnet, Network::Devnet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = AirdropError;

    /// Accepts `testnet` / `devnet` in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "testnet" => Ok(Network::Testnet),
            "devnet" => Ok(Network::Devnet),
            other => Err(AirdropError::Configuration(format!(
                "unknown network '{}' (expected testnet or devnet)",
                other
            ))),
        }
    }
}

/// Unparsed input as supplied by the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawAirdropInput {
    pub address: String,
    pub amount: String,
    pub network: String,
}

impl RawAirdropInput {
    pub fn new(
        address: impl Into<String>,
        amount: impl Into<String>,
        network: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            amount: amount.into(),
            network: network.into(),
        }
    }
}

/// A validated request. Built fresh from raw input and consumed, never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct AirdropRequest {
    address: Pubkey,
    amount_sol: f64,
    network: Network,
}

impl AirdropRequest {
    /// Only the validator constructs requests, so the invariants hold by construction.
    pub(crate) fn new(address: Pubkey, amount_sol: f64, network: Network) -> Self {
        debug_assert!(amount_sol.is_finite() && amount_sol > 0.0);
        Self { address, amount_sol, network }
    }

    pub fn address(&self) -> &Pubkey {
        &self.address
    }

    pub fn amount_sol(&self) -> f64 {
        self.amount_sol
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Amount in lamports, rounded to the nearest lamport.
    ///
    /// The float-to-int cast saturates, so oversized amounts become `u64::MAX`
    /// and are left for the faucet to decline.
    pub fn lamports(&self) -> u64 {
        sol_to_lamports(self.amount_sol)
    }
}

/// Round a SOL amount to whole lamports, saturating at `u64::MAX`.
pub fn sol_to_lamports(sol: f64) -> u64 {
    (sol * LAMPORTS_PER_SOL as f64).round() as u64
}

/// What a successful airdrop leaves behind.
#[derive(Clone, Debug, PartialEq)]
pub struct AirdropReceipt {
    pub network: Network,
    pub address: Pubkey,
    pub amount_sol: f64,
    pub lamports: u64,
    pub signature: Signature,
    pub slot: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_network_parse_is_case_insensitive() {
        assert_eq!("Testnet".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!(" DEVNET ".parse::<Network>().unwrap(), Network::Devnet);
    }

    #[test]
    fn test_unknown_network_is_configuration_error() {
        let err = "mainnet-beta".parse::<Network>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("mainnet-beta"));
    }

    #[test]
    fn test_lamport_conversion() {
        let pk = Pubkey::new([1; 32]);
        assert_eq!(AirdropRequest::new(pk, 1.0, Network::Devnet).lamports(), 1_000_000_000);
        assert_eq!(AirdropRequest::new(pk, 0.1, Network::Devnet).lamports(), 100_000_000);
        assert_eq!(AirdropRequest::new(pk, 2.5, Network::Testnet).lamports(), 2_500_000_000);
        assert_eq!(AirdropRequest::new(pk, 1e30, Network::Testnet).lamports(), u64::MAX);
    }

    #[test]
    fn test_sub_lamport_amounts_round_to_zero() {
        assert_eq!(sol_to_lamports(1e-9), 1);
        assert_eq!(sol_to_lamports(0.4e-9), 0);
        assert_eq!(sol_to_lamports(0.0000000001), 0);
    }
}
