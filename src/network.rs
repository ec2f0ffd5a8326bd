//! Network resolution: which endpoint to talk to and what the faucet advertises.

use serde::{Deserialize, Serialize};

use crate::adapters::solana::{DEVNET_RPC_URL, TESTNET_RPC_URL};
use crate::config::AirdropConfig;
use crate::types::Network;

/// Advertised testnet faucet limit, in SOL.
pub const TESTNET_AIRDROP_LIMIT_SOL: f64 = 2.0;

/// Advertised devnet faucet limit, in SOL.
pub const DEVNET_AIRDROP_LIMIT_SOL: f64 = 5.0;

/// Endpoint and advisory limit for one network.
///
/// `max_airdrop_sol` is shown to the user only. The remote faucet enforces its
/// own cap, so requests above it are still sent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkProfile {
    pub network: Network,
    pub endpoint_url: String,
    pub max_airdrop_sol: f64,
}

impl NetworkProfile {
    pub fn advisory(&self) -> String {
        format!("{} limit: {} SOL", capitalized(self.network), self.max_airdrop_sol)
    }
}

fn capitalized(network: Network) -> &'static str {
    match network {
        Network::Testnet => "Testnet",
        Network::Devnet => "Devnet",
    }
}

/// Maps a [`Network`] to its [`NetworkProfile`]. Total over the enum.
#[derive(Clone, Debug)]
pub struct NetworkResolver {
    testnet_url: String,
    devnet_url: String,
}

impl Default for NetworkResolver {
    fn default() -> Self {
        Self {
            testnet_url: TESTNET_RPC_URL.to_string(),
            devnet_url: DEVNET_RPC_URL.to_string(),
        }
    }
}

impl NetworkResolver {
    pub fn from_config(config: &AirdropConfig) -> Self {
        Self {
            testnet_url: config.testnet_rpc_url.clone(),
            devnet_url: config.devnet_rpc_url.clone(),
        }
    }

    pub fn resolve(&self, network: Network) -> NetworkProfile {
        match network {
            Network::Testnet => NetworkProfile {
                network,
                endpoint_url: self.testnet_url.clone(),
                max_airdrop_sol: TESTNET_AIRDROP_LIMIT_SOL,
            },
            Network::Devnet => NetworkProfile {
                network,
                endpoint_url: self.devnet_url.clone(),
                max_airdrop_sol: DEVNET_AIRDROP_LIMIT_SOL,
            },
        }
    }
}
