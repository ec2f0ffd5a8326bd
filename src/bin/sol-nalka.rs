//! Sol Nalka CLI.
//!
//! Requests a test-network SOL airdrop and prints progress until the
//! transaction is confirmed.
//!
//! Usage:
//!   cargo run --bin sol-nalka -- --network devnet --amount 1 <ADDRESS>

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use sol_nalka::{AirdropConfig, AirdropController, Network, RawAirdropInput, StatusEvent, SubmitOutcome};
use tokio::task::JoinHandle;
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum NetworkArg {
    Testnet,
    Devnet,
}

impl From<NetworkArg> for Network {
    fn from(arg: NetworkArg) -> Self {
        match arg {
            NetworkArg::Testnet => Network::Testnet,
            NetworkArg::Devnet => Network::Devnet,
        }
    }
}

/// Refill your development wallet with SOL tokens
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Wallet address (base58 public key)
    address: String,

    /// Network to request from
    #[arg(short, long, value_enum, default_value = "testnet")]
    network: NetworkArg,

    /// SOL amount
    #[arg(short, long, default_value = "1")]
    amount: String,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

/// Wait for the event printer; a panicked or cancelled printer is logged, not fatal.
async fn join_printer(printer: JoinHandle<()>) -> bool {
    match printer.await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "status printer task failed");
            false
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let env_filter = if args.debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::from_default_env()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match AirdropConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let (controller, mut events) = match AirdropController::with_http(config) {
        Ok(pair) => pair,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let network = Network::from(args.network);
    println!("{}", controller.profile(network).advisory());

    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match &event {
                StatusEvent::Status(m) => println!("  {}", m),
                StatusEvent::Success(m) => println!("✓ {}", m),
                StatusEvent::Error(m) => eprintln!("✗ {}", m),
            }
            if event.is_terminal() {
                break;
            }
        }
    });

    let outcome = controller
        .submit(RawAirdropInput::new(args.address, args.amount, network.as_str()))
        .await;
    join_printer(printer).await;

    match outcome {
        SubmitOutcome::Succeeded(receipt) => {
            println!("  Signature: {}", receipt.signature);
            ExitCode::SUCCESS
        }
        SubmitOutcome::Failed(_) | SubmitOutcome::Ignored => ExitCode::FAILURE,
    }
}
