//! Input validation.
//!
//! Turns raw address/amount/network text into an [`AirdropRequest`]. Pure and
//! synchronous; nothing here touches the network.

use crate::adapters::solana::Pubkey;
use crate::error::{AirdropError, Result};
use crate::types::{sol_to_lamports, AirdropRequest, Network, RawAirdropInput};

/// Parse a base58 address into a public key.
pub fn parse_address(raw: &str) -> Result<Pubkey> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AirdropError::InvalidAddress(
            "Please enter a public key".to_string(),
        ));
    }
    raw.parse()
}

/// Parse a SOL amount. Rejects empty, zero, negative, non-numeric and non-finite input,
/// and amounts that round to zero lamports.
///
/// No upper bound is applied; the faucet decides what it will dispense.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let invalid = || AirdropError::InvalidAmount("Please enter a valid SOL amount".to_string());

    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid());
    }
    if sol_to_lamports(value) == 0 {
        return Err(AirdropError::InvalidAmount(
            "Amount is smaller than 1 lamport (0.000000001 SOL)".to_string(),
        ));
    }
    Ok(value)
}

/// Validate every field of a raw submission.
///
/// Address is checked before amount, and both before the network name.
pub fn validate(input: &RawAirdropInput) -> Result<AirdropRequest> {
    let address = parse_address(&input.address)?;
    let amount = parse_amount(&input.amount)?;
    let network: Network = input.network.parse()?;
    Ok(AirdropRequest::new(address, amount, network))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const SYSTEM_PROGRAM: &str = "11111111111111111111111111111111";

    #[test]
    fn test_accepts_positive_amounts() {
        for raw in ["1", "0.5", " 2 ", "1e-9", "0.000000001", "5.0", "1000000"] {
            assert!(parse_amount(raw).is_ok(), "should accept {:?}", raw);
        }
    }

    #[test]
    fn test_rejects_non_positive_or_non_finite_amounts() {
        for raw in ["", " ", "0", "0.0", "-5", "-0.1", "abc", "1abc", "inf", "-inf", "NaN", "infinity"] {
            let err = parse_amount(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidAmount, "input {:?}", raw);
        }
    }

    #[test]
    fn test_rejects_amounts_below_one_lamport() {
        for raw in ["0.0000000001", "0.000000000001", "4e-10", "1e-300"] {
            let err = parse_amount(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidAmount, "input {:?}", raw);
            assert!(err.to_string().contains("lamport"));
        }
    }

    #[test]
    fn test_empty_address_rejected() {
        let err = parse_address("   ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAddress);
        assert_eq!(err.to_string(), "Please enter a public key");
    }

    #[test]
    fn test_structurally_valid_address_accepted() {
        let pk = parse_address(SYSTEM_PROGRAM).unwrap();
        assert_eq!(pk.to_string(), SYSTEM_PROGRAM);

        let random = bs58::encode([0xC3; 32]).into_string();
        assert!(parse_address(&random).is_ok());
    }

    #[test]
    fn test_validate_is_idempotent() {
        let input = RawAirdropInput::new(SYSTEM_PROGRAM, "1.5", "Devnet");
        let a = validate(&input).unwrap();
        let b = validate(&input).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.network(), Network::Devnet);
        assert_eq!(a.amount_sol(), 1.5);
    }

    #[test]
    fn test_validate_reports_address_before_amount() {
        let input = RawAirdropInput::new("", "-5", "testnet");
        assert_eq!(validate(&input).unwrap_err().kind(), ErrorKind::InvalidAddress);
    }

    #[test]
    fn test_validate_unknown_network() {
        let input = RawAirdropInput::new(SYSTEM_PROGRAM, "1", "localnet");
        assert_eq!(validate(&input).unwrap_err().kind(), ErrorKind::Configuration);
    }
}
