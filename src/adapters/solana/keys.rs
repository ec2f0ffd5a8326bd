//! Base58 public keys and transaction signatures.
//!
//! Only structural validity is checked here: a key that decodes to 32 bytes is
//! accepted whether or not the account exists on-chain.

use core::fmt;
use core::str::FromStr;

use crate::error::AirdropError;

/// Byte length of an ed25519 public key.
pub const PUBKEY_BYTES: usize = 32;

/// Byte length of an ed25519 transaction signature.
pub const SIGNATURE_BYTES: usize = 64;

/// Destination account address (32 bytes)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pubkey([u8; PUBKEY_BYTES]);

impl Pubkey {
    pub fn new(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn to_bytes(&self) -> [u8; PUBKEY_BYTES] {
        self.0
    }

    /// First `len` characters of the base58 form, for display.
    pub fn short(&self, len: usize) -> String {
        self.to_string().chars().take(len).collect()
    }
}

impl FromStr for Pubkey {
    type Err = AirdropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s).into_vec().map_err(|e| {
            AirdropError::InvalidAddress(format!("Invalid public key input: {}", e))
        })?;

        let arr: [u8; PUBKEY_BYTES] = bytes.as_slice().try_into().map_err(|_| {
            AirdropError::InvalidAddress(format!(
                "Invalid public key input: expected {} bytes, got {}",
                PUBKEY_BYTES,
                bytes.len()
            ))
        })?;

        Ok(Self(arr))
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", bs58::encode(&self.0).into_string())
    }
}

impl From<[u8; PUBKEY_BYTES]> for Pubkey {
    fn from(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Self(bytes)
    }
}

/// Transaction signature returned by the faucet; the reference the poller tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_BYTES]);

impl Signature {
    pub fn new(bytes: [u8; SIGNATURE_BYTES]) -> Self {
        Self(bytes)
    }

    /// Decode a base58 signature, returning `None` unless it is exactly 64 bytes.
    pub fn from_base58(s: &str) -> Option<Self> {
        let bytes = bs58::decode(s).into_vec().ok()?;
        let arr: [u8; SIGNATURE_BYTES] = bytes.as_slice().try_into().ok()?;
        Some(Self(arr))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", bs58::encode(&self.0).into_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_system_program_id_is_structurally_valid() {
        let pk: Pubkey = "11111111111111111111111111111111".parse().unwrap();
        assert_eq!(pk.to_bytes(), [0u8; 32]);
        assert_eq!(pk.to_string(), "11111111111111111111111111111111");
        assert_eq!(pk.short(8), "11111111");
    }

    #[test]
    fn test_pubkey_wrong_length_rejected() {
        let short = bs58::encode([7u8; 31]).into_string();
        let err = short.parse::<Pubkey>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAddress);
    }

    #[test]
    fn test_pubkey_bad_alphabet_rejected() {
        // '0', 'O', 'I' and 'l' are not in the base58 alphabet
        let err = "0OIl0OIl0OIl0OIl0OIl0OIl0OIl0OIl".parse::<Pubkey>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAddress);
    }

    #[test]
    fn test_signature_round_trips_through_base58() {
        let sig = Signature::new([0x5A; 64]);
        assert_eq!(Signature::from_base58(&sig.to_string()), Some(sig));
        assert_eq!(Signature::from_base58("abc"), None);
    }
}
