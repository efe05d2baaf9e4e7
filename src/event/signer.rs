//! Key management and identifier signing.
//!
//! # Security
//! - The secret key is loaded ONLY from an environment variable
//! - The key is never logged or serialized; only the derived public key is
//! - Signatures are BIP-340 schnorr over the 32-byte note identifier

use secp256k1::{Keypair, Message, Secp256k1};
use thiserror::Error;

/// Environment variable name for the hex-encoded secret key.
pub const SECRET_KEY_ENV_VAR: &str = "NOSS_SECRET_KEY";

/// Error type for key loading and signing setup.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("environment variable {0} not set")]
    Missing(&'static str),
    #[error("invalid secret key: {0}")]
    Invalid(String),
}

/// Holds the keypair and signs note identifiers.
pub struct Signer {
    secp: Secp256k1<secp256k1::All>,
    keypair: Keypair,
    pubkey_hex: String,
}

impl Signer {
    /// Create a signer from a hex-encoded secret key.
    ///
    /// # Security
    /// The key is parsed and held in memory only. It is never logged.
    pub fn from_secret_hex(secret_hex: &str) -> Result<Self, KeyError> {
        let key_hex = secret_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let secp = Secp256k1::new();
        let keypair = Keypair::from_seckey_str(&secp, key_hex)
            .map_err(|e| KeyError::Invalid(e.to_string()))?;
        let (xonly, _) = keypair.x_only_public_key();
        let pubkey_hex = hex::encode(xonly.serialize());

        tracing::info!(pubkey = %pubkey_hex, "signer initialized");

        Ok(Self {
            secp,
            keypair,
            pubkey_hex,
        })
    }

    /// Load the signer from the environment.
    ///
    /// Reads `NOSS_SECRET_KEY`.
    pub fn from_env() -> Result<Self, KeyError> {
        let secret =
            std::env::var(SECRET_KEY_ENV_VAR).map_err(|_| KeyError::Missing(SECRET_KEY_ENV_VAR))?;
        Self::from_secret_hex(&secret)
    }

    /// X-only public key, lowercase hex. This is the note author field.
    pub fn public_key_hex(&self) -> &str {
        &self.pubkey_hex
    }

    /// Sign a 32-byte note identifier, returning the signature as
    /// lowercase hex.
    pub fn sign_id(&self, id: [u8; 32]) -> String {
        let message = Message::from_digest(id);
        let signature = self.secp.sign_schnorr(&message, &self.keypair);
        hex::encode(signature.serialize())
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The keypair stays out of Debug output.
        f.debug_struct("Signer")
            .field("pubkey", &self.pubkey_hex)
            .finish()
    }
}
