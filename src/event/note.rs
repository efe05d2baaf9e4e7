//! Note structure, canonical serialization, and identifier hashing.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Event kind for plain text notes.
pub const KIND_TEXT_NOTE: u16 = 1;

/// Seconds since the Unix epoch.
pub fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// An unsigned note as assembled and mutated by the search loop.
///
/// The identifier is not stored; it is a pure function of the fields and
/// is recomputed from [`Note::id_bytes`] whenever needed.
#[derive(Debug, Clone)]
pub struct Note {
    /// Author public key, lowercase hex (x-only, 32 bytes).
    pub pubkey: String,
    /// Unix timestamp in seconds.
    pub created_at: i64,
    /// Event kind.
    pub kind: u16,
    /// Ordered tag list.
    pub tags: Vec<Vec<String>>,
    /// Free-form content.
    pub content: String,
}

impl Note {
    /// Canonical serialization hashed into the identifier:
    /// `[0,pubkey,created_at,kind,tags,content]` as compact JSON.
    pub fn canonical(&self) -> Vec<u8> {
        // Strings and integers cannot fail to serialize.
        serde_json::to_vec(&(
            0u8,
            &self.pubkey,
            self.created_at,
            self.kind,
            &self.tags,
            &self.content,
        ))
        .unwrap_or_default()
    }

    /// 32-byte identifier: SHA-256 of the canonical serialization.
    pub fn id_bytes(&self) -> [u8; 32] {
        Sha256::digest(self.canonical()).into()
    }

    /// Identifier as lowercase hex.
    pub fn id_hex(&self) -> String {
        hex::encode(self.id_bytes())
    }
}

/// Wire form accepted by the submission endpoint.
///
/// Field order is part of the contract; serde emits fields in declaration
/// order, so this struct must not be reordered.
#[derive(Debug, Clone, Serialize)]
pub struct SignedNote {
    /// Schnorr signature over the identifier, lowercase hex.
    pub sig: String,
    /// Identifier, lowercase hex.
    pub id: String,
    pub kind: u16,
    pub created_at: i64,
    pub tags: Vec<Vec<String>>,
    pub content: String,
    pub pubkey: String,
}

/// POST envelope: `{"event":{...}}`.
#[derive(Debug, Serialize)]
pub struct Submission<'a> {
    pub event: &'a SignedNote,
}
