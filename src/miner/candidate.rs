//! Candidate note assembly.

use crate::chain::Witness;
use crate::event::{unix_now, Note, KIND_TEXT_NOTE};

/// Mint operation carried by every candidate.
pub const MINT_CONTENT: &str = r#"{"p":"nrc-20","op":"mint","tick":"noss","amt":"10"}"#;

/// Relay the reply tags point at.
pub const RELAY_URL: &str = "wss://relay.noscription.org/";

/// Protocol anchor: deployer public key.
const ANCHOR_PUBKEY: &str = "9be107b0d7218c67b4954ee3e6bd9e4dba06ef937a93f684e42f730a0c3d053c";

/// Protocol anchor: root deploy event.
const ANCHOR_ROOT_EVENT: &str = "51ed7939a984edee863bfbb2e66fdc80436b000a8ddca442d83e6a2bf1636a95";

/// Build the unsigned candidate for one attempt.
///
/// Tag order is part of the wire contract: the two protocol anchors, the
/// reply to the newest feed event, then the ledger witness. The search
/// step appends the nonce tag after these.
pub fn build_candidate(pubkey: &str, witness: &Witness, feed_event_id: &str) -> Note {
    Note {
        pubkey: pubkey.to_string(),
        created_at: unix_now(),
        kind: KIND_TEXT_NOTE,
        tags: vec![
            vec!["p".to_string(), ANCHOR_PUBKEY.to_string()],
            vec![
                "e".to_string(),
                ANCHOR_ROOT_EVENT.to_string(),
                RELAY_URL.to_string(),
                "root".to_string(),
            ],
            vec![
                "e".to_string(),
                feed_event_id.to_string(),
                RELAY_URL.to_string(),
                "reply".to_string(),
            ],
            vec![
                "seq_witness".to_string(),
                witness.number.to_string(),
                witness.hash.clone(),
            ],
        ],
        content: MINT_CONTENT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn witness() -> Witness {
        Witness {
            hash: "0xdeadbeef".to_string(),
            number: 170_000_000,
        }
    }

    #[test]
    fn test_tag_layout() {
        let note = build_candidate(&"c".repeat(64), &witness(), "feed-evt");
        assert_eq!(note.tags.len(), 4);
        assert_eq!(note.tags[0], vec!["p", ANCHOR_PUBKEY]);
        assert_eq!(
            note.tags[1],
            vec!["e", ANCHOR_ROOT_EVENT, RELAY_URL, "root"]
        );
        assert_eq!(note.tags[2], vec!["e", "feed-evt", RELAY_URL, "reply"]);
        assert_eq!(
            note.tags[3],
            vec!["seq_witness", "170000000", "0xdeadbeef"]
        );
    }

    #[test]
    fn test_content_and_kind() {
        let note = build_candidate(&"c".repeat(64), &witness(), "feed-evt");
        assert_eq!(note.kind, KIND_TEXT_NOTE);
        assert_eq!(note.content, MINT_CONTENT);
        assert_eq!(note.pubkey, "c".repeat(64));
    }

    #[test]
    fn test_content_survives_canonical_escaping() {
        let note = build_candidate(&"c".repeat(64), &witness(), "feed-evt");
        let canonical = String::from_utf8(note.canonical()).unwrap();
        assert!(canonical.contains(r#"{\"p\":\"nrc-20\",\"op\":\"mint\",\"tick\":\"noss\",\"amt\":\"10\"}"#));
    }

    #[test]
    fn test_candidates_differ_per_snapshot() {
        let a = build_candidate(&"c".repeat(64), &witness(), "feed-a");
        let b = build_candidate(&"c".repeat(64), &witness(), "feed-b");
        assert_ne!(a.id_hex(), b.id_hex());
    }
}
