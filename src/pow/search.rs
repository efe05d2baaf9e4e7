//! Bounded-time nonce search.

use std::time::{Duration, Instant};

use rand::RngCore;

use crate::event::{unix_now, Note};
use crate::pow::difficulty::leading_zero_bits;
use crate::pow::nonce::NonceSampler;

/// How a search attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A nonce met the target; the identifier is lowercase hex.
    Solved { id: String },
    /// The deadline passed without a qualifying nonce.
    Exhausted,
}

/// Result of one bounded search attempt.
#[derive(Debug)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    /// The note in its final state: nonce tag appended, value and
    /// timestamp as last written. Only meaningful to keep when solved.
    pub note: Note,
    pub elapsed: Duration,
    pub iterations: u64,
}

/// Run one bounded nonce search over `template`.
///
/// The template gains a `["nonce", value, target]` tag; the value slot and
/// `created_at` are rewritten every iteration so each hash covers a fresh
/// pair. Returns as soon as the identifier reaches `target_bits`, or at
/// the first iteration boundary after `deadline` has elapsed — an
/// iteration already started always finishes.
pub fn search<R: RngCore>(
    mut template: Note,
    target_bits: u32,
    deadline: Duration,
    sampler: &mut NonceSampler<R>,
) -> SearchReport {
    let start = Instant::now();
    template.tags.push(vec![
        "nonce".to_string(),
        String::new(),
        target_bits.to_string(),
    ]);
    let slot = template.tags.len() - 1;

    let mut iterations = 0u64;
    loop {
        iterations += 1;
        sampler.draw_into(&mut template.tags[slot][1]);
        template.created_at = unix_now();

        let id = template.id_bytes();
        if leading_zero_bits(&id) >= target_bits {
            return SearchReport {
                outcome: SearchOutcome::Solved {
                    id: hex::encode(id),
                },
                note: template,
                elapsed: start.elapsed(),
                iterations,
            };
        }
        if start.elapsed() >= deadline {
            return SearchReport {
                outcome: SearchOutcome::Exhausted,
                note: template,
                elapsed: start.elapsed(),
                iterations,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::KIND_TEXT_NOTE;
    use crate::pow::difficulty::hex_difficulty;
    use crate::pow::nonce::{NONCE_ALPHABET, NONCE_LEN};

    fn template() -> Note {
        Note {
            pubkey: "b".repeat(64),
            created_at: 0,
            kind: KIND_TEXT_NOTE,
            tags: vec![vec!["e".to_string(), "feed-id".to_string()]],
            content: "{}".to_string(),
        }
    }

    #[test]
    fn test_solves_low_target() {
        let mut sampler = NonceSampler::new();
        // 8 bits is one iteration in 256; seconds of budget make a miss
        // astronomically unlikely.
        let report = search(template(), 8, Duration::from_secs(10), &mut sampler);

        let SearchOutcome::Solved { id } = &report.outcome else {
            panic!("expected a solve, got {:?}", report.outcome);
        };
        assert!(hex_difficulty(id) >= 8);
        assert_eq!(*id, report.note.id_hex());
    }

    #[test]
    fn test_solved_note_carries_nonce_tag() {
        let mut sampler = NonceSampler::new();
        let report = search(template(), 4, Duration::from_secs(10), &mut sampler);

        let nonce_tag = report.note.tags.last().unwrap();
        assert_eq!(nonce_tag.len(), 3);
        assert_eq!(nonce_tag[0], "nonce");
        assert_eq!(nonce_tag[1].len(), NONCE_LEN);
        assert!(nonce_tag[1].bytes().all(|b| NONCE_ALPHABET.contains(&b)));
        assert_eq!(nonce_tag[2], "4");

        // The template tags stay in front.
        assert_eq!(report.note.tags[0][0], "e");
    }

    #[test]
    fn test_timestamp_is_stamped() {
        let mut sampler = NonceSampler::new();
        let before = unix_now();
        let report = search(template(), 0, Duration::from_secs(1), &mut sampler);
        let after = unix_now();
        assert!(report.note.created_at >= before);
        assert!(report.note.created_at <= after);
    }

    #[test]
    fn test_zero_target_solves_first_iteration() {
        let mut sampler = NonceSampler::new();
        let report = search(template(), 0, Duration::from_secs(1), &mut sampler);
        assert_eq!(report.iterations, 1);
        assert!(matches!(report.outcome, SearchOutcome::Solved { .. }));
    }

    #[test]
    fn test_unreachable_target_times_out() {
        let mut sampler = NonceSampler::new();
        let deadline = Duration::from_millis(30);
        let report = search(template(), 200, deadline, &mut sampler);

        assert_eq!(report.outcome, SearchOutcome::Exhausted);
        assert!(report.elapsed >= deadline);
        // One iteration costs microseconds; generous slack for CI noise.
        assert!(report.elapsed < deadline + Duration::from_millis(500));
        assert!(report.iterations > 0);
    }
}
