//! Nonce generation for the search loop.

use rand::RngCore;

/// Characters a nonce may contain.
pub const NONCE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Nonce length, in characters.
pub const NONCE_LEN: usize = 10;

/// Draws fixed-length nonces from a reusable byte buffer.
///
/// Raw random bytes are folded into the alphabet by modulo; the small
/// bias this introduces is accepted.
pub struct NonceSampler<R: RngCore> {
    rng: R,
    buf: [u8; NONCE_LEN],
}

impl NonceSampler<rand::rngs::ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for NonceSampler<rand::rngs::ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> NonceSampler<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            buf: [0; NONCE_LEN],
        }
    }

    /// Write the next nonce into `out`, replacing its contents. The
    /// caller's allocation is reused across draws.
    pub fn draw_into(&mut self, out: &mut String) {
        self.rng.fill_bytes(&mut self.buf);
        out.clear();
        for byte in &self.buf {
            out.push(NONCE_ALPHABET[*byte as usize % NONCE_ALPHABET.len()] as char);
        }
    }
}
