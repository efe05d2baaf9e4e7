//! Leading-zero-bit difficulty evaluation.
//!
//! Difficulty counts leading zero bits of the 32-byte identifier, which is
//! exactly what external verifiers count on the hex form. Both views are
//! provided so tests and logs can cross-check submissions.

/// Count leading zero bits of a 32-byte identifier.
pub fn leading_zero_bits(id: &[u8; 32]) -> u32 {
    let mut bits = 0;
    for byte in id {
        if *byte == 0 {
            bits += 8;
        } else {
            bits += byte.leading_zeros();
            break;
        }
    }
    bits
}

/// Difficulty of a lowercase-hex identifier. Returns 0 for anything that
/// is not 64 hex characters.
pub fn hex_difficulty(id_hex: &str) -> u32 {
    let mut bytes = [0u8; 32];
    match hex::decode_to_slice(id_hex, &mut bytes) {
        Ok(()) => leading_zero_bits(&bytes),
        Err(_) => 0,
    }
}
