//! Digest-to-code transform.
//!
//! Maps a SHA-256 digest to the 16-character integrity code carried in a
//! record's trailing field.

use crate::integrity::table::TABLE;

/// Number of digest bytes the transform consumes.
///
/// The remaining 24 bytes of the digest are ignored. This is part of the
/// wire format shared with the original consumer, not a truncation to fix.
const DIGEST_BYTES_USED: usize = 8;

/// Convert a 32-byte SHA-256 digest into a 16-character integrity code.
///
/// For each of the first 8 digest bytes, the lookup table entry `v` yields
/// two characters: `char(v % 128)` then `char((v >> 16) % 128)`. The
/// function is total — every 32-byte input produces a code.
///
/// # Example
///
/// ```
/// use sha2::{Digest as _, Sha256};
///
/// let digest: [u8; 32] = Sha256::digest(b"21|foo|bar|1").into();
/// let code = logseal::integrity::code_from_digest(&digest);
/// assert_eq!(code.len(), 16);
/// ```
#[must_use]
pub fn code_from_digest(digest: &[u8; 32]) -> String {
    let mut code = String::with_capacity(DIGEST_BYTES_USED * 2);
    for &byte in &digest[..DIGEST_BYTES_USED] {
        let v = TABLE[byte as usize];
        code.push(((v % 128) as u8) as char);
        code.push((((v >> 16) % 128) as u8) as char);
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Digest as _, Sha256};

    #[test]
    fn test_code_is_16_characters() {
        let digest: [u8; 32] = Sha256::digest(b"anything").into();
        assert_eq!(code_from_digest(&digest).len(), 16);
    }

    #[test]
    fn test_known_answer() {
        // SHA-256("probe") starts ba 9c 73 6f 19 e7 f6 0b...
        let digest: [u8; 32] = Sha256::digest(b"probe").into();
        assert_eq!(code_from_digest(&digest), "ba9c736f19e7f60b");
    }

    #[test]
    fn test_trailing_digest_bytes_are_ignored() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        b[DIGEST_BYTES_USED..].fill(0xFF);
        assert_eq!(code_from_digest(&a), code_from_digest(&b));

        // But a change inside the consumed prefix must show.
        a[0] = 1;
        assert_ne!(code_from_digest(&a), code_from_digest(&b));
    }

    #[test]
    fn test_all_byte_values_map_to_two_chars() {
        let mut digest = [0u8; 32];
        for byte in 0..=255u8 {
            digest[0] = byte;
            assert_eq!(code_from_digest(&digest).len(), 16);
        }
    }
}
