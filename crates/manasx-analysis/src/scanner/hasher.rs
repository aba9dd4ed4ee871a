//! Content hashing via xxh3.

use xxhash_rust::xxh3::xxh3_64;

/// Compute the xxh3 64-bit hash of file content.
#[inline]
pub fn hash_content(content: &[u8]) -> u64 {
    xxh3_64(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_hash() {
        let data = b"const a = 1;";
        assert_eq!(hash_content(data), hash_content(data));
    }

    #[test]
    fn different_content_different_hash() {
        assert_ne!(hash_content(b"let a = 1;"), hash_content(b"let a = 2;"));
    }
}
