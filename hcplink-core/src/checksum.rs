//! Seeded CRC32 over packet byte ranges
//!
//! Both endpoints run the identical algorithm over the checksum-covered
//! region of a link packet (everything after the length field, up to the
//! trailing checksum). The function is order-sensitive and chainable via
//! the seed parameter.

use tracing::trace;

/// Calculate the CRC32 of `data`, continuing from `seed`.
///
/// A fresh checksum uses seed 0. Chaining holds:
/// `crc32(crc32(0, a), b) == crc32(0, a ++ b)`.
pub fn crc32(seed: u32, data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new_with_initial(seed);
    hasher.update(data);
    let crc = hasher.finalize();

    trace!(
        seed = format!("0x{seed:08X}"),
        len = data.len(),
        crc = format!("0x{crc:08X}"),
        "calculated checksum"
    );

    crc
}

/// Verify that `data` checksums to `expected` from `seed`.
pub fn verify(seed: u32, data: &[u8], expected: u32) -> bool {
    crc32(seed, data) == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_consistent() {
        let data = [0xAA, 0xBB, 0xCC];
        assert_eq!(crc32(0, &data), crc32(0, &data));
    }

    #[test]
    fn test_checksum_order_sensitive() {
        assert_ne!(crc32(0, &[1, 2, 3]), crc32(0, &[3, 2, 1]));
    }

    #[test]
    fn test_checksum_empty() {
        assert_eq!(crc32(0, &[]), 0);
    }

    #[test]
    fn test_checksum_chaining() {
        let whole = crc32(0, b"link packet body");
        let chained = crc32(crc32(0, b"link packet"), b" body");
        assert_eq!(whole, chained);
    }

    #[test]
    fn test_checksum_verify() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let crc = crc32(0, &data);

        assert!(verify(0, &data, crc));
        assert!(!verify(0, &data, crc.wrapping_add(1)));
    }

    #[test]
    fn test_checksum_single_byte_change() {
        let mut data = vec![0x55; 64];
        let crc = crc32(0, &data);

        for i in 0..data.len() {
            data[i] ^= 0x01;
            assert_ne!(crc, crc32(0, &data), "flip at byte {i} went undetected");
            data[i] ^= 0x01;
        }
    }
}
