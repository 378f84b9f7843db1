//! Byte assembly from the recovered bitstream

/// Pack bits into bytes, 8 at a time in transmission order, first bit in
/// the most significant position. A trailing group of fewer than 8 bits
/// carries no complete byte and is dropped.
pub fn pack(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |byte, &bit| (byte << 1) | (bit & 1)))
        .collect()
}

/// Render packed bytes as text, one character code per byte
pub fn to_text(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| byte as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_msb_first() {
        let bits = [0, 1, 0, 0, 1, 0, 0, 0];
        assert_eq!(pack(&bits), vec![0x48]);
        assert_eq!(to_text(&pack(&bits)), "H");
    }

    #[test]
    fn test_multiple_bytes() {
        let bits = [
            0, 1, 0, 0, 1, 0, 0, 0, // 'H'
            0, 1, 1, 0, 1, 0, 0, 1, // 'i'
        ];
        assert_eq!(to_text(&pack(&bits)), "Hi");
    }

    #[test]
    fn test_trailing_partial_dropped() {
        let bits = [0, 1, 0, 0, 1, 0, 0, 0, 1, 1, 1];
        assert_eq!(pack(&bits), vec![0x48]);
    }

    #[test]
    fn test_empty() {
        assert!(pack(&[]).is_empty());
        assert!(to_text(&[]).is_empty());
        // Fewer than 8 bits total yields no bytes at all
        assert!(pack(&[1, 0, 1]).is_empty());
    }
}
