//! Short-message packing for `SendDirectData`.
//!
//! The driver takes a short message as one `u32`: first byte in the lowest
//! eight bits, unused high bytes zero.

use crate::error::{Error, Result};

/// Packs 1-3 bytes little-endian into the `SendDirectData` word.
pub fn pack_short_message(bytes: &[u8]) -> Result<u32> {
    if bytes.is_empty() || bytes.len() > 3 {
        return Err(Error::InvalidMessage(format!(
            "short message must be 1-3 bytes, got {}",
            bytes.len()
        )));
    }

    Ok(bytes
        .iter()
        .rev()
        .fold(0u32, |packed, &byte| (packed << 8) | u32::from(byte)))
}

/// First `len` bytes of a packed word, lowest byte first. `len` is capped at 4.
pub fn unpack_short_message(packed: u32, len: usize) -> Vec<u8> {
    packed.to_le_bytes()[..len.min(4)].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_note_on() {
        // Note On ch.1, C4, velocity 100
        assert_eq!(pack_short_message(&[0x90, 0x3C, 0x64]).unwrap(), 0x0064_3C90);
    }

    #[test]
    fn test_pack_matches_shift_formula() {
        let cases: [&[u8]; 5] = [
            &[0x80, 0x40, 0x00],
            &[0xB3, 0x07, 0x7F],
            &[0xE0, 0x00, 0x40],
            &[0xC9, 0x2A],
            &[0xD0, 0x55],
        ];
        for bytes in cases {
            let b0 = u32::from(bytes[0]);
            let b1 = u32::from(bytes[1]);
            let b2 = bytes.get(2).copied().map(u32::from).unwrap_or(0);
            assert_eq!(
                pack_short_message(bytes).unwrap(),
                b0 | (b1 << 8) | (b2 << 16),
                "bytes {:02X?}",
                bytes
            );
        }
    }

    #[test]
    fn test_pack_two_byte_leaves_high_bytes_zero() {
        let packed = pack_short_message(&[0xC0, 0x05]).unwrap();
        assert_eq!(packed, 0x0000_05C0);
        assert_eq!(packed >> 16, 0);
    }

    #[test]
    fn test_pack_single_byte_realtime() {
        // Timing clock
        assert_eq!(pack_short_message(&[0xF8]).unwrap(), 0xF8);
    }

    #[test]
    fn test_pack_rejects_bad_lengths() {
        assert!(pack_short_message(&[]).is_err());
        assert!(pack_short_message(&[0xB0, 0x07, 0x7F, 0x00]).is_err());
    }

    #[test]
    fn test_unpack_recovers_bytes() {
        for bytes in [&[0x90u8, 0x3C, 0x64][..], &[0xC2, 0x10][..], &[0xFE][..]] {
            let packed = pack_short_message(bytes).unwrap();
            assert_eq!(unpack_short_message(packed, bytes.len()), bytes);
        }
    }
}
