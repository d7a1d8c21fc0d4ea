//! Bit field codec for packing and extracting sub-ranges of a 32-bit word.
//!
//! A `BitField` names an inclusive range of bit positions. Extraction and
//! insertion are pure shift-and-mask operations; signed extraction
//! reinterprets the field's low bits as two's complement.

use crate::Word;

/// An inclusive range of bit positions within a 32-bit word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitField {
    low: u32,
    high: u32,
}

impl BitField {
    /// Create a field spanning bits `low..=high`.
    ///
    /// Panics unless `low <= high <= 31`.
    pub const fn new(low: u32, high: u32) -> Self {
        assert!(low <= high, "bit field low bit above high bit");
        assert!(high <= 31, "bit field exceeds word width");
        Self { low, high }
    }

    /// Field width in bits.
    #[inline]
    pub const fn width(self) -> u32 {
        self.high - self.low + 1
    }

    /// Mask of `width` ones, right-justified.
    #[inline]
    const fn mask(self) -> u32 {
        if self.width() == 32 {
            u32::MAX
        } else {
            (1 << self.width()) - 1
        }
    }

    /// Extract the field from `word` as an unsigned value.
    #[inline]
    pub const fn extract(self, word: Word) -> u32 {
        (word >> self.low) & self.mask()
    }

    /// Extract the field from `word` and sign-extend it.
    #[inline]
    pub const fn extract_signed(self, word: Word) -> i32 {
        sign_extend(self.extract(word), self.width())
    }

    /// Insert `value` into the field's position within `word`.
    ///
    /// The value is masked to the field width first, so out-of-range
    /// values wrap rather than disturb neighboring fields. Signed values
    /// store their low `width` bits.
    #[inline]
    pub const fn insert(self, value: i32, word: Word) -> Word {
        let bits = (value as u32) & self.mask();
        (word & !(self.mask() << self.low)) | (bits << self.low)
    }
}

/// Reinterpret the low `width` bits of `value` as a two's-complement
/// signed number: if the high bit of the field is set, the result is
/// `value - 2^width`.
///
/// Applying this to an already-extended value is a no-op.
#[inline]
pub const fn sign_extend(value: u32, width: u32) -> i32 {
    if width >= 32 {
        return value as i32;
    }
    let masked = value & ((1u32 << width) - 1);
    let sign_bit = 1u32 << (width - 1);
    if masked & sign_bit != 0 {
        (masked as i64 - (1i64 << width)) as i32
    } else {
        masked as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_low() {
        let low_bits = BitField::new(0, 3);
        assert_eq!(low_bits.extract(0b10101010101), 0b101);
    }

    #[test]
    fn test_extract_middle() {
        let middle_bits = BitField::new(5, 9);
        assert_eq!(middle_bits.extract(0b1010101101101011), 0b11011);
    }

    #[test]
    fn test_insert_low() {
        let low_bits = BitField::new(0, 3);
        assert_eq!(low_bits.insert(15, 0), 15);
        // Slip it in without disturbing higher bits
        assert_eq!(low_bits.insert(0b1010, 0b1111_0000), 0b1111_1010);
    }

    #[test]
    fn test_insert_replaces_old_bits() {
        let field = BitField::new(4, 7);
        let word = field.insert(0b1111, 0);
        assert_eq!(field.insert(0b0101, word), 0b0101_0000);
    }

    #[test]
    fn test_full_word_field() {
        let all = BitField::new(0, 31);
        assert_eq!(all.extract(0xFFFF_FFFF), 0xFFFF_FFFF);
        assert_eq!(all.extract(0x8000_0000), 0x8000_0000);
        assert_eq!(all.extract(0x1234_5678), 0x1234_5678);
        assert_eq!(all.insert(0x1234_5678u32 as i32, 0xFFFF_FFFF), 0x1234_5678);
    }

    #[test]
    fn test_sign_extend_positive() {
        // 7 is positive in a 4-bit field but negative in a 3-bit field
        assert_eq!(sign_extend(7, 4), 7);
        assert!(sign_extend(7, 3) < 0);
        assert_eq!(sign_extend(7, 3), -1);
    }

    #[test]
    fn test_sign_extend_negative() {
        let chunk = (-3i32 as u32) & 0b111;
        assert_eq!(sign_extend(chunk, 3), -3);
        assert_eq!(sign_extend(0b1111_1111, 8), -1);
        assert_eq!(sign_extend(0b1000_0000, 8), -128);
        assert_eq!(sign_extend(0b0111_1111, 8), 127);
    }

    #[test]
    fn test_sign_extend_stable() {
        // Re-extending an already-extended value changes nothing
        let once = sign_extend(0b110, 3);
        assert_eq!(sign_extend(once as u32 & 0b111, 3), once);
    }

    #[test]
    fn test_extract_signed() {
        let field = BitField::new(2, 4);
        assert_eq!(field.extract_signed(0b101_111_10), -1);
        assert_eq!(field.extract_signed(0b101_011_10), 3);
    }

    #[test]
    fn test_insert_negative_round_trip() {
        let field = BitField::new(3, 5);
        let packed = field.insert(-1, 0);
        assert_eq!(packed, 0b000_111_000);
        assert_eq!(field.extract_signed(packed), -1);
    }

    #[test]
    #[should_panic]
    fn test_low_above_high() {
        BitField::new(10, 5);
    }

    #[test]
    #[should_panic]
    fn test_high_out_of_range() {
        BitField::new(1, 32);
    }
}
