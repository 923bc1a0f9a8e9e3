use std::fmt::Debug;
use std::mem::size_of;
use std::ops::RangeInclusive;

/// Bit-range helpers over the unsigned integer widths.
/// Bit indices go from lsb to msb (right to left), ranges are inclusive on both ends.
pub trait Bits
where
    Self: Copy + Sized + Into<u128> + TryFrom<u128>,
    <Self as TryFrom<u128>>::Error: Debug,
{
    /// Number of bits in `Self`.
    const WIDTH: u8 = (size_of::<Self>() * 8) as u8;

    fn get_bit(self, bit_idx: u8) -> bool {
        debug_assert!(bit_idx < Self::WIDTH);
        let bitwise: u128 = self.into();
        (bitwise >> bit_idx) & 0b1 == 1
    }

    #[must_use]
    fn with_bit(self, bit_idx: u8, value: bool) -> Self {
        debug_assert!(bit_idx < Self::WIDTH);
        let bitwise: u128 = self.into();
        let mask: u128 = 0b1 << bit_idx;
        let bitwise = if value { bitwise | mask } else { bitwise & !mask };
        <Self as TryFrom<u128>>::try_from(bitwise).unwrap()
    }

    fn set_bit(&mut self, bit_idx: u8, value: bool) {
        *self = self.with_bit(bit_idx, value);
    }

    /// Extracts `bits_range` and moves it down to bit 0.
    fn get_bits(self, bits_range: RangeInclusive<u8>) -> Self {
        let start = *bits_range.start();
        let mask = range_mask(&bits_range);
        let value: u128 = self.into();

        <Self as TryFrom<u128>>::try_from((value & mask) >> start).unwrap()
    }

    /// Returns a copy with `bits_range` replaced by `value`, every other bit untouched.
    /// `value` must fit in the range.
    #[must_use]
    fn with_bits(self, bits_range: RangeInclusive<u8>, value: Self) -> Self {
        let start = *bits_range.start();
        let mask = range_mask(&bits_range);
        let value: u128 = value.into();
        debug_assert!(
            (value << start) & !mask == 0,
            "value 0x{value:x} does not fit in bits {bits_range:?}"
        );

        let bitwise: u128 = self.into();
        let bitwise = (bitwise & !mask) | ((value << start) & mask);
        <Self as TryFrom<u128>>::try_from(bitwise).unwrap()
    }

    fn set_bits(&mut self, bits_range: RangeInclusive<u8>, value: Self) {
        *self = self.with_bits(bits_range, value);
    }
}

/// Ones over `bits_range`, zeros everywhere else.
fn range_mask(bits_range: &RangeInclusive<u8>) -> u128 {
    let start = *bits_range.start();
    let end = *bits_range.end();
    debug_assert!(start <= end && end < 128);

    // If bits_range is 16..=18 the length is 3 and we want 0b111 << 16.
    let length = u32::from(end - start) + 1;
    let ones = u128::MAX >> (128 - length);
    ones << start
}

impl Bits for u64 {}
impl Bits for u32 {}
impl Bits for u16 {}
impl Bits for u8 {}
