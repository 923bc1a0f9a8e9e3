//! # Floating-Point Control Register (FPCR)
//!
//! The FPCR controls floating-point behaviour: rounding, flushing of
//! denormals, default NaN generation and which exceptions trap.
//!
//! ```text
//! 31   27 26  25 24 23  22 21  20 19   18 16 15  14 13 12  11  10  9   8  7      0
//! ┌──────┬───┬──┬──┬──────┬──────┬────┬─────┬───┬─────┬───┬───┬───┬───┬───┬────────┐
//! │ Res0 │AHP│DN│FZ│RMode │Stride│FZ16│ Len │IDE│Res0 │IXE│UFE│OFE│DZE│IOE│  Res0  │
//! └──────┴───┴──┴──┴──────┴──────┴────┴─────┴───┴─────┴───┴───┴───┴───┴───┴────────┘
//! ```
//!
//! - **Reserved bits** (0-7, 13-14, 27-31) always read as zero, whatever raw
//!   value the register was built or restored from.
//! - **Stride/Len** only mean something to AArch32 VFP vector instructions,
//!   they are still stored in AArch64 state.
//! - **Trap enables** (IDE, IXE, UFE, OFE, DZE, IOE): one per exception.
//!
//! Setters for multi-bit fields panic on values outside the architectural
//! domain: a bad value there is a decoder bug, not an input error.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bitwise::Bits;
use crate::rounding_mode::RoundingMode;

/// Floating-Point Control Register.
///
/// Wraps the raw `u32` with reserved bits cleared and exposes one accessor
/// pair per architectural field.
///
/// # Example
///
/// ```
/// use fp::{Fpcr, RoundingMode};
///
/// let mut fpcr = Fpcr::from_raw(0xFFFF_FFFF);
/// assert_eq!(fpcr.value(), 0x07FF_9F00);
///
/// fpcr.set_rmode(RoundingMode::TowardsZero);
/// fpcr.set_len(4);
/// assert_eq!(fpcr.len(), 4);
/// assert_eq!(fpcr.stride(), Some(2));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Fpcr(u32);

impl Fpcr {
    /// Every non-reserved bit. Bits 0-7, 13-14 and 27-31 are reserved.
    pub const MASK: u32 = 0x07FF_9F00;

    /// AHP, DN, FZ, RMode, Stride and Len: the bits that change how
    /// floating-point code is translated.
    pub const MODE_MASK: u32 = 0x07F7_0000;

    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw & Self::MASK)
    }

    /// Overwrites the whole register, clearing reserved bits.
    pub const fn assign(&mut self, raw: u32) {
        self.0 = raw & Self::MASK;
    }

    /// The raw register value, reserved bits clear.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// The subset of the value a JIT keys translated blocks on.
    #[must_use]
    pub const fn mode_bits(self) -> u32 {
        self.0 & Self::MODE_MASK
    }

    /// AHP => Bit 26, alternative half-precision format.
    #[must_use]
    pub fn ahp(self) -> bool {
        self.0.get_bit(26)
    }

    pub fn set_ahp(&mut self, ahp: bool) {
        self.0.set_bit(26, ahp);
    }

    /// DN => Bit 25, default NaN mode.
    #[must_use]
    pub fn dn(self) -> bool {
        self.0.get_bit(25)
    }

    pub fn set_dn(&mut self, dn: bool) {
        self.0.set_bit(25, dn);
    }

    /// FZ => Bit 24, flush-to-zero mode.
    #[must_use]
    pub fn fz(self) -> bool {
        self.0.get_bit(24)
    }

    pub fn set_fz(&mut self, fz: bool) {
        self.0.set_bit(24, fz);
    }

    /// RMode => Bits 22-23.
    #[must_use]
    pub fn rmode(self) -> RoundingMode {
        let bits = self.0.get_bits(22..=23);
        // A two bit field cannot hold anything else.
        RoundingMode::try_from(bits).unwrap_or_else(|e| unreachable!("{e}"))
    }

    pub fn set_rmode(&mut self, rounding_mode: RoundingMode) {
        let bits = u32::from(rounding_mode);
        assert!(bits <= 0b11, "FPCR: Invalid rounding mode");
        self.0.set_bits(22..=23, bits);
    }

    /// Stride => Bits 20-21, vector stride for AArch32 VFP instructions.
    ///
    /// `0b00` is a stride of 1 and `0b11` a stride of 2. The other two
    /// encodings have no defined meaning and give `None`.
    #[must_use]
    pub fn stride(self) -> Option<usize> {
        match self.0.get_bits(20..=21) {
            0b00 => Some(1),
            0b11 => Some(2),
            bits => {
                tracing::debug!(
                    "Undefined stride encoding 0b{bits:02b} in FPCR=0x{:08X}",
                    self.0
                );
                None
            }
        }
    }

    /// Panics unless `stride` is 1 or 2.
    pub fn set_stride(&mut self, stride: usize) {
        assert!((1..=2).contains(&stride), "FPCR: Invalid stride");
        self.0
            .set_bits(20..=21, if stride == 1 { 0b00 } else { 0b11 });
    }

    /// FZ16 => Bit 19, flush-to-zero for half-precision.
    #[must_use]
    pub fn fz16(self) -> bool {
        self.0.get_bit(19)
    }

    pub fn set_fz16(&mut self, fz16: bool) {
        self.0.set_bit(19, fz16);
    }

    /// Len => Bits 16-18, vector length for AArch32 VFP instructions.
    /// The field stores `len - 1`, so this is always in `1..=8`.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(self) -> usize {
        self.0.get_bits(16..=18) as usize + 1
    }

    /// Panics unless `len` is in `1..=8`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn set_len(&mut self, len: usize) {
        assert!((1..=8).contains(&len), "FPCR: Invalid len");
        self.0.set_bits(16..=18, (len - 1) as u32);
    }

    /// IDE => Bit 15, input denormal exception trap enable.
    #[must_use]
    pub fn ide(self) -> bool {
        self.0.get_bit(15)
    }

    pub fn set_ide(&mut self, ide: bool) {
        self.0.set_bit(15, ide);
    }

    /// IXE => Bit 12, inexact exception trap enable.
    #[must_use]
    pub fn ixe(self) -> bool {
        self.0.get_bit(12)
    }

    pub fn set_ixe(&mut self, ixe: bool) {
        self.0.set_bit(12, ixe);
    }

    /// UFE => Bit 11, underflow exception trap enable.
    #[must_use]
    pub fn ufe(self) -> bool {
        self.0.get_bit(11)
    }

    pub fn set_ufe(&mut self, ufe: bool) {
        self.0.set_bit(11, ufe);
    }

    /// OFE => Bit 10, overflow exception trap enable.
    #[must_use]
    pub fn ofe(self) -> bool {
        self.0.get_bit(10)
    }

    pub fn set_ofe(&mut self, ofe: bool) {
        self.0.set_bit(10, ofe);
    }

    /// DZE => Bit 9, division by zero exception trap enable.
    #[must_use]
    pub fn dze(self) -> bool {
        self.0.get_bit(9)
    }

    pub fn set_dze(&mut self, dze: bool) {
        self.0.set_bit(9, dze);
    }

    /// IOE => Bit 8, invalid operation exception trap enable.
    #[must_use]
    pub fn ioe(self) -> bool {
        self.0.get_bit(8)
    }

    pub fn set_ioe(&mut self, ioe: bool) {
        self.0.set_bit(8, ioe);
    }

    /// The "standard FPSCR value" AArch32 Advanced SIMD instructions run with:
    /// default NaN and flush-to-zero on, round to nearest, no traps.
    /// AHP and FZ16 are carried over from `self`.
    #[must_use]
    pub fn asimd_standard_value(self) -> Self {
        let mut standard = Self::new();
        standard.set_ahp(self.ahp());
        standard.set_fz16(self.fz16());
        standard.set_fz(true);
        standard.set_dn(true);
        standard
    }

    fn flags(self) -> [(&'static str, bool); 10] {
        [
            ("AHP", self.ahp()),
            ("DN", self.dn()),
            ("FZ", self.fz()),
            ("FZ16", self.fz16()),
            ("IDE", self.ide()),
            ("IXE", self.ixe()),
            ("UFE", self.ufe()),
            ("OFE", self.ofe()),
            ("DZE", self.dze()),
            ("IOE", self.ioe()),
        ]
    }
}

impl From<u32> for Fpcr {
    fn from(raw: u32) -> Self {
        Self::from_raw(raw)
    }
}

impl From<Fpcr> for u32 {
    fn from(fpcr: Fpcr) -> Self {
        fpcr.0
    }
}

impl fmt::Display for Fpcr {
    /// `0x03c00000 [DN FZ] RMode=RZ Stride=1 Len=1`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x} [", self.0)?;

        let mut first = true;
        for (name, set) in self.flags() {
            if !set {
                continue;
            }
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(name)?;
            first = false;
        }

        write!(f, "] RMode={}", self.rmode())?;
        match self.stride() {
            Some(stride) => write!(f, " Stride={stride}")?,
            None => f.write_str(" Stride=?")?,
        }
        write!(f, " Len={}", self.len())
    }
}
