//! ARM floating-point control state for CPU emulation.
//!
//! [`Fpcr`] models the Floating-Point Control Register and [`RoundingMode`]
//! its 2-bit `RMode` field. Bit-range access goes through [`Bits`].

#[allow(clippy::cast_possible_truncation)]
pub mod bitwise;

pub mod fpcr;
pub mod rounding_mode;

pub use bitwise::Bits;
pub use fpcr::Fpcr;
pub use rounding_mode::RoundingMode;
