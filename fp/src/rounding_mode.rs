//! # Rounding modes
//!
//! The FPCR `RMode` field (bits 22-23) selects one of four IEEE 754 rounding
//! policies. The enum discriminants are the field encoding.
//!
//! | RMode | Mnemonic | Rounds towards      |
//! |-------|----------|---------------------|
//! | 0b00  | RN       | nearest, ties even  |
//! | 0b01  | RP       | plus infinity       |
//! | 0b10  | RM       | minus infinity      |
//! | 0b11  | RZ       | zero                |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundingMode {
    /// Round to nearest, ties to even.
    #[default]
    ToNearestTieEven = 0b00,

    /// Round towards plus infinity.
    TowardsPlusInfinity = 0b01,

    /// Round towards minus infinity.
    TowardsMinusInfinity = 0b10,

    /// Round towards zero.
    TowardsZero = 0b11,
}

impl RoundingMode {
    /// Every mode, in encoding order.
    pub const ALL: [Self; 4] = [
        Self::ToNearestTieEven,
        Self::TowardsPlusInfinity,
        Self::TowardsMinusInfinity,
        Self::TowardsZero,
    ];

    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::ToNearestTieEven => "RN",
            Self::TowardsPlusInfinity => "RP",
            Self::TowardsMinusInfinity => "RM",
            Self::TowardsZero => "RZ",
        }
    }
}

impl From<RoundingMode> for u32 {
    fn from(mode: RoundingMode) -> Self {
        mode as Self
    }
}

impl TryFrom<u32> for RoundingMode {
    type Error = String;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        match n {
            0b00 => Ok(Self::ToNearestTieEven),
            0b01 => Ok(Self::TowardsPlusInfinity),
            0b10 => Ok(Self::TowardsMinusInfinity),
            0b11 => Ok(Self::TowardsZero),
            _ => Err(format!("Unexpected value for RoundingMode: {n}")),
        }
    }
}

impl FromStr for RoundingMode {
    type Err = String;

    /// Accepts the mnemonic (`rn`, `rp`, `rm`, `rz`) or a long name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rn" | "nearest" | "tonearest" => Ok(Self::ToNearestTieEven),
            "rp" | "plusinf" | "up" => Ok(Self::TowardsPlusInfinity),
            "rm" | "minusinf" | "down" => Ok(Self::TowardsMinusInfinity),
            "rz" | "zero" => Ok(Self::TowardsZero),
            _ => Err(format!("Unknown rounding mode: {s}")),
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
