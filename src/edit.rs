use std::str::FromStr;

use fp::{Fpcr, RoundingMode};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("invalid register value '{0}'")]
    InvalidValue(String),
    #[error("expected FIELD=VALUE, got '{0}'")]
    Malformed(String),
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("invalid value '{value}' for {field}, expected 0/1/true/false/on/off")]
    InvalidFlag { field: &'static str, value: String },
    #[error("invalid rounding mode '{0}'")]
    InvalidRoundingMode(String),
    #[error("stride must be 1 or 2, got '{0}'")]
    InvalidStride(String),
    #[error("len must be in 1..=8, got '{0}'")]
    InvalidLen(String),
}

/// Single-bit FPCR fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Ahp,
    Dn,
    Fz,
    Fz16,
    Ide,
    Ixe,
    Ufe,
    Ofe,
    Dze,
    Ioe,
}

impl Flag {
    const ALL: [Self; 10] = [
        Self::Ahp,
        Self::Dn,
        Self::Fz,
        Self::Fz16,
        Self::Ide,
        Self::Ixe,
        Self::Ufe,
        Self::Ofe,
        Self::Dze,
        Self::Ioe,
    ];

    const fn name(self) -> &'static str {
        match self {
            Self::Ahp => "ahp",
            Self::Dn => "dn",
            Self::Fz => "fz",
            Self::Fz16 => "fz16",
            Self::Ide => "ide",
            Self::Ixe => "ixe",
            Self::Ufe => "ufe",
            Self::Ofe => "ofe",
            Self::Dze => "dze",
            Self::Ioe => "ioe",
        }
    }

    fn set(self, fpcr: &mut Fpcr, value: bool) {
        match self {
            Self::Ahp => fpcr.set_ahp(value),
            Self::Dn => fpcr.set_dn(value),
            Self::Fz => fpcr.set_fz(value),
            Self::Fz16 => fpcr.set_fz16(value),
            Self::Ide => fpcr.set_ide(value),
            Self::Ixe => fpcr.set_ixe(value),
            Self::Ufe => fpcr.set_ufe(value),
            Self::Ofe => fpcr.set_ofe(value),
            Self::Dze => fpcr.set_dze(value),
            Self::Ioe => fpcr.set_ioe(value),
        }
    }
}

/// One `FIELD=VALUE` argument, already checked against the field's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Flag(Flag, bool),
    RMode(RoundingMode),
    Stride(usize),
    Len(usize),
}

impl Edit {
    pub fn apply(self, fpcr: &mut Fpcr) {
        tracing::debug!(edit = ?self, "applying edit");
        match self {
            Self::Flag(flag, value) => flag.set(fpcr, value),
            Self::RMode(mode) => fpcr.set_rmode(mode),
            Self::Stride(stride) => fpcr.set_stride(stride),
            Self::Len(len) => fpcr.set_len(len),
        }
    }
}

impl FromStr for Edit {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| EditError::Malformed(s.to_string()))?;
        let field = field.trim().to_ascii_lowercase();
        let value = value.trim();

        match field.as_str() {
            "rmode" => parse_rmode(value).map(Self::RMode),
            "stride" => match value.parse::<usize>() {
                Ok(stride @ 1..=2) => Ok(Self::Stride(stride)),
                _ => Err(EditError::InvalidStride(value.to_string())),
            },
            "len" => match value.parse::<usize>() {
                Ok(len @ 1..=8) => Ok(Self::Len(len)),
                _ => Err(EditError::InvalidLen(value.to_string())),
            },
            name => {
                let flag = Flag::ALL
                    .into_iter()
                    .find(|flag| flag.name() == name)
                    .ok_or_else(|| EditError::UnknownField(name.to_string()))?;
                parse_flag(flag, value).map(|v| Self::Flag(flag, v))
            }
        }
    }
}

fn parse_flag(flag: Flag, value: &str) -> Result<bool, EditError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Ok(true),
        "0" | "false" | "off" => Ok(false),
        _ => Err(EditError::InvalidFlag {
            field: flag.name(),
            value: value.to_string(),
        }),
    }
}

fn parse_rmode(value: &str) -> Result<RoundingMode, EditError> {
    value
        .parse::<u32>()
        .map_err(|e| e.to_string())
        .and_then(RoundingMode::try_from)
        .or_else(|_| value.parse::<RoundingMode>())
        .map_err(|_| EditError::InvalidRoundingMode(value.to_string()))
}

/// Parses a raw register value, hex with a `0x` prefix or decimal.
pub fn parse_value(s: &str) -> Result<u32, EditError> {
    let s = s.trim().replace('_', "");
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    };
    parsed.map_err(|_| EditError::InvalidValue(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn check_parse_value() {
        assert_eq!(parse_value("0x03C00000"), Ok(0x03C0_0000));
        assert_eq!(parse_value("0xffff_ffff"), Ok(u32::MAX));
        assert_eq!(parse_value("256"), Ok(256));
        assert_eq!(
            parse_value("0x1_0000_0000"),
            Err(EditError::InvalidValue("0x100000000".to_string()))
        );
        assert!(parse_value("fpcr").is_err());
    }

    #[test]
    fn check_parse_flags() {
        assert_eq!("dze=1".parse::<Edit>(), Ok(Edit::Flag(Flag::Dze, true)));
        assert_eq!("FZ16=off".parse::<Edit>(), Ok(Edit::Flag(Flag::Fz16, false)));
        assert_eq!(
            "ahp=maybe".parse::<Edit>(),
            Err(EditError::InvalidFlag {
                field: "ahp",
                value: "maybe".to_string()
            })
        );
    }

    #[test]
    fn check_parse_rmode() {
        assert_eq!("rmode=rz".parse::<Edit>(), Ok(Edit::RMode(RoundingMode::TowardsZero)));
        assert_eq!(
            "rmode=1".parse::<Edit>(),
            Ok(Edit::RMode(RoundingMode::TowardsPlusInfinity))
        );
        assert_eq!(
            "rmode=4".parse::<Edit>(),
            Err(EditError::InvalidRoundingMode("4".to_string()))
        );
    }

    #[test]
    fn check_parse_stride_and_len() {
        assert_eq!("stride=2".parse::<Edit>(), Ok(Edit::Stride(2)));
        assert_eq!(
            "stride=3".parse::<Edit>(),
            Err(EditError::InvalidStride("3".to_string()))
        );
        assert_eq!("len=8".parse::<Edit>(), Ok(Edit::Len(8)));
        assert_eq!(
            "len=0".parse::<Edit>(),
            Err(EditError::InvalidLen("0".to_string()))
        );
        assert_eq!(
            "len=-1".parse::<Edit>(),
            Err(EditError::InvalidLen("-1".to_string()))
        );
    }

    #[test]
    fn check_parse_malformed() {
        assert_eq!(
            "dze".parse::<Edit>(),
            Err(EditError::Malformed("dze".to_string()))
        );
        assert_eq!(
            "qc=1".parse::<Edit>(),
            Err(EditError::UnknownField("qc".to_string()))
        );
    }

    #[test]
    fn check_apply() {
        let mut fpcr = Fpcr::new();
        for edit in ["dn=1", "fz=true", "rmode=rz", "stride=2", "len=4"] {
            edit.parse::<Edit>().unwrap().apply(&mut fpcr);
        }
        assert_eq!(fpcr.value(), 0x03F3_0000);
    }

    #[test]
    fn check_apply_every_flag() {
        let original = Fpcr::from_raw(rand::random::<u32>());
        for flag in Flag::ALL {
            let mut fpcr = original;
            Edit::Flag(flag, true).apply(&mut fpcr);
            Edit::Flag(flag, false).apply(&mut fpcr);
            let mut expected = original;
            flag.set(&mut expected, false);
            assert_eq!(fpcr, expected);
        }
    }
}
