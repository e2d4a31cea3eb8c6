use crate::error::{QcError, Result};

/// QARTOD primary quality flag
///
/// The numeric values are fixed by the QARTOD convention. Note that the
/// codes are not severity-ordered: `Missing` (9) means "no verdict", not
/// "worse than Bad".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagCode {
    Good = 1,
    Unknown = 2,
    Suspect = 3,
    Bad = 4,
    Missing = 9,
}

impl FlagCode {
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            1 => Ok(FlagCode::Good),
            2 => Ok(FlagCode::Unknown),
            3 => Ok(FlagCode::Suspect),
            4 => Ok(FlagCode::Bad),
            9 => Ok(FlagCode::Missing),
            _ => Err(QcError::InvalidFlag(value)),
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// True when the flag expresses an actual verdict on the observation,
    /// as opposed to absence of one (`Unknown`, `Missing`)
    pub fn is_verdict(&self) -> bool {
        matches!(self, FlagCode::Good | FlagCode::Suspect | FlagCode::Bad)
    }

    pub fn is_usable(&self) -> bool {
        matches!(self, FlagCode::Good | FlagCode::Suspect)
    }
}

impl std::fmt::Display for FlagCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FlagCode::Good => "good",
            FlagCode::Unknown => "unknown",
            FlagCode::Suspect => "suspect",
            FlagCode::Bad => "bad",
            FlagCode::Missing => "missing",
        };
        write!(f, "{}", name)
    }
}
