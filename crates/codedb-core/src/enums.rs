//! Remote status values, binary kinds, and variant kinds.
//!
//! `RemoteStatusValue` travels as a bare integer on the wire; the other enums
//! use lowercase string serialization.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// RemoteStatusValue
// ---------------------------------------------------------------------------

/// Processing state of a content hash in the remote store.
///
/// ```text
/// not_exists → pending → processing → finished
///                                   → clone
///                                   → family
/// error (any time, fatal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum RemoteStatusValue {
    Error,
    NotExists,
    Pending,
    Processing,
    Finished,
    Clone,
    Family,
}

impl RemoteStatusValue {
    /// Integer code used by the remote store.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Error => -1,
            Self::NotExists => 0,
            Self::Pending => 1,
            Self::Processing => 2,
            Self::Finished => 3,
            Self::Clone => 4,
            Self::Family => 5,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::NotExists => "not_exists",
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Finished => "finished",
            Self::Clone => "clone",
            Self::Family => "family",
        }
    }
}

impl TryFrom<i64> for RemoteStatusValue {
    type Error = CoreError;

    fn try_from(code: i64) -> Result<Self, CoreError> {
        // `Self::Error` would name the associated type here.
        match code {
            -1 => Ok(RemoteStatusValue::Error),
            0 => Ok(RemoteStatusValue::NotExists),
            1 => Ok(RemoteStatusValue::Pending),
            2 => Ok(RemoteStatusValue::Processing),
            3 => Ok(RemoteStatusValue::Finished),
            4 => Ok(RemoteStatusValue::Clone),
            5 => Ok(RemoteStatusValue::Family),
            other => Err(CoreError::UnknownStatusValue(other)),
        }
    }
}

impl From<RemoteStatusValue> for i64 {
    fn from(value: RemoteStatusValue) -> Self {
        value.code()
    }
}

impl fmt::Display for RemoteStatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.code())
    }
}

// ---------------------------------------------------------------------------
// BinType
// ---------------------------------------------------------------------------

/// Declared executable kind of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinType {
    Exe,
    Dll,
    Sys,
}

impl BinType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exe => "exe",
            Self::Dll => "dll",
            Self::Sys => "sys",
        }
    }
}

impl fmt::Display for BinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// VariantKind
// ---------------------------------------------------------------------------

/// Which form of the analyzed sample a variant is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    /// The file as downloaded.
    Original,
    /// The result of unpacking the original.
    Unpacked,
    /// A file embedded in (and extracted from) the original.
    Extracted,
}

impl VariantKind {
    /// Derived variants bypass the eligibility heuristic.
    #[must_use]
    pub const fn is_derived(self) -> bool {
        matches!(self, Self::Unpacked | Self::Extracted)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Unpacked => "unpacked",
            Self::Extracted => "extracted",
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
