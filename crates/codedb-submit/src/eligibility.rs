//! Upload gate for primary samples.

use codedb_core::results::FileFlags;

/// Whether a primary sample is worth uploading.
///
/// Both type flags (`EXE`, `DLL`) must have been determined, whatever their
/// value, and the sample must be known not to be packed. Missing information
/// never qualifies. Unpacked and extracted variants skip this check.
#[must_use]
pub const fn is_uploadable(flags: &FileFlags) -> bool {
    flags.exe.is_some() && flags.dll.is_some() && matches!(flags.probably_packed, Some(false))
}
