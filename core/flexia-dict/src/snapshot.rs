//! Binary snapshots of a built [`DictionaryIndex`].
//!
//! A snapshot is the rkyv archive of the index. It can be validated and read
//! in place through [`archived`], which answers lookups exactly like the owned
//! index without rebuilding it, or turned back into an owned index with
//! [`from_bytes`].

use std::fs;
use std::path::Path;

use rkyv::AlignedVec;

use crate::error::{DictError, Result};
use crate::index::{ArchivedDictionaryIndex, DictionaryIndex};

pub fn to_bytes(index: &DictionaryIndex) -> Result<AlignedVec> {
    rkyv::to_bytes::<_, 4096>(index).map_err(|e| DictError::Snapshot(e.to_string()))
}

/// Validates `bytes` and returns the archived index without copying.
///
/// `bytes` must be aligned for the archive, e.g. an [`AlignedVec`] from [`read`].
pub fn archived(bytes: &[u8]) -> Result<&ArchivedDictionaryIndex> {
    rkyv::check_archived_root::<DictionaryIndex>(bytes)
        .map_err(|e| DictError::Snapshot(e.to_string()))
}

pub fn from_bytes(bytes: &[u8]) -> Result<DictionaryIndex> {
    rkyv::from_bytes::<DictionaryIndex>(bytes).map_err(|e| DictError::Snapshot(e.to_string()))
}

/// Reads a snapshot file into an aligned buffer.
pub fn read(path: impl AsRef<Path>) -> Result<AlignedVec> {
    let path = path.as_ref();
    let raw = fs::read(path).map_err(|source| DictError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(aligned(&raw))
}

/// Copies bytes of unknown alignment (a file, a JS buffer) into an aligned buffer.
pub fn aligned(raw: &[u8]) -> AlignedVec {
    let mut bytes = AlignedVec::with_capacity(raw.len());
    bytes.extend_from_slice(raw);
    bytes
}

pub fn write(path: impl AsRef<Path>, index: &DictionaryIndex) -> Result<usize> {
    let path = path.as_ref();
    let bytes = to_bytes(index)?;
    fs::write(path, &bytes).map_err(|source| DictError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(bytes.len())
}
