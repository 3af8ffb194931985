//! Persisting encoded assets, with a backup of whatever was there before.
//!
//! The generator never touches the filesystem itself. It hands each
//! [`GeneratedAsset`] to an [`AssetSink`], which resolves the destination,
//! moves any existing file aside to `<file>.backup`, and writes the new bytes.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{IconError, IconResult};
use crate::icon::GeneratedAsset;

/// Suffix appended to a destination's file name to form its backup path.
pub const BACKUP_SUFFIX: &str = ".backup";

/// A prior asset that was moved aside before an overwrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupRecord {
    pub original: PathBuf,
    pub backup: PathBuf,
}

/// Where an asset ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persisted {
    pub destination: PathBuf,
    pub backup: Option<BackupRecord>,
}

/// `color.png` backs up to `color.png.backup`.
pub fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(BACKUP_SUFFIX);
    path.with_file_name(name)
}

/// Receives validated, encoded assets.
pub trait AssetSink {
    /// Stores `asset`, backing up any asset already at its destination.
    ///
    /// The previous backup, if any, is replaced.
    fn persist(&mut self, asset: &GeneratedAsset) -> IconResult<Persisted>;
}

// ============================================================================
// Filesystem sink
// ============================================================================

/// Writes assets under a root directory.
#[derive(Debug, Clone)]
pub struct FsAssetSink {
    root: PathBuf,
}

impl FsAssetSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn back_up(&self, destination: &Path) -> IconResult<Option<BackupRecord>> {
        match fs::symlink_metadata(destination) {
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(IconError::io(destination, err)),
        }

        // rename replaces an older backup in one step, so a failure here
        // leaves both the asset and its previous backup in place.
        let backup = backup_path_for(destination);
        fs::rename(destination, &backup).map_err(|err| IconError::io(&backup, err))?;

        tracing::info!(
            original = %destination.display(),
            backup = %backup.display(),
            "backed up existing asset"
        );
        Ok(Some(BackupRecord {
            original: destination.to_path_buf(),
            backup,
        }))
    }
}

impl AssetSink for FsAssetSink {
    fn persist(&mut self, asset: &GeneratedAsset) -> IconResult<Persisted> {
        let destination = self.root.join(&asset.path);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|err| IconError::io(parent, err))?;
        }

        let backup = self.back_up(&destination)?;
        fs::write(&destination, &asset.encoded_bytes)
            .map_err(|err| IconError::io(&destination, err))?;

        tracing::info!(
            path = %destination.display(),
            bytes = asset.encoded_bytes.len(),
            "wrote asset"
        );
        Ok(Persisted {
            destination,
            backup,
        })
    }
}

// ============================================================================
// In-memory sink
// ============================================================================

/// Keeps assets in memory, following the same backup convention.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetSink {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl MemoryAssetSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a file, as if an earlier run had written it.
    pub fn insert(&mut self, path: impl Into<PathBuf>, bytes: Vec<u8>) {
        self.files.insert(path.into(), bytes);
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&[u8]> {
        self.files.get(path.as_ref()).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }
}

impl AssetSink for MemoryAssetSink {
    fn persist(&mut self, asset: &GeneratedAsset) -> IconResult<Persisted> {
        let destination = asset.path.clone();
        let backup = self.files.remove(&destination).map(|previous| {
            let backup = backup_path_for(&destination);
            self.files.insert(backup.clone(), previous);
            BackupRecord {
                original: destination.clone(),
                backup,
            }
        });
        self.files
            .insert(destination.clone(), asset.encoded_bytes.clone());
        Ok(Persisted {
            destination,
            backup,
        })
    }
}
