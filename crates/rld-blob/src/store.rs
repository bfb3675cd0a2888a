//! The filesystem content store: one write-once container per address.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rld_types::Fingerprint;
use tracing::debug;

use crate::container;
use crate::error::{BlobError, BlobResult};

/// File extension of a physical container.
pub const CONTAINER_EXT: &str = "pack";

/// Extension of the single logical entry inside a container.
pub const PAYLOAD_EXT: &str = "blob";

/// Physically persists one blob per distinct `(platform, fingerprint)`
/// address, in the directory handed to [`ContentStore::open`].
#[derive(Debug)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Open a content store rooted at `root`, creating the directory if
    /// absent.
    pub fn open(root: impl AsRef<Path>) -> BlobResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the container for an address.
    pub fn container_path(&self, platform: &str, fingerprint: &Fingerprint) -> PathBuf {
        self.root
            .join(format!("{platform}.{fingerprint}.{CONTAINER_EXT}"))
    }

    fn entry_name(platform: &str, fingerprint: &Fingerprint) -> String {
        format!("{platform}.{fingerprint}.{PAYLOAD_EXT}")
    }

    /// Write the blob for an address. The address must be unoccupied:
    /// stored bytes never change after first write.
    pub fn write(&self, platform: &str, fingerprint: &Fingerprint, payload: &[u8]) -> BlobResult<()> {
        let path = self.container_path(platform, fingerprint);
        if path.exists() {
            return Err(BlobError::AlreadyExists { path });
        }
        let bytes = container::encode(&Self::entry_name(platform, fingerprint), payload)?;
        fs::write(&path, &bytes)?;
        debug!(platform, fingerprint = fingerprint.short(), bytes = payload.len(), "blob written");
        Ok(())
    }

    /// Read the blob at an address. `Ok(None)` if the address is empty.
    pub fn read(&self, platform: &str, fingerprint: &Fingerprint) -> BlobResult<Option<Vec<u8>>> {
        let path = self.container_path(platform, fingerprint);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let (entry_name, payload) = container::decode(&bytes)?;
        let expected = Self::entry_name(platform, fingerprint);
        if entry_name != expected {
            return Err(BlobError::EntryMismatch {
                expected,
                actual: entry_name,
            });
        }
        Ok(Some(payload))
    }

    /// Whether an address is occupied.
    pub fn exists(&self, platform: &str, fingerprint: &Fingerprint) -> bool {
        self.container_path(platform, fingerprint).exists()
    }

    /// Delete the container at an address. Returns `true` if one existed.
    pub fn delete(&self, platform: &str, fingerprint: &Fingerprint) -> BlobResult<bool> {
        let path = self.container_path(platform, fingerprint);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(platform, fingerprint = fingerprint.short(), "blob deleted");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Number of containers currently in the store directory.
    pub fn count(&self) -> BlobResult<usize> {
        let mut count = 0;
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().map(|e| e == CONTAINER_EXT).unwrap_or(false) {
                count += 1;
            }
        }
        Ok(count)
    }
}
