//! The store facade: add, remove, get, and superset maintenance.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use rld_blob::ContentStore;
use rld_digest::{fingerprint, normalize, BlobFormat};
use rld_keymap::{KeyMap, KEYMAP_FILE_NAME};
use rld_superset::{SupersetDocument, TypeSimplifier};
use rld_types::{Fingerprint, StructureKey};
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::traits::StructureParser;

/// Result of a successful [`StructureStore::add`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// The key was new; the index (and, unless deduplicated, the blob) was
    /// written.
    Inserted,
    /// The key already mapped to identical content. Nothing changed.
    AlreadyPresent,
    /// The build is out of service: the blob was read and fingerprinted,
    /// then discarded without touching any state.
    OutOfService,
}

/// A handle to one structure store directory.
///
/// Owns the key index, the content store, the superset document, and the
/// external parser/canonicalizer collaborators. All state is loaded in
/// [`open`] and lives for the life of the handle; no ambient globals.
///
/// [`open`]: StructureStore::open
pub struct StructureStore {
    config: StoreConfig,
    keymap: KeyMap,
    content: ContentStore,
    superset: SupersetDocument,
    parser: Box<dyn StructureParser>,
    simplifier: Box<dyn TypeSimplifier>,
    /// The last in-service addition; what `update_superset` re-parses.
    pending: Option<(StructureKey, Fingerprint)>,
}

impl StructureStore {
    /// Open (or create) the store directory and load the key index and
    /// superset document into memory.
    pub fn open(
        config: StoreConfig,
        parser: Box<dyn StructureParser>,
        simplifier: Box<dyn TypeSimplifier>,
    ) -> StoreResult<Self> {
        fs::create_dir_all(&config.directory)?;
        let keymap = KeyMap::load(config.directory.join(KEYMAP_FILE_NAME))?;
        let content = ContentStore::open(&config.directory)?;
        let superset = SupersetDocument::load(&config.directory.join(&config.superset_file))?;

        Ok(Self {
            config,
            keymap,
            content,
            superset,
            parser,
            simplifier,
            pending: None,
        })
    }

    /// Record a structure blob under `key`.
    ///
    /// The source is always read in full and fingerprinted, even for an
    /// out-of-service build: the verification cost is paid regardless of
    /// whether the result is persisted.
    ///
    /// For an in-service build: a new key is indexed and its blob stored
    /// (unless another key of the same platform already put identical
    /// content there); re-adding identical content under an existing key is
    /// a no-op; re-adding *different* content under an existing key is a
    /// [`StoreError::StructureMismatch`] and leaves the store untouched.
    pub fn add(
        &mut self,
        key: &StructureKey,
        mut source: impl Read,
        in_service: bool,
    ) -> StoreResult<AddOutcome> {
        let mut bytes = Vec::new();
        source.read_to_end(&mut bytes)?;
        let incoming = fingerprint(&bytes)?;

        if !in_service {
            debug!(%key, fingerprint = incoming.short(), "out-of-service build discarded");
            return Ok(AddOutcome::OutOfService);
        }

        match self.keymap.get(key).cloned() {
            None => {
                self.keymap.insert(key.clone(), incoming.clone());
                // Index before blob: a present index entry with a missing
                // blob is recoverable by re-adding, the reverse just wastes
                // space.
                self.keymap.save()?;
                if self.keymap.references(key.platform(), &incoming) == 1 {
                    let payload = normalize(&bytes)?;
                    self.content.write(key.platform(), &incoming, &payload)?;
                } else {
                    debug!(%key, fingerprint = incoming.short(), "content deduplicated");
                }
                self.pending = Some((key.clone(), incoming));
                Ok(AddOutcome::Inserted)
            }
            Some(existing) if existing == incoming => {
                self.pending = Some((key.clone(), incoming));
                Ok(AddOutcome::AlreadyPresent)
            }
            Some(existing) => Err(StoreError::StructureMismatch {
                key: key.clone(),
                existing,
                incoming,
            }),
        }
    }

    /// [`add`](StructureStore::add) from a file path.
    pub fn add_path(
        &mut self,
        key: &StructureKey,
        path: impl AsRef<Path>,
        in_service: bool,
    ) -> StoreResult<AddOutcome> {
        let file = fs::File::open(path)?;
        self.add(key, file, in_service)
    }

    /// Remove the entry for `key`. Returns `false` if the key is absent.
    ///
    /// The physical blob is deleted only when no remaining key of the same
    /// platform references its fingerprint.
    pub fn remove(&mut self, key: &StructureKey) -> StoreResult<bool> {
        let Some(fingerprint) = self.keymap.remove(key) else {
            return Ok(false);
        };
        self.keymap.save()?;

        if self.keymap.references(key.platform(), &fingerprint) == 0 {
            self.content.delete(key.platform(), &fingerprint)?;
            let pending_gone = self.pending.as_ref().is_some_and(|(pkey, pfp)| {
                pkey.platform() == key.platform() && *pfp == fingerprint
            });
            if pending_gone {
                self.pending = None;
            }
        }

        debug!(%key, "entry removed");
        Ok(true)
    }

    /// The stored blob for `key`, or `None` if the key is absent.
    pub fn get(&self, key: &StructureKey) -> StoreResult<Option<Vec<u8>>> {
        let Some(fingerprint) = self.keymap.get(key) else {
            return Ok(None);
        };
        match self.content.read(key.platform(), fingerprint)? {
            Some(payload) => Ok(Some(payload)),
            None => Err(StoreError::MissingBlob {
                key: key.clone(),
                fingerprint: fingerprint.clone(),
            }),
        }
    }

    /// The persisted superset document, or `None` if it has never been
    /// written.
    pub fn superset_bytes(&self) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(self.superset_path()) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Re-parse the blob most recently added in service and fold its
    /// structures into the superset document, then rewrite the document.
    ///
    /// Returns `false` when no addition is pending (nothing has been added
    /// in service since open, or the pending blob was removed).
    pub fn update_superset(&mut self) -> StoreResult<bool> {
        let Some((key, fingerprint)) = self.pending.clone() else {
            return Ok(false);
        };

        let bytes = self
            .content
            .read(key.platform(), &fingerprint)?
            .ok_or_else(|| StoreError::MissingBlob {
                key: key.clone(),
                fingerprint: fingerprint.clone(),
            })?;

        let format = BlobFormat::detect(&bytes);
        let descriptors = self.parser.parse(&bytes, format)?;
        for descriptor in &descriptors {
            self.superset.fold(descriptor, self.simplifier.as_ref());
        }
        self.superset.save(&self.superset_path())?;

        debug!(%key, structures = descriptors.len(), "superset updated");
        Ok(true)
    }

    /// Whether `key` has a recorded entry.
    pub fn contains(&self, key: &StructureKey) -> bool {
        self.keymap.contains_key(key)
    }

    /// Number of recorded keys.
    pub fn len(&self) -> usize {
        self.keymap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keymap.is_empty()
    }

    /// Recorded keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &StructureKey> {
        self.keymap.iter().map(|(key, _)| key)
    }

    /// The store directory.
    pub fn directory(&self) -> &Path {
        &self.config.directory
    }

    /// File name of the superset document.
    pub fn superset_file_name(&self) -> &str {
        &self.config.superset_file
    }

    fn superset_path(&self) -> PathBuf {
        self.config.directory.join(&self.config.superset_file)
    }
}

impl std::fmt::Debug for StructureStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructureStore")
            .field("directory", &self.config.directory)
            .field("keys", &self.keymap.len())
            .field("structures", &self.superset.structure_count())
            .finish()
    }
}
