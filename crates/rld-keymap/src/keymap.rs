//! The in-memory key index and its line-per-entry persistence.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rld_types::{Fingerprint, StructureKey};
use tracing::debug;

use crate::error::{KeymapError, KeymapResult};

/// Conventional file name of the persisted index.
pub const KEYMAP_FILE_NAME: &str = "keymap.idx";

/// Persisted, memory-cached mapping from [`StructureKey`] to
/// [`Fingerprint`].
///
/// The `BTreeMap` is the source of truth between loads; [`save`] rewrites
/// the whole file in key order. Mutating operations touch only the map;
/// persistence is the caller's explicit step, which is what lets the store
/// facade order "index durable" before "blob written".
///
/// [`save`]: KeyMap::save
#[derive(Debug)]
pub struct KeyMap {
    path: PathBuf,
    entries: BTreeMap<StructureKey, Fingerprint>,
}

impl KeyMap {
    /// Load the index at `path`. A missing file is an empty index.
    pub fn load(path: impl Into<PathBuf>) -> KeymapResult<Self> {
        let path = path.into();
        let mut entries = BTreeMap::new();

        match fs::read_to_string(&path) {
            Ok(text) => {
                for (number, line) in text.lines().enumerate() {
                    let line_no = number + 1;
                    let (key_text, fp_text) =
                        line.split_once(' ').ok_or_else(|| KeymapError::Malformed {
                            line: line_no,
                            reason: "missing space separator".into(),
                        })?;
                    let key = StructureKey::parse(key_text).map_err(|e| {
                        KeymapError::Malformed {
                            line: line_no,
                            reason: e.to_string(),
                        }
                    })?;
                    let fingerprint = Fingerprint::parse(fp_text).map_err(|e| {
                        KeymapError::Malformed {
                            line: line_no,
                            reason: e.to_string(),
                        }
                    })?;
                    entries.insert(key, fingerprint);
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        Ok(Self { path, entries })
    }

    /// Rewrite the whole index file, one line per entry, in key order.
    pub fn save(&self) -> KeymapResult<()> {
        let mut out = String::new();
        for (key, fingerprint) in &self.entries {
            out.push_str(&key.canonical());
            out.push(' ');
            out.push_str(fingerprint.as_str());
            out.push('\n');
        }
        fs::write(&self.path, out)?;
        debug!(entries = self.entries.len(), "keymap saved");
        Ok(())
    }

    /// The file this index loads from and saves to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &StructureKey) -> Option<&Fingerprint> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &StructureKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert an entry, returning the previous fingerprint if any.
    pub fn insert(&mut self, key: StructureKey, fingerprint: Fingerprint) -> Option<Fingerprint> {
        self.entries.insert(key, fingerprint)
    }

    /// Remove an entry, returning its fingerprint if it existed.
    pub fn remove(&mut self, key: &StructureKey) -> Option<Fingerprint> {
        self.entries.remove(key)
    }

    /// Number of keys on the given platform that map to `fingerprint`.
    ///
    /// The physical blob address is `(platform, fingerprint)`, so reference
    /// counting for dedup and deletion is scoped to one platform.
    pub fn references(&self, platform: &str, fingerprint: &Fingerprint) -> usize {
        self.entries
            .iter()
            .filter(|(key, fp)| key.platform() == platform && *fp == fingerprint)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&StructureKey, &Fingerprint)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn key(platform: &str, build: &str) -> StructureKey {
        StructureKey::new(platform, build).unwrap()
    }

    fn fp(text: &str) -> Fingerprint {
        Fingerprint::new(text)
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let map = KeyMap::load(dir.path().join(KEYMAP_FILE_NAME)).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn save_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(KEYMAP_FILE_NAME);

        let mut map = KeyMap::load(&path).unwrap();
        map.insert(key("linux_x64", "b100"), fp("aa11"));
        map.insert(key("aix_ppc", "b2.1"), fp("bb22"));
        map.save().unwrap();

        let reloaded = KeyMap::load(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get(&key("linux_x64", "b100")), Some(&fp("aa11")));
        assert_eq!(reloaded.get(&key("aix_ppc", "b2.1")), Some(&fp("bb22")));
    }

    #[test]
    fn file_lines_are_sorted_and_canonical() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(KEYMAP_FILE_NAME);

        let mut map = KeyMap::load(&path).unwrap();
        map.insert(key("linux_x64", "b100"), fp("aa11"));
        map.insert(key("aix_ppc", "b2"), fp("bb22"));
        map.save().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "aix_ppc.b2 bb22\nlinux_x64.b100 aa11\n");
    }

    #[test]
    fn dotted_build_ids_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(KEYMAP_FILE_NAME);

        let mut map = KeyMap::load(&path).unwrap();
        map.insert(key("zos_390", "29.1.0"), fp("cc33"));
        map.save().unwrap();

        let reloaded = KeyMap::load(&path).unwrap();
        assert_eq!(reloaded.get(&key("zos_390", "29.1.0")), Some(&fp("cc33")));
    }

    #[test]
    fn malformed_line_reports_its_number() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(KEYMAP_FILE_NAME);
        fs::write(&path, "linux_x64.b100 aa11\nno-separator-here\n").unwrap();

        let err = KeyMap::load(&path).unwrap_err();
        assert!(matches!(err, KeymapError::Malformed { line: 2, .. }));
    }

    #[test]
    fn malformed_key_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(KEYMAP_FILE_NAME);
        fs::write(&path, "nodot aa11\n").unwrap();
        assert!(matches!(
            KeyMap::load(&path).unwrap_err(),
            KeymapError::Malformed { line: 1, .. }
        ));
    }

    #[test]
    fn references_are_platform_scoped() {
        let dir = tempdir().unwrap();
        let mut map = KeyMap::load(dir.path().join(KEYMAP_FILE_NAME)).unwrap();
        map.insert(key("linux_x64", "b1"), fp("aa11"));
        map.insert(key("linux_x64", "b2"), fp("aa11"));
        map.insert(key("aix_ppc", "b1"), fp("aa11"));
        map.insert(key("linux_x64", "b3"), fp("bb22"));

        assert_eq!(map.references("linux_x64", &fp("aa11")), 2);
        assert_eq!(map.references("aix_ppc", &fp("aa11")), 1);
        assert_eq!(map.references("linux_x64", &fp("bb22")), 1);
        assert_eq!(map.references("zos_390", &fp("aa11")), 0);
    }

    #[test]
    fn remove_returns_the_fingerprint() {
        let dir = tempdir().unwrap();
        let mut map = KeyMap::load(dir.path().join(KEYMAP_FILE_NAME)).unwrap();
        map.insert(key("linux_x64", "b1"), fp("aa11"));
        assert_eq!(map.remove(&key("linux_x64", "b1")), Some(fp("aa11")));
        assert_eq!(map.remove(&key("linux_x64", "b1")), None);
    }
}
