//! Store configuration.

use std::path::PathBuf;

use rld_superset::DEFAULT_SUPERSET_FILE_NAME;

/// Configuration for a [`StructureStore`].
///
/// [`StructureStore`]: crate::store::StructureStore
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Directory holding the key index, the containers, and the superset
    /// document. Created on first use.
    pub directory: PathBuf,
    /// File name of the superset document within `directory`.
    pub superset_file: String,
}

impl StoreConfig {
    /// Configuration with the default superset file name.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            superset_file: DEFAULT_SUPERSET_FILE_NAME.to_string(),
        }
    }

    /// Use a caller-supplied superset file name.
    pub fn with_superset_file(mut self, name: impl Into<String>) -> Self {
        self.superset_file = name.into();
        self
    }
}
