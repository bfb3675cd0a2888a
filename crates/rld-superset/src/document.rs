//! The superset document and the field-merge rules.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::Path;

use rld_types::{FieldDescriptor, StructureDescriptor, STRUCTURE_SENTINEL};

use crate::error::{SupersetError, SupersetResult};
use crate::traits::TypeSimplifier;

/// Default file name of the persisted document.
pub const DEFAULT_SUPERSET_FILE_NAME: &str = "superset.dat";

/// Fields whose declared name starts with this prefix carry no semantic
/// information and never enter the superset.
pub const PADDING_FIELD_PREFIX: &str = "padding";

/// The accumulated union of every structure, field, and constant observed
/// across ingested builds.
///
/// Sections are keyed by the structure header line; each section is a set
/// of content lines. Both levels are B-tree ordered, so serialization is
/// lexicographic and folding the same descriptors in produces the same
/// bytes every time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SupersetDocument {
    sections: BTreeMap<String, BTreeSet<String>>,
}

impl SupersetDocument {
    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the document at `path`. A missing file is an empty document.
    pub fn load(path: &Path) -> SupersetResult<Self> {
        match fs::read(path) {
            Ok(bytes) => Self::from_bytes(&bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse a persisted document: header lines open sections, every other
    /// non-blank line belongs to the most recent section.
    pub fn from_bytes(bytes: &[u8]) -> SupersetResult<Self> {
        let text = std::str::from_utf8(bytes).map_err(|_| SupersetError::Corrupt {
            line: 0,
            reason: "document is not UTF-8".into(),
        })?;

        let mut sections: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut current: Option<String> = None;

        for (number, line) in text.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            if line.starts_with(STRUCTURE_SENTINEL) {
                sections.entry(line.to_string()).or_default();
                current = Some(line.to_string());
            } else {
                let Some(header) = &current else {
                    return Err(SupersetError::Corrupt {
                        line: number + 1,
                        reason: "content line before any structure header".into(),
                    });
                };
                if let Some(lines) = sections.get_mut(header.as_str()) {
                    lines.insert(line.to_string());
                }
            }
        }

        Ok(Self { sections })
    }

    /// Serialize: headers in lexicographic order, content lines beneath
    /// each header in lexicographic order, one per line.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = String::new();
        for (header, lines) in &self.sections {
            out.push_str(header);
            out.push('\n');
            for line in lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        out.into_bytes()
    }

    /// Rewrite the document at `path` in full.
    pub fn save(&self, path: &Path) -> SupersetResult<()> {
        fs::write(path, self.to_bytes())?;
        Ok(())
    }

    /// Fold one structure descriptor into the document.
    ///
    /// Padding fields are skipped outright; every other field is merged
    /// under the rules of [`merge_field`]; constant lines are plain set
    /// insertions, so duplicates collapse.
    pub fn fold(&mut self, descriptor: &StructureDescriptor, simplifier: &dyn TypeSimplifier) {
        let lines = self.sections.entry(descriptor.header.clone()).or_default();

        for field in &descriptor.fields {
            if field.declared_name.starts_with(PADDING_FIELD_PREFIX) {
                continue;
            }
            merge_field(lines, field, simplifier);
        }

        for constant in &descriptor.constants {
            lines.insert(constant.content_line());
        }
    }

    /// Number of structure sections.
    pub fn structure_count(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Content lines of one section, if present.
    pub fn section(&self, header: &str) -> Option<&BTreeSet<String>> {
        self.sections.get(header)
    }

    /// Section headers in lexicographic order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

/// Merge one field into a section's content lines.
///
/// A field line matches on its name portion. When a line for the name
/// already exists, the field's `(type, declared type)` pair, compared in
/// canonical form, is either already recorded (no-op) or appended by
/// replacing the line with a longer one. The scan never mutates the set it
/// walks; the single remove+insert happens after the scan.
fn merge_field(lines: &mut BTreeSet<String>, field: &FieldDescriptor, simplifier: &dyn TypeSimplifier) {
    let canonical_type = simplifier.simplify(&field.field_type);
    let canonical_declared = simplifier.simplify(&field.declared_type);

    let matched = lines
        .iter()
        .find(|line| field_name_of(line) == Some(field.name.as_str()))
        .cloned();

    let Some(existing) = matched else {
        lines.insert(field.content_line());
        return;
    };

    let already_recorded = type_pairs(&existing).into_iter().any(|(ty, declared)| {
        simplifier.simplify(ty) == canonical_type
            && simplifier.simplify(declared) == canonical_declared
    });
    if already_recorded {
        return;
    }

    // The raw pair is appended; equivalence was judged on the canonical
    // forms, so re-folding the same build later still finds it recorded.
    let mut merged = existing.clone();
    merged.push('|');
    merged.push_str(&field.field_type);
    merged.push('|');
    merged.push_str(&field.declared_type);

    lines.remove(&existing);
    lines.insert(merged);
}

/// The name portion of a field content line, if it is one.
fn field_name_of(line: &str) -> Option<&str> {
    let mut segments = line.split('|');
    match segments.next() {
        Some("F") => segments.next(),
        _ => None,
    }
}

/// The `(type, declared type)` pairs recorded on a field line.
fn type_pairs(line: &str) -> Vec<(&str, &str)> {
    let segments: Vec<&str> = line.split('|').collect();
    let mut pairs = Vec::new();
    let mut i = 2;
    while i + 1 < segments.len() {
        pairs.push((segments[i], segments[i + 1]));
        i += 2;
    }
    pairs
}
