//! Structure keys: the `(platform, build id)` identity of a recorded layout.
//!
//! A key's canonical text form is `platform + "." + buildId`. That form is
//! both a key-index line prefix and a file-name component, so construction
//! rejects characters that would corrupt either: the platform must be
//! dot-free (parsing splits at the *first* dot, so a dotted platform would
//! silently mis-parse), and neither component may contain whitespace or path
//! separators. Build ids may contain dots.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Characters that are forbidden in both key components.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', '/', '\\', '\0'];

/// The `(platform, build id)` key under which one structure blob is stored.
///
/// Immutable once constructed; equality, ordering, and hashing are
/// structural over both components.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StructureKey {
    platform: String,
    build_id: String,
}

impl StructureKey {
    /// Construct a key, validating both components.
    pub fn new(platform: impl Into<String>, build_id: impl Into<String>) -> Result<Self, TypeError> {
        let platform = platform.into();
        let build_id = build_id.into();

        validate_component("platform", &platform)?;
        validate_component("build id", &build_id)?;

        // A dot in the platform would make the canonical form ambiguous.
        if platform.contains('.') {
            return Err(TypeError::InvalidKey {
                component: "platform",
                value: platform,
                reason: "must not contain '.'".into(),
            });
        }

        Ok(Self { platform, build_id })
    }

    /// Parse the canonical `platform.buildId` form, splitting at the first dot.
    pub fn parse(text: &str) -> Result<Self, TypeError> {
        let (platform, build_id) = text
            .split_once('.')
            .ok_or_else(|| TypeError::MalformedKey(text.to_string()))?;
        Self::new(platform, build_id)
    }

    /// The platform component.
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// The build identifier component.
    pub fn build_id(&self) -> &str {
        &self.build_id
    }

    /// The canonical `platform.buildId` text form.
    pub fn canonical(&self) -> String {
        format!("{}.{}", self.platform, self.build_id)
    }
}

impl fmt::Display for StructureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.platform, self.build_id)
    }
}

fn validate_component(component: &'static str, value: &str) -> Result<(), TypeError> {
    if value.is_empty() {
        return Err(TypeError::InvalidKey {
            component,
            value: value.to_string(),
            reason: "must not be empty".into(),
        });
    }
    for ch in FORBIDDEN_CHARS {
        if value.contains(*ch) {
            return Err(TypeError::InvalidKey {
                component,
                value: value.to_string(),
                reason: format!("contains forbidden character: {ch:?}"),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form_round_trips() {
        let key = StructureKey::new("linux_x64", "b100").unwrap();
        assert_eq!(key.canonical(), "linux_x64.b100");
        assert_eq!(StructureKey::parse("linux_x64.b100").unwrap(), key);
    }

    #[test]
    fn parse_splits_at_first_dot() {
        // Dotted build ids survive the round trip.
        let key = StructureKey::parse("zos_390.29.1.0").unwrap();
        assert_eq!(key.platform(), "zos_390");
        assert_eq!(key.build_id(), "29.1.0");
        assert_eq!(StructureKey::parse(&key.canonical()).unwrap(), key);
    }

    #[test]
    fn dotted_platform_is_rejected() {
        let err = StructureKey::new("linux.x64", "b100").unwrap_err();
        assert!(matches!(err, TypeError::InvalidKey { component: "platform", .. }));
    }

    #[test]
    fn whitespace_is_rejected() {
        assert!(StructureKey::new("linux x64", "b100").is_err());
        assert!(StructureKey::new("linux_x64", "b 100").is_err());
        assert!(StructureKey::new("linux_x64", "b100\n").is_err());
    }

    #[test]
    fn empty_components_are_rejected() {
        assert!(StructureKey::new("", "b100").is_err());
        assert!(StructureKey::new("linux_x64", "").is_err());
        assert!(StructureKey::parse("nodothere").is_err());
    }

    #[test]
    fn ordering_is_structural() {
        let a = StructureKey::new("aix_ppc", "b2").unwrap();
        let b = StructureKey::new("linux_x64", "b1").unwrap();
        assert!(a < b);
    }
}
