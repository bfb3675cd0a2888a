//! Parsed structure descriptors and their canonical content-line forms.
//!
//! An external parser turns a raw structure-definition blob into a sequence
//! of [`StructureDescriptor`]s. The superset document is built from the
//! canonical line forms defined here:
//!
//! ```text
//! S|<structure name>|<pointer name>|<super name>     header line
//! F|<field name>|<type>|<declared type>              field line
//! C|<constant name>                                  constant line
//! ```
//!
//! A field line that has been merged across builds carries additional
//! `|<type>|<declared type>` pair segments after the first pair.

use serde::{Deserialize, Serialize};

/// Sentinel prefix of a structure header line.
pub const STRUCTURE_SENTINEL: &str = "S|";

/// The parsed layout of one internal data structure: its canonical header,
/// fields in declaration order, and named constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureDescriptor {
    /// Canonical header line, beginning with [`STRUCTURE_SENTINEL`].
    pub header: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
    /// Named constants in declaration order.
    pub constants: Vec<ConstantDescriptor>,
}

impl StructureDescriptor {
    /// Create an empty descriptor for the given header line.
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            fields: Vec::new(),
            constants: Vec::new(),
        }
    }

    /// The structure name: the segment after the sentinel.
    pub fn name(&self) -> &str {
        self.header.split('|').nth(1).unwrap_or("")
    }
}

/// One field of a structure: its name, effective type, and declared type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Name as it appears in content lines.
    pub name: String,
    /// Name as declared in the source structure (drives padding detection).
    pub declared_name: String,
    /// Effective field type.
    pub field_type: String,
    /// Type as declared in the source structure.
    pub declared_type: String,
}

impl FieldDescriptor {
    pub fn new(
        name: impl Into<String>,
        declared_name: impl Into<String>,
        field_type: impl Into<String>,
        declared_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            declared_name: declared_name.into(),
            field_type: field_type.into(),
            declared_type: declared_type.into(),
        }
    }

    /// The canonical content line for this field.
    pub fn content_line(&self) -> String {
        format!("F|{}|{}|{}", self.name, self.field_type, self.declared_type)
    }
}

/// One named constant of a structure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantDescriptor {
    pub name: String,
}

impl ConstantDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The canonical content line for this constant.
    pub fn content_line(&self) -> String {
        format!("C|{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_name_is_second_segment() {
        let desc = StructureDescriptor::new("S|J9JavaVM|J9JavaVMPointer|");
        assert_eq!(desc.name(), "J9JavaVM");
    }

    #[test]
    fn field_content_line() {
        let field = FieldDescriptor::new("mainThread", "mainThread", "J9VMThread*", "struct J9VMThread*");
        assert_eq!(field.content_line(), "F|mainThread|J9VMThread*|struct J9VMThread*");
    }

    #[test]
    fn constant_content_line() {
        let constant = ConstantDescriptor::new("J9_JAVA_CLASS_MASK");
        assert_eq!(constant.content_line(), "C|J9_JAVA_CLASS_MASK");
    }

    #[test]
    fn name_of_bare_header_is_empty() {
        assert_eq!(StructureDescriptor::new("S|").name(), "");
        assert_eq!(StructureDescriptor::new("garbage").name(), "");
    }
}
