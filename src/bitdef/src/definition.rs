//! Field definitions parsed from bitfield declarations.
//!
//! A [`Definition`] is the ordered list of fields a declaration names. Order
//! is significant: field `i` occupies bit group `i` counted from the
//! least-significant end, so nothing here ever reorders fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("field name is empty")]
    EmptyName,

    #[error("field '{0}' has zero width")]
    ZeroWidth(String),
}

/// A named, fixed-width bit field
///
/// Stored on disk as the pair `["name", width]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(String, u32)", into = "(String, u32)")]
pub struct FieldDefinition {
    name: String,
    width: u32,
}

impl FieldDefinition {
    /// Create a field, rejecting empty names and zero widths
    pub fn new(name: impl Into<String>, width: u32) -> Result<Self, FieldError> {
        let name = name.into();
        if name.is_empty() {
            return Err(FieldError::EmptyName);
        }
        if width == 0 {
            return Err(FieldError::ZeroWidth(name));
        }
        Ok(Self { name, width })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in bits (always at least 1)
    pub fn width(&self) -> u32 {
        self.width
    }
}

impl TryFrom<(String, u32)> for FieldDefinition {
    type Error = FieldError;

    fn try_from((name, width): (String, u32)) -> Result<Self, Self::Error> {
        Self::new(name, width)
    }
}

impl From<FieldDefinition> for (String, u32) {
    fn from(field: FieldDefinition) -> Self {
        (field.name, field.width)
    }
}

/// Ordered sequence of fields, first field in the lowest bits
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Definition {
    fields: Vec<FieldDefinition>,
}

impl Definition {
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDefinition> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total number of bits covered by all fields
    pub fn total_width(&self) -> u64 {
        self.fields.iter().map(|f| u64::from(f.width)).sum()
    }

    pub fn push(&mut self, field: FieldDefinition) {
        self.fields.push(field);
    }
}

impl From<Vec<FieldDefinition>> for Definition {
    fn from(fields: Vec<FieldDefinition>) -> Self {
        Self::new(fields)
    }
}

impl FromIterator<FieldDefinition> for Definition {
    fn from_iter<I: IntoIterator<Item = FieldDefinition>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Definition {
    type Item = &'a FieldDefinition;
    type IntoIter = std::slice::Iter<'a, FieldDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl IntoIterator for Definition {
    type Item = FieldDefinition;
    type IntoIter = std::vec::IntoIter<FieldDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl AsRef<[FieldDefinition]> for Definition {
    fn as_ref(&self) -> &[FieldDefinition] {
        &self.fields
    }
}
