//! Index schema types.

use serde::{Deserialize, Serialize};

/// How the backend stores and queries a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Tokenized, analyzed full text.
    Text,
    /// Exact-match, non-tokenized value.
    Keyword,
    /// 64-bit integer.
    Long,
}

impl FieldKind {
    /// The mapping type name understood by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Keyword => "keyword",
            FieldKind::Long => "long",
        }
    }
}

/// Mapping from field name to field kind for one index.
///
/// Fields keep their declaration order so the mapping sent to the backend
/// reads the same way it was written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSchema {
    fields: Vec<(String, FieldKind)>,
}

impl IndexSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field. Declaring the same name again replaces its kind.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = kind,
            None => self.fields.push((name, kind)),
        }
        self
    }

    /// Declare a tokenized text field.
    pub fn text(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Text)
    }

    /// Declare an exact-match keyword field.
    pub fn keyword(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Keyword)
    }

    /// Declare an integer field.
    pub fn long(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Long)
    }

    /// Look up the kind of a declared field.
    pub fn kind_of(&self, name: &str) -> Option<FieldKind> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, kind)| *kind)
    }

    /// Iterate over the declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldKind)> {
        self.fields.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check that the schema declares at least one field and no blank names.
    pub fn validate(&self) -> Result<(), String> {
        if self.fields.is_empty() {
            return Err("schema declares no fields".to_string());
        }
        if self.fields.iter().any(|(name, _)| name.trim().is_empty()) {
            return Err("schema contains an empty field name".to_string());
        }
        Ok(())
    }
}
