//! Shared identifiers and value types for LexVault.
//!
//! Everything here is plain data: ids are UUID newtypes, `Category` is the
//! closed set of document classes a case can carry, and `UploadedFile` is
//! the raw upload as handed over by the request boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifies a legal case. Assigned by the case-management layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(pub Uuid);

impl CaseId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CaseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifies one stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifies a case's document aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregateId(pub Uuid);

impl AggregateId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AggregateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AggregateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The document classes a case can carry.
///
/// One entity type tagged with a category replaces the per-class document
/// tables of earlier designs; the encryption and retrieval paths are
/// identical across categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    PowerOfAttorney,
    InitialPetition,
    Supplementary,
    Contract,
}

impl Category {
    /// All categories, in canonical order.
    pub const ALL: [Category; 4] = [
        Category::PowerOfAttorney,
        Category::InitialPetition,
        Category::Supplementary,
        Category::Contract,
    ];

    /// Stable string form, used in indexing display names and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::PowerOfAttorney => "power_of_attorney",
            Category::InitialPetition => "initial_petition",
            Category::Supplementary => "supplementary",
            Category::Contract => "contract",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a category string is not recognized.
#[derive(Debug, thiserror::Error)]
#[error("unknown document category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "power_of_attorney" => Ok(Category::PowerOfAttorney),
            "initial_petition" => Ok(Category::InitialPetition),
            "supplementary" => Ok(Category::Supplementary),
            "contract" => Ok(Category::Contract),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// A raw upload as received from the upload boundary.
///
/// `bytes` is the plaintext file body; it exists in memory only for the
/// duration of ingestion and is never persisted.
#[derive(Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

// Deliberately omits the file body so plaintext never reaches logs.
impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("filename", &self.filename)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_string_roundtrip() {
        for cat in Category::ALL {
            assert_eq!(cat.as_str().parse::<Category>().unwrap(), cat);
        }
    }

    #[test]
    fn unknown_category_rejected() {
        assert!("appeal".parse::<Category>().is_err());
    }

    #[test]
    fn uploaded_file_debug_hides_content() {
        let file = UploadedFile::new("secret.pdf", "application/pdf", vec![1, 2, 3]);
        let rendered = format!("{file:?}");
        assert!(!rendered.contains("[1, 2, 3]"));
        assert!(rendered.contains("secret.pdf"));
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = DocumentId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: DocumentId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
