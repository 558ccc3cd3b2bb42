//! Record identifiers as used by the backing service.
//!
//! Every editable entity has a stable identifier of the form
//! `OL<digits><kind letter>`, and appears in JSON documents under a key of
//! the form `/<collection>/<identifier>` (e.g. `/books/OL25943366M`).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("invalid record identifier: {0}")]
    InvalidIdentifier(String),
}

pub type Result<T> = std::result::Result<T, RecordError>;

/// The kind of an editable record, encoded in the identifier suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Author,
    Edition,
    Work,
}

impl RecordKind {
    /// Derives the kind from an identifier like `OL25943366M`.
    pub fn from_id(id: &str) -> Result<Self> {
        let invalid = || RecordError::InvalidIdentifier(id.to_string());

        let rest = id.strip_prefix("OL").ok_or_else(invalid)?;
        let suffix = rest.chars().last().ok_or_else(invalid)?;
        let digits = &rest[..rest.len() - suffix.len_utf8()];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        match suffix {
            'A' => Ok(Self::Author),
            'M' => Ok(Self::Edition),
            'W' => Ok(Self::Work),
            _ => Err(invalid()),
        }
    }

    /// The URL path segment under which records of this kind live.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Author => "authors",
            Self::Edition => "books",
            Self::Work => "works",
        }
    }

    /// The full JSON key for an identifier, e.g. `/books/OL25943366M`.
    pub fn full_key(id: &str) -> Result<String> {
        let kind = Self::from_id(id)?;
        Ok(format!("/{}/{}", kind.path_segment(), id))
    }
}

/// Extracts the bare identifier from a service key.
///
/// Keys look like `/books/OL25943366M`; the identifier is the final path
/// segment. Returns `None` for keys with an empty final segment.
pub fn id_from_key(key: &str) -> Option<&str> {
    let id = key.rsplit('/').next().unwrap_or(key);
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_id() {
        assert_eq!(RecordKind::from_id("OL39307A"), Ok(RecordKind::Author));
        assert_eq!(RecordKind::from_id("OL25943366M"), Ok(RecordKind::Edition));
        assert_eq!(RecordKind::from_id("OL2514725W"), Ok(RecordKind::Work));
    }

    #[test]
    fn test_kind_from_id_rejects_bad_input() {
        for bad in ["", "OL", "OLM", "OL123", "OL123X", "XX123M", "OL12a3M"] {
            assert!(RecordKind::from_id(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_path_segments() {
        assert_eq!(RecordKind::Author.path_segment(), "authors");
        assert_eq!(RecordKind::Edition.path_segment(), "books");
        assert_eq!(RecordKind::Work.path_segment(), "works");
    }

    #[test]
    fn test_full_key() {
        assert_eq!(
            RecordKind::full_key("OL25943366M").as_deref(),
            Ok("/books/OL25943366M")
        );
        assert_eq!(
            RecordKind::full_key("OL39307A").as_deref(),
            Ok("/authors/OL39307A")
        );
        assert!(RecordKind::full_key("garbage").is_err());
    }

    #[test]
    fn test_id_from_key() {
        assert_eq!(id_from_key("/books/OL25943366M"), Some("OL25943366M"));
        assert_eq!(id_from_key("/works/OL2514725W"), Some("OL2514725W"));
        // A bare identifier passes through unchanged.
        assert_eq!(id_from_key("OL39307A"), Some("OL39307A"));
        assert_eq!(id_from_key("/books/"), None);
    }
}
