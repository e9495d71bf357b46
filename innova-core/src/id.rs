use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

const ID_HEX_LEN: usize = 24;

/// Store-generated document identifier, carried as 24 lowercase hex characters
/// (the textual form of a MongoDB ObjectId).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.len() != ID_HEX_LEN || !raw.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CoreError::ValidationError(format!(
                "'{}' is not a valid document id",
                raw
            )));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for DocumentId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case() {
        let id = DocumentId::parse("65F1A2B3C4D5E6F708192A3B").unwrap();
        assert_eq!(id.as_str(), "65f1a2b3c4d5e6f708192a3b");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(DocumentId::parse("not-an-id").is_err());
        assert!(DocumentId::parse("65f1a2b3c4d5e6f708192a3").is_err());
        assert!(DocumentId::parse("65f1a2b3c4d5e6f708192a3z").is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Result<DocumentId, _> = serde_json::from_str("\"65f1a2b3c4d5e6f708192a3b\"");
        assert!(ok.is_ok());

        let bad: Result<DocumentId, _> = serde_json::from_str("\"12\"");
        assert!(bad.is_err());
    }
}
