//! Subject types - the three kinds of learning items.

use serde::{Deserialize, Serialize};

/// Kind of item an assignment refers to.
///
/// Radicals compose kanji, kanji compose vocabulary. Any type WaniKani adds
/// later (e.g. `kana_vocabulary`) deserializes to [`SubjectType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectType {
    /// Radical
    Radical,
    /// Kanji
    Kanji,
    /// Vocabulary
    Vocabulary,
    /// Anything else the API reports
    #[serde(other)]
    Unknown,
}

impl SubjectType {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectType::Radical => "radical",
            SubjectType::Kanji => "kanji",
            SubjectType::Vocabulary => "vocabulary",
            SubjectType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SubjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
