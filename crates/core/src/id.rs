//! Identifiers for WaniKani records.
//!
//! WaniKani hands out plain integer ids; the newtypes keep an assignment id
//! from being passed where a subject id is expected.

use serde::{Deserialize, Serialize};

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Raw integer value
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }
    };
}

integer_id!(
    /// Unique identifier for an Assignment
    AssignmentId
);

integer_id!(
    /// Unique identifier for a Subject (radical, kanji or vocabulary)
    SubjectId
);

integer_id!(
    /// Unique identifier for a LevelProgress record
    LevelProgressId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_transparent_in_json() {
        let id = AssignmentId(80463006);
        assert_eq!(serde_json::to_string(&id).unwrap(), "80463006");

        let back: AssignmentId = serde_json::from_str("80463006").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_parse_and_display() {
        let id: SubjectId = "440".parse().unwrap();
        assert_eq!(id.get(), 440);
        assert_eq!(id.to_string(), "440");
        assert!("x440".parse::<SubjectId>().is_err());
    }
}
