//! User profile.

use serde::{Deserialize, Serialize};
use crate::Time;

/// The subset of the WaniKani user profile the dashboard needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Display name
    pub username: String,

    /// Current level
    pub level: u32,

    /// Highest level the subscription allows
    #[serde(default)]
    pub max_level_granted: Option<u32>,

    /// When the user signed up
    #[serde(default)]
    pub started_at: Option<Time>,

    /// Public profile page
    #[serde(default)]
    pub profile_url: Option<String>,
}

impl User {
    /// Create a user at the given level.
    pub fn new(username: impl Into<String>, level: u32) -> Self {
        Self {
            username: username.into(),
            level,
            max_level_granted: None,
            started_at: None,
            profile_url: None,
        }
    }
}
