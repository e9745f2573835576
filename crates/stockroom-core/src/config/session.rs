//! Session persistence configuration.

use serde::{Deserialize, Serialize};

/// Session persistence configuration.
///
/// The current session is stored as a JSON document on disk so it can be
/// restored on startup and cleared on logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Path of the file holding the persisted session.
    #[serde(default = "default_state_file")]
    pub state_file: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
        }
    }
}

fn default_state_file() -> String {
    "data/session.json".to_string()
}
