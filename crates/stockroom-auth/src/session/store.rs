//! File-backed persistence of the current session.
//!
//! The session survives a restart the way the original browser client
//! kept it in local storage: a single JSON document. Restored on
//! startup, rewritten on login, removed on logout.

use std::fs;
use std::path::PathBuf;

use tracing::warn;

use stockroom_core::AppResult;
use stockroom_core::config::SessionConfig;
use stockroom_core::error::AppError;
use stockroom_entity::session::Session;

/// Persists the current session as a JSON file.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Path of the session state file.
    path: PathBuf,
}

impl SessionStore {
    /// Creates a new session store from configuration.
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            path: PathBuf::from(&config.state_file),
        }
    }

    /// Restores the persisted session, if any.
    ///
    /// A missing file means no session. A corrupt file is removed and
    /// treated as no session.
    pub fn restore(&self) -> AppResult<Option<Session>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::session(format!(
                    "Failed to read session state: {e}"
                )));
            }
        };

        match serde_json::from_str::<Session>(&contents) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Discarding corrupt session state");
                let _ = fs::remove_file(&self.path);
                Ok(None)
            }
        }
    }

    /// Persists the given session, replacing any previous one.
    pub fn persist(&self, session: &Session) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::session(format!("Failed to create session dir: {e}")))?;
        }

        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)
            .map_err(|e| AppError::session(format!("Failed to write session state: {e}")))
    }

    /// Clears the persisted session. A no-op when none exists.
    pub fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::session(format!(
                "Failed to clear session state: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use stockroom_entity::session::Role;

    fn store_at(name: &str) -> SessionStore {
        let mut path = std::env::temp_dir();
        path.push(format!("stockroom-session-{name}-{}.json", std::process::id()));
        let _ = fs::remove_file(&path);
        SessionStore {
            path,
        }
    }

    fn session() -> Session {
        Session {
            user_id: None,
            username: "admin".to_string(),
            fullname: "Administrator".to_string(),
            department: None,
            phone: None,
            email: None,
            role: Role::Admin,
            started_at: Utc::now(),
        }
    }

    #[test]
    fn test_restore_without_state_yields_none() {
        let store = store_at("missing");
        assert!(store.restore().unwrap().is_none());
    }

    #[test]
    fn test_persist_restore_clear_lifecycle() {
        let store = store_at("lifecycle");
        store.persist(&session()).unwrap();

        let restored = store.restore().unwrap().unwrap();
        assert_eq!(restored.username, "admin");
        assert!(restored.is_admin());

        store.clear().unwrap();
        assert!(store.restore().unwrap().is_none());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_state_is_discarded() {
        let store = store_at("corrupt");
        fs::write(&store.path, "{ not json").unwrap();
        assert!(store.restore().unwrap().is_none());
        assert!(!store.path.exists());
    }
}
