//! Persisted credential cache.
//!
//! The token and serialized identity live in a single-row SQLite table in
//! the platform data directory, read once at startup to restore the session
//! without a network call. The restored token is trusted until the first
//! authenticated call rejects it.

use std::path::Path;

use directories::ProjectDirs;
use rusqlite::{params, Connection};

use waveline_shared::User;

use crate::error::StoreError;

/// Token + identity pair restored at startup.
#[derive(Debug, Clone)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
}

/// Single-row credential table wrapped around a [`rusqlite::Connection`].
pub struct CredentialStore {
    conn: Connection,
}

impl CredentialStore {
    /// Open (or create) the default credential database.
    ///
    /// The database file is placed in the platform-appropriate data directory:
    /// - Linux:   `~/.local/share/waveline/waveline.db`
    /// - macOS:   `~/Library/Application Support/com.waveline.waveline/waveline.db`
    /// - Windows: `{FOLDERID_RoamingAppData}\waveline\waveline\data\waveline.db`
    pub fn open_default() -> Result<Self, StoreError> {
        let project_dirs =
            ProjectDirs::from("com", "waveline", "waveline").ok_or(StoreError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        let db_path = data_dir.join("waveline.db");

        tracing::info!(path = %db_path.display(), "opening credential store");

        Self::open_at(&db_path)
    }

    /// Open (or create) a credential database at an explicit path.
    ///
    /// This is useful for tests and for embedding the store inside custom
    /// directory layouts.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS credentials (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                token TEXT NOT NULL,
                user_json TEXT NOT NULL
            );",
        )?;

        Ok(Self { conn })
    }

    /// Persist the token and identity, replacing any previous session.
    pub fn save(&self, token: &str, user: &User) -> Result<(), StoreError> {
        let user_json = serde_json::to_string(user)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO credentials (id, token, user_json) VALUES (1, ?1, ?2)",
            params![token, user_json],
        )?;
        Ok(())
    }

    /// Load the stored session, if any.
    ///
    /// A row whose identity no longer deserializes is cleared and reported
    /// as absent rather than failing startup.
    pub fn load(&self) -> Result<Option<StoredSession>, StoreError> {
        let row: Result<(String, String), _> = self.conn.query_row(
            "SELECT token, user_json FROM credentials WHERE id = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        );

        let (token, user_json) = match row {
            Ok(pair) => pair,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<User>(&user_json) {
            Ok(user) => Ok(Some(StoredSession { token, user })),
            Err(e) => {
                tracing::warn!(error = %e, "corrupt stored identity, clearing");
                self.clear()?;
                Ok(None)
            }
        }
    }

    /// Remove any stored session.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.conn.execute("DELETE FROM credentials WHERE id = 1", [])?;
        Ok(())
    }
}
