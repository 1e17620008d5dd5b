use anyhow::{Context, Result};
use rusqlite::{params, Connection};
#[cfg(test)]
use std::collections::HashMap;
use std::path::Path;

use crate::logger;
use crate::note::Note;

pub const NOTES_KEY: &str = "notes";
pub const DARK_MODE_KEY: &str = "darkMode";

/// A persistent string-to-string map.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create data directory")?;
        }
        let conn = Connection::open(path).context("Failed to open database")?;
        Self::with_connection(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let store = Self { conn };
        store.create_tables().context("Failed to create tables")?;
        Ok(store)
    }

    fn create_tables(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT
            );",
            [],
        )?;
        Ok(())
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let res: Result<String, rusqlite::Error> = self.conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );

        match res {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.conn.execute("DELETE FROM kv_store", [])?;
        Ok(())
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

/// Typed access to the two persisted keys.
///
/// Reads never fail: absent or malformed data is treated as a first run.
pub struct Storage {
    backend: Box<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    #[cfg(test)]
    pub fn memory() -> Self {
        Self::new(Box::new(MemoryStore::default()))
    }

    pub fn load_notes(&self) -> Vec<Note> {
        match self.backend.get(NOTES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Note>>(&raw) {
                Ok(notes) => notes,
                Err(e) => {
                    logger::warn(&format!("load_notes: malformed collection ignored: {}", e));
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                logger::warn(&format!("load_notes: read failed: {}", e));
                Vec::new()
            }
        }
    }

    pub fn save_notes(&mut self, notes: &[Note]) -> Result<()> {
        let json = serde_json::to_string(notes)?;
        self.backend
            .set(NOTES_KEY, &json)
            .context("Failed to persist notes")
    }

    pub fn load_dark_mode(&self) -> bool {
        match self.backend.get(DARK_MODE_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<bool>(&raw).unwrap_or_else(|e| {
                logger::warn(&format!("load_dark_mode: malformed preference ignored: {}", e));
                false
            }),
            _ => false,
        }
    }

    pub fn save_dark_mode(&mut self, enabled: bool) -> Result<()> {
        let json = serde_json::to_string(&enabled)?;
        self.backend
            .set(DARK_MODE_KEY, &json)
            .context("Failed to persist dark mode preference")
    }

    pub fn clear(&mut self) -> Result<()> {
        self.backend.clear()
    }

    #[cfg(test)]
    pub fn backend_mut(&mut self) -> &mut dyn KeyValueStore {
        self.backend.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Note> {
        let mut pink = Note::new("b".to_string(), "", "second");
        pink.color = "#f28b82".to_string();
        vec![Note::new("a".to_string(), "First", "one"), pink]
    }

    #[test]
    fn test_sqlite_kv_roundtrip() {
        let mut store = SqliteStore::in_memory().unwrap();
        assert_eq!(store.get("missing").unwrap(), None);
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v2".to_string()));
        store.clear().unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_notes_roundtrip_through_sqlite() {
        let mut storage = Storage::new(Box::new(SqliteStore::in_memory().unwrap()));
        storage.save_notes(&sample()).unwrap();
        assert_eq!(storage.load_notes(), sample());
    }

    #[test]
    fn test_absent_data_is_first_run() {
        let storage = Storage::memory();
        assert!(storage.load_notes().is_empty());
        assert!(!storage.load_dark_mode());
    }

    #[test]
    fn test_malformed_data_falls_back() {
        let mut storage = Storage::memory();
        storage.backend_mut().set(NOTES_KEY, "{not json").unwrap();
        storage.backend_mut().set(DARK_MODE_KEY, "\"yes\"").unwrap();
        assert!(storage.load_notes().is_empty());
        assert!(!storage.load_dark_mode());
    }

    #[test]
    fn test_dark_mode_roundtrip() {
        let mut storage = Storage::memory();
        storage.save_dark_mode(true).unwrap();
        assert!(storage.load_dark_mode());
        assert_eq!(
            storage.backend_mut().get(DARK_MODE_KEY).unwrap(),
            Some("true".to_string())
        );
    }
}
