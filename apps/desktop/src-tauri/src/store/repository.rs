//! Repository pattern for the custom-entry store.

use chrono::Utc;
use match_core::content;
use match_core::types::{SentenceEntry, WordEntry};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

use crate::store::error::StoreError;
use crate::store::schema::{CUSTOM_SENTENCES_KEY, CUSTOM_WORDS_KEY, SCHEMA};

type Result<T> = std::result::Result<T, StoreError>;

/// Category given to user sentences added without one.
const DEFAULT_CATEGORY: &str = "กำหนดเอง";

/// Repository for user-added words and sentences.
pub trait ContentRepository {
    fn custom_words(&self) -> Result<Vec<WordEntry>>;
    fn save_custom_words(&self, words: &[WordEntry]) -> Result<()>;
    fn add_custom_word(&self, japanese: &str, reading: &str, thai: &str) -> Result<WordEntry>;
    fn remove_custom_word(&self, id: &str) -> Result<bool>;

    fn custom_sentences(&self) -> Result<Vec<SentenceEntry>>;
    fn save_custom_sentences(&self, sentences: &[SentenceEntry]) -> Result<()>;
    fn add_custom_sentence(
        &self,
        japanese: &str,
        reading: &str,
        thai: &str,
        category: &str,
    ) -> Result<SentenceEntry>;
    fn remove_custom_sentence(&self, id: &str) -> Result<bool>;
}

/// SQLite implementation of the content repository.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the store at path, creating it if necessary.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn read_key(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    fn write_key(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// A missing key is an empty list; a blob that no longer parses is
    /// surfaced as `Corrupt` instead of being silently discarded.
    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.read_key(key)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let json = serde_json::to_string(items)?;
        self.write_key(key, &json)
    }
}

/// Timestamp-derived id, bumped past collisions so two entries added in the
/// same millisecond still come out distinct.
fn next_custom_id(prefix: &str, taken: &HashSet<String>) -> String {
    let mut millis = Utc::now().timestamp_millis();
    loop {
        let id = format!("{prefix}-{millis}");
        if !taken.contains(&id) {
            return id;
        }
        millis += 1;
    }
}

impl ContentRepository for SqliteStore {
    fn custom_words(&self) -> Result<Vec<WordEntry>> {
        self.read_list(CUSTOM_WORDS_KEY)
    }

    fn save_custom_words(&self, words: &[WordEntry]) -> Result<()> {
        self.write_list(CUSTOM_WORDS_KEY, words)
    }

    fn add_custom_word(&self, japanese: &str, reading: &str, thai: &str) -> Result<WordEntry> {
        let japanese = japanese.trim();
        let reading = reading.trim();
        let thai = thai.trim();
        if japanese.is_empty() || thai.is_empty() {
            return Err(StoreError::EmptyField);
        }

        let mut words = self.custom_words()?;
        let taken: HashSet<String> = content::default_words()
            .into_iter()
            .map(|w| w.id)
            .chain(words.iter().map(|w| w.id.clone()))
            .collect();
        let entry = WordEntry {
            id: next_custom_id("cw", &taken),
            japanese: japanese.to_string(),
            reading: reading.to_string(),
            thai: thai.to_string(),
        };
        words.push(entry.clone());
        self.save_custom_words(&words)?;
        Ok(entry)
    }

    fn remove_custom_word(&self, id: &str) -> Result<bool> {
        let mut words = self.custom_words()?;
        let before = words.len();
        words.retain(|w| w.id != id);
        if words.len() == before {
            // Absent id is a no-op, not an error.
            return Ok(false);
        }
        self.save_custom_words(&words)?;
        Ok(true)
    }

    fn custom_sentences(&self) -> Result<Vec<SentenceEntry>> {
        self.read_list(CUSTOM_SENTENCES_KEY)
    }

    fn save_custom_sentences(&self, sentences: &[SentenceEntry]) -> Result<()> {
        self.write_list(CUSTOM_SENTENCES_KEY, sentences)
    }

    fn add_custom_sentence(
        &self,
        japanese: &str,
        reading: &str,
        thai: &str,
        category: &str,
    ) -> Result<SentenceEntry> {
        let japanese = japanese.trim();
        let reading = reading.trim();
        let thai = thai.trim();
        let category = category.trim();
        if japanese.is_empty() || thai.is_empty() {
            return Err(StoreError::EmptyField);
        }

        let mut sentences = self.custom_sentences()?;
        let taken: HashSet<String> = content::default_sentences()
            .into_iter()
            .map(|s| s.id)
            .chain(sentences.iter().map(|s| s.id.clone()))
            .collect();
        let entry = SentenceEntry {
            id: next_custom_id("cs", &taken),
            japanese: japanese.to_string(),
            reading: reading.to_string(),
            thai: thai.to_string(),
            category: if category.is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                category.to_string()
            },
        };
        sentences.push(entry.clone());
        self.save_custom_sentences(&sentences)?;
        Ok(entry)
    }

    fn remove_custom_sentence(&self, id: &str) -> Result<bool> {
        let mut sentences = self.custom_sentences()?;
        let before = sentences.len();
        sentences.retain(|s| s.id != id);
        if sentences.len() == before {
            return Ok(false);
        }
        self.save_custom_sentences(&sentences)?;
        Ok(true)
    }
}
