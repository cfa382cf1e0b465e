//! SQLite schema for the key-value content store.

/// One row per key; each value is a JSON-encoded entry array and writes
/// replace the whole blob.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// User-added vocabulary words.
pub const CUSTOM_WORDS_KEY: &str = "custom_words";

/// User-added sentences.
pub const CUSTOM_SENTENCES_KEY: &str = "custom_sentences";
