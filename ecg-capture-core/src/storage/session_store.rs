use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use crate::models::batch::SampleBatch;
use crate::models::error::{CodecError, StoreError};
use crate::traits::codec::BatchCodec;

/// Store-assigned identifier of one persisted session.
pub type SessionId = i64;

/// Append-only encrypted session log over an embedded SQLite file.
///
/// One record per completed batch:
/// ```sql
/// CREATE TABLE sessions (
///     id        INTEGER PRIMARY KEY AUTOINCREMENT,
///     timestamp DATETIME DEFAULT CURRENT_TIMESTAMP,
///     data      TEXT NOT NULL   -- base64(nonce || ciphertext || tag)
/// )
/// ```
///
/// Records are never mutated — only appended and read. The store owns the
/// database file exclusively and is constructed once at startup with its
/// codec (key) and path injected; operations never reopen the connection.
pub struct SessionStore {
    conn: Connection,
    codec: Box<dyn BatchCodec>,
}

impl SessionStore {
    /// Opens (creating if absent) the store at `path` and ensures the
    /// schema exists.
    pub fn open<P: AsRef<Path>>(path: P, codec: Box<dyn BatchCodec>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        let store = Self { conn, codec };
        store.init()?;
        log::debug!(
            "session store open ({}, key {})",
            store.codec.algorithm(),
            store.codec.key_id()
        );
        Ok(store)
    }

    /// Idempotently creates the schema. Safe to call on every startup.
    pub fn init(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS sessions (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp DATETIME DEFAULT CURRENT_TIMESTAMP,
                data      TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Encrypts and appends one batch, returning the store-assigned id.
    ///
    /// Exactly one record per call; the insert runs in an immediate
    /// transaction so concurrent writers serialize and partial records are
    /// never visible. Takes the batch by value: a completed batch is
    /// immutable and the store is its final owner. Empty batches and
    /// non-finite samples are rejected before anything touches the
    /// database.
    pub fn write(&mut self, batch: SampleBatch) -> Result<SessionId, StoreError> {
        if batch.is_empty() {
            return Err(StoreError::EmptyBatch);
        }
        // JSON has no encoding for NaN or infinity; serde_json would
        // write `null` and every later read of the record would fail.
        if !batch.is_finite() {
            return Err(StoreError::NonFiniteSample);
        }

        let plaintext = serde_json::to_vec(&batch)?;
        let sealed = self.codec.encrypt(&plaintext)?;
        let encoded = BASE64.encode(sealed);

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute("INSERT INTO sessions (data) VALUES (?1)", params![encoded])?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        log::debug!("stored session {} ({} samples)", id, batch.len());
        Ok(id)
    }

    /// Returns the most recent batch, or `None` for an empty store.
    ///
    /// "Most recent" means the maximum store-assigned timestamp, with the
    /// larger id winning a timestamp tie. A record that fails decoding or
    /// authentication surfaces as an error — never as a silent `None`,
    /// which would mask tampering.
    pub fn latest(&self) -> Result<Option<SampleBatch>, StoreError> {
        let row: Option<String> = self
            .conn
            .query_row(
                "SELECT data FROM sessions ORDER BY timestamp DESC, id DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        let Some(encoded) = row else {
            return Ok(None);
        };

        let sealed = BASE64.decode(encoded.as_bytes()).map_err(|e| {
            CodecError::MalformedInput(format!("stored ciphertext is not base64: {}", e))
        })?;
        let plaintext = self.codec.decrypt(&sealed)?;
        let batch: SampleBatch = serde_json::from_slice(&plaintext)?;
        Ok(Some(batch))
    }

    /// Number of stored sessions.
    pub fn session_count(&self) -> Result<u64, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
