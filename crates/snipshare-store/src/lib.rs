//! Snippet model and persistence for snipshare.
//!
//! A snippet is a stored text record with a title, free-form content, a
//! creation time, and an expiration time. Rows are written once and never
//! updated; every read path filters out snippets whose expiration has
//! passed, so an expired snippet is indistinguishable from one that never
//! existed. Nothing deletes expired rows.
//!
//! All timestamp arithmetic happens inside SQLite (`datetime('now', ...)`),
//! which keeps `created` and `expires` on the same clock and makes the
//! expiry comparison a plain text comparison on ISO 8601 values.

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of snippets returned by [`latest_snippets`].
pub const LATEST_LIMIT: u32 = 10;

/// Errors that can occur during snippet operations.
#[derive(Debug, Error)]
pub enum SnippetError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("snippet not found: {0}")]
    NotFound(i64),
}

/// A stored snippet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snippet {
    /// Database ID, assigned on insert and never reused.
    pub id: i64,
    /// Short display title.
    pub title: String,
    /// Free-form text; may contain embedded line breaks.
    pub content: String,
    /// Creation timestamp (ISO 8601).
    pub created: String,
    /// Expiration timestamp (ISO 8601). Always `>= created`.
    pub expires: String,
}

/// Inserts a new snippet expiring `expires_days` from now.
///
/// Returns the newly assigned ID. The store performs no validation of
/// `title` or `content`; callers supply already-vetted values.
pub fn insert_snippet(
    conn: &Connection,
    title: &str,
    content: &str,
    expires_days: u32,
) -> Result<i64, SnippetError> {
    // `expires_days` is numeric, so formatting it into the datetime
    // modifier cannot inject SQL. Both datetime('now') calls inside one
    // statement observe the same clock reading.
    let sql = format!(
        "INSERT INTO snippets (title, content, created, expires)
         VALUES (?1, ?2, datetime('now'), datetime('now', '+{} days'))",
        expires_days
    );

    conn.execute(&sql, params![title, content])?;
    Ok(conn.last_insert_rowid())
}

/// Retrieves a snippet by ID, if it has not expired.
///
/// An existing-but-expired row reports [`SnippetError::NotFound`], the same
/// as an ID that was never assigned.
pub fn get_snippet(conn: &Connection, id: i64) -> Result<Snippet, SnippetError> {
    conn.query_row(
        "SELECT id, title, content, created, expires
         FROM snippets
         WHERE id = ?1 AND expires > datetime('now')",
        [id],
        map_row_to_snippet,
    )
    .optional()?
    .ok_or(SnippetError::NotFound(id))
}

/// Lists the most recently created, non-expired snippets, newest first.
///
/// Capped at [`LATEST_LIMIT`]. The ID tiebreak keeps ordering deterministic
/// for snippets created within the same clock second.
pub fn latest_snippets(conn: &Connection) -> Result<Vec<Snippet>, SnippetError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, title, content, created, expires
         FROM snippets
         WHERE expires > datetime('now')
         ORDER BY created DESC, id DESC
         LIMIT {}",
        LATEST_LIMIT
    ))?;

    let rows = stmt.query_map([], map_row_to_snippet)?;
    let mut snippets = Vec::new();
    for row in rows {
        snippets.push(row?);
    }
    Ok(snippets)
}

fn map_row_to_snippet(row: &Row) -> rusqlite::Result<Snippet> {
    Ok(Snippet {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created: row.get(3)?,
        expires: row.get(4)?,
    })
}
