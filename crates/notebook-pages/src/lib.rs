//! Page storage for the notebook service.
//!
//! A page is a short note with an immutable id, a title and free-form
//! content. All operations here take a borrowed [`Connection`] and execute a
//! single statement, so each one is atomic on its own. Callers decide where
//! the connection comes from (normally a pooled connection checked out for
//! the duration of one request).

mod seed;

pub use seed::{seed_example_pages, EXAMPLE_PAGES};

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during page operations.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("invalid page: {0}")]
    Invalid(String),
}

/// A stored page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page {
    /// Unique public ID (UUID v4), assigned at creation.
    pub id: String,
    /// Display title. Never empty.
    pub title: String,
    /// Page body. May be empty.
    pub content: String,
}

/// Title and content supplied when creating or updating a page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageInput {
    pub title: String,
    pub content: String,
}

impl PageInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Checks the input before it reaches storage.
    ///
    /// The title must not be empty. Empty content is allowed.
    pub fn validate(&self) -> Result<(), PageError> {
        if self.title.is_empty() {
            return Err(PageError::Invalid("title must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Lists all pages ordered by title, ignoring ASCII case.
///
/// Pages with equal titles come back in whatever order SQLite yields them.
pub fn list_pages(conn: &Connection) -> Result<Vec<Page>, PageError> {
    let mut stmt =
        conn.prepare("SELECT id, title, content FROM pages ORDER BY title COLLATE NOCASE")?;

    let rows = stmt.query_map([], map_row_to_page)?;
    let mut pages = Vec::new();
    for row in rows {
        pages.push(row?);
    }
    Ok(pages)
}

/// Retrieves a page by ID. Returns `None` if no page has that ID.
pub fn get_page(conn: &Connection, page_id: &str) -> Result<Option<Page>, PageError> {
    let page = conn
        .query_row(
            "SELECT id, title, content FROM pages WHERE id = ?1",
            [page_id],
            map_row_to_page,
        )
        .optional()?;
    Ok(page)
}

/// Creates a page with a freshly generated ID and returns the stored record.
pub fn create_page(conn: &Connection, input: &PageInput) -> Result<Page, PageError> {
    let page_id = Uuid::new_v4().to_string();

    let page = conn.query_row(
        "INSERT INTO pages (id, title, content) VALUES (?1, ?2, ?3)
         RETURNING id, title, content",
        params![page_id, input.title, input.content],
        map_row_to_page,
    )?;

    tracing::debug!(page_id = %page.id, "created page");
    Ok(page)
}

/// Replaces the title and content of an existing page.
///
/// Returns the updated page, or `None` if no page has that ID. The ID itself
/// is never changed.
pub fn update_page(
    conn: &Connection,
    page_id: &str,
    input: &PageInput,
) -> Result<Option<Page>, PageError> {
    let page = conn
        .query_row(
            "UPDATE pages SET title = ?1, content = ?2 WHERE id = ?3
             RETURNING id, title, content",
            params![input.title, input.content, page_id],
            map_row_to_page,
        )
        .optional()?;
    Ok(page)
}

/// Deletes a page. Returns `true` if a row was removed, `false` if the ID
/// did not exist.
pub fn delete_page(conn: &Connection, page_id: &str) -> Result<bool, PageError> {
    let count = conn.execute("DELETE FROM pages WHERE id = ?1", [page_id])?;
    Ok(count > 0)
}

/// Returns the number of stored pages.
pub fn count_pages(conn: &Connection) -> Result<i64, PageError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM pages", [], |row| row.get(0))?;
    Ok(count)
}

fn map_row_to_page(row: &Row) -> rusqlite::Result<Page> {
    Ok(Page {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
    })
}
