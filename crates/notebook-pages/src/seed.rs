//! One-time example content for a fresh notebook.

use crate::{count_pages, PageError};
use rusqlite::{params, Connection};
use uuid::Uuid;

/// Title and content of the pages inserted into an empty notebook.
pub const EXAMPLE_PAGES: [(&str, &str); 3] = [
    (
        "Welcome to your Notebook",
        "This is your first page! You can add new pages, edit existing ones, or delete them. Explore the tabs above!",
    ),
    (
        "My Daily Thoughts",
        "Today was a productive day. I managed to finish all my tasks before noon. Feeling good!",
    ),
    (
        "Grocery List",
        "Milk, Eggs, Bread, Butter, Coffee, Apples, Bananas",
    ),
];

/// Inserts [`EXAMPLE_PAGES`] if and only if the `pages` table is empty.
///
/// Returns the number of pages inserted: `3` on a fresh database, `0` as soon
/// as any page exists (including after the user deleted some of the
/// examples). All three inserts share one transaction.
pub fn seed_example_pages(conn: &Connection) -> Result<usize, PageError> {
    let tx = conn.unchecked_transaction()?;

    if count_pages(&tx)? > 0 {
        tracing::debug!("pages table not empty, skipping example pages");
        return Ok(0);
    }

    for (title, content) in EXAMPLE_PAGES {
        tx.execute(
            "INSERT INTO pages (id, title, content) VALUES (?1, ?2, ?3)",
            params![Uuid::new_v4().to_string(), title, content],
        )?;
    }
    tx.commit()?;

    tracing::info!(count = EXAMPLE_PAGES.len(), "seeded example pages");
    Ok(EXAMPLE_PAGES.len())
}
