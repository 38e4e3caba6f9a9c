//! Persistence for book records.
//!
//! `BookStore` wraps the SQLite database holding the `books` table. It keeps
//! only the database path; every operation opens its own connection and
//! releases it when the call returns, so no connection state is shared
//! between requests.

pub mod assets;

use std::path::PathBuf;

use common::model::book::{Book, BookPatch};
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::StoreError;

/// Row inserted for a locally created book. Unlike [`Book`], this carries the
/// filesystem location of the stored cover image, which never leaves the
/// database.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub id: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub year: Option<i32>,
    pub image: String,
    pub internal_path: String,
}

#[derive(Clone)]
pub struct BookStore {
    database_path: PathBuf,
}

impl BookStore {
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        BookStore {
            database_path: database_path.into(),
        }
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.database_path)?)
    }

    /// Creates the `books` table if this is a fresh database.
    pub fn init(&self) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS books (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                publisher TEXT NOT NULL,
                year INTEGER,
                image TEXT,
                internal_path TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    pub fn create(&self, book: &NewBook) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO books (id, title, author, publisher, year, image, internal_path)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                book.id,
                book.title,
                book.author,
                book.publisher,
                book.year,
                book.image,
                book.internal_path
            ],
        )?;
        Ok(())
    }

    /// Applies one `UPDATE` per supplied field. Empty strings and a zero year
    /// count as not supplied; an unknown id is a silent no-op.
    pub fn update_fields(&self, id: &str, patch: &BookPatch) -> Result<(), StoreError> {
        let conn = self.connect()?;
        if let Some(title) = patch.title.as_deref().filter(|value| !value.is_empty()) {
            conn.execute(
                "UPDATE books SET title = ?1 WHERE id = ?2",
                params![title, id],
            )?;
        }
        if let Some(author) = patch.author.as_deref().filter(|value| !value.is_empty()) {
            conn.execute(
                "UPDATE books SET author = ?1 WHERE id = ?2",
                params![author, id],
            )?;
        }
        if let Some(publisher) = patch.publisher.as_deref().filter(|value| !value.is_empty()) {
            conn.execute(
                "UPDATE books SET publisher = ?1 WHERE id = ?2",
                params![publisher, id],
            )?;
        }
        if let Some(year) = patch.year.filter(|value| *value != 0) {
            conn.execute(
                "UPDATE books SET year = ?1 WHERE id = ?2",
                params![year, id],
            )?;
        }
        Ok(())
    }

    /// Filesystem location of the stored cover image, if the book exists.
    pub fn asset_path(&self, id: &str) -> Result<Option<String>, StoreError> {
        let conn = self.connect()?;
        let path = conn
            .query_row(
                "SELECT internal_path FROM books WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(path)
    }

    /// Removes the row; an unknown id succeeds silently.
    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute("DELETE FROM books WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Substring match against title or author. The needle is expected
    /// lower-cased by the caller; rows come back in storage order.
    pub fn find_by_text(&self, needle: &str) -> Result<Vec<Book>, StoreError> {
        let conn = self.connect()?;
        let pattern = format!("%{}%", needle);
        let mut stmt = conn.prepare(
            "SELECT id, title, author, publisher, year, image FROM books
             WHERE LOWER(title) LIKE ?1 OR LOWER(author) LIKE ?1",
        )?;
        let books = stmt
            .query_map(params![pattern], |row| {
                Ok(Book {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    author: row.get(2)?,
                    publisher: row.get(3)?,
                    year: row.get(4)?,
                    image: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<Book>, rusqlite::Error>>()?;
        Ok(books)
    }
}
