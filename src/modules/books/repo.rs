use sqlx::SqliteConnection;
use thiserror::Error;

use hondana_http::error::AppError;

use super::models::{Book, NewBook};

/// Storage-layer failure surfaced to the web layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database query failed")]
    Query(#[from] sqlx::Error),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Internal(err.into())
    }
}

/// All books in insertion order. Empty when the table is empty.
pub async fn list_all(conn: &mut SqliteConnection) -> Result<Vec<Book>, RepositoryError> {
    let books = sqlx::query_as::<_, Book>(
        "SELECT id, title, author, price, memo, created_at FROM books ORDER BY id",
    )
    .fetch_all(conn)
    .await?;

    Ok(books)
}

/// Single book by id; `None` when no such row exists.
pub async fn get(conn: &mut SqliteConnection, id: i64) -> Result<Option<Book>, RepositoryError> {
    let book = sqlx::query_as::<_, Book>(
        "SELECT id, title, author, price, memo, created_at FROM books WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(book)
}

/// Insert a new book. `id` and `created_at` are assigned by the database;
/// the stored row is returned.
pub async fn add(conn: &mut SqliteConnection, new: NewBook) -> Result<Book, RepositoryError> {
    let book = sqlx::query_as::<_, Book>(
        "INSERT INTO books (title, author, price, memo) VALUES (?, ?, ?, ?) \
         RETURNING id, title, author, price, memo, created_at",
    )
    .bind(&new.title)
    .bind(&new.author)
    .bind(new.price)
    .bind(&new.memo)
    .fetch_one(conn)
    .await?;

    Ok(book)
}

/// Persist field changes of an already-fetched book. `id` and `created_at`
/// are left untouched.
pub async fn update(conn: &mut SqliteConnection, book: &Book) -> Result<(), RepositoryError> {
    sqlx::query("UPDATE books SET title = ?, author = ?, price = ?, memo = ? WHERE id = ?")
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.price)
        .bind(&book.memo)
        .bind(book.id)
        .execute(conn)
        .await?;

    Ok(())
}

/// Remove a book by id.
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<(), RepositoryError> {
    sqlx::query("DELETE FROM books WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;

    Ok(())
}
