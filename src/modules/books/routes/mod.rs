use std::collections::HashMap;

use anyhow::Context;
use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use sqlx::SqlitePool;

use hondana_http::error::AppError;

use super::forms::{bind_form, empty_form, prefilled_form};
use super::models::NewBook;
use super::repo;
use super::views::{EditTemplate, IndexTemplate};

const NOT_FOUND_MESSAGE: &str = "Book is not found.";
const ADD_HEADING: &str = "書籍の追加";
const EDIT_HEADING: &str = "書籍の編集";

/// Build the books router with the storage handle baked into its state.
pub fn router(pool: SqlitePool) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/add", get(new).post(create))
        .route("/{id}/edit", get(edit).post(update))
        .route("/{id}/delete", post(destroy))
        .with_state(pool)
}

/// GET /books — list every stored book.
async fn index(State(pool): State<SqlitePool>) -> Result<Html<String>, AppError> {
    let mut conn = pool
        .acquire()
        .await
        .context("failed to open storage session")?;

    let books = repo::list_all(&mut conn).await?;

    let page = IndexTemplate { books: &books };
    Ok(Html(page.render()?))
}

/// GET /books/add — empty form.
async fn new() -> Result<Html<String>, AppError> {
    let form = empty_form();
    let page = EditTemplate {
        form: &form,
        action: "/books/add".to_string(),
        heading: ADD_HEADING,
    };
    Ok(Html(page.render()?))
}

/// POST /books/add — validate and persist a new book, or re-render the form.
async fn create(
    State(pool): State<SqlitePool>,
    Form(raw): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let mut form = bind_form(&raw);

    if !form.validate() {
        let page = EditTemplate {
            form: &form,
            action: "/books/add".to_string(),
            heading: ADD_HEADING,
        };
        return Ok(Html(page.render()?).into_response());
    }

    let mut tx = pool
        .begin()
        .await
        .context("failed to open storage session")?;

    let new_book = NewBook {
        title: form.text("title"),
        author: form.text("author"),
        price: form
            .integer("price")
            .context("price missing after validation")?,
        memo: form.text("memo"),
    };
    repo::add(&mut tx, new_book).await?;

    tx.commit()
        .await
        .context("failed to commit storage session")?;

    Ok(Redirect::to("/books").into_response())
}

/// GET /books/{id}/edit — pre-filled form, or 404.
async fn edit(State(pool): State<SqlitePool>, Path(id): Path<i64>) -> Result<Html<String>, AppError> {
    let mut conn = pool
        .acquire()
        .await
        .context("failed to open storage session")?;

    let Some(book) = repo::get(&mut conn, id).await? else {
        return Err(AppError::not_found(NOT_FOUND_MESSAGE));
    };

    let form = prefilled_form(&book);
    let page = EditTemplate {
        form: &form,
        action: format!("/books/{}/edit", book.id),
        heading: EDIT_HEADING,
    };
    Ok(Html(page.render()?))
}

/// POST /books/{id}/edit — validate and persist field changes, or 404 /
/// re-render.
async fn update(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Form(raw): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let mut tx = pool
        .begin()
        .await
        .context("failed to open storage session")?;

    let Some(mut book) = repo::get(&mut tx, id).await? else {
        return Err(AppError::not_found(NOT_FOUND_MESSAGE));
    };

    let mut form = bind_form(&raw);

    if !form.validate() {
        let page = EditTemplate {
            form: &form,
            action: format!("/books/{id}/edit"),
            heading: EDIT_HEADING,
        };
        return Ok(Html(page.render()?).into_response());
    }

    book.title = form.text("title");
    book.author = form.text("author");
    book.price = form
        .integer("price")
        .context("price missing after validation")?;
    book.memo = form.text("memo");
    repo::update(&mut tx, &book).await?;

    tx.commit()
        .await
        .context("failed to commit storage session")?;

    Ok(Redirect::to("/books").into_response())
}

/// POST /books/{id}/delete — remove the book, or 404.
async fn destroy(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let mut tx = pool
        .begin()
        .await
        .context("failed to open storage session")?;

    let Some(book) = repo::get(&mut tx, id).await? else {
        return Err(AppError::not_found(NOT_FOUND_MESSAGE));
    };

    repo::delete(&mut tx, book.id).await?;

    tx.commit()
        .await
        .context("failed to commit storage session")?;

    Ok(Redirect::to("/books").into_response())
}
