use askama::Template;

use hondana_forms::Form;

use super::models::Book;

/// Book list page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub books: &'a [Book],
}

/// Shared add/edit form page.
#[derive(Template)]
#[template(path = "edit.html")]
pub struct EditTemplate<'a> {
    pub form: &'a Form,
    pub action: String,
    pub heading: &'static str,
}
