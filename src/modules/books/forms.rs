use std::collections::HashMap;

use hondana_forms::{FieldKind, FieldSpec, Form, Rule};

use super::models::Book;

/// Input fields recognized by the add/edit form, with display labels and
/// validation rules.
pub const BOOK_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "title",
        label: "タイトル",
        kind: FieldKind::Text,
        rules: &[Rule::Required, Rule::Length { min: 1, max: 100 }],
    },
    FieldSpec {
        name: "author",
        label: "作者",
        kind: FieldKind::Text,
        rules: &[Rule::Required, Rule::Length { min: 1, max: 100 }],
    },
    FieldSpec {
        name: "price",
        label: "価格",
        kind: FieldKind::Integer,
        rules: &[Rule::Required, Rule::Integer],
    },
    FieldSpec {
        name: "memo",
        label: "メモ",
        kind: FieldKind::Textarea,
        rules: &[Rule::Required],
    },
];

/// Blank form for the add page.
pub fn empty_form() -> Form {
    Form::empty(BOOK_FIELDS)
}

/// Form bound to a raw submission.
pub fn bind_form(raw: &HashMap<String, String>) -> Form {
    Form::bind(BOOK_FIELDS, raw)
}

/// Form pre-filled from a stored book, for the edit page.
pub fn prefilled_form(book: &Book) -> Form {
    let mut values = HashMap::new();
    values.insert("title".to_string(), book.title.clone());
    values.insert("author".to_string(), book.author.clone());
    values.insert("price".to_string(), book.price.to_string());
    values.insert("memo".to_string(), book.memo.clone());

    Form::bind(BOOK_FIELDS, &values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn prefilled_form_carries_book_values() {
        let book = Book {
            id: 7,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            price: 1200,
            memo: "classic".to_string(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        };

        let form = prefilled_form(&book);
        assert_eq!(form.text("title"), "Dune");
        assert_eq!(form.text("author"), "Herbert");
        assert_eq!(form.text("price"), "1200");
        assert_eq!(form.text("memo"), "classic");
    }

    #[test]
    fn book_fields_cover_the_whole_form() {
        let names: Vec<_> = empty_form().fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["title", "author", "price", "memo"]);
    }
}
