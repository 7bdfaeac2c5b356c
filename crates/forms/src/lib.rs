//! Form validation driven by per-field rule lists.
//!
//! Fields are declared as static [`FieldSpec`] configuration and interpreted
//! by a single generic routine: bind the raw submission, run [`Form::validate`],
//! then either read the coerced values or re-render the form with the
//! per-field messages it collected.

use std::collections::HashMap;

use thiserror::Error;

/// A single rule failure on one field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("empty value")]
    EmptyValue,

    #[error("out of bounds ({min}..={max})")]
    OutOfBounds { min: usize, max: usize },

    #[error("not an integer")]
    NotAnInteger,
}

impl ValidationError {
    /// User-facing message rendered next to the failing field.
    pub fn message(&self) -> String {
        match self {
            ValidationError::EmptyValue => "入力してください".to_string(),
            ValidationError::OutOfBounds { max, .. } => {
                format!("{max}文字以下で入力してください")
            }
            ValidationError::NotAnInteger => "数値で入力してください".to_string(),
        }
    }
}

/// Validation rules, evaluated in declaration order per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Value must be present and non-blank.
    Required,
    /// Character count must fall within `min..=max`.
    Length { min: usize, max: usize },
    /// Value must parse as a signed integer.
    Integer,
}

impl Rule {
    fn check(&self, value: &str) -> Result<(), ValidationError> {
        match *self {
            Rule::Required => {
                if value.trim().is_empty() {
                    Err(ValidationError::EmptyValue)
                } else {
                    Ok(())
                }
            }
            Rule::Length { min, max } => {
                let count = value.chars().count();
                if count < min || count > max {
                    Err(ValidationError::OutOfBounds { min, max })
                } else {
                    Ok(())
                }
            }
            Rule::Integer => match value.trim().parse::<i64>() {
                Ok(_) => Ok(()),
                Err(_) => Err(ValidationError::NotAnInteger),
            },
        }
    }
}

/// Widget hint for rendering the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Textarea,
}

/// Static configuration for one recognized input field.
#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub rules: &'static [Rule],
}

/// A field bound to a submitted or pre-filled value, plus any messages
/// collected during validation.
#[derive(Debug, Clone)]
pub struct Field {
    spec: &'static FieldSpec,
    value: String,
    errors: Vec<String>,
}

impl Field {
    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn label(&self) -> &'static str {
        self.spec.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn is_textarea(&self) -> bool {
        matches!(self.spec.kind, FieldKind::Textarea)
    }
}

/// A set of fields built from one spec list. The same form backs the empty
/// "new" page, the pre-filled "edit" page, and submission validation.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<Field>,
}

impl Form {
    /// Form with every field blank.
    pub fn empty(specs: &'static [FieldSpec]) -> Self {
        Self {
            fields: specs
                .iter()
                .map(|spec| Field {
                    spec,
                    value: String::new(),
                    errors: Vec::new(),
                })
                .collect(),
        }
    }

    /// Bind raw values to the declared fields. Unknown keys are ignored;
    /// missing keys bind as empty so `Required` can report them.
    pub fn bind(specs: &'static [FieldSpec], raw: &HashMap<String, String>) -> Self {
        Self {
            fields: specs
                .iter()
                .map(|spec| Field {
                    spec,
                    value: raw.get(spec.name).cloned().unwrap_or_default(),
                    errors: Vec::new(),
                })
                .collect(),
        }
    }

    /// Run every field's rules in declaration order, stopping at the first
    /// failure per field. Returns true when no field reported an error.
    pub fn validate(&mut self) -> bool {
        for field in &mut self.fields {
            field.errors.clear();
            for rule in field.spec.rules {
                if let Err(err) = rule.check(&field.value) {
                    field.errors.push(err.message());
                    break;
                }
            }
        }
        self.is_valid()
    }

    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|field| field.errors.is_empty())
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.spec.name == name)
    }

    /// Text value of a field; empty when the field is unknown.
    pub fn text(&self, name: &str) -> String {
        self.field(name)
            .map(|field| field.value.clone())
            .unwrap_or_default()
    }

    /// Integer value of a field. `None` when the field is unknown or its
    /// value does not parse, so only meaningful after a successful
    /// [`Form::validate`] with an `Integer` rule on the field.
    pub fn integer(&self, name: &str) -> Option<i64> {
        self.field(name)
            .and_then(|field| field.value.trim().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec {
            name: "title",
            label: "タイトル",
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

    fn raw(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn valid_submission_exposes_coerced_values() {
        let mut form = Form::bind(
            FIELDS,
            &raw(&[("title", "Dune"), ("price", "1200"), ("memo", "classic")]),
        );

        assert!(form.validate());
        assert_eq!(form.text("title"), "Dune");
        assert_eq!(form.integer("price"), Some(1200));
        assert_eq!(form.text("memo"), "classic");
    }

    #[test]
    fn empty_required_field_reports_single_message() {
        let mut form = Form::bind(
            FIELDS,
            &raw(&[("title", ""), ("price", "1200"), ("memo", "classic")]),
        );

        assert!(!form.validate());
        // Required fails first; the length rule never runs.
        assert_eq!(
            form.field("title").unwrap().errors(),
            ["入力してください"]
        );
        assert!(form.field("price").unwrap().errors().is_empty());
    }

    #[test]
    fn missing_key_binds_empty_and_fails_required() {
        let mut form = Form::bind(FIELDS, &raw(&[("title", "Dune"), ("price", "1200")]));

        assert!(!form.validate());
        assert_eq!(form.field("memo").unwrap().errors(), ["入力してください"]);
    }

    #[test]
    fn over_long_title_is_out_of_bounds() {
        let long = "あ".repeat(101);
        let mut form = Form::bind(
            FIELDS,
            &raw(&[
                ("title", long.as_str()),
                ("price", "1200"),
                ("memo", "classic"),
            ]),
        );

        assert!(!form.validate());
        assert_eq!(
            form.field("title").unwrap().errors(),
            ["100文字以下で入力してください"]
        );
    }

    #[test]
    fn hundred_chars_is_within_bounds() {
        // Multibyte characters count as one each.
        let exact = "本".repeat(100);
        let mut form = Form::bind(
            FIELDS,
            &raw(&[("title", exact.as_str()), ("price", "0"), ("memo", "x")]),
        );

        assert!(form.validate());
    }

    #[test]
    fn non_numeric_price_is_not_an_integer() {
        let mut form = Form::bind(
            FIELDS,
            &raw(&[("title", "Dune"), ("price", "abc"), ("memo", "classic")]),
        );

        assert!(!form.validate());
        assert_eq!(
            form.field("price").unwrap().errors(),
            ["数値で入力してください"]
        );
        assert_eq!(form.integer("price"), None);
    }

    #[test]
    fn negative_price_parses() {
        let mut form = Form::bind(
            FIELDS,
            &raw(&[("title", "Dune"), ("price", "-5"), ("memo", "classic")]),
        );

        assert!(form.validate());
        assert_eq!(form.integer("price"), Some(-5));
    }

    #[test]
    fn empty_form_has_blank_values_and_no_errors() {
        let form = Form::empty(FIELDS);

        assert!(form.is_valid());
        assert_eq!(form.fields().len(), 3);
        assert!(form.fields().iter().all(|f| f.value().is_empty()));
    }

    #[test]
    fn revalidation_clears_previous_errors() {
        let mut form = Form::bind(
            FIELDS,
            &raw(&[("title", ""), ("price", "1200"), ("memo", "classic")]),
        );
        assert!(!form.validate());

        // A fresh bind of corrected input validates cleanly.
        let mut form = Form::bind(
            FIELDS,
            &raw(&[("title", "Dune"), ("price", "1200"), ("memo", "classic")]),
        );
        assert!(form.validate());
        assert!(form.field("title").unwrap().errors().is_empty());
    }

    #[test]
    fn error_kinds_display() {
        assert_eq!(ValidationError::EmptyValue.to_string(), "empty value");
        assert_eq!(
            ValidationError::OutOfBounds { min: 1, max: 100 }.to_string(),
            "out of bounds (1..=100)"
        );
        assert_eq!(ValidationError::NotAnInteger.to_string(), "not an integer");
    }
}
