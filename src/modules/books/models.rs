use sqlx::FromRow;
use time::OffsetDateTime;

/// One catalog record. `id` and `created_at` are assigned by storage on
/// insertion and never change afterwards.
#[derive(Debug, Clone, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub price: i64,
    pub memo: String,
    pub created_at: OffsetDateTime,
}

impl Book {
    /// Registration timestamp formatted for the list view.
    pub fn created_label(&self) -> String {
        let ts = self.created_at;
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02}",
            ts.year(),
            ts.month() as u8,
            ts.day(),
            ts.hour(),
            ts.minute()
        )
    }
}

/// Field values for a book that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub price: i64,
    pub memo: String,
}
