use serde::Serialize;

use bookstand_store::BookRecord;

/// Row shape consumed by the book-table view.
#[derive(Debug, Clone, Serialize)]
pub struct BookRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "BookName")]
    pub name: String,
    #[serde(rename = "BookAuthor")]
    pub author: String,
    #[serde(rename = "BookEdition")]
    pub edition: String,
    #[serde(rename = "BookPages")]
    pub pages: String,
}

impl BookRow {
    /// Table rows key on the store identifier's hex form; a record without
    /// one (never persisted) falls back to the external id.
    pub fn from_record(record: &BookRecord) -> Self {
        Self {
            id: record
                .store_id
                .map(|store_id| store_id.to_hex())
                .unwrap_or_else(|| record.id.clone()),
            name: record.name.clone(),
            author: record.author.clone(),
            edition: record.edition.clone(),
            pages: record.pages.clone(),
        }
    }
}
