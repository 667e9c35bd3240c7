use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Persisted book record.
///
/// Field renames pin the BSON document shape: the collection stores
/// `bookname`/`bookauthor`/... keys and a store-assigned `_id` alongside the
/// user-supplied external `id`. Two uniqueness invariants hold across the
/// collection: `id`, and the `(bookname, bookauthor, bookyear, bookpages)`
/// tuple. Both are enforced by unique indexes, not by this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub store_id: Option<ObjectId>,
    pub id: String,
    #[serde(rename = "bookname")]
    pub name: String,
    #[serde(rename = "bookauthor")]
    pub author: String,
    #[serde(rename = "bookedition")]
    pub edition: String,
    #[serde(rename = "bookpages")]
    pub pages: String,
    #[serde(rename = "bookyear")]
    pub year: String,
}

/// Wire representation of a book at the HTTP boundary.
///
/// All fields default so a partial body (the update route carries no `id`)
/// still decodes; validation happens in the handlers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub pages: String,
    #[serde(default)]
    pub edition: String,
    #[serde(default)]
    pub year: String,
}

impl BookRecord {
    /// Project the record into its wire shape. The store-internal `_id`
    /// never crosses the wire.
    pub fn to_dto(&self) -> BookDto {
        BookDto {
            id: self.id.clone(),
            title: self.name.clone(),
            author: self.author.clone(),
            pages: self.pages.clone(),
            edition: self.edition.clone(),
            year: self.year.clone(),
        }
    }

    /// Build a record from its wire shape, with no store identifier yet.
    pub fn from_dto(dto: BookDto) -> Self {
        Self {
            store_id: None,
            id: dto.id,
            name: dto.title,
            author: dto.author,
            edition: dto.edition,
            pages: dto.pages,
            year: dto.year,
        }
    }
}

/// Fixed example records inserted once at first startup.
pub fn seed_records() -> Vec<BookRecord> {
    vec![
        BookRecord {
            store_id: None,
            id: "example1".to_string(),
            name: "The Vortex".to_string(),
            author: "José Eustasio Rivera".to_string(),
            edition: "958-30-0804-4".to_string(),
            pages: "292".to_string(),
            year: "1924".to_string(),
        },
        BookRecord {
            store_id: None,
            id: "example2".to_string(),
            name: "Frankenstein".to_string(),
            author: "Mary Shelley".to_string(),
            edition: "978-3-649-64609-9".to_string(),
            pages: "280".to_string(),
            year: "1818".to_string(),
        },
        BookRecord {
            store_id: None,
            id: "example3".to_string(),
            name: "The Black Cat".to_string(),
            author: "Edgar Allan Poe".to_string(),
            edition: "978-3-99168-238-7".to_string(),
            pages: "280".to_string(),
            year: "1843".to_string(),
        },
    ]
}
