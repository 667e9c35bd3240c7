use serde::Serialize;

use bookstand_store::BookDto;

/// Row shape consumed by the book-table view.
///
/// Unlike the backend, which keys rows on the store identifier, the proxy
/// only sees the wire DTO and keys rows on the external id.
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

impl From<&BookDto> for BookRow {
    fn from(dto: &BookDto) -> Self {
        Self {
            id: dto.id.clone(),
            name: dto.title.clone(),
            author: dto.author.clone(),
            edition: dto.edition.clone(),
            pages: dto.pages.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reshaping_renames_wire_keys_for_the_view() {
        let dto = BookDto {
            id: "b1".to_string(),
            title: "T".to_string(),
            author: "A".to_string(),
            pages: "10".to_string(),
            edition: "e".to_string(),
            year: "2000".to_string(),
        };

        let value = serde_json::to_value(BookRow::from(&dto)).unwrap();
        assert_eq!(value["ID"], "b1");
        assert_eq!(value["BookName"], "T");
        assert_eq!(value["BookAuthor"], "A");
        assert_eq!(value["BookEdition"], "e");
        assert_eq!(value["BookPages"], "10");
    }
}
