use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::catalog::Catalog;
use crate::error::StoreError;
use crate::record::BookRecord;

/// In-memory catalog enforcing the same invariants as the store's unique
/// indexes. Backs handler and property tests; no persistence.
#[derive(Default)]
pub struct MemoryCatalog {
    records: RwLock<Vec<BookRecord>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

fn same_identity(a: &BookRecord, b: &BookRecord) -> bool {
    a.name == b.name && a.author == b.author && a.year == b.year && a.pages == b.pages
}

fn same_fields(a: &BookRecord, b: &BookRecord) -> bool {
    a.id == b.id && same_identity(a, b) && a.edition == b.edition
}

fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn insert(&self, mut record: BookRecord) -> Result<BookRecord, StoreError> {
        let mut records = self.records.write().unwrap();

        let conflict = records
            .iter()
            .any(|existing| existing.id == record.id || same_identity(existing, &record));
        if conflict {
            return Err(StoreError::Duplicate);
        }

        record.store_id = Some(ObjectId::new());
        records.push(record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<BookRecord>, StoreError> {
        Ok(self.records.read().unwrap().clone())
    }

    async fn find_exact(&self, record: &BookRecord) -> Result<Vec<BookRecord>, StoreError> {
        Ok(self
            .records
            .read()
            .unwrap()
            .iter()
            .filter(|existing| same_fields(existing, record))
            .cloned()
            .collect())
    }

    async fn update(&self, id: &str, record: BookRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().unwrap();

        let Some(position) = records.iter().position(|existing| existing.id == id) else {
            return Err(StoreError::NotFound { id: id.to_string() });
        };

        let conflict = records
            .iter()
            .any(|other| other.id != id && same_identity(other, &record));
        if conflict {
            return Err(StoreError::Duplicate);
        }

        let existing = &mut records[position];

        // Replace the stored fields, keeping the store-assigned identifier.
        existing.id = record.id;
        existing.name = record.name;
        existing.author = record.author;
        existing.edition = record.edition;
        existing.pages = record.pages;
        existing.year = record.year;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.records
            .write()
            .unwrap()
            .retain(|existing| existing.id != id);
        Ok(())
    }

    async fn distinct_authors(&self) -> Result<Vec<String>, StoreError> {
        let authors = self
            .records
            .read()
            .unwrap()
            .iter()
            .map(|record| record.author.clone())
            .collect();
        Ok(dedup_preserving_order(authors))
    }

    async fn distinct_years(&self) -> Result<Vec<String>, StoreError> {
        let years = self
            .records
            .read()
            .unwrap()
            .iter()
            .map(|record| record.year.clone())
            .collect();
        Ok(dedup_preserving_order(years))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{seed_records, BookDto};

    fn record(id: &str, name: &str, author: &str, pages: &str, year: &str) -> BookRecord {
        BookRecord {
            store_id: None,
            id: id.to_string(),
            name: name.to_string(),
            author: author.to_string(),
            edition: "ed".to_string(),
            pages: pages.to_string(),
            year: year.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_a_store_identifier() {
        let catalog = MemoryCatalog::new();
        let inserted = catalog
            .insert(record("b1", "T", "A", "10", "2000"))
            .await
            .unwrap();
        assert!(inserted.store_id.is_some());
    }

    #[tokio::test]
    async fn duplicate_external_id_is_rejected() {
        let catalog = MemoryCatalog::new();
        catalog
            .insert(record("b1", "T", "A", "10", "2000"))
            .await
            .unwrap();

        let err = catalog
            .insert(record("b1", "Other", "B", "20", "2001"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate));
    }

    #[tokio::test]
    async fn duplicate_identity_tuple_is_rejected_across_distinct_ids() {
        let catalog = MemoryCatalog::new();
        catalog
            .insert(record("b1", "T", "A", "10", "2000"))
            .await
            .unwrap();

        let err = catalog
            .insert(record("b2", "T", "A", "10", "2000"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate));
    }

    #[tokio::test]
    async fn differing_edition_alone_does_not_conflict() {
        let catalog = MemoryCatalog::new();
        catalog
            .insert(record("b1", "T", "A", "10", "2000"))
            .await
            .unwrap();

        // Same tuple fields except pages: allowed.
        catalog
            .insert(record("b2", "T", "A", "11", "2000"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn seeding_twice_leaves_one_copy_of_each_record() {
        let catalog = MemoryCatalog::new();
        catalog.seed().await.unwrap();
        catalog.seed().await.unwrap();

        let all = catalog.find_all().await.unwrap();
        assert_eq!(all.len(), seed_records().len());
    }

    #[tokio::test]
    async fn update_of_absent_id_reports_not_found() {
        let catalog = MemoryCatalog::new();
        let err = catalog
            .update("ghost", record("ghost", "T", "A", "10", "2000"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_with_unchanged_values_is_success() {
        let catalog = MemoryCatalog::new();
        catalog
            .insert(record("b1", "T", "A", "10", "2000"))
            .await
            .unwrap();

        catalog
            .update("b1", record("b1", "T", "A", "10", "2000"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_replaces_all_fields() {
        let catalog = MemoryCatalog::new();
        catalog
            .insert(record("b1", "T", "A", "10", "2000"))
            .await
            .unwrap();

        catalog
            .update(
                "b1",
                BookRecord::from_dto(BookDto {
                    id: "b1".to_string(),
                    title: "T2".to_string(),
                    author: "A2".to_string(),
                    pages: "20".to_string(),
                    edition: "e2".to_string(),
                    year: "2001".to_string(),
                }),
            )
            .await
            .unwrap();

        let all = catalog.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "T2");
        assert_eq!(all[0].year, "2001");
        assert!(all[0].store_id.is_some());
    }

    #[tokio::test]
    async fn update_onto_another_record_identity_is_rejected() {
        let catalog = MemoryCatalog::new();
        catalog
            .insert(record("b1", "T", "A", "10", "2000"))
            .await
            .unwrap();
        catalog
            .insert(record("b2", "U", "B", "20", "2001"))
            .await
            .unwrap();

        let err = catalog
            .update("b2", record("b2", "T", "A", "10", "2000"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate));
    }

    #[tokio::test]
    async fn delete_of_absent_id_is_success() {
        let catalog = MemoryCatalog::new();
        catalog.delete("doesnotexist").await.unwrap();
        assert!(catalog.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn distinct_projections_collapse_repeats() {
        let catalog = MemoryCatalog::new();
        catalog
            .insert(record("b1", "T1", "A", "10", "2000"))
            .await
            .unwrap();
        catalog
            .insert(record("b2", "T2", "A", "20", "2000"))
            .await
            .unwrap();
        catalog
            .insert(record("b3", "T3", "B", "30", "2001"))
            .await
            .unwrap();

        let mut authors = catalog.distinct_authors().await.unwrap();
        authors.sort();
        assert_eq!(authors, vec!["A".to_string(), "B".to_string()]);

        let mut years = catalog.distinct_years().await.unwrap();
        years.sort();
        assert_eq!(years, vec!["2000".to_string(), "2001".to_string()]);
    }
}
