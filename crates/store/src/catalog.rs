use async_trait::async_trait;

use crate::error::StoreError;
use crate::record::{seed_records, BookRecord};

/// Data-access seam for the book catalog.
///
/// Handlers hold an `Arc<dyn Catalog>` and never see the store driver.
/// Ordering of `find_all` and the distinct projections is store-defined.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Insert one record, returning it with the store-assigned identifier
    /// populated. Uniqueness violations surface as
    /// [`StoreError::Duplicate`].
    async fn insert(&self, record: BookRecord) -> Result<BookRecord, StoreError>;

    /// Unfiltered scan of the whole collection.
    async fn find_all(&self) -> Result<Vec<BookRecord>, StoreError>;

    /// Records equal to `record` on every stored field (the store
    /// identifier is not part of the match).
    async fn find_exact(&self, record: &BookRecord) -> Result<Vec<BookRecord>, StoreError>;

    /// Replace all fields of the record matched by external id.
    ///
    /// [`StoreError::NotFound`] only when zero records matched; an update
    /// whose values equal the current ones still counts as success.
    async fn update(&self, id: &str, record: BookRecord) -> Result<(), StoreError>;

    /// Delete by external id. Zero matches is success.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    async fn distinct_authors(&self) -> Result<Vec<String>, StoreError>;

    async fn distinct_years(&self) -> Result<Vec<String>, StoreError>;

    /// Insert each seed record that is not already present. Idempotent.
    ///
    /// Finding more than one match for a seed record means the uniqueness
    /// invariant is already violated; that surfaces as
    /// [`StoreError::Integrity`] and aborts startup.
    async fn seed(&self) -> Result<(), StoreError> {
        for record in seed_records() {
            let matches = self.find_exact(&record).await?;
            match matches.len() {
                0 => {
                    let inserted = self.insert(record).await?;
                    tracing::info!(id = %inserted.id, "seeded catalog record");
                }
                1 => {
                    tracing::debug!(id = %record.id, "seed record already present");
                }
                _ => {
                    return Err(StoreError::Integrity { id: record.id });
                }
            }
        }

        Ok(())
    }
}
