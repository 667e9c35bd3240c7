use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_document, Bson},
    options::{ClientOptions, IndexOptions},
    Client, Collection, Database, IndexModel,
};

use bookstand_kernel::settings::DatabaseSettings;

use crate::catalog::Catalog;
use crate::error::StoreError;
use crate::record::BookRecord;

/// Best-effort startup budget for reaching the store. There is no
/// per-request timeout; in-flight requests block until the store responds.
const STARTUP_TIMEOUT: Duration = Duration::from_secs(10);

/// MongoDB-backed catalog.
///
/// The driver's client is internally pooled and safe to share across all
/// in-flight requests, so one `MongoCatalog` serves the whole process.
pub struct MongoCatalog {
    database: Database,
    collection: Collection<BookRecord>,
    collection_name: String,
}

impl MongoCatalog {
    /// Connect to the store described by `settings`.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(&settings.uri).await?;
        options.server_selection_timeout = Some(STARTUP_TIMEOUT);

        let client = Client::with_options(options)?;
        let database = client.database(&settings.name);
        let collection = database.collection(&settings.collection);

        Ok(Self {
            database,
            collection,
            collection_name: settings.collection.clone(),
        })
    }

    /// Idempotently ensure the collection and its two unique indexes exist.
    ///
    /// The rest of the layer relies on the store enforcing the uniqueness
    /// invariants, so a provisioning failure must abort startup.
    pub async fn prepare(&self) -> Result<(), StoreError> {
        let names = self.database.list_collection_names().await?;
        tracing::debug!(collections = ?names, "collections present in database");

        if !names.iter().any(|name| name == &self.collection_name) {
            self.database
                .create_collection(self.collection_name.clone())
                .await?;
            tracing::info!(collection = %self.collection_name, "created catalog collection");
        }

        let unique = IndexOptions::builder().unique(true).build();

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(unique.clone())
            .build();
        self.collection.create_index(id_index).await?;

        let identity_index = IndexModel::builder()
            .keys(doc! {
                "bookname": 1,
                "bookauthor": 1,
                "bookyear": 1,
                "bookpages": 1,
            })
            .options(unique)
            .build();
        self.collection.create_index(identity_index).await?;

        Ok(())
    }
}

#[async_trait]
impl Catalog for MongoCatalog {
    async fn insert(&self, mut record: BookRecord) -> Result<BookRecord, StoreError> {
        let result = self
            .collection
            .insert_one(&record)
            .await
            .map_err(StoreError::from_driver)?;

        record.store_id = result.inserted_id.as_object_id();
        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<BookRecord>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_exact(&self, record: &BookRecord) -> Result<Vec<BookRecord>, StoreError> {
        // Serializing the record yields a filter over exactly the stored
        // fields; an unset `_id` is omitted and so not part of the match.
        let filter = to_document(record).map_err(mongodb::error::Error::from)?;
        let cursor = self.collection.find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update(&self, id: &str, record: BookRecord) -> Result<(), StoreError> {
        let filter = doc! { "id": id };
        let update = doc! { "$set": to_document(&record).map_err(mongodb::error::Error::from)? };

        let result = self
            .collection
            .update_one(filter, update)
            .await
            .map_err(StoreError::from_driver)?;

        tracing::debug!(
            id,
            matched = result.matched_count,
            modified = result.modified_count,
            "update result"
        );

        // A matched-but-unmodified update means the submitted values equal
        // the current ones; only a zero-match is an error.
        if result.matched_count == 0 {
            return Err(StoreError::NotFound { id: id.to_string() });
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.collection.delete_one(doc! { "id": id }).await?;
        Ok(())
    }

    async fn distinct_authors(&self) -> Result<Vec<String>, StoreError> {
        self.distinct_strings("bookauthor").await
    }

    async fn distinct_years(&self) -> Result<Vec<String>, StoreError> {
        self.distinct_strings("bookyear").await
    }
}

impl MongoCatalog {
    async fn distinct_strings(&self, field: &str) -> Result<Vec<String>, StoreError> {
        let values = self.collection.distinct(field, doc! {}).await?;

        Ok(values
            .into_iter()
            .filter_map(|value| match value {
                Bson::String(value) => Some(value),
                _ => None,
            })
            .collect())
    }
}
