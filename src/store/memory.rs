use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{
    AtomicBool,
    Ordering as AtomicOrdering,
};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::store::{
    Collection,
    Document,
    DocumentStore,
    FindOptions,
    SortOrder,
    StoreError,
};

/// Process-local backend. Documents keep insertion order; unique fields are
/// checked under the write lock, so concurrent inserts cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
    closed: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed.load(AtomicOrdering::Acquire) {
            Err(StoreError::Closed)
        } else {
            Ok(())
        }
    }
}

fn string_field<'a>(document: &'a Document, field: &str) -> Option<&'a str> {
    document.get(field).and_then(Value::as_str)
}

fn compare_field(a: &Document, b: &Document, field: &str) -> Ordering {
    string_field(a, field).cmp(&string_field(b, field))
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert_one(&self, collection: Collection, document: Document) -> Result<(), StoreError> {
        self.ensure_open()?;
        let id = string_field(&document, "id")
            .ok_or(StoreError::MissingId { collection })?
            .to_string();
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();

        if documents.iter().any(|d| string_field(d, "id") == Some(id.as_str())) {
            return Err(StoreError::DuplicateKey { collection, key: id });
        }
        if let Some(field) = collection.unique_field() {
            if let Some(value) = string_field(&document, field) {
                if documents.iter().any(|d| string_field(d, field) == Some(value)) {
                    return Err(StoreError::DuplicateKey {
                        collection,
                        key: value.to_string(),
                    });
                }
            }
        }

        documents.push(document);
        Ok(())
    }

    async fn find(
        &self,
        collection: Collection,
        options: FindOptions,
    ) -> Result<Vec<Document>, StoreError> {
        self.ensure_open()?;
        let collections = self.collections.read().await;
        let mut documents: Vec<&Document> = collections
            .get(&collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|d| options.filter.as_ref().map_or(true, |f| f.matches(d)))
                    .collect()
            })
            .unwrap_or_default();

        if let Some((field, order)) = options.sort {
            documents.sort_by(|a, b| match order {
                SortOrder::Ascending => compare_field(a, b, field),
                SortOrder::Descending => compare_field(b, a, field),
            });
        }

        Ok(documents
            .into_iter()
            .skip(usize::try_from(options.skip).unwrap_or(usize::MAX))
            .take(usize::try_from(options.limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn close(&self) {
        tracing::info!("closing in-memory document store");
        self.closed.store(true, AtomicOrdering::Release);
        self.collections.write().await.clear();
    }
}
