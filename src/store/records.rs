use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::store::{
    Collection,
    Document,
    DocumentStore,
    Filter,
    FindOptions,
    StoreError,
};

pub fn to_document<T: Serialize>(collection: Collection, record: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(_) => Err(StoreError::NotADocument { collection }),
        Err(source) => Err(StoreError::Malformed { collection, source }),
    }
}

pub fn from_document<T: DeserializeOwned>(
    collection: Collection,
    document: Document,
) -> Result<T, StoreError> {
    serde_json::from_value(Value::Object(document))
        .map_err(|source| StoreError::Malformed { collection, source })
}

pub async fn insert_record<T: Serialize>(
    store: &dyn DocumentStore,
    collection: Collection,
    record: &T,
) -> Result<(), StoreError> {
    store.insert_one(collection, to_document(collection, record)?).await
}

pub async fn find_records<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    options: FindOptions,
) -> Result<Vec<T>, StoreError> {
    store
        .find(collection, options)
        .await?
        .into_iter()
        .map(|document| from_document(collection, document))
        .collect()
}

pub async fn find_record<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    filter: Filter,
) -> Result<Option<T>, StoreError> {
    store
        .find_one(collection, filter)
        .await?
        .map(|document| from_document(collection, document))
        .transpose()
}
