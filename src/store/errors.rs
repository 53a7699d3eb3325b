use thiserror::Error;

use crate::store::Collection;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key in `{collection}`: {key}")]
    DuplicateKey { collection: Collection, key: String },
    #[error("document in `{collection}` is missing a string `id`")]
    MissingId { collection: Collection },
    #[error("record for `{collection}` is not a JSON object")]
    NotADocument { collection: Collection },
    #[error("malformed document in `{collection}`: {source}")]
    Malformed {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },
    #[error("the store has been closed")]
    Closed,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StoreError::DuplicateKey { .. })
    }
}
