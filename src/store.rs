//! Document storage.
//!
//! Records are kept as JSON documents in named collections. Handlers talk to
//! a [`DocumentStore`] trait object, so the Postgres backend used in
//! production and the in-memory backend used for development and tests are
//! interchangeable.

pub use errors::StoreError;
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use records::*;

mod errors;
mod memory;
mod postgres;
mod records;

use async_trait::async_trait;
use serde_json::{
    Map,
    Value,
};

/// A schema-less record.
pub type Document = Map<String, Value>;

/// Hard cap on the number of documents a single scan returns.
pub const MAX_SCAN_LIMIT: u64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    StatusChecks,
    ContactForms,
    Newsletters,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::StatusChecks => "status_checks",
            Collection::ContactForms => "contact_forms",
            Collection::Newsletters => "newsletters",
        }
    }

    /// Field whose value must be unique across the collection, if any.
    pub fn unique_field(&self) -> Option<&'static str> {
        match self {
            Collection::Newsletters => Some("email"),
            Collection::StatusChecks | Collection::ContactForms => None,
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Equality match of a top-level string field.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub field: &'static str,
    pub value: String,
}

impl Filter {
    pub fn eq(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    pub fn matches(&self, document: &Document) -> bool {
        document.get(self.field).and_then(Value::as_str) == Some(self.value.as_str())
    }
}

/// Parameters of a collection scan: optional filter, optional sort on a
/// string field, then `skip` and `limit`.
#[derive(Clone, Debug, PartialEq)]
pub struct FindOptions {
    pub filter: Option<Filter>,
    pub sort: Option<(&'static str, SortOrder)>,
    pub skip: u64,
    pub limit: u64,
}

impl FindOptions {
    pub fn new(limit: u64) -> Self {
        Self {
            filter: None,
            sort: None,
            skip: 0,
            limit: limit.min(MAX_SCAN_LIMIT),
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn sort(mut self, field: &'static str, order: SortOrder) -> Self {
        self.sort = Some((field, order));
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts a document. The document must carry a string `id` field.
    ///
    /// Fails with [`StoreError::DuplicateKey`] when the document collides
    /// with an existing one on the id or on the collection's unique field.
    async fn insert_one(&self, collection: Collection, document: Document) -> Result<(), StoreError>;

    async fn find(
        &self,
        collection: Collection,
        options: FindOptions,
    ) -> Result<Vec<Document>, StoreError>;

    async fn find_one(
        &self,
        collection: Collection,
        filter: Filter,
    ) -> Result<Option<Document>, StoreError> {
        let mut documents = self.find(collection, FindOptions::new(1).filter(filter)).await?;
        Ok(documents.pop())
    }

    /// Releases the backend's resources. Called once, after the server stops.
    async fn close(&self);
}
