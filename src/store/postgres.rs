use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::types::Json;
use sqlx::{
    Postgres,
    QueryBuilder,
};

use crate::store::{
    Collection,
    Document,
    DocumentStore,
    FindOptions,
    SortOrder,
    StoreError,
};

/// Postgres backend: every collection is a `(id, document JSONB)` table
/// created by the migrations in `./migrations`.
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(name = "running database migrations", skip(self))]
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn insert_error(collection: Collection, id: &str, error: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_unique_violation() {
            return StoreError::DuplicateKey {
                collection,
                key: db_error
                    .constraint()
                    .map(str::to_string)
                    .unwrap_or_else(|| id.to_string()),
            };
        }
    }
    StoreError::Database(error)
}

/// Postgres paging parameters are `BIGINT`; larger values saturate.
fn bound_paging(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Builds the scan query. Table and sort field names are compile-time
/// constants; only the filter value and paging are bound.
fn find_query(collection: Collection, options: &FindOptions) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!("SELECT document FROM {}", collection.name()));
    if let Some(filter) = &options.filter {
        query
            .push(" WHERE document ->> ")
            .push_bind(filter.field)
            .push(" = ")
            .push_bind(filter.value.clone());
    }
    if let Some((field, order)) = options.sort {
        let direction = match order {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        };
        query.push(format!(" ORDER BY document ->> '{}' {}", field, direction));
    }
    query
        .push(" OFFSET ")
        .push_bind(bound_paging(options.skip))
        .push(" LIMIT ")
        .push_bind(bound_paging(options.limit));
    query
}

#[async_trait]
impl DocumentStore for PostgresStore {
    #[tracing::instrument(
        name = "inserting document",
        skip(self, collection, document),
        fields(collection = %collection)
    )]
    async fn insert_one(&self, collection: Collection, document: Document) -> Result<(), StoreError> {
        let id = document
            .get("id")
            .and_then(|id| id.as_str())
            .ok_or(StoreError::MissingId { collection })?
            .to_string();
        sqlx::query(&format!(
            "INSERT INTO {} (id, document) VALUES ($1, $2)",
            collection.name()
        ))
        .bind(&id)
        .bind(Json(&document))
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(collection, &id, e))?;
        Ok(())
    }

    #[tracing::instrument(
        name = "scanning collection",
        skip(self, collection, options),
        fields(collection = %collection)
    )]
    async fn find(
        &self,
        collection: Collection,
        options: FindOptions,
    ) -> Result<Vec<Document>, StoreError> {
        let mut query = find_query(collection, &options);
        let rows: Vec<Json<Document>> = query
            .build_query_scalar()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|Json(document)| document).collect())
    }

    async fn close(&self) {
        tracing::info!("closing postgres connection pool");
        self.pool.close().await;
    }
}
