use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{
    LocalityQuery, LocalityStore, ParentFilter, DUPLICATE_SIBLING_MESSAGE,
    MISSING_PARENT_MESSAGE, STILL_REFERENCED_MESSAGE,
};
use crate::core::error::{translate_db_error, AppError, Result, PG_FOREIGN_KEY_VIOLATION};
use crate::features::localities::models::{Locality, NewLocality};
use crate::shared::search::contains_pattern;

const LOCALITY_COLUMNS: &str =
    "id, name, kind, latitude, longitude, parent_id, created_at, updated_at";

/// `LocalityStore` backed by the `localities` table
pub struct PgLocalityStore {
    pool: PgPool,
}

impl PgLocalityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error) -> AppError {
    translate_db_error(e, DUPLICATE_SIBLING_MESSAGE, MISSING_PARENT_MESSAGE)
}

#[async_trait]
impl LocalityStore for PgLocalityStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Locality>> {
        let sql = format!("SELECT {} FROM localities WHERE id = $1", LOCALITY_COLUMNS);

        sqlx::query_as::<_, Locality>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch locality {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn list(&self, query: &LocalityQuery) -> Result<Vec<Locality>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM localities WHERE TRUE",
            LOCALITY_COLUMNS
        ));

        match query.parent {
            ParentFilter::Any => {}
            ParentFilter::Roots => {
                builder.push(" AND parent_id IS NULL");
            }
            ParentFilter::ChildrenOf(parent_id) => {
                builder.push(" AND parent_id = ");
                builder.push_bind(parent_id);
            }
        }

        if let Some(kind) = &query.kind {
            builder.push(" AND kind = ");
            builder.push_bind(kind.clone());
        }

        if let Some(term) = &query.name_contains {
            builder.push(" AND name ILIKE ");
            builder.push_bind(contains_pattern(term));
            builder.push(" ESCAPE '\\'");
        }

        builder.push(" ORDER BY name ASC, id ASC");

        builder
            .build_query_as::<Locality>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list localities: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn insert(&self, new: NewLocality) -> Result<Locality> {
        let sql = format!(
            r#"
            INSERT INTO localities (name, kind, latitude, longitude, parent_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            LOCALITY_COLUMNS
        );

        sqlx::query_as::<_, Locality>(&sql)
            .bind(&new.name)
            .bind(&new.kind)
            .bind(new.latitude)
            .bind(new.longitude)
            .bind(new.parent_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn update(&self, locality: &Locality) -> Result<Option<Locality>> {
        let sql = format!(
            r#"
            UPDATE localities
            SET name = $2,
                kind = $3,
                latitude = $4,
                longitude = $5,
                parent_id = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            LOCALITY_COLUMNS
        );

        sqlx::query_as::<_, Locality>(&sql)
            .bind(locality.id)
            .bind(&locality.name)
            .bind(&locality.kind)
            .bind(locality.latitude)
            .bind(locality.longitude)
            .bind(locality.parent_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM localities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                // A child or specimen appeared after the guard checks ran
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.code().as_deref() == Some(PG_FOREIGN_KEY_VIOLATION) {
                        return AppError::Integrity(STILL_REFERENCED_MESSAGE.to_string());
                    }
                }
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn has_children(&self, id: Uuid) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM localities WHERE parent_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn is_referenced_by_specimens(&self, id: Uuid) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM specimens WHERE locality_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
