use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{translate_db_error, AppError, Result};
use crate::features::minerals::MineralService;
use crate::features::specimens::dtos::{
    CreateSpecimenDto, SpecimenResponseDto, UpdateSpecimenDto,
};
use crate::features::specimens::models::Specimen;
use crate::shared::nullable;
use crate::shared::types::PaginationQuery;
use crate::shared::validation::{normalize_optional, require_non_blank, CATALOG_NUMBER_REGEX};

const SPECIMEN_COLUMNS: &str = "id, owner_id, catalog_number, title, description, locality_id, \
     mineral_ids, is_public, created_at, updated_at";

fn handle_db_error(e: sqlx::Error) -> AppError {
    translate_db_error(
        e,
        "You already have a specimen with this catalog number",
        "Locality does not exist",
    )
}

fn specimen_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Specimen with id {} not found", id))
}

fn check_catalog_number(catalog_number: Option<&str>) -> Result<()> {
    match catalog_number {
        Some(value) if value.len() > 100 || !CATALOG_NUMBER_REGEX.is_match(value) => {
            Err(AppError::Validation(
                "catalog number may contain letters, digits, '-', '_', '/' and '.'".to_string(),
            ))
        }
        _ => Ok(()),
    }
}

pub struct SpecimenService {
    pool: PgPool,
    minerals: Arc<MineralService>,
}

impl SpecimenService {
    pub fn new(pool: PgPool, minerals: Arc<MineralService>) -> Self {
        Self { pool, minerals }
    }

    /// The caller's own specimens, newest first
    pub async fn list_own(
        &self,
        owner_id: &str,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<SpecimenResponseDto>, i64)> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM specimens WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        let sql = format!(
            r#"
            SELECT {}
            FROM specimens
            WHERE owner_id = $1
            ORDER BY created_at DESC, id ASC
            LIMIT $2 OFFSET $3
            "#,
            SPECIMEN_COLUMNS
        );

        let specimens = sqlx::query_as::<_, Specimen>(&sql)
            .bind(owner_id)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok((specimens.into_iter().map(Into::into).collect(), total))
    }

    /// Public specimens located at any of `locality_ids`, by title
    pub async fn list_public_at(&self, locality_ids: &[Uuid]) -> Result<Vec<SpecimenResponseDto>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM specimens
            WHERE is_public = TRUE AND locality_id = ANY($1)
            ORDER BY title ASC, id ASC
            "#,
            SPECIMEN_COLUMNS
        );

        let specimens = sqlx::query_as::<_, Specimen>(&sql)
            .bind(locality_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(specimens.into_iter().map(Into::into).collect())
    }

    /// A specimen the caller owns, or any public one. Hidden specimens read as missing.
    pub async fn get_visible(&self, id: Uuid, account_id: &str) -> Result<SpecimenResponseDto> {
        let specimen = self.find(id).await?;
        if !specimen.is_visible_to(account_id) {
            return Err(specimen_not_found(id));
        }
        Ok(specimen.into())
    }

    pub async fn create(
        &self,
        owner_id: &str,
        dto: CreateSpecimenDto,
    ) -> Result<SpecimenResponseDto> {
        let title = require_non_blank("title", &dto.title)?;
        let catalog_number = normalize_optional(dto.catalog_number);
        check_catalog_number(catalog_number.as_deref())?;
        self.check_minerals_exist(&dto.mineral_ids).await?;

        let sql = format!(
            r#"
            INSERT INTO specimens
                (owner_id, catalog_number, title, description, locality_id, mineral_ids, is_public)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            SPECIMEN_COLUMNS
        );

        let specimen = sqlx::query_as::<_, Specimen>(&sql)
            .bind(owner_id)
            .bind(catalog_number)
            .bind(&title)
            .bind(normalize_optional(dto.description))
            .bind(dto.locality_id)
            .bind(&dto.mineral_ids)
            .bind(dto.is_public)
            .fetch_one(&self.pool)
            .await
            .map_err(handle_db_error)?;

        tracing::info!(
            "Specimen created: id={}, owner_id={}, locality_id={:?}",
            specimen.id,
            specimen.owner_id,
            specimen.locality_id
        );

        Ok(specimen.into())
    }

    pub async fn update(
        &self,
        owner_id: &str,
        id: Uuid,
        dto: UpdateSpecimenDto,
    ) -> Result<SpecimenResponseDto> {
        let current = self.find_owned(id, owner_id).await?;

        let title = match dto.title {
            Some(ref title) => require_non_blank("title", title)?,
            None => current.title,
        };
        let catalog_number =
            normalize_optional(nullable::apply(current.catalog_number, dto.catalog_number));
        check_catalog_number(catalog_number.as_deref())?;
        let description = normalize_optional(nullable::apply(current.description, dto.description));
        let locality_id = nullable::apply(current.locality_id, dto.locality_id);
        let mineral_ids = match dto.mineral_ids {
            Some(ids) => {
                self.check_minerals_exist(&ids).await?;
                ids
            }
            None => current.mineral_ids,
        };
        let is_public = dto.is_public.unwrap_or(current.is_public);

        let sql = format!(
            r#"
            UPDATE specimens
            SET catalog_number = $2,
                title = $3,
                description = $4,
                locality_id = $5,
                mineral_ids = $6,
                is_public = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            SPECIMEN_COLUMNS
        );

        let specimen = sqlx::query_as::<_, Specimen>(&sql)
            .bind(id)
            .bind(catalog_number)
            .bind(&title)
            .bind(description)
            .bind(locality_id)
            .bind(&mineral_ids)
            .bind(is_public)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)?
            .ok_or_else(|| specimen_not_found(id))?;

        tracing::info!("Specimen updated: id={}", specimen.id);

        Ok(specimen.into())
    }

    pub async fn delete(&self, owner_id: &str, id: Uuid) -> Result<()> {
        self.find_owned(id, owner_id).await?;

        let result = sqlx::query("DELETE FROM specimens WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(specimen_not_found(id));
        }

        tracing::info!("Specimen deleted: id={}", id);

        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Specimen> {
        let sql = format!("SELECT {} FROM specimens WHERE id = $1", SPECIMEN_COLUMNS);

        sqlx::query_as::<_, Specimen>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| specimen_not_found(id))
    }

    /// Someone else's public specimen is forbidden; a private one reads as missing
    async fn find_owned(&self, id: Uuid, owner_id: &str) -> Result<Specimen> {
        let specimen = self.find(id).await?;

        if specimen.is_owned_by(owner_id) {
            Ok(specimen)
        } else if specimen.is_public {
            Err(AppError::Forbidden(
                "Only the owner can modify this specimen".to_string(),
            ))
        } else {
            Err(specimen_not_found(id))
        }
    }

    async fn check_minerals_exist(&self, mineral_ids: &[Uuid]) -> Result<()> {
        let missing = self.minerals.missing_ids(mineral_ids).await?;
        if let Some(first) = missing.first() {
            return Err(AppError::BadRequest(format!(
                "Mineral with id {} does not exist",
                first
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_catalog_number() {
        assert!(check_catalog_number(None).is_ok());
        assert!(check_catalog_number(Some("MIN-0042")).is_ok());
        assert!(matches!(
            check_catalog_number(Some("two words")),
            Err(AppError::Validation(_))
        ));
        assert!(check_catalog_number(Some(&"9".repeat(101))).is_err());
    }
}
