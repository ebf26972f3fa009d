use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{translate_db_error, AppError, Result};
use crate::features::minerals::dtos::{
    CreateMineralDto, MineralQueryParams, MineralResponseDto, UpdateMineralDto,
};
use crate::features::minerals::models::Mineral;
use crate::shared::nullable;
use crate::shared::search::contains_pattern;
use crate::shared::validation::{normalize_optional, require_non_blank};

const MINERAL_COLUMNS: &str =
    "id, name, formula, crystal_system, description, created_at, updated_at";

const DUPLICATE_NAME_MESSAGE: &str = "A mineral with this name already exists";
const IN_USE_MESSAGE: &str = "Mineral is listed on specimens and cannot be deleted";

fn handle_db_error(e: sqlx::Error) -> AppError {
    translate_db_error(e, DUPLICATE_NAME_MESSAGE, "Referenced record does not exist")
}

fn mineral_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Mineral with id {} not found", id))
}

pub struct MineralService {
    pool: PgPool,
}

impl MineralService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List minerals by name, optionally filtered by a name/formula substring
    pub async fn list(&self, params: &MineralQueryParams) -> Result<Vec<MineralResponseDto>> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM minerals", MINERAL_COLUMNS));

        if let Some(term) = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            let pattern = contains_pattern(term);
            builder.push(" WHERE name ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" ESCAPE '\\' OR formula ILIKE ");
            builder.push_bind(pattern);
            builder.push(" ESCAPE '\\'");
        }

        builder.push(" ORDER BY name ASC");

        let minerals = builder
            .build_query_as::<Mineral>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(minerals.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<MineralResponseDto> {
        self.find(id).await.map(Into::into)
    }

    pub async fn create(&self, dto: CreateMineralDto) -> Result<MineralResponseDto> {
        let name = require_non_blank("name", &dto.name)?;

        let sql = format!(
            r#"
            INSERT INTO minerals (name, formula, crystal_system, description)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            MINERAL_COLUMNS
        );

        let mineral = sqlx::query_as::<_, Mineral>(&sql)
            .bind(&name)
            .bind(normalize_optional(dto.formula))
            .bind(normalize_optional(dto.crystal_system))
            .bind(normalize_optional(dto.description))
            .fetch_one(&self.pool)
            .await
            .map_err(handle_db_error)?;

        tracing::info!("Mineral created: id={}, name={}", mineral.id, mineral.name);

        Ok(mineral.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateMineralDto) -> Result<MineralResponseDto> {
        let current = self.find(id).await?;

        let name = match dto.name {
            Some(ref name) => require_non_blank("name", name)?,
            None => current.name,
        };
        let formula = normalize_optional(nullable::apply(current.formula, dto.formula));
        let crystal_system =
            normalize_optional(nullable::apply(current.crystal_system, dto.crystal_system));
        let description =
            normalize_optional(nullable::apply(current.description, dto.description));

        let sql = format!(
            r#"
            UPDATE minerals
            SET name = $2, formula = $3, crystal_system = $4, description = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            MINERAL_COLUMNS
        );

        let mineral = sqlx::query_as::<_, Mineral>(&sql)
            .bind(id)
            .bind(&name)
            .bind(formula)
            .bind(crystal_system)
            .bind(description)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)?
            .ok_or_else(|| mineral_not_found(id))?;

        tracing::info!("Mineral updated: id={}", mineral.id);

        Ok(mineral.into())
    }

    /// Delete a mineral no specimen lists
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let in_use = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM specimens WHERE $1 = ANY(mineral_ids))",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if in_use {
            return Err(AppError::Integrity(IN_USE_MESSAGE.to_string()));
        }

        let result = sqlx::query("DELETE FROM minerals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(mineral_not_found(id));
        }

        tracing::info!("Mineral deleted: id={}", id);

        Ok(())
    }

    /// Ids from `ids` that name no mineral, in input order
    pub async fn missing_ids(&self, ids: &[Uuid]) -> Result<Vec<Uuid>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found: Vec<Uuid> =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM minerals WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database)?;

        Ok(ids
            .iter()
            .filter(|id| !found.contains(id))
            .copied()
            .collect())
    }

    async fn find(&self, id: Uuid) -> Result<Mineral> {
        let sql = format!("SELECT {} FROM minerals WHERE id = $1", MINERAL_COLUMNS);

        sqlx::query_as::<_, Mineral>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| mineral_not_found(id))
    }
}
