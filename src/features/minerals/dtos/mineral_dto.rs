use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::minerals::models::Mineral;
use crate::shared::nullable;
use crate::shared::validation::validate_not_blank;

// Query params for listing minerals
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct MineralQueryParams {
    /// Case-insensitive substring of the name or formula
    #[param(example = "quartz")]
    pub search: Option<String>,
}

// Create request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMineralDto {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub name: String,

    /// Chemical formula, e.g. "SiO2"
    #[validate(length(max = 200))]
    pub formula: Option<String>,

    /// e.g. "trigonal", "isometric"
    #[validate(length(max = 50))]
    pub crystal_system: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,
}

// Update request. Nullable fields: absent keeps, null clears.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMineralDto {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<String>)]
    pub formula: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<String>)]
    pub crystal_system: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

// Response DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MineralResponseDto {
    pub id: Uuid,
    pub name: String,
    pub formula: Option<String>,
    pub crystal_system: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Mineral> for MineralResponseDto {
    fn from(m: Mineral) -> Self {
        Self {
            id: m.id,
            name: m.name,
            formula: m.formula,
            crystal_system: m.crystal_system,
            description: m.description,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
