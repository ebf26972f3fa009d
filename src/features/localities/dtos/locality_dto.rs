use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::localities::models::{Locality, LocalityWithAncestors};
use crate::shared::nullable;
use crate::shared::validation::validate_not_blank;

/// Query parameters for listing localities.
///
/// Precedence: a non-blank `search` ignores the hierarchy entirely; otherwise
/// `roots=true` lists top-level places; otherwise `parentId` lists that
/// node's children; with none of them every locality is returned. `kind`
/// narrows any of these.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListLocalitiesQuery {
    /// Only direct children of this locality
    pub parent_id: Option<Uuid>,

    /// Exact classification match, e.g. "mine"
    #[param(example = "mine")]
    pub kind: Option<String>,

    /// Case-insensitive substring of the name, across the whole tree
    #[param(example = "gerais")]
    pub search: Option<String>,

    /// Only localities without a parent
    #[serde(default)]
    pub roots: bool,
}

/// Response DTO for a locality
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalityResponseDto {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Locality> for LocalityResponseDto {
    fn from(l: Locality) -> Self {
        Self {
            id: l.id,
            name: l.name,
            kind: l.kind,
            latitude: l.latitude,
            longitude: l.longitude,
            parent_id: l.parent_id,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

/// A locality with its ancestor chain, nearest parent first
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalityDetailDto {
    #[serde(flatten)]
    pub locality: LocalityResponseDto,
    pub ancestors: Vec<LocalityResponseDto>,
    /// Leaf-first, e.g. "Rogerley Mine, Weardale, County Durham, England"
    pub full_path: String,
}

impl From<LocalityWithAncestors> for LocalityDetailDto {
    fn from(node: LocalityWithAncestors) -> Self {
        Self {
            locality: node.locality.into(),
            ancestors: node.ancestors.into_iter().map(Into::into).collect(),
            full_path: node.full_path,
        }
    }
}

/// Request body for creating a locality
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocalityDto {
    #[serde(default)]
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub name: String,

    /// Free-text classification such as "country", "mine" or "quarry"
    #[serde(default)]
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub kind: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    /// Omit for a root locality
    pub parent_id: Option<Uuid>,
}

/// Request body for a partial update.
///
/// Absent fields keep their value. For the nullable fields an explicit
/// `null` clears the value; `"parentId": null` turns the node into a root.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocalityDto {
    #[validate(length(min = 1, max = 200), custom(function = "validate_not_blank"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<f64>)]
    pub latitude: Option<Option<f64>>,

    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<f64>)]
    pub longitude: Option<Option<f64>>,

    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<Uuid>)]
    pub parent_id: Option<Option<Uuid>>,
}
