use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::specimens::models::Specimen;
use crate::shared::nullable;
use crate::shared::validation::{validate_not_blank, CATALOG_NUMBER_REGEX};

/// Reject a mineral list naming the same mineral twice
pub fn validate_distinct_ids(ids: &[Uuid]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(ids.len());
    if ids.iter().all(|id| seen.insert(*id)) {
        Ok(())
    } else {
        let mut err = ValidationError::new("duplicate");
        err.message = Some("mineral ids must be distinct".into());
        Err(err)
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct LocalitySpecimensQuery {
    /// Also list specimens from every locality below this one
    #[serde(default)]
    pub include_descendants: bool,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpecimenDto {
    /// Collector's own reference, unique per owner, e.g. "MIN-0042"
    #[validate(length(max = 100), regex(path = *CATALOG_NUMBER_REGEX, message = "catalog number may contain letters, digits, '-', '_', '/' and '.'"))]
    pub catalog_number: Option<String>,

    #[validate(length(min = 1, max = 300), custom(function = "validate_not_blank"))]
    pub title: String,

    #[validate(length(max = 10000))]
    pub description: Option<String>,

    pub locality_id: Option<Uuid>,

    /// Primary mineral first
    #[serde(default)]
    #[validate(length(max = 50), custom(function = "validate_distinct_ids"))]
    pub mineral_ids: Vec<Uuid>,

    #[serde(default)]
    pub is_public: bool,
}

/// Partial update. Nullable fields: absent keeps, null clears.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpecimenDto {
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<String>)]
    pub catalog_number: Option<Option<String>>,

    #[validate(length(min = 1, max = 300), custom(function = "validate_not_blank"))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[schema(value_type = Option<Uuid>)]
    pub locality_id: Option<Option<Uuid>>,

    /// Replaces the whole list when present
    #[validate(length(max = 50), custom(function = "validate_distinct_ids"))]
    pub mineral_ids: Option<Vec<Uuid>>,

    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpecimenResponseDto {
    pub id: Uuid,
    pub owner_id: String,
    pub catalog_number: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub locality_id: Option<Uuid>,
    pub mineral_ids: Vec<Uuid>,
    pub primary_mineral_id: Option<Uuid>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Specimen> for SpecimenResponseDto {
    fn from(s: Specimen) -> Self {
        let primary_mineral_id = s.primary_mineral_id();
        Self {
            id: s.id,
            owner_id: s.owner_id,
            catalog_number: s.catalog_number,
            title: s.title,
            description: s.description,
            locality_id: s.locality_id,
            mineral_ids: s.mineral_ids,
            primary_mineral_id,
            is_public: s.is_public,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_defaults() {
        let dto: CreateSpecimenDto =
            serde_json::from_value(json!({ "title": "Rogerley fluorite" })).unwrap();
        assert!(dto.mineral_ids.is_empty());
        assert!(!dto.is_public);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_rejects_bad_catalog_number() {
        let dto: CreateSpecimenDto = serde_json::from_value(json!({
            "title": "Rogerley fluorite",
            "catalogNumber": "cat no 5"
        }))
        .unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_rejects_duplicate_minerals() {
        let fluorite = Uuid::new_v4();
        let dto: CreateSpecimenDto = serde_json::from_value(json!({
            "title": "Rogerley fluorite",
            "mineralIds": [fluorite, fluorite]
        }))
        .unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_blank_title_rejected() {
        let dto: UpdateSpecimenDto = serde_json::from_value(json!({ "title": "  " })).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_tri_state_locality() {
        let clear: UpdateSpecimenDto =
            serde_json::from_value(json!({ "localityId": null })).unwrap();
        assert_eq!(clear.locality_id, Some(None));

        let keep: UpdateSpecimenDto = serde_json::from_value(json!({})).unwrap();
        assert_eq!(keep.locality_id, None);
    }

    #[test]
    fn test_locality_query_flag() {
        let query: LocalitySpecimensQuery =
            serde_json::from_value(json!({ "includeDescendants": true })).unwrap();
        assert!(query.include_descendants);
        assert!(!LocalitySpecimensQuery::default().include_descendants);
    }
}
