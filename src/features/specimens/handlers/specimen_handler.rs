use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::localities::LocalityService;
use crate::features::specimens::dtos::{
    CreateSpecimenDto, LocalitySpecimensQuery, SpecimenResponseDto, UpdateSpecimenDto,
};
use crate::features::specimens::services::SpecimenService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Specimen handlers also resolve locality subtrees
#[derive(Clone)]
pub struct SpecimenState {
    pub specimens: Arc<SpecimenService>,
    pub localities: Arc<LocalityService>,
}

/// List the caller's specimens
#[utoipa::path(
    get,
    path = "/api/specimens",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Caller's specimens, newest first", body = ApiResponse<Vec<SpecimenResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "specimens",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_my_specimens(
    user: AuthenticatedUser,
    State(state): State<SpecimenState>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<SpecimenResponseDto>>>> {
    let (specimens, total) = state
        .specimens
        .list_own(&user.account_id, &pagination)
        .await?;
    Ok(Json(ApiResponse::success(
        Some(specimens),
        None,
        Some(Meta { total }),
    )))
}

/// Get a specimen
#[utoipa::path(
    get,
    path = "/api/specimens/{id}",
    params(
        ("id" = Uuid, Path, description = "Specimen ID")
    ),
    responses(
        (status = 200, description = "Specimen found", body = ApiResponse<SpecimenResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Specimen not found or private")
    ),
    tag = "specimens",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_specimen(
    user: AuthenticatedUser,
    State(state): State<SpecimenState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SpecimenResponseDto>>> {
    let specimen = state.specimens.get_visible(id, &user.account_id).await?;
    Ok(Json(ApiResponse::success(Some(specimen), None, None)))
}

/// Catalogue a specimen
#[utoipa::path(
    post,
    path = "/api/specimens",
    request_body = CreateSpecimenDto,
    responses(
        (status = 201, description = "Specimen created", body = ApiResponse<SpecimenResponseDto>),
        (status = 400, description = "Validation error, unknown locality or mineral"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Catalog number already used")
    ),
    tag = "specimens",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_specimen(
    user: AuthenticatedUser,
    State(state): State<SpecimenState>,
    AppJson(dto): AppJson<CreateSpecimenDto>,
) -> Result<(StatusCode, Json<ApiResponse<SpecimenResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let specimen = state.specimens.create(&user.account_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(specimen), None, None)),
    ))
}

/// Update one of the caller's specimens
#[utoipa::path(
    patch,
    path = "/api/specimens/{id}",
    params(
        ("id" = Uuid, Path, description = "Specimen ID")
    ),
    request_body = UpdateSpecimenDto,
    responses(
        (status = 200, description = "Specimen updated", body = ApiResponse<SpecimenResponseDto>),
        (status = 400, description = "Validation error, unknown locality or mineral"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Specimen not found"),
        (status = 409, description = "Catalog number already used")
    ),
    tag = "specimens",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_specimen(
    user: AuthenticatedUser,
    State(state): State<SpecimenState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateSpecimenDto>,
) -> Result<Json<ApiResponse<SpecimenResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let specimen = state.specimens.update(&user.account_id, id, dto).await?;
    Ok(Json(ApiResponse::success(Some(specimen), None, None)))
}

/// Delete one of the caller's specimens
#[utoipa::path(
    delete,
    path = "/api/specimens/{id}",
    params(
        ("id" = Uuid, Path, description = "Specimen ID")
    ),
    responses(
        (status = 200, description = "Specimen deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Specimen not found")
    ),
    tag = "specimens",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_specimen(
    user: AuthenticatedUser,
    State(state): State<SpecimenState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    state.specimens.delete(&user.account_id, id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}

/// Public specimens found at a locality
///
/// With `includeDescendants=true` every locality below it counts too.
#[utoipa::path(
    get,
    path = "/api/localities/{id}/specimens",
    params(
        ("id" = Uuid, Path, description = "Locality ID"),
        LocalitySpecimensQuery
    ),
    responses(
        (status = 200, description = "Public specimens ordered by title", body = ApiResponse<Vec<SpecimenResponseDto>>),
        (status = 404, description = "Locality not found")
    ),
    tag = "specimens"
)]
pub async fn list_locality_specimens(
    State(state): State<SpecimenState>,
    Path(id): Path<Uuid>,
    Query(query): Query<LocalitySpecimensQuery>,
) -> Result<Json<ApiResponse<Vec<SpecimenResponseDto>>>> {
    let locality_ids = if query.include_descendants {
        state.localities.descendant_ids(id).await?
    } else {
        state.localities.ensure_exists(id).await?;
        vec![id]
    };

    let specimens = state.specimens.list_public_at(&locality_ids).await?;
    let total = specimens.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(specimens),
        None,
        Some(Meta { total }),
    )))
}
