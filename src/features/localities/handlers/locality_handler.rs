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
use crate::features::localities::dtos::{
    CreateLocalityDto, ListLocalitiesQuery, LocalityDetailDto, LocalityResponseDto,
    UpdateLocalityDto,
};
use crate::features::localities::models::Locality;
use crate::features::localities::services::LocalityService;
use crate::shared::types::{ApiResponse, Meta};

fn to_list_response(localities: Vec<Locality>) -> Json<ApiResponse<Vec<LocalityResponseDto>>> {
    let total = localities.len() as i64;
    let items = localities.into_iter().map(Into::into).collect();
    Json(ApiResponse::success(Some(items), None, Some(Meta { total })))
}

/// List localities
///
/// Roots, children of a parent, a flat name search, or everything.
#[utoipa::path(
    get,
    path = "/api/localities",
    params(ListLocalitiesQuery),
    responses(
        (status = 200, description = "Localities ordered by name", body = ApiResponse<Vec<LocalityResponseDto>>),
    ),
    tag = "localities"
)]
pub async fn list_localities(
    State(service): State<Arc<LocalityService>>,
    Query(params): Query<ListLocalitiesQuery>,
) -> Result<Json<ApiResponse<Vec<LocalityResponseDto>>>> {
    let localities = service.list(&params).await?;
    Ok(to_list_response(localities))
}

/// Get a locality with its ancestors and full path
#[utoipa::path(
    get,
    path = "/api/localities/{id}",
    params(
        ("id" = Uuid, Path, description = "Locality ID")
    ),
    responses(
        (status = 200, description = "Locality found", body = ApiResponse<LocalityDetailDto>),
        (status = 404, description = "Locality not found")
    ),
    tag = "localities"
)]
pub async fn get_locality(
    State(service): State<Arc<LocalityService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<LocalityDetailDto>>> {
    let node = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(node.into()), None, None)))
}

/// List the direct children of a locality
#[utoipa::path(
    get,
    path = "/api/localities/{id}/children",
    params(
        ("id" = Uuid, Path, description = "Parent locality ID")
    ),
    responses(
        (status = 200, description = "Children ordered by name", body = ApiResponse<Vec<LocalityResponseDto>>),
    ),
    tag = "localities"
)]
pub async fn list_locality_children(
    State(service): State<Arc<LocalityService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<LocalityResponseDto>>>> {
    let children = service.list_children(id).await?;
    Ok(to_list_response(children))
}

/// Create a locality
#[utoipa::path(
    post,
    path = "/api/localities",
    request_body = CreateLocalityDto,
    responses(
        (status = 201, description = "Locality created", body = ApiResponse<LocalityResponseDto>),
        (status = 400, description = "Validation error or unknown parent"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "A sibling with this name already exists")
    ),
    tag = "localities",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_locality(
    user: AuthenticatedUser,
    State(service): State<Arc<LocalityService>>,
    AppJson(dto): AppJson<CreateLocalityDto>,
) -> Result<(StatusCode, Json<ApiResponse<LocalityResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    tracing::debug!("Creating locality on behalf of {}", user.account_id);
    let locality = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(locality.into()), None, None)),
    ))
}

/// Partially update a locality
#[utoipa::path(
    patch,
    path = "/api/localities/{id}",
    params(
        ("id" = Uuid, Path, description = "Locality ID")
    ),
    request_body = UpdateLocalityDto,
    responses(
        (status = 200, description = "Locality updated", body = ApiResponse<LocalityResponseDto>),
        (status = 400, description = "Validation error, unknown parent or cycle"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Locality not found"),
        (status = 409, description = "A sibling with this name already exists")
    ),
    tag = "localities",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_locality(
    user: AuthenticatedUser,
    State(service): State<Arc<LocalityService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateLocalityDto>,
) -> Result<Json<ApiResponse<LocalityResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    tracing::debug!("Updating locality {} on behalf of {}", id, user.account_id);
    let locality = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(locality.into()), None, None)))
}

/// Delete a locality
///
/// Refused while the locality has children or specimens reference it.
#[utoipa::path(
    delete,
    path = "/api/localities/{id}",
    params(
        ("id" = Uuid, Path, description = "Locality ID")
    ),
    responses(
        (status = 200, description = "Locality deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Locality not found"),
        (status = 409, description = "Locality still has children or specimens")
    ),
    tag = "localities",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_locality(
    user: AuthenticatedUser,
    State(service): State<Arc<LocalityService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    tracing::debug!("Deleting locality {} on behalf of {}", id, user.account_id);
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}
