use axum::{extract::Path, extract::Query, extract::State, http::StatusCode, Json};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::minerals::dtos::{
    CreateMineralDto, MineralQueryParams, MineralResponseDto, UpdateMineralDto,
};
use crate::features::minerals::services::MineralService;
use crate::shared::types::{ApiResponse, Meta};

/// List minerals
#[utoipa::path(
    get,
    path = "/api/minerals",
    params(MineralQueryParams),
    responses(
        (status = 200, description = "Minerals ordered by name", body = ApiResponse<Vec<MineralResponseDto>>),
    ),
    tag = "minerals"
)]
pub async fn list_minerals(
    State(service): State<Arc<MineralService>>,
    Query(params): Query<MineralQueryParams>,
) -> Result<Json<ApiResponse<Vec<MineralResponseDto>>>> {
    let minerals = service.list(&params).await?;
    let total = minerals.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(minerals),
        None,
        Some(Meta { total }),
    )))
}

/// Get a mineral by ID
#[utoipa::path(
    get,
    path = "/api/minerals/{id}",
    params(
        ("id" = Uuid, Path, description = "Mineral ID")
    ),
    responses(
        (status = 200, description = "Mineral found", body = ApiResponse<MineralResponseDto>),
        (status = 404, description = "Mineral not found")
    ),
    tag = "minerals"
)]
pub async fn get_mineral(
    State(service): State<Arc<MineralService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MineralResponseDto>>> {
    let mineral = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(mineral), None, None)))
}

/// Create a mineral (admin only)
#[utoipa::path(
    post,
    path = "/api/minerals",
    request_body = CreateMineralDto,
    responses(
        (status = 201, description = "Mineral created", body = ApiResponse<MineralResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 409, description = "Name already taken")
    ),
    tag = "minerals",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_mineral(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<MineralService>>,
    AppJson(dto): AppJson<CreateMineralDto>,
) -> Result<(StatusCode, Json<ApiResponse<MineralResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let mineral = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(mineral), None, None)),
    ))
}

/// Update a mineral (admin only)
#[utoipa::path(
    patch,
    path = "/api/minerals/{id}",
    params(
        ("id" = Uuid, Path, description = "Mineral ID")
    ),
    request_body = UpdateMineralDto,
    responses(
        (status = 200, description = "Mineral updated", body = ApiResponse<MineralResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Mineral not found"),
        (status = 409, description = "Name already taken")
    ),
    tag = "minerals",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_mineral(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<MineralService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateMineralDto>,
) -> Result<Json<ApiResponse<MineralResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let mineral = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(mineral), None, None)))
}

/// Delete a mineral (admin only)
#[utoipa::path(
    delete,
    path = "/api/minerals/{id}",
    params(
        ("id" = Uuid, Path, description = "Mineral ID")
    ),
    responses(
        (status = 200, description = "Mineral deleted"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Mineral not found"),
        (status = 409, description = "Mineral is listed on specimens")
    ),
    tag = "minerals",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_mineral(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<MineralService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}
