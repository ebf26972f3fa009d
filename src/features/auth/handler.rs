use crate::core::error::Result;
use crate::features::auth::dto::MeResponseDto;
use crate::features::auth::model::AuthenticatedUser;
use crate::shared::types::ApiResponse;
use axum::Json;

/// Echo the identity carried by the bearer token
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = ApiResponse<MeResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(user: AuthenticatedUser) -> Result<Json<ApiResponse<MeResponseDto>>> {
    Ok(Json(ApiResponse::success(Some(user.into()), None, None)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::features::auth::dto::MeResponseDto;
    use crate::features::auth::routes;
    use crate::shared::test_helpers::with_admin_auth;
    use crate::shared::types::ApiResponse;

    #[tokio::test]
    async fn test_me_requires_caller() {
        let server = TestServer::new(routes::protected_routes()).unwrap();
        server
            .get("/api/auth/me")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_echoes_caller() {
        let server = TestServer::new(with_admin_auth(routes::protected_routes())).unwrap();
        let response = server.get("/api/auth/me").await;
        response.assert_status_ok();

        let body: ApiResponse<MeResponseDto> = response.json();
        let me = body.data.unwrap();
        assert_eq!(me.account_id, "test-admin-id");
        assert!(me.is_admin);
    }
}
