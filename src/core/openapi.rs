use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::localities::{dtos as localities_dtos, handlers as localities_handlers};
use crate::features::minerals::{dtos as minerals_dtos, handlers as minerals_handlers};
use crate::features::specimens::{dtos as specimens_dtos, handlers as specimens_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handler::get_me,
        // Localities
        localities_handlers::list_localities,
        localities_handlers::get_locality,
        localities_handlers::list_locality_children,
        localities_handlers::create_locality,
        localities_handlers::update_locality,
        localities_handlers::delete_locality,
        // Minerals
        minerals_handlers::list_minerals,
        minerals_handlers::get_mineral,
        minerals_handlers::create_mineral,
        minerals_handlers::update_mineral,
        minerals_handlers::delete_mineral,
        // Specimens
        specimens_handlers::list_my_specimens,
        specimens_handlers::get_specimen,
        specimens_handlers::create_specimen,
        specimens_handlers::update_specimen,
        specimens_handlers::delete_specimen,
        specimens_handlers::list_locality_specimens,
    ),
    components(
        schemas(
            Meta,
            // Auth
            auth::dto::MeResponseDto,
            ApiResponse<auth::dto::MeResponseDto>,
            // Localities
            localities_dtos::LocalityResponseDto,
            localities_dtos::LocalityDetailDto,
            localities_dtos::CreateLocalityDto,
            localities_dtos::UpdateLocalityDto,
            ApiResponse<localities_dtos::LocalityResponseDto>,
            ApiResponse<Vec<localities_dtos::LocalityResponseDto>>,
            ApiResponse<localities_dtos::LocalityDetailDto>,
            // Minerals
            minerals_dtos::MineralResponseDto,
            minerals_dtos::CreateMineralDto,
            minerals_dtos::UpdateMineralDto,
            ApiResponse<minerals_dtos::MineralResponseDto>,
            ApiResponse<Vec<minerals_dtos::MineralResponseDto>>,
            // Specimens
            specimens_dtos::SpecimenResponseDto,
            specimens_dtos::CreateSpecimenDto,
            specimens_dtos::UpdateSpecimenDto,
            ApiResponse<specimens_dtos::SpecimenResponseDto>,
            ApiResponse<Vec<specimens_dtos::SpecimenResponseDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Caller identity"),
        (name = "localities", description = "Hierarchical places where specimens were found"),
        (name = "minerals", description = "Shared mineral taxonomy (curated by admins)"),
        (name = "specimens", description = "Personal specimen collections"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Specimen Catalog API",
        version = "0.1.0",
        description = "API documentation for the specimen catalog",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
