//! Admin moderation handlers
//!
//! Admins see the full catalog, pending cars included, and flip the
//! visibility flag that gates what the public listing shows.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{CarQuery, DomainError};
use crate::interfaces::http::common::{domain_error_response, ApiResponse};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::cars::dto::CarListResponse;
use crate::interfaces::http::modules::AppState;

type ErrorResponse = (StatusCode, Json<ApiResponse<()>>);

fn require_admin(user: &AuthenticatedUser) -> Result<(), ErrorResponse> {
    if user.is_admin {
        Ok(())
    } else {
        Err(domain_error_response(DomainError::Forbidden(
            "Admin privilege required".to_string(),
        )))
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VisibilityResponse {
    pub car_id: i32,
    pub is_public: bool,
}

/// Every car in the catalog regardless of approval state
#[utoipa::path(
    get,
    path = "/api/v1/admin/cars",
    responses(
        (status = 200, description = "Full unpaged catalog", body = ApiResponse<CarListResponse>),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_all_cars(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<CarListResponse>>, ErrorResponse> {
    require_admin(&user)?;
    let page = state
        .listing
        .all(CarQuery::unbounded())
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(page.into())))
}

/// Flip a car between approved and hidden
#[utoipa::path(
    post,
    path = "/api/v1/admin/cars/{id}/toggle-visibility",
    params(("id" = i32, Path, description = "Car ID")),
    responses(
        (status = 200, description = "New visibility state", body = ApiResponse<VisibilityResponse>),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Car not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn toggle_visibility(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<VisibilityResponse>>, ErrorResponse> {
    require_admin(&user)?;
    let is_public = state
        .visibility
        .toggle_visibility(id)
        .await
        .map_err(domain_error_response)?;
    state.latest_cache.invalidate().await;
    info!(car_id = id, is_public, admin = %user.user_id, "Visibility toggled");
    Ok(Json(ApiResponse::success(VisibilityResponse {
        car_id: id,
        is_public,
    })))
}
