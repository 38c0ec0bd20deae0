//! Dealer registration and profile handlers

use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::interfaces::http::common::{domain_error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::AppState;

use super::dto::{BecomeDealerRequest, DealerProfileResponse, DealerResponse};

type ErrorResponse = (StatusCode, Json<ApiResponse<()>>);

/// Register the calling user as a dealer
#[utoipa::path(
    post,
    path = "/api/v1/dealers",
    request_body = BecomeDealerRequest,
    responses(
        (status = 201, description = "Dealer registered", body = ApiResponse<DealerResponse>),
        (status = 409, description = "User is already a dealer"),
        (status = 422, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Dealers"
)]
pub async fn become_dealer(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(body): ValidatedJson<BecomeDealerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DealerResponse>>), ErrorResponse> {
    let dealer = state
        .dealers
        .register_dealer(&user.user_id, &body.name, &body.phone_number)
        .await
        .map_err(domain_error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(dealer.into())),
    ))
}

/// The calling user's dealer standing
#[utoipa::path(
    get,
    path = "/api/v1/dealers/me",
    responses(
        (status = 200, description = "Dealer profile, or dealer_id 0 when not registered", body = ApiResponse<DealerProfileResponse>),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Dealers"
)]
pub async fn my_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<DealerProfileResponse>>, ErrorResponse> {
    let profile = match state
        .dealers
        .dealer_for(&user.user_id)
        .await
        .map_err(domain_error_response)?
    {
        Some(dealer) => DealerProfileResponse {
            dealer_id: dealer.id,
            is_dealer: true,
            name: Some(dealer.name),
            phone_number: Some(dealer.phone_number),
        },
        None => DealerProfileResponse {
            dealer_id: 0,
            is_dealer: false,
            name: None,
            phone_number: None,
        },
    };
    Ok(Json(ApiResponse::success(profile)))
}
