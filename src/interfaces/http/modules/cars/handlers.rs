//! Car listing handlers
//!
//! Public read endpoints plus the dealer-facing create/edit surface.
//! Every mutation applies the authorization rule before touching the
//! catalog: the caller must be a registered dealer, and edits of
//! someone else's car are rejected unless the caller is an admin.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::{CarQuery, DomainError};
use crate::interfaces::http::common::{domain_error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::AppState;

use super::dto::{
    parse_sorting, CarDetailsResponse, CarListResponse, CarQueryParams, CarResponse,
    CategoryResponse, CreateCarRequest, CreatedCarResponse, EditCarRequest, LatestCarResponse,
};

type ErrorResponse = (StatusCode, Json<ApiResponse<()>>);

// ── Latest-cars cache ────────────────────────────────────────────────

/// Read-through cache for the landing-page cars.
///
/// The latest listings change rarely relative to how often the landing
/// page is hit, so responses are held for a fixed TTL and refreshed
/// lazily on the first request after expiry.
#[derive(Clone)]
pub struct LatestCache {
    ttl: Duration,
    slot: Arc<RwLock<Option<(Instant, Vec<LatestCarResponse>)>>>,
}

impl LatestCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn get(&self) -> Option<Vec<LatestCarResponse>> {
        let guard = self.slot.read().await;
        match guard.as_ref() {
            Some((at, cars)) if at.elapsed() < self.ttl => Some(cars.clone()),
            _ => None,
        }
    }

    pub async fn store(&self, cars: Vec<LatestCarResponse>) {
        *self.slot.write().await = Some((Instant::now(), cars));
    }

    /// Drops the cached entry so the next read refetches.
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }
}

// ── Public read endpoints ────────────────────────────────────────────

/// List approved cars with filtering, sorting and pagination
#[utoipa::path(
    get,
    path = "/api/v1/cars",
    params(CarQueryParams),
    responses(
        (status = 200, description = "One page of approved cars", body = ApiResponse<CarListResponse>)
    ),
    tag = "Cars"
)]
pub async fn list_cars(
    State(state): State<AppState>,
    Query(params): Query<CarQueryParams>,
) -> Result<Json<ApiResponse<CarListResponse>>, ErrorResponse> {
    let query = CarQuery {
        brand: params.brand,
        search_term: params.search_term,
        sorting: parse_sorting(params.sorting.as_deref()),
        page: params.current_page,
        cars_per_page: Some(params.cars_per_page.clamp(1, 100)),
        public_only: true,
    };
    let page = state.listing.all(query).await.map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(page.into())))
}

/// Get a single car with dealer and category details
#[utoipa::path(
    get,
    path = "/api/v1/cars/{id}",
    params(("id" = i32, Path, description = "Car ID")),
    responses(
        (status = 200, description = "Car details", body = ApiResponse<CarDetailsResponse>),
        (status = 404, description = "Car not found")
    ),
    tag = "Cars"
)]
pub async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CarDetailsResponse>>, ErrorResponse> {
    let details = state.listing.details(id).await.map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(details.into())))
}

/// Distinct brands present in the catalog, sorted
#[utoipa::path(
    get,
    path = "/api/v1/cars/brands",
    responses(
        (status = 200, description = "Sorted distinct brands", body = ApiResponse<Vec<String>>)
    ),
    tag = "Cars"
)]
pub async fn list_brands(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<String>>>, ErrorResponse> {
    let brands = state.listing.brands().await.map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(brands)))
}

/// All car categories
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Categories", body = ApiResponse<Vec<CategoryResponse>>)
    ),
    tag = "Cars"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CategoryResponse>>>, ErrorResponse> {
    let categories = state
        .listing
        .categories()
        .await
        .map_err(domain_error_response)?;
    let body = categories
        .into_iter()
        .map(|c| CategoryResponse { id: c.id, name: c.name })
        .collect();
    Ok(Json(ApiResponse::success(body)))
}

/// Three most recently listed approved cars (cached)
#[utoipa::path(
    get,
    path = "/api/v1/cars/latest",
    responses(
        (status = 200, description = "Latest approved cars", body = ApiResponse<Vec<LatestCarResponse>>)
    ),
    tag = "Cars"
)]
pub async fn latest_cars(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LatestCarResponse>>>, ErrorResponse> {
    if let Some(cached) = state.latest_cache.get().await {
        debug!("Serving latest cars from cache");
        return Ok(Json(ApiResponse::success(cached)));
    }
    let cars = state.listing.latest().await.map_err(domain_error_response)?;
    let body: Vec<LatestCarResponse> = cars.into_iter().map(Into::into).collect();
    state.latest_cache.store(body.clone()).await;
    Ok(Json(ApiResponse::success(body)))
}

// ── Dealer endpoints ─────────────────────────────────────────────────

/// Cars belonging to the calling dealer, pending ones included
#[utoipa::path(
    get,
    path = "/api/v1/cars/mine",
    responses(
        (status = 200, description = "The caller's cars", body = ApiResponse<Vec<CarResponse>>),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Cars"
)]
pub async fn my_cars(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<CarResponse>>>, ErrorResponse> {
    let cars = state
        .listing
        .by_dealer_user(&user.user_id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(
        cars.into_iter().map(Into::into).collect(),
    )))
}

/// Create a car listing; it stays hidden until an admin approves it
#[utoipa::path(
    post,
    path = "/api/v1/cars",
    request_body = CreateCarRequest,
    responses(
        (status = 201, description = "Car created, pending approval", body = ApiResponse<CreatedCarResponse>),
        (status = 400, description = "Unknown category"),
        (status = 403, description = "Caller is not a registered dealer")
    ),
    security(("bearer_auth" = [])),
    tag = "Cars"
)]
pub async fn create_car(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(body): ValidatedJson<CreateCarRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedCarResponse>>), ErrorResponse> {
    let dealer_id = state
        .dealers
        .dealer_id_for(&user.user_id)
        .await
        .map_err(domain_error_response)?
        .ok_or_else(|| {
            domain_error_response(DomainError::Forbidden(
                "Only registered dealers can list cars".to_string(),
            ))
        })?;

    let id = state
        .visibility
        .create(car_input(body), dealer_id)
        .await
        .map_err(domain_error_response)?;
    info!("Dealer {} created car {}", dealer_id, id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CreatedCarResponse { id })),
    ))
}

/// Edit a car listing
///
/// A dealer edit sends the car back for re-approval; an admin edit
/// keeps it (or makes it) publicly visible.
#[utoipa::path(
    put,
    path = "/api/v1/cars/{id}",
    params(("id" = i32, Path, description = "Car ID")),
    request_body = EditCarRequest,
    responses(
        (status = 200, description = "Car updated"),
        (status = 400, description = "Unknown category"),
        (status = 403, description = "Caller does not own this car"),
        (status = 404, description = "Car not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Cars"
)]
pub async fn edit_car(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(body): ValidatedJson<EditCarRequest>,
) -> Result<Json<ApiResponse<()>>, ErrorResponse> {
    if !user.is_admin {
        let dealer_id = state
            .dealers
            .dealer_id_for(&user.user_id)
            .await
            .map_err(domain_error_response)?
            .ok_or_else(|| {
                domain_error_response(DomainError::Forbidden(
                    "Only registered dealers can edit cars".to_string(),
                ))
            })?;
        let owns = state
            .dealers
            .owns_car(id, dealer_id)
            .await
            .map_err(domain_error_response)?;
        if !owns {
            return Err(domain_error_response(DomainError::Forbidden(
                "You can only edit your own cars".to_string(),
            )));
        }
    }

    state
        .visibility
        .edit(id, car_input(body), user.is_admin)
        .await
        .map_err(domain_error_response)?;
    state.latest_cache.invalidate().await;
    Ok(Json(ApiResponse::success(())))
}

fn car_input(body: CreateCarRequest) -> crate::application::CarInput {
    crate::application::CarInput {
        brand: body.brand,
        model: body.model,
        description: body.description,
        image_url: body.image_url,
        year: body.year,
        category_id: body.category_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cache_misses_until_stored() {
        let cache = LatestCache::new(Duration::from_secs(60));
        assert!(cache.get().await.is_none());

        cache
            .store(vec![LatestCarResponse {
                id: 1,
                brand: "Audi".to_string(),
                model: "A4".to_string(),
                year: 2018,
                image_url: "https://cars.example/a4.jpg".to_string(),
            }])
            .await;
        let hit = cache.get().await.unwrap();
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].brand, "Audi");
    }

    #[tokio::test]
    async fn cache_expires_after_ttl() {
        let cache = LatestCache::new(Duration::from_millis(10));
        cache.store(Vec::new()).await;
        assert!(cache.get().await.is_some());

        tokio::time::sleep(Duration::from_millis(25)).await;
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn invalidate_clears_a_fresh_entry() {
        let cache = LatestCache::new(Duration::from_secs(60));
        cache.store(Vec::new()).await;
        cache.invalidate().await;
        assert!(cache.get().await.is_none());
    }
}
