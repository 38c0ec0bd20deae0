//! API Router with Swagger UI

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{admin, cars, dealers, health, AppState};

/// Security scheme modifier for OpenAPI
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
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Cars (public)
        cars::handlers::list_cars,
        cars::handlers::get_car,
        cars::handlers::list_brands,
        cars::handlers::list_categories,
        cars::handlers::latest_cars,
        // Cars (dealer)
        cars::handlers::my_cars,
        cars::handlers::create_car,
        cars::handlers::edit_car,
        // Dealers
        dealers::handlers::become_dealer,
        dealers::handlers::my_profile,
        // Admin
        admin::handlers::list_all_cars,
        admin::handlers::toggle_visibility,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            // Cars
            cars::dto::CarResponse,
            cars::dto::CarListResponse,
            cars::dto::CarDetailsResponse,
            cars::dto::LatestCarResponse,
            cars::dto::CategoryResponse,
            cars::dto::CreateCarRequest,
            cars::dto::CreatedCarResponse,
            // Dealers
            dealers::dto::BecomeDealerRequest,
            dealers::dto::DealerResponse,
            dealers::dto::DealerProfileResponse,
            // Admin
            admin::handlers::VisibilityResponse,
            // Health
            health::handlers::HealthResponse,
            health::handlers::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Cars", description = "Car catalog: public browsing plus dealer listing management"),
        (name = "Dealers", description = "Dealer registration and profile"),
        (name = "Admin", description = "Catalog moderation: full listing and visibility approval"),
    ),
    info(
        title = "Carlane Marketplace API",
        version = "1.0.0",
        description = "REST API for browsing and managing car listings",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    db: Option<DatabaseConnection>,
    jwt_config: JwtConfig,
    latest_cache_ttl: Duration,
) -> Router {
    let middleware_state = AuthState { jwt_config };
    let app_state = AppState::new(repos, latest_cache_ttl);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public catalog routes. Static segments like "brands" and "latest"
    // take priority over `/{id}`, so they never parse as car ids.
    let public_routes = Router::new()
        .route("/cars", get(cars::handlers::list_cars))
        .route("/cars/brands", get(cars::handlers::list_brands))
        .route("/cars/latest", get(cars::handlers::latest_cars))
        .route("/cars/{id}", get(cars::handlers::get_car))
        .route("/categories", get(cars::handlers::list_categories))
        .with_state(app_state.clone());

    // Dealer routes (protected)
    let dealer_routes = Router::new()
        .route("/cars", post(cars::handlers::create_car))
        .route("/cars/mine", get(cars::handlers::my_cars))
        .route("/cars/{id}", put(cars::handlers::edit_car))
        .route("/dealers", post(dealers::handlers::become_dealer))
        .route("/dealers/me", get(dealers::handlers::my_profile))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(app_state.clone());

    // Admin routes (protected; handlers enforce the admin role)
    let admin_routes = Router::new()
        .route("/cars", get(admin::handlers::list_all_cars))
        .route(
            "/cars/{id}/toggle-visibility",
            post(admin::handlers::toggle_visibility),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(app_state);

    let health_state = health::handlers::HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::handlers::health_check))
        .with_state(health_state)
        // Catalog
        .nest("/api/v1", public_routes)
        .nest("/api/v1", dealer_routes)
        // Moderation
        .nest("/api/v1/admin", admin_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use tower::ServiceExt;

    use crate::infrastructure::crypto::jwt::TokenClaims;
    use crate::infrastructure::storage::memory::InMemoryCatalog;
    use crate::infrastructure::storage::test_support::seed_catalog;

    const SECRET: &str = "router-test-secret";

    async fn test_router() -> Router {
        let catalog = Arc::new(InMemoryCatalog::new());
        seed_catalog(&catalog).await;
        create_api_router(
            catalog,
            None,
            JwtConfig {
                secret: SECRET.to_string(),
                ..Default::default()
            },
            Duration::from_secs(900),
        )
    }

    fn token(user_id: &str, role: &str) -> String {
        let claims = TokenClaims {
            sub: user_id.to_string(),
            role: role.to_string(),
            exp: Utc::now().timestamp() + 3600,
            iss: JwtConfig::default().issuer,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    async fn send(router: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = router.oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn public_listing_returns_only_approved_cars() {
        let router = test_router().await;
        let req = Request::builder()
            .uri("/api/v1/cars")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router, req).await;

        assert_eq!(status, StatusCode::OK);
        // seed has 5 cars, 3 approved
        assert_eq!(body["data"]["total_cars"], 3);
        for car in body["data"]["cars"].as_array().unwrap() {
            assert_eq!(car["is_public"], true);
        }
    }

    #[tokio::test]
    async fn brand_filter_narrows_the_page() {
        let router = test_router().await;
        let req = Request::builder()
            .uri("/api/v1/cars?brand=Audi")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router, req).await;

        assert_eq!(status, StatusCode::OK);
        // only the approved Audi counts
        assert_eq!(body["data"]["total_cars"], 1);
        assert_eq!(body["data"]["cars"][0]["brand"], "Audi");
    }

    #[tokio::test]
    async fn unknown_car_is_404() {
        let router = test_router().await;
        let req = Request::builder()
            .uri("/api/v1/cars/404")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router, req).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        let router = test_router().await;
        let req = Request::builder()
            .method(Method::GET)
            .uri("/api/v1/dealers/me")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(router, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn dealer_profile_uses_zero_sentinel_when_unregistered() {
        let router = test_router().await;
        let req = Request::builder()
            .uri("/api/v1/dealers/me")
            .header(header::AUTHORIZATION, format!("Bearer {}", token("user-9", "user")))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router, req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["dealer_id"], 0);
        assert_eq!(body["data"]["is_dealer"], false);
    }

    #[tokio::test]
    async fn non_dealer_cannot_create_a_car() {
        let router = test_router().await;
        let payload = serde_json::json!({
            "brand": "Skoda",
            "model": "Octavia",
            "description": "Well kept family liftback",
            "image_url": "https://cars.example/octavia.jpg",
            "year": 2020,
            "category_id": 2
        });
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/cars")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", token("user-9", "user")))
            .body(Body::from(payload.to_string()))
            .unwrap();
        let (status, _) = send(router, req).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn dealer_creates_a_pending_car() {
        let router = test_router().await;
        let payload = serde_json::json!({
            "brand": "Skoda",
            "model": "Octavia",
            "description": "Well kept family liftback",
            "image_url": "https://cars.example/octavia.jpg",
            "year": 2020,
            "category_id": 2
        });
        // user-1 is seeded as dealer 1
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/cars")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", token("user-1", "user")))
            .body(Body::from(payload.to_string()))
            .unwrap();
        let (status, body) = send(router.clone(), req).await;

        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_i64().unwrap();

        // the new car is hidden from the public listing
        let req = Request::builder()
            .uri("/api/v1/cars?brand=Skoda")
            .body(Body::empty())
            .unwrap();
        let (_, body) = send(router, req).await;
        assert_eq!(body["data"]["total_cars"], 0);
        assert!(id > 0);
    }

    #[tokio::test]
    async fn admin_routes_reject_plain_users() {
        let router = test_router().await;
        let req = Request::builder()
            .uri("/api/v1/admin/cars")
            .header(header::AUTHORIZATION, format!("Bearer {}", token("user-1", "user")))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(router, req).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_sees_the_full_catalog_and_toggles_visibility() {
        let router = test_router().await;
        let admin = token("admin-1", "admin");

        let req = Request::builder()
            .uri("/api/v1/admin/cars")
            .header(header::AUTHORIZATION, format!("Bearer {}", admin))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router.clone(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total_cars"], 5);
        assert!(body["data"]["cars_per_page"].is_null());

        // approve the pending Audi Q5 (seed car 3)
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/admin/cars/3/toggle-visibility")
            .header(header::AUTHORIZATION, format!("Bearer {}", admin))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router.clone(), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["is_public"], true);

        let req = Request::builder()
            .uri("/api/v1/cars")
            .body(Body::empty())
            .unwrap();
        let (_, body) = send(router, req).await;
        assert_eq!(body["data"]["total_cars"], 4);
    }

    #[tokio::test]
    async fn unknown_category_on_create_is_bad_request() {
        let router = test_router().await;
        let payload = serde_json::json!({
            "brand": "Skoda",
            "model": "Octavia",
            "description": "Well kept family liftback",
            "image_url": "https://cars.example/octavia.jpg",
            "year": 2020,
            "category_id": 999
        });
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/cars")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", token("user-1", "user")))
            .body(Body::from(payload.to_string()))
            .unwrap();
        let (status, body) = send(router, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn invalid_create_payload_is_unprocessable() {
        let router = test_router().await;
        let payload = serde_json::json!({
            "brand": "S",
            "model": "Octavia",
            "description": "too short",
            "image_url": "not a url",
            "year": 1800,
            "category_id": 2
        });
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/cars")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", token("user-1", "user")))
            .body(Body::from(payload.to_string()))
            .unwrap();
        let (status, _) = send(router, req).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn health_without_database_reports_in_memory() {
        let router = test_router().await;
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"]["status"], "in-memory");
    }
}
