//! Car listing DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Car, CarDetails, CarPage, CarSorting};

/// Listing query parameters for the public cars endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct CarQueryParams {
    /// Exact brand filter
    pub brand: Option<String>,
    /// Case-insensitive search over brand+model or description
    pub search_term: Option<String>,
    /// One of: "recency" (default), "year", "brand_model"
    pub sorting: Option<String>,
    /// 1-based page. Default: 1
    #[serde(default = "default_page")]
    pub current_page: u64,
    /// Items per page (1-100). Default: 12
    #[serde(default = "default_cars_per_page")]
    pub cars_per_page: u64,
}

fn default_page() -> u64 {
    1
}

fn default_cars_per_page() -> u64 {
    12
}

pub fn parse_sorting(s: Option<&str>) -> CarSorting {
    match s {
        Some("year") => CarSorting::YearDesc,
        Some("brand_model") => CarSorting::BrandModelAsc,
        _ => CarSorting::Recency,
    }
}

/// Car listing entry
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CarResponse {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub image_url: String,
    pub category_id: i32,
    pub is_public: bool,
}

impl From<Car> for CarResponse {
    fn from(c: Car) -> Self {
        Self {
            id: c.id,
            brand: c.brand,
            model: c.model,
            year: c.year,
            image_url: c.image_url,
            category_id: c.category_id,
            is_public: c.is_public,
        }
    }
}

/// One page of listings
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CarListResponse {
    pub total_cars: u64,
    pub current_page: u64,
    /// Absent for the unbounded admin listing
    pub cars_per_page: Option<u64>,
    pub cars: Vec<CarResponse>,
}

impl From<CarPage> for CarListResponse {
    fn from(page: CarPage) -> Self {
        Self {
            total_cars: page.total_cars,
            current_page: page.current_page,
            cars_per_page: page.cars_per_page,
            cars: page.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Full car view with dealer and category names resolved
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CarDetailsResponse {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub description: String,
    pub image_url: String,
    pub year: i32,
    pub category_id: i32,
    pub category_name: String,
    pub dealer_id: i32,
    pub dealer_name: String,
    pub dealer_phone: String,
    pub is_public: bool,
}

impl From<CarDetails> for CarDetailsResponse {
    fn from(d: CarDetails) -> Self {
        Self {
            id: d.car.id,
            brand: d.car.brand,
            model: d.car.model,
            description: d.car.description,
            image_url: d.car.image_url,
            year: d.car.year,
            category_id: d.car.category_id,
            category_name: d.category_name,
            dealer_id: d.car.dealer_id,
            dealer_name: d.dealer_name,
            dealer_phone: d.dealer_phone,
            is_public: d.car.is_public,
        }
    }
}

/// Landing-page card
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LatestCarResponse {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub image_url: String,
}

impl From<Car> for LatestCarResponse {
    fn from(c: Car) -> Self {
        Self {
            id: c.id,
            brand: c.brand,
            model: c.model,
            year: c.year,
            image_url: c.image_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCarRequest {
    #[validate(length(min = 2, max = 20, message = "brand must be 2-20 characters"))]
    pub brand: String,
    #[validate(length(min = 2, max = 20, message = "model must be 2-20 characters"))]
    pub model: String,
    #[validate(length(min = 10, message = "description must be at least 10 characters"))]
    pub description: String,
    #[validate(url(message = "image_url must be a valid URL"))]
    pub image_url: String,
    #[validate(range(min = 1900, max = 2100, message = "year must be between 1900 and 2100"))]
    pub year: i32,
    pub category_id: i32,
}

/// Edit carries the same field set; every mutable field is overwritten.
pub type EditCarRequest = CreateCarRequest;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedCarResponse {
    pub id: i32,
}
