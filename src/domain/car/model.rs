//! Car domain entity and listing query types

use chrono::{DateTime, Utc};

/// Sort order for car listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarSorting {
    /// Newest listings first (descending id, insertion recency proxy)
    Recency,
    /// Newest model year first
    YearDesc,
    /// Alphabetical by brand, then model
    BrandModelAsc,
}

impl Default for CarSorting {
    fn default() -> Self {
        Self::Recency
    }
}

impl std::fmt::Display for CarSorting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Recency => write!(f, "Recency"),
            Self::YearDesc => write!(f, "YearDesc"),
            Self::BrandModelAsc => write!(f, "BrandModelAsc"),
        }
    }
}

/// A car listing
#[derive(Debug, Clone)]
pub struct Car {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub description: String,
    pub image_url: String,
    pub year: i32,
    pub category_id: i32,
    pub dealer_id: i32,
    /// Visibility state: `false` = Pending (awaiting approval), `true` = Published
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request-scoped listing query specification.
///
/// Built by the caller, executed by the store adapter. Filters compose in a
/// fixed order: visibility, then brand, then search term.
#[derive(Debug, Clone, Default)]
pub struct CarQuery {
    /// Exact-match brand filter. Blank means no filter.
    pub brand: Option<String>,
    /// Case-insensitive substring match over "brand model" or description.
    /// Blank means no filter.
    pub search_term: Option<String>,
    pub sorting: CarSorting,
    /// 1-based page index
    pub page: u64,
    /// Items per page. `None` = unbounded (admin listing).
    pub cars_per_page: Option<u64>,
    /// When true, only Published cars are eligible.
    pub public_only: bool,
}

impl CarQuery {
    pub fn public() -> Self {
        Self {
            page: 1,
            public_only: true,
            ..Default::default()
        }
    }

    /// All cars regardless of visibility, no page bound (admin view).
    pub fn unbounded() -> Self {
        Self {
            page: 1,
            public_only: false,
            ..Default::default()
        }
    }

    fn brand_filter(&self) -> Option<&str> {
        self.brand.as_deref().map(str::trim).filter(|b| !b.is_empty())
    }

    fn search_filter(&self) -> Option<String> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }

    /// Whether a car passes every filter of this query.
    pub fn matches(&self, car: &Car) -> bool {
        if self.public_only && !car.is_public {
            return false;
        }
        if let Some(brand) = self.brand_filter() {
            if car.brand != brand {
                return false;
            }
        }
        if let Some(term) = self.search_filter() {
            let brand_model = format!("{} {}", car.brand, car.model).to_lowercase();
            if !brand_model.contains(&term) && !car.description.to_lowercase().contains(&term) {
                return false;
            }
        }
        true
    }

    /// Sort a filtered set in place according to the query's sort mode.
    ///
    /// `sort_by` is stable, so BrandModelAsc keeps the underlying order for
    /// full ties.
    pub fn sort(&self, cars: &mut [Car]) {
        match self.sorting {
            CarSorting::Recency => cars.sort_by(|a, b| b.id.cmp(&a.id)),
            CarSorting::YearDesc => cars.sort_by(|a, b| b.year.cmp(&a.year)),
            CarSorting::BrandModelAsc => {
                cars.sort_by(|a, b| a.brand.cmp(&b.brand).then_with(|| a.model.cmp(&b.model)))
            }
        }
    }

    /// Offset of the first item on the requested page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) * self.cars_per_page.unwrap_or(0)
    }
}

/// One page of listing results
#[derive(Debug, Clone)]
pub struct CarPage {
    pub total_cars: u64,
    pub current_page: u64,
    pub cars_per_page: Option<u64>,
    pub items: Vec<Car>,
}

/// Full car view with resolved dealer and category names
#[derive(Debug, Clone)]
pub struct CarDetails {
    pub car: Car,
    pub category_name: String,
    pub dealer_name: String,
    pub dealer_phone: String,
    /// External identity of the owning dealer, used for ownership checks
    pub dealer_user_id: String,
}

// ── Tests ──────────────────────────────────────────────────────
