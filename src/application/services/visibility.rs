//! Visibility workflow
//!
//! State machine over `Car.is_public`: Pending (false) ↔ Published (true).
//! Creation always starts Pending. An admin edit auto-publishes; a dealer
//! edit forces the car back to Pending for re-approval. The admin toggle is
//! the sole approval action for newly created cars.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::{Car, DomainError, DomainResult, RepositoryProvider};

/// Mutable listing fields accepted by create and edit.
#[derive(Debug, Clone)]
pub struct CarInput {
    pub brand: String,
    pub model: String,
    pub description: String,
    pub image_url: String,
    pub year: i32,
    pub category_id: i32,
}

pub struct VisibilityService {
    repos: Arc<dyn RepositoryProvider>,
}

impl VisibilityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    async fn ensure_category(&self, category_id: i32) -> DomainResult<()> {
        if !self.repos.categories().exists(category_id).await? {
            return Err(DomainError::Validation(format!(
                "Category {} does not exist",
                category_id
            )));
        }
        Ok(())
    }

    /// Create a new listing in the Pending state and return its id.
    ///
    /// Pending on creation holds for every actor, admins included; only an
    /// explicit toggle or an admin edit publishes.
    pub async fn create(&self, input: CarInput, dealer_id: i32) -> DomainResult<i32> {
        self.ensure_category(input.category_id).await?;

        if self.repos.dealers().find_by_id(dealer_id).await?.is_none() {
            return Err(DomainError::Validation(format!(
                "Dealer {} does not exist",
                dealer_id
            )));
        }

        let now = Utc::now();
        let car = Car {
            id: 0,
            brand: input.brand,
            model: input.model,
            description: input.description,
            image_url: input.image_url,
            year: input.year,
            category_id: input.category_id,
            dealer_id,
            is_public: false,
            created_at: now,
            updated_at: now,
        };

        let id = self.repos.cars().insert(car).await?;
        info!(car_id = id, dealer_id, "Car created, awaiting approval");
        Ok(id)
    }

    /// Overwrite all mutable fields of a listing.
    ///
    /// `acting_as_admin` decides the post-edit visibility: admins are
    /// trusted to self-approve, so their edits publish; any other edit
    /// sends the car back to the Pending queue.
    pub async fn edit(
        &self,
        car_id: i32,
        input: CarInput,
        acting_as_admin: bool,
    ) -> DomainResult<()> {
        let Some(mut car) = self.repos.cars().find_by_id(car_id).await? else {
            return Err(DomainError::not_found("Car", "id", car_id));
        };

        self.ensure_category(input.category_id).await?;

        car.brand = input.brand;
        car.model = input.model;
        car.description = input.description;
        car.image_url = input.image_url;
        car.year = input.year;
        car.category_id = input.category_id;
        car.is_public = acting_as_admin;
        car.updated_at = Utc::now();

        self.repos.cars().update(car).await?;
        info!(
            car_id,
            published = acting_as_admin,
            "Car edited"
        );
        Ok(())
    }

    /// Flip a car between Pending and Published.
    pub async fn toggle_visibility(&self, car_id: i32) -> DomainResult<bool> {
        let Some(mut car) = self.repos.cars().find_by_id(car_id).await? else {
            return Err(DomainError::not_found("Car", "id", car_id));
        };

        car.is_public = !car.is_public;
        car.updated_at = Utc::now();
        let now_public = car.is_public;

        self.repos.cars().update(car).await?;
        info!(car_id, is_public = now_public, "Car visibility toggled");
        Ok(now_public)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::memory::InMemoryCatalog;
    use crate::infrastructure::storage::test_support::{sample_input, seed_catalog};

    fn service() -> (Arc<InMemoryCatalog>, VisibilityService) {
        let catalog = Arc::new(InMemoryCatalog::new());
        (catalog.clone(), VisibilityService::new(catalog))
    }

    #[tokio::test]
    async fn created_car_starts_pending() {
        let (catalog, svc) = service();
        seed_catalog(&catalog).await;

        let id = svc.create(sample_input(), 1).await.unwrap();
        let car = catalog.cars().find_by_id(id).await.unwrap().unwrap();
        assert!(!car.is_public);
    }

    #[tokio::test]
    async fn create_rejects_unknown_category() {
        let (catalog, svc) = service();
        seed_catalog(&catalog).await;

        let mut input = sample_input();
        input.category_id = 999;
        let err = svc.create(input, 1).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_unknown_dealer() {
        let (catalog, svc) = service();
        seed_catalog(&catalog).await;

        let err = svc.create(sample_input(), 999).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn toggle_publishes_then_unpublishes() {
        let (catalog, svc) = service();
        seed_catalog(&catalog).await;

        let id = svc.create(sample_input(), 1).await.unwrap();

        assert!(svc.toggle_visibility(id).await.unwrap());
        assert!(catalog.cars().find_by_id(id).await.unwrap().unwrap().is_public);

        assert!(!svc.toggle_visibility(id).await.unwrap());
        assert!(!catalog.cars().find_by_id(id).await.unwrap().unwrap().is_public);
    }

    #[tokio::test]
    async fn toggle_missing_car_is_not_found() {
        let (_catalog, svc) = service();
        let err = svc.toggle_visibility(404).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Car", .. }));
    }

    #[tokio::test]
    async fn dealer_edit_forces_reapproval() {
        let (catalog, svc) = service();
        seed_catalog(&catalog).await;

        let id = svc.create(sample_input(), 1).await.unwrap();
        svc.toggle_visibility(id).await.unwrap();

        svc.edit(id, sample_input(), false).await.unwrap();
        let car = catalog.cars().find_by_id(id).await.unwrap().unwrap();
        assert!(!car.is_public);
    }

    #[tokio::test]
    async fn admin_edit_auto_publishes() {
        let (catalog, svc) = service();
        seed_catalog(&catalog).await;

        let id = svc.create(sample_input(), 1).await.unwrap();
        assert!(!catalog.cars().find_by_id(id).await.unwrap().unwrap().is_public);

        svc.edit(id, sample_input(), true).await.unwrap();
        let car = catalog.cars().find_by_id(id).await.unwrap().unwrap();
        assert!(car.is_public);
    }

    #[tokio::test]
    async fn edit_overwrites_all_mutable_fields() {
        let (catalog, svc) = service();
        seed_catalog(&catalog).await;

        let id = svc.create(sample_input(), 1).await.unwrap();
        let input = CarInput {
            brand: "Skoda".into(),
            model: "Octavia".into(),
            description: "Facelift model".into(),
            image_url: "https://img.example/octavia.jpg".into(),
            year: 2023,
            category_id: 2,
        };
        svc.edit(id, input, false).await.unwrap();

        let car = catalog.cars().find_by_id(id).await.unwrap().unwrap();
        assert_eq!(car.brand, "Skoda");
        assert_eq!(car.model, "Octavia");
        assert_eq!(car.year, 2023);
        assert_eq!(car.category_id, 2);
        assert_eq!(car.dealer_id, 1);
    }

    #[tokio::test]
    async fn edit_missing_car_is_not_found() {
        let (catalog, svc) = service();
        seed_catalog(&catalog).await;

        let err = svc.edit(404, sample_input(), false).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Car", .. }));
    }

    #[tokio::test]
    async fn edit_rejects_unknown_category() {
        let (catalog, svc) = service();
        seed_catalog(&catalog).await;

        let id = svc.create(sample_input(), 1).await.unwrap();
        let mut input = sample_input();
        input.category_id = 999;
        let err = svc.edit(id, input, true).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
