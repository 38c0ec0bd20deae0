//! Dealer authorization gate
//!
//! Facts the HTTP layer composes into authorization decisions: whether a
//! user is a registered dealer, which dealer they map to, and whether a
//! dealer owns a given car. The gate itself never decides access.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::{Dealer, DomainError, DomainResult, RepositoryProvider};

pub struct DealerService {
    repos: Arc<dyn RepositoryProvider>,
}

impl DealerService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn is_dealer(&self, user_id: &str) -> DomainResult<bool> {
        self.repos.dealers().exists_by_user_id(user_id).await
    }

    /// Dealer id for a user, `None` when the user never registered.
    ///
    /// Absence is a normal outcome, not an error; the HTTP layer maps it to
    /// the documented `0` sentinel.
    pub async fn dealer_id_for(&self, user_id: &str) -> DomainResult<Option<i32>> {
        Ok(self
            .repos
            .dealers()
            .find_by_user_id(user_id)
            .await?
            .map(|d| d.id))
    }

    pub async fn dealer_for(&self, user_id: &str) -> DomainResult<Option<Dealer>> {
        self.repos.dealers().find_by_user_id(user_id).await
    }

    /// Register the user as a dealer. One dealer per user: a second
    /// registration for the same user id is a conflict.
    pub async fn register_dealer(
        &self,
        user_id: &str,
        name: &str,
        phone_number: &str,
    ) -> DomainResult<Dealer> {
        if self.repos.dealers().exists_by_user_id(user_id).await? {
            return Err(DomainError::Conflict(format!(
                "User {} is already a dealer",
                user_id
            )));
        }

        let dealer = Dealer {
            id: 0,
            name: name.to_string(),
            phone_number: phone_number.to_string(),
            user_id: user_id.to_string(),
            created_at: Utc::now(),
        };

        let dealer = self.repos.dealers().insert(dealer).await?;
        info!(dealer_id = dealer.id, user_id, "Dealer registered");
        Ok(dealer)
    }

    /// True iff the car exists and is listed by the given dealer. Admin
    /// callers skip this check entirely.
    pub async fn owns_car(&self, car_id: i32, dealer_id: i32) -> DomainResult<bool> {
        self.repos.cars().is_owned_by(car_id, dealer_id).await
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::memory::InMemoryCatalog;
    use crate::infrastructure::storage::test_support::seed_catalog;

    fn service() -> (Arc<InMemoryCatalog>, DealerService) {
        let catalog = Arc::new(InMemoryCatalog::new());
        (catalog.clone(), DealerService::new(catalog))
    }

    #[tokio::test]
    async fn register_then_lookup() {
        let (_catalog, svc) = service();

        let dealer = svc
            .register_dealer("user-7", "Nina Motors", "+998901112233")
            .await
            .unwrap();
        assert!(dealer.id > 0);

        assert!(svc.is_dealer("user-7").await.unwrap());
        assert_eq!(svc.dealer_id_for("user-7").await.unwrap(), Some(dealer.id));
    }

    #[tokio::test]
    async fn duplicate_registration_is_conflict() {
        let (_catalog, svc) = service();

        svc.register_dealer("user-7", "Nina Motors", "+998901112233")
            .await
            .unwrap();
        let err = svc
            .register_dealer("user-7", "Other Name", "+998900000000")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn unregistered_user_gets_none_not_error() {
        let (_catalog, svc) = service();

        assert!(!svc.is_dealer("ghost").await.unwrap());
        assert_eq!(svc.dealer_id_for("ghost").await.unwrap(), None);
    }

    #[tokio::test]
    async fn ownership_check() {
        let (catalog, svc) = service();
        seed_catalog(&catalog).await;

        // seed: car 1 belongs to dealer 1, dealer 2 exists without that car
        assert!(svc.owns_car(1, 1).await.unwrap());
        assert!(!svc.owns_car(1, 2).await.unwrap());
        assert!(!svc.owns_car(404, 1).await.unwrap());
    }
}
