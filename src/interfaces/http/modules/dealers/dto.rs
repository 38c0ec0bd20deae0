//! Dealer DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Dealer;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BecomeDealerRequest {
    #[validate(length(min = 2, max = 25, message = "name must be 2-25 characters"))]
    pub name: String,
    #[validate(length(min = 6, max = 30, message = "phone_number must be 6-30 characters"))]
    pub phone_number: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DealerResponse {
    pub id: i32,
    pub name: String,
    pub phone_number: String,
    pub user_id: String,
}

impl From<Dealer> for DealerResponse {
    fn from(d: Dealer) -> Self {
        Self {
            id: d.id,
            name: d.name,
            phone_number: d.phone_number,
            user_id: d.user_id,
        }
    }
}

/// The caller's dealer standing. `dealer_id` is `0` when the user has
/// never registered, matching what downstream clients already expect.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DealerProfileResponse {
    pub dealer_id: i32,
    pub is_dealer: bool,
    pub name: Option<String>,
    pub phone_number: Option<String>,
}
