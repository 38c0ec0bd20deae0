//! Dealer domain entity

use chrono::{DateTime, Utc};

/// An account entitled to list cars, tied 1:1 to an external identity.
#[derive(Debug, Clone)]
pub struct Dealer {
    pub id: i32,
    pub name: String,
    pub phone_number: String,
    /// External identity reference. Unique: one user maps to at most one
    /// dealer.
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}
