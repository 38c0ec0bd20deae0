//! Shared fixtures for service and storage tests

use chrono::Utc;

use crate::application::services::CarInput;
use crate::domain::{Car, Dealer};

use super::memory::InMemoryCatalog;

pub fn sample_car(id: i32, brand: &str, model: &str, year: i32) -> Car {
    Car {
        id,
        brand: brand.into(),
        model: model.into(),
        description: format!("{} {}, one owner", brand, model),
        image_url: "https://img.example/car.jpg".into(),
        year,
        category_id: 1,
        dealer_id: 1,
        is_public: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn sample_input() -> CarInput {
    CarInput {
        brand: "Toyota".into(),
        model: "Corolla".into(),
        description: "Reliable daily driver".into(),
        image_url: "https://img.example/corolla.jpg".into(),
        year: 2021,
        category_id: 1,
    }
}

/// Two dealers, five cars: ids 1..5, brands Audi/BMW/Audi/VW/BMW,
/// cars 1, 2 and 4 published, 3 and 5 pending. All cars belong to dealer 1.
pub async fn seed_catalog(catalog: &InMemoryCatalog) {
    catalog.put_dealer(Dealer {
        id: 1,
        name: "Central Motors".into(),
        phone_number: "+998901234567".into(),
        user_id: "user-1".into(),
        created_at: Utc::now(),
    });
    catalog.put_dealer(Dealer {
        id: 2,
        name: "City Cars".into(),
        phone_number: "+998907654321".into(),
        user_id: "user-2".into(),
        created_at: Utc::now(),
    });

    let fleet = [
        (1, "Audi", "A4", 2018, true),
        (2, "BMW", "320i", 2020, true),
        (3, "Audi", "Q5", 2021, false),
        (4, "VW", "Golf", 2019, true),
        (5, "BMW", "X5", 2022, false),
    ];
    for (id, brand, model, year, is_public) in fleet {
        let mut car = sample_car(id, brand, model, year);
        car.is_public = is_public;
        catalog.put_car(car);
    }
}
