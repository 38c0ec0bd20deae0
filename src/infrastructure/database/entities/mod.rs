//! Database entities module

pub mod car;
pub mod category;
pub mod dealer;

pub use car::Entity as Car;
pub use category::Entity as Category;
pub use dealer::Entity as Dealer;
