//! In-memory storage

pub mod memory;

pub use memory::InMemoryCatalog;

#[cfg(test)]
pub mod test_support;
