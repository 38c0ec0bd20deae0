//! Category domain entity

/// Car category lookup value. Append-only: the core reads categories but
/// never mutates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    pub name: String,
}
