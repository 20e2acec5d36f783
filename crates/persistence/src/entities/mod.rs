//! Entity definitions (database row mappings).

pub mod complex;
pub mod field;
pub mod location;
pub mod user;

pub use complex::ComplexEntity;
pub use field::FieldEntity;
pub use location::LocationEntity;
pub use user::UserEntity;
