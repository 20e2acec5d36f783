//! Postgres implementations of the domain store traits.

pub mod complex;
pub mod location;
pub mod user;

pub use complex::ComplexRepository;
pub use location::LocationRepository;
pub use user::UserRepository;
