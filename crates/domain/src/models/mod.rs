//! Domain models.

pub mod complex;
pub mod user;

pub use complex::{
    Complex, ComplexRecord, CreateComplexRequest, CreateFieldRequest, CreateLocationRequest,
    Field, FieldRecord, Location, LocationRecord,
};
pub use user::{CreateUserRequest, User, UserRecord};
