// User domain module
// Contains the user entity and identity value objects

pub mod user;
pub mod value_objects;

// Re-export main types for convenience
pub use user::User;
pub use value_objects::{Email, Role};
