// Use-case services orchestrating domain logic over the repository
// ports. The HTTP layer calls these; they own no transport concerns.

pub mod identity;
pub mod projects;

pub use identity::{IdentityService, NewUser};
pub use projects::{CreateProject, ProjectService};
