//! Directory entities as returned by (or sent to) the backend.

mod team;
mod user;

pub use team::Team;
pub use user::{CreateUserPayload, SimpleUser};
