pub mod auth;
pub mod docs;
pub mod teams;
pub mod users;

pub use auth::{AuthCommands, AuthLoginArgs};
pub use docs::DocsArgs;
pub use teams::TeamsCommands;
pub use users::{UsersCommands, UsersCreateArgs};
