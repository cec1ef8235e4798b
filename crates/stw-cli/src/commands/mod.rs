pub mod auth;
pub mod directory;
pub mod dispatch;
pub mod docs;
pub mod license;
pub mod teams;
pub mod users;
