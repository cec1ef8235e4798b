//! View models for the dashboard's presentational pieces.
//!
//! These hold no data logic. They capture the few observable rules the
//! rendered widgets follow so any front end reproduces them.

mod comment;
mod help;
mod layout;

pub use comment::CommentEditor;
pub use help::{HELP_TOPIC_PARAM, initial_help_topic};
pub use layout::{AdminLayout, NavSection};
