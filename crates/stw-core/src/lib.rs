//! # stw-core
//!
//! Core types shared across all Steward crates:
//! - Directory entities (users, teams) and the admin user-creation payload
//! - The current-user projection produced by the session adapter
//! - View models for the dashboard's presentational pieces

pub mod entities;
pub mod identity;
pub mod views;
