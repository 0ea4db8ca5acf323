//! Admin console library for the streaming platform
//!
//! - [`table`]: in-memory searchable, sortable, paginated table over records
//! - [`DashboardClient`] and [`api`]: REST client for the platform API
//! - [`auth`]: admin and creator sessions with proactive token refresh
//! - [`poll`]: periodic metrics refresh
//! - [`validation`]: client-side checks on create payloads

pub mod api;
pub mod auth;
pub mod error;
pub mod model;
pub mod poll;
pub mod table;
pub mod validation;

mod client;

pub use client::*;
pub use error::Error;
