//! Business logic services.

pub mod accounts;
pub mod announcements;
pub mod auth;
pub mod dashboard;
pub mod identity;
pub mod listing;
pub mod posts;
pub mod profile;
pub mod reports;
pub mod session;
pub mod validation;
