//! Domain models and DTOs for the forum screens and the identity service.

pub mod announcement;
pub mod auth;
pub mod pagination;
pub mod post;
pub mod report;
pub mod session;
pub mod user;
