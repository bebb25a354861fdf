//! Request guards and extractors.

pub mod auth;
pub mod guard;
pub mod rbac;
