//! HTTP route handlers.

pub mod certifications;
pub mod clients;
pub mod health;
pub mod iso_standards;
pub mod public;
pub mod templates;
