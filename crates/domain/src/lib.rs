//! Domain layer for CertFlow backend.
//!
//! This crate contains:
//! - Domain models (Template, Certification, HistoryEntry, Client, IsoStandard)
//! - Business logic services (lifecycle engine, version allocator, renderer)
//! - Domain error types

pub mod error;
pub mod models;
pub mod services;

pub use error::{DomainError, RenderError};
