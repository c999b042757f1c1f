//! Shared utilities and common types for CertFlow backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Page-based pagination helpers
//! - Common validation logic (certificate numbers, template versions)
//! - Reference-number generation

pub mod pagination;
pub mod refnum;
pub mod validation;
