//! Application services composed from repositories and domain logic.

pub mod document_generation;
