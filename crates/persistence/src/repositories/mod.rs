//! Repository modules for database access.

pub mod certification;
pub mod client;
pub mod history;
pub mod iso_standard;
pub mod template;

pub use certification::{CertificationRepository, PublicSearchFilters};
pub use client::ClientRepository;
pub use history::HistoryRepository;
pub use iso_standard::IsoStandardRepository;
pub use template::TemplateRepository;
