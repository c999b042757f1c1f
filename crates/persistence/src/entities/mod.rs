//! Database entities (row mappings).

mod certification;
mod client;
mod history;
mod iso_standard;
mod template;

pub use certification::{CertificationEntity, PublicCertificationRow};
pub use client::ClientEntity;
pub use history::HistoryEntity;
pub use iso_standard::IsoStandardEntity;
pub use template::TemplateEntity;
