//! Domain models for CertFlow.

pub mod certification;
pub mod client;
pub mod history;
pub mod iso_standard;
pub mod template;

pub use certification::{
    Certification, CertificationResponse, CertificationStatistics, CertificationStatus,
    CreateCertificationRequest, LifecycleAction, LifecycleActionRequest,
    ListCertificationsQuery, ListCertificationsResponse, RenewRequest,
    UpdateCertificationRequest, EXPIRING_SOON_WINDOW_DAYS,
};
pub use client::{Client, ClientStatus, CreateClientRequest, UpdateClientRequest};
pub use history::{CreateHistoryInput, HistoryAction, HistoryEntry};
pub use iso_standard::{CreateIsoStandardRequest, IsoStandard};
pub use template::{
    CreateTemplateRequest, ListTemplatesQuery, Template, TemplateType,
};
