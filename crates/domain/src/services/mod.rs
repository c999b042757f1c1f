//! Domain services for CertFlow.
//!
//! Services contain business logic that operates on domain models.

pub mod document;
pub mod lifecycle;
pub mod notification;
pub mod renderer;
pub mod versioning;

pub use document::{document_relative_path, DocumentContext};
pub use lifecycle::{apply_action, recompute_status};
pub use notification::{
    ExpiryNotification, MockNotificationService, NotificationService, NotificationType,
};
pub use renderer::render;
pub use versioning::{allocate_version, versioned_with_attempt, MAX_VERSION_ATTEMPTS};
