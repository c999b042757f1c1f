//! Expiry status recompute background job.
//!
//! Periodically walks certifications whose date-derived status can still
//! change (active or expiring-soon, expiry within the warning window) and
//! recomputes each one. The per-certification recompute is idempotent and
//! commits its history entry atomically, so overlapping runs and restarts
//! are safe. Transitions optionally emit an expiry notification.

use chrono::Utc;
use domain::models::CertificationStatus;
use domain::services::{
    ExpiryNotification, MockNotificationService, NotificationService, NotificationType,
};
use persistence::repositories::CertificationRepository;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

use super::scheduler::{Job, JobFrequency};

/// Background job that keeps date-derived certification statuses current.
pub struct ExpiryRecomputeJob {
    repo: CertificationRepository,
    interval_minutes: u64,
    notifier: Option<Arc<dyn NotificationService>>,
}

impl ExpiryRecomputeJob {
    /// Create the job with the delivery-less notification recorder.
    pub fn new(pool: PgPool, interval_minutes: u64, notifications_enabled: bool) -> Self {
        let notifier: Option<Arc<dyn NotificationService>> = if notifications_enabled {
            Some(Arc::new(MockNotificationService::new()))
        } else {
            None
        };
        Self::with_notifier(pool, interval_minutes, notifier)
    }

    /// Create the job with an explicit notification collaborator.
    pub fn with_notifier(
        pool: PgPool,
        interval_minutes: u64,
        notifier: Option<Arc<dyn NotificationService>>,
    ) -> Self {
        Self {
            repo: CertificationRepository::new(pool),
            interval_minutes,
            notifier,
        }
    }

    /// One full recompute pass. Returns the number of transitions applied.
    async fn recompute_all(&self) -> Result<usize, String> {
        let today = Utc::now().date_naive();
        let candidates = self
            .repo
            .recompute_candidates(today)
            .await
            .map_err(|e| format!("Failed to list recompute candidates: {e}"))?;

        let mut transitions = 0usize;
        for id in candidates {
            let outcome = self
                .repo
                .recompute(id, today)
                .await
                .map_err(|e| format!("Failed to recompute certification {id}: {e}"))?;

            let Some(outcome) = outcome else { continue };
            transitions += 1;

            if let Some(notifier) = &self.notifier {
                let certification = &outcome.certification;
                let notification_type = match certification.status {
                    CertificationStatus::Expired => NotificationType::Expired,
                    _ => NotificationType::ExpiringSoon,
                };
                notifier
                    .notify_expiry(ExpiryNotification {
                        notification_type,
                        certification_id: certification.id,
                        certificate_number: certification.certificate_number.clone(),
                        expiry_date: certification.expiry_date,
                        days_until_expiry: certification.days_until_expiry(today),
                    })
                    .await;
            }
        }

        Ok(transitions)
    }
}

#[async_trait::async_trait]
impl Job for ExpiryRecomputeJob {
    fn name(&self) -> &'static str {
        "expiry_recompute"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Minutes(self.interval_minutes)
    }

    async fn execute(&self) -> Result<(), String> {
        let transitions = self.recompute_all().await?;

        if transitions > 0 {
            info!(transitions, "Recomputed certification statuses");
        }

        Ok(())
    }
}
