//! Certification repository.
//!
//! Lifecycle transitions run inside a transaction: the certification row is
//! locked with `SELECT ... FOR UPDATE`, the transition is validated against
//! the state machine, and the status update plus its history entry commit
//! together. A rejected transition rolls back without touching either table.

use chrono::{Duration, NaiveDate, Utc};
use domain::models::{
    Certification, CertificationStatistics, CertificationStatus, CreateCertificationRequest,
    CreateHistoryInput, HistoryAction, LifecycleAction, ListCertificationsQuery,
    UpdateCertificationRequest, EXPIRING_SOON_WINDOW_DAYS,
};
use domain::services::{apply_action, recompute_status};
use domain::DomainError;
use shared::refnum::generate_certificate_number;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::entities::{CertificationEntity, PublicCertificationRow};
use crate::error::RepositoryError;
use crate::repositories::history;
use shared::pagination::PageParams;

const NUMBER_CONSTRAINT: &str = "certifications_certificate_number_key";

/// Attempts at generating a non-colliding certificate number.
const MAX_NUMBER_ATTEMPTS: u32 = 5;

const CERTIFICATION_COLUMNS: &str = "id, certificate_number, client_id, iso_standard_id, \
     issue_date, expiry_date, status, scope, lead_auditor, certification_body, \
     accreditation_number, template_id, document_url, notes, created_by, created_at, updated_at";

/// A status change produced by an expiry recompute.
#[derive(Debug, Clone)]
pub struct RecomputeOutcome {
    pub certification: Certification,
    pub previous_status: CertificationStatus,
}

/// The writes a validated lifecycle action will perform.
///
/// Built from the locked row before anything is written; when planning fails
/// the transaction holds no mutations and rolls back on drop, so a rejected
/// action leaves both the certification and its history untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TransitionPlan {
    to: CertificationStatus,
    expiry_date: NaiveDate,
}

impl TransitionPlan {
    fn build(
        from: CertificationStatus,
        action: LifecycleAction,
        current_expiry: NaiveDate,
        new_expiry: Option<NaiveDate>,
    ) -> Result<Self, DomainError> {
        let to = apply_action(from, action)?;

        let expiry_date = match action {
            LifecycleAction::Renew => {
                let requested = new_expiry.unwrap_or(current_expiry);
                if requested <= current_expiry {
                    return Err(DomainError::RenewalNotExtended {
                        current: current_expiry,
                        requested,
                    });
                }
                requested
            }
            _ => current_expiry,
        };

        Ok(Self { to, expiry_date })
    }
}

/// Helper for building dynamic WHERE clauses from list filters.
struct CertificationFilterBuilder {
    conditions: Vec<String>,
    param_count: i32,
}

impl CertificationFilterBuilder {
    fn build(query: &ListCertificationsQuery) -> Self {
        let mut conditions = vec!["TRUE".to_string()];
        let mut param_count = 0;

        if query.status.is_some() {
            param_count += 1;
            conditions.push(format!("status = ${}", param_count));
        }
        if query.client_id.is_some() {
            param_count += 1;
            conditions.push(format!("client_id = ${}", param_count));
        }
        if query.iso_standard_id.is_some() {
            param_count += 1;
            conditions.push(format!("iso_standard_id = ${}", param_count));
        }
        if query.lead_auditor.is_some() {
            param_count += 1;
            conditions.push(format!("lead_auditor = ${}", param_count));
        }
        if query.search.is_some() {
            param_count += 1;
            conditions.push(format!(
                "(certificate_number ILIKE ${0} OR scope ILIKE ${0})",
                param_count
            ));
        }

        Self {
            conditions,
            param_count,
        }
    }

    fn where_clause(&self) -> String {
        self.conditions.join(" AND ")
    }

    fn param_count(&self) -> i32 {
        self.param_count
    }
}

/// Bind list filter parameters in the same order the builder added them.
macro_rules! bind_list_filters {
    ($builder:expr, $query:expr) => {{
        let mut b = $builder;
        if let Some(status) = $query.status {
            b = b.bind(status.to_string());
        }
        if let Some(client_id) = $query.client_id {
            b = b.bind(client_id);
        }
        if let Some(iso_standard_id) = $query.iso_standard_id {
            b = b.bind(iso_standard_id);
        }
        if let Some(lead_auditor) = $query.lead_auditor {
            b = b.bind(lead_auditor);
        }
        if let Some(ref search) = $query.search {
            b = b.bind(format!("%{}%", search));
        }
        b
    }};
}

/// Filters accepted by the public certification directory.
#[derive(Debug, Clone, Default)]
pub struct PublicSearchFilters {
    /// Free-text match on certificate number, client name, scope and
    /// certification body.
    pub search: Option<String>,
    pub iso_standard_code: Option<String>,
    pub client_name: Option<String>,
}

/// Dynamic WHERE clause for the public directory join. Only active
/// certifications are ever visible.
struct PublicSearchFilterBuilder {
    conditions: Vec<String>,
    param_count: i32,
}

impl PublicSearchFilterBuilder {
    fn build(filters: &PublicSearchFilters) -> Self {
        let mut conditions = vec!["c.status = 'active'".to_string()];
        let mut param_count = 0;

        if filters.search.is_some() {
            param_count += 1;
            conditions.push(format!(
                "(c.certificate_number ILIKE ${0} OR cl.name ILIKE ${0} \
                 OR c.scope ILIKE ${0} OR c.certification_body ILIKE ${0})",
                param_count
            ));
        }
        if filters.iso_standard_code.is_some() {
            param_count += 1;
            conditions.push(format!("s.code ILIKE ${}", param_count));
        }
        if filters.client_name.is_some() {
            param_count += 1;
            conditions.push(format!("cl.name ILIKE ${}", param_count));
        }

        Self {
            conditions,
            param_count,
        }
    }

    fn where_clause(&self) -> String {
        self.conditions.join(" AND ")
    }

    fn param_count(&self) -> i32 {
        self.param_count
    }
}

/// Bind public search parameters in the same order the builder added them.
macro_rules! bind_public_filters {
    ($builder:expr, $filters:expr) => {{
        let mut b = $builder;
        if let Some(ref search) = $filters.search {
            b = b.bind(format!("%{}%", search));
        }
        if let Some(ref code) = $filters.iso_standard_code {
            b = b.bind(format!("%{}%", code));
        }
        if let Some(ref name) = $filters.client_name {
            b = b.bind(format!("%{}%", name));
        }
        b
    }};
}

/// Repository for certification database operations.
#[derive(Clone)]
pub struct CertificationRepository {
    pool: PgPool,
}

impl CertificationRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a certification and its `created` history entry atomically.
    ///
    /// When no certificate number is supplied one is generated; a collision
    /// on the generated number is retried with a fresh suffix.
    pub async fn create(
        &self,
        request: &CreateCertificationRequest,
        created_by: Option<Uuid>,
    ) -> Result<Certification, RepositoryError> {
        // Only pending and active are valid entry states; transitions handle
        // everything else.
        let status = match request.status.unwrap_or(CertificationStatus::Pending) {
            CertificationStatus::Active => CertificationStatus::Active,
            _ => CertificationStatus::Pending,
        };
        let generated = request.certificate_number.is_none();

        for attempt in 0..MAX_NUMBER_ATTEMPTS {
            let certificate_number = match &request.certificate_number {
                Some(number) => number.clone(),
                None => generate_certificate_number(request.issue_date),
            };

            match self
                .try_insert(request, &certificate_number, status, created_by)
                .await
            {
                Ok(certification) => {
                    tracing::info!(
                        certification_id = %certification.id,
                        certificate_number = %certification.certificate_number,
                        status = %certification.status,
                        "Created certification"
                    );
                    return Ok(certification);
                }
                Err(err)
                    if generated
                        && attempt + 1 < MAX_NUMBER_ATTEMPTS
                        && err.is_unique_violation(Some(NUMBER_CONSTRAINT)) =>
                {
                    tracing::warn!(
                        certificate_number = %certificate_number,
                        attempt,
                        "Certificate number collision, regenerating"
                    );
                    continue;
                }
                Err(err) => return Err(err),
            }
        }

        // Unreachable in practice; the loop either returns or exhausts with
        // the final error above.
        Err(RepositoryError::Database(sqlx::Error::RowNotFound))
    }

    async fn try_insert(
        &self,
        request: &CreateCertificationRequest,
        certificate_number: &str,
        status: CertificationStatus,
        created_by: Option<Uuid>,
    ) -> Result<Certification, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            r#"
            INSERT INTO certifications (
                certificate_number, client_id, iso_standard_id, issue_date, expiry_date,
                status, scope, lead_auditor, certification_body, accreditation_number,
                template_id, notes, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {CERTIFICATION_COLUMNS}
            "#
        );
        let entity = sqlx::query_as::<_, CertificationEntity>(&query)
            .bind(certificate_number)
            .bind(request.client_id)
            .bind(request.iso_standard_id)
            .bind(request.issue_date)
            .bind(request.expiry_date)
            .bind(status.to_string())
            .bind(&request.scope)
            .bind(request.lead_auditor)
            .bind(&request.certification_body)
            .bind(&request.accreditation_number)
            .bind(request.template_id)
            .bind(&request.notes)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        let certification: Certification = entity.into();
        history::append(
            &mut tx,
            &CreateHistoryInput::new(certification.id, HistoryAction::Created)
                .with_statuses(certification.status, certification.status)
                .with_actor(created_by),
        )
        .await?;

        tx.commit().await?;
        Ok(certification)
    }

    /// Find a certification by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Certification>, sqlx::Error> {
        let query = format!("SELECT {CERTIFICATION_COLUMNS} FROM certifications WHERE id = $1");
        let entity = sqlx::query_as::<_, CertificationEntity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Certification::from))
    }

    /// Find a certification by its certificate number.
    pub async fn find_by_number(
        &self,
        certificate_number: &str,
    ) -> Result<Option<Certification>, sqlx::Error> {
        let query = format!(
            "SELECT {CERTIFICATION_COLUMNS} FROM certifications WHERE certificate_number = $1"
        );
        let entity = sqlx::query_as::<_, CertificationEntity>(&query)
            .bind(certificate_number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Certification::from))
    }

    /// List certifications with pagination and filtering.
    pub async fn list(
        &self,
        query: &ListCertificationsQuery,
    ) -> Result<(Vec<Certification>, i64), sqlx::Error> {
        let filter = CertificationFilterBuilder::build(query);
        let where_clause = filter.where_clause();
        let param_count = filter.param_count();

        let count_query = format!("SELECT COUNT(*) FROM certifications WHERE {}", where_clause);
        let count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        let count_builder = bind_list_filters!(count_builder, query);
        let total: i64 = count_builder.fetch_one(&self.pool).await?;

        let list_query = format!(
            r#"
            SELECT {CERTIFICATION_COLUMNS}
            FROM certifications
            WHERE {}
            ORDER BY expiry_date ASC, certificate_number ASC
            LIMIT ${} OFFSET ${}
            "#,
            where_clause,
            param_count + 1,
            param_count + 2
        );
        let list_builder = sqlx::query_as::<_, CertificationEntity>(&list_query);
        let list_builder = bind_list_filters!(list_builder, query);
        let entities = list_builder
            .bind(query.page.limit())
            .bind(query.page.offset())
            .fetch_all(&self.pool)
            .await?;

        let certifications = entities.into_iter().map(Certification::from).collect();
        Ok((certifications, total))
    }

    /// Public directory search over active certifications, newest issue
    /// first, joined with the client and standard names.
    pub async fn search_public(
        &self,
        filters: &PublicSearchFilters,
        page: &PageParams,
    ) -> Result<(Vec<PublicCertificationRow>, i64), sqlx::Error> {
        let filter = PublicSearchFilterBuilder::build(filters);
        let where_clause = filter.where_clause();
        let param_count = filter.param_count();

        let count_query = format!(
            r#"
            SELECT COUNT(*)
            FROM certifications c
            JOIN clients cl ON cl.id = c.client_id
            JOIN iso_standards s ON s.id = c.iso_standard_id
            WHERE {}
            "#,
            where_clause
        );
        let count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        let count_builder = bind_public_filters!(count_builder, filters);
        let total: i64 = count_builder.fetch_one(&self.pool).await?;

        let list_query = format!(
            r#"
            SELECT c.certificate_number, c.status, c.issue_date, c.expiry_date,
                   c.scope, c.certification_body,
                   cl.name AS client_name, s.code AS iso_standard_code
            FROM certifications c
            JOIN clients cl ON cl.id = c.client_id
            JOIN iso_standards s ON s.id = c.iso_standard_id
            WHERE {}
            ORDER BY c.issue_date DESC, c.certificate_number ASC
            LIMIT ${} OFFSET ${}
            "#,
            where_clause,
            param_count + 1,
            param_count + 2
        );
        let list_builder = sqlx::query_as::<_, PublicCertificationRow>(&list_query);
        let list_builder = bind_public_filters!(list_builder, filters);
        let rows = list_builder
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, total))
    }

    /// Update non-lifecycle fields and record an `updated` history entry.
    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateCertificationRequest,
        actor: Option<Uuid>,
    ) -> Result<Certification, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            r#"
            UPDATE certifications
            SET scope = COALESCE($2, scope),
                lead_auditor = COALESCE($3, lead_auditor),
                certification_body = COALESCE($4, certification_body),
                accreditation_number = COALESCE($5, accreditation_number),
                template_id = COALESCE($6, template_id),
                notes = COALESCE($7, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {CERTIFICATION_COLUMNS}
            "#
        );
        let entity = sqlx::query_as::<_, CertificationEntity>(&query)
            .bind(id)
            .bind(&request.scope)
            .bind(request.lead_auditor)
            .bind(&request.certification_body)
            .bind(&request.accreditation_number)
            .bind(request.template_id)
            .bind(&request.notes)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("certification {id}")))?;

        let certification: Certification = entity.into();
        history::append(
            &mut tx,
            &CreateHistoryInput::new(id, HistoryAction::Updated).with_actor(actor),
        )
        .await?;

        tx.commit().await?;
        Ok(certification)
    }

    /// Apply a lifecycle action atomically.
    ///
    /// `new_expiry` is only consulted for renew, where it must extend past
    /// the expiry date read under the row lock.
    pub async fn transition(
        &self,
        id: Uuid,
        action: LifecycleAction,
        new_expiry: Option<NaiveDate>,
        reason: Option<String>,
        actor: Option<Uuid>,
    ) -> Result<Certification, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current = lock_row(&mut tx, id).await?;
        let from: CertificationStatus = current
            .status
            .parse()
            .unwrap_or(CertificationStatus::Pending);

        let plan = TransitionPlan::build(from, action, current.expiry_date, new_expiry)?;

        let query = format!(
            r#"
            UPDATE certifications
            SET status = $2, expiry_date = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {CERTIFICATION_COLUMNS}
            "#
        );
        let entity = sqlx::query_as::<_, CertificationEntity>(&query)
            .bind(id)
            .bind(plan.to.to_string())
            .bind(plan.expiry_date)
            .fetch_one(&mut *tx)
            .await?;

        let mut input = CreateHistoryInput::new(id, HistoryAction::from(action))
            .with_statuses(from, plan.to)
            .with_actor(actor);
        if let Some(reason) = reason {
            input = input.with_notes(reason);
        }
        history::append(&mut tx, &input).await?;

        tx.commit().await?;

        tracing::info!(
            certification_id = %id,
            action = %action,
            from = %from,
            to = %plan.to,
            "Applied lifecycle action"
        );
        Ok(entity.into())
    }

    /// Recompute the date-derived status of one certification.
    ///
    /// Returns `None` when nothing changed. A change writes the matching
    /// history entry (`expired` or `updated`) in the same transaction.
    pub async fn recompute(
        &self,
        id: Uuid,
        today: NaiveDate,
    ) -> Result<Option<RecomputeOutcome>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current = lock_row(&mut tx, id).await?;
        let from: CertificationStatus = current
            .status
            .parse()
            .unwrap_or(CertificationStatus::Pending);
        let days = (current.expiry_date - today).num_days();
        let to = recompute_status(from, days);

        if to == from {
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            r#"
            UPDATE certifications
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {CERTIFICATION_COLUMNS}
            "#
        );
        let entity = sqlx::query_as::<_, CertificationEntity>(&query)
            .bind(id)
            .bind(to.to_string())
            .fetch_one(&mut *tx)
            .await?;

        let action = if to == CertificationStatus::Expired {
            HistoryAction::Expired
        } else {
            HistoryAction::Updated
        };
        history::append(
            &mut tx,
            &CreateHistoryInput::new(id, action)
                .with_statuses(from, to)
                .with_notes("Status recomputed from expiry date"),
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            certification_id = %id,
            from = %from,
            to = %to,
            days_until_expiry = days,
            "Recomputed certification status"
        );
        Ok(Some(RecomputeOutcome {
            certification: entity.into(),
            previous_status: from,
        }))
    }

    /// Ids of certifications whose date-derived status may need recomputing.
    pub async fn recompute_candidates(&self, today: NaiveDate) -> Result<Vec<Uuid>, sqlx::Error> {
        let horizon = today + Duration::days(EXPIRING_SOON_WINDOW_DAYS);
        sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id FROM certifications
            WHERE status IN ('active', 'expiring-soon') AND expiry_date <= $1
            ORDER BY expiry_date ASC
            "#,
        )
        .bind(horizon)
        .fetch_all(&self.pool)
        .await
    }

    /// Certifications expiring within `days` of `today`, soonest first.
    ///
    /// Already-expired and manually overridden records are excluded.
    pub async fn expiring_within(
        &self,
        today: NaiveDate,
        days: i64,
    ) -> Result<Vec<Certification>, sqlx::Error> {
        let horizon = today + Duration::days(days);
        let query = format!(
            r#"
            SELECT {CERTIFICATION_COLUMNS}
            FROM certifications
            WHERE status IN ('active', 'expiring-soon')
              AND expiry_date >= $1 AND expiry_date <= $2
            ORDER BY expiry_date ASC
            "#
        );
        let entities = sqlx::query_as::<_, CertificationEntity>(&query)
            .bind(today)
            .bind(horizon)
            .fetch_all(&self.pool)
            .await?;

        Ok(entities.into_iter().map(Certification::from).collect())
    }

    /// Per-status certification counts.
    pub async fn statistics(&self) -> Result<CertificationStatistics, sqlx::Error> {
        let row: (i64, i64, i64, i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE status = 'pending'),
                   COUNT(*) FILTER (WHERE status = 'active'),
                   COUNT(*) FILTER (WHERE status = 'expiring-soon'),
                   COUNT(*) FILTER (WHERE status = 'expired'),
                   COUNT(*) FILTER (WHERE status = 'suspended'),
                   COUNT(*) FILTER (WHERE status = 'revoked')
            FROM certifications
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(CertificationStatistics {
            total: row.0,
            pending: row.1,
            active: row.2,
            expiring_soon: row.3,
            expired: row.4,
            suspended: row.5,
            revoked: row.6,
        })
    }

    /// Store the generated document location with its history entry.
    pub async fn set_document_url(
        &self,
        id: Uuid,
        document_url: &str,
        actor: Option<Uuid>,
    ) -> Result<Certification, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let query = format!(
            r#"
            UPDATE certifications
            SET document_url = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {CERTIFICATION_COLUMNS}
            "#
        );
        let entity = sqlx::query_as::<_, CertificationEntity>(&query)
            .bind(id)
            .bind(document_url)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("certification {id}")))?;

        history::append(
            &mut tx,
            &CreateHistoryInput::new(id, HistoryAction::DocumentGenerated)
                .with_notes(format!("Document stored at {document_url}"))
                .with_actor(actor),
        )
        .await?;

        tx.commit().await?;
        Ok(entity.into())
    }
}

/// Lock a certification row for the rest of the transaction.
async fn lock_row(
    tx: &mut Transaction<'_, Postgres>,
    id: Uuid,
) -> Result<CertificationEntity, RepositoryError> {
    let query = format!(
        "SELECT {CERTIFICATION_COLUMNS} FROM certifications WHERE id = $1 FOR UPDATE"
    );
    let conn: &mut PgConnection = tx;
    sqlx::query_as::<_, CertificationEntity>(&query)
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("certification {id}")).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_builder_counts_parameters() {
        let query = ListCertificationsQuery {
            status: Some(CertificationStatus::Active),
            search: Some("CRT-2026".to_string()),
            ..Default::default()
        };
        let filter = CertificationFilterBuilder::build(&query);
        assert_eq!(filter.param_count(), 2);
        assert!(filter.where_clause().contains("status = $1"));
        assert!(filter.where_clause().contains("ILIKE $2"));
    }

    #[test]
    fn test_filter_builder_empty_query() {
        let filter = CertificationFilterBuilder::build(&ListCertificationsQuery::default());
        assert_eq!(filter.param_count(), 0);
        assert_eq!(filter.where_clause(), "TRUE");
    }

    #[test]
    fn test_public_search_filter_builder_restricts_to_active() {
        let filter = PublicSearchFilterBuilder::build(&PublicSearchFilters::default());
        assert_eq!(filter.param_count(), 0);
        assert_eq!(filter.where_clause(), "c.status = 'active'");
    }

    #[test]
    fn test_public_search_filter_builder_counts_parameters() {
        let filters = PublicSearchFilters {
            search: Some("Acme".to_string()),
            iso_standard_code: Some("9001".to_string()),
            client_name: None,
        };
        let filter = PublicSearchFilterBuilder::build(&filters);
        assert_eq!(filter.param_count(), 2);
        let clause = filter.where_clause();
        assert!(clause.starts_with("c.status = 'active'"));
        assert!(clause.contains("cl.name ILIKE $1"));
        assert!(clause.contains("s.code ILIKE $2"));
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rejected_action_produces_no_plan() {
        // The update and history insert only run once a plan exists; a
        // planning failure propagates before either statement, so the row
        // and its history survive unchanged.
        let expiry = date(2027, 3, 1);
        for action in [
            LifecycleAction::Issue,
            LifecycleAction::Renew,
            LifecycleAction::Suspend,
            LifecycleAction::Reactivate,
        ] {
            let result =
                TransitionPlan::build(CertificationStatus::Revoked, action, expiry, None);
            assert!(matches!(
                result,
                Err(DomainError::InvalidTransition { .. })
            ));
        }
    }

    #[test]
    fn test_renew_plan_requires_extended_expiry() {
        let current = date(2027, 3, 1);

        let stale = TransitionPlan::build(
            CertificationStatus::Active,
            LifecycleAction::Renew,
            current,
            Some(date(2026, 12, 31)),
        );
        assert!(matches!(
            stale,
            Err(DomainError::RenewalNotExtended { .. })
        ));

        let same = TransitionPlan::build(
            CertificationStatus::Active,
            LifecycleAction::Renew,
            current,
            Some(current),
        );
        assert!(matches!(same, Err(DomainError::RenewalNotExtended { .. })));

        let missing =
            TransitionPlan::build(CertificationStatus::Active, LifecycleAction::Renew, current, None);
        assert!(matches!(
            missing,
            Err(DomainError::RenewalNotExtended { .. })
        ));
    }

    #[test]
    fn test_renew_plan_swaps_expiry() {
        let plan = TransitionPlan::build(
            CertificationStatus::Expired,
            LifecycleAction::Renew,
            date(2026, 3, 1),
            Some(date(2029, 3, 1)),
        )
        .unwrap();
        assert_eq!(plan.to, CertificationStatus::Active);
        assert_eq!(plan.expiry_date, date(2029, 3, 1));
    }

    #[test]
    fn test_non_renew_plan_keeps_expiry() {
        let current = date(2027, 3, 1);
        let plan = TransitionPlan::build(
            CertificationStatus::Active,
            LifecycleAction::Suspend,
            current,
            Some(date(2030, 1, 1)),
        )
        .unwrap();
        assert_eq!(plan.to, CertificationStatus::Suspended);
        assert_eq!(plan.expiry_date, current);
    }
}
