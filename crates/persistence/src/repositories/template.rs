//! Template repository.
//!
//! Creation allocates the version from the creation timestamp and retries
//! with an incremented suffix when two templates of the same type land in the
//! same second, up to `MAX_VERSION_ATTEMPTS`. Marking a template as default
//! clears the previous default of that type inside the same transaction, so
//! the partial unique index on `(template_type) WHERE is_default` never
//! rejects a legitimate write.

use chrono::Utc;
use domain::models::{CreateTemplateRequest, ListTemplatesQuery, Template, TemplateType};
use domain::services::{allocate_version, versioned_with_attempt, MAX_VERSION_ATTEMPTS};
use domain::DomainError;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::TemplateEntity;
use crate::error::RepositoryError;

// Both uniqueness constraints over the allocated version. The pair constraint
// is the one that fires when two same-second creates both carry
// `is_default = true`: clearing the previous default rewrites its triple to
// `(type, version, false)`, so the triple constraint alone would let both rows
// share one version.
const VERSION_CONSTRAINTS: [&str; 2] = [
    "templates_type_version_key",
    "templates_type_version_default_key",
];

const CERTIFICATION_TEMPLATE_FK: &str = "certifications_template_id_fkey";

const TEMPLATE_COLUMNS: &str = "id, template_id, name, description, template_type, version, \
     is_default, is_active, body, created_by, created_at";

/// Repository for document template operations.
#[derive(Clone)]
pub struct TemplateRepository {
    pool: PgPool,
}

impl TemplateRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a template, allocating its version.
    ///
    /// Retries with a suffixed version when the insert collides on either
    /// version uniqueness constraint; any other failure surfaces immediately.
    /// Exhausting the retry budget yields
    /// `DomainError::VersionAllocationFailed`.
    pub async fn create(
        &self,
        request: &CreateTemplateRequest,
        created_by: Option<Uuid>,
    ) -> Result<Template, RepositoryError> {
        let base_version = allocate_version(Utc::now());
        let template_id = request
            .template_id
            .clone()
            .unwrap_or_else(|| format!("tmpl-{}", Uuid::new_v4()));

        for attempt in 0..MAX_VERSION_ATTEMPTS {
            let version = versioned_with_attempt(&base_version, attempt);

            match self
                .try_insert(request, &template_id, &version, created_by)
                .await
            {
                Ok(template) => {
                    tracing::info!(
                        template_id = %template.template_id,
                        template_type = %template.template_type,
                        version = %template.version,
                        attempt,
                        "Created template"
                    );
                    return Ok(template);
                }
                Err(err) if is_version_collision(&err) => {
                    tracing::warn!(
                        template_type = %request.template_type,
                        version = %version,
                        attempt,
                        "Template version collision, retrying with suffix"
                    );
                    continue;
                }
                Err(err) => return Err(err),
            }
        }

        Err(DomainError::VersionAllocationFailed {
            attempts: MAX_VERSION_ATTEMPTS,
        }
        .into())
    }

    /// Single insert attempt inside its own transaction.
    async fn try_insert(
        &self,
        request: &CreateTemplateRequest,
        template_id: &str,
        version: &str,
        created_by: Option<Uuid>,
    ) -> Result<Template, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if request.is_default {
            clear_default(&mut tx, request.template_type).await?;
        }

        let query = format!(
            r#"
            INSERT INTO templates (
                template_id, name, description, template_type, version,
                is_default, is_active, body, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7, $8)
            RETURNING {TEMPLATE_COLUMNS}
            "#
        );
        let entity = sqlx::query_as::<_, TemplateEntity>(&query)
            .bind(template_id)
            .bind(&request.name)
            .bind(&request.description)
            .bind(request.template_type.to_string())
            .bind(version)
            .bind(request.is_default)
            .bind(&request.body)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(entity.into())
    }

    /// Find a template by its database id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Template>, sqlx::Error> {
        let query = format!("SELECT {TEMPLATE_COLUMNS} FROM templates WHERE id = $1");
        let entity = sqlx::query_as::<_, TemplateEntity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Template::from))
    }

    /// List templates, newest first, with optional filters.
    pub async fn list(&self, query: &ListTemplatesQuery) -> Result<Vec<Template>, sqlx::Error> {
        let mut conditions = vec!["TRUE".to_string()];
        let mut param_count = 0;

        if query.template_type.is_some() {
            param_count += 1;
            conditions.push(format!("template_type = ${}", param_count));
        }
        if query.is_active.is_some() {
            param_count += 1;
            conditions.push(format!("is_active = ${}", param_count));
        }
        if query.is_default.is_some() {
            param_count += 1;
            conditions.push(format!("is_default = ${}", param_count));
        }

        let list_query = format!(
            "SELECT {TEMPLATE_COLUMNS} FROM templates WHERE {} ORDER BY created_at DESC",
            conditions.join(" AND ")
        );

        let mut builder = sqlx::query_as::<_, TemplateEntity>(&list_query);
        if let Some(template_type) = query.template_type {
            builder = builder.bind(template_type.to_string());
        }
        if let Some(is_active) = query.is_active {
            builder = builder.bind(is_active);
        }
        if let Some(is_default) = query.is_default {
            builder = builder.bind(is_default);
        }

        let entities = builder.fetch_all(&self.pool).await?;
        Ok(entities.into_iter().map(Template::from).collect())
    }

    /// List all active templates, newest first.
    pub async fn list_active(&self) -> Result<Vec<Template>, sqlx::Error> {
        self.list(&ListTemplatesQuery {
            is_active: Some(true),
            ..Default::default()
        })
        .await
    }

    /// List the default template of each type.
    pub async fn list_defaults(&self) -> Result<Vec<Template>, sqlx::Error> {
        self.list(&ListTemplatesQuery {
            is_default: Some(true),
            ..Default::default()
        })
        .await
    }

    /// The default template for a type, when one is configured.
    pub async fn get_default(
        &self,
        template_type: TemplateType,
    ) -> Result<Option<Template>, sqlx::Error> {
        let query = format!(
            "SELECT {TEMPLATE_COLUMNS} FROM templates WHERE template_type = $1 AND is_default"
        );
        let entity = sqlx::query_as::<_, TemplateEntity>(&query)
            .bind(template_type.to_string())
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(Template::from))
    }

    /// Make an existing template the default for its type.
    ///
    /// Clears the previous default of that type in the same transaction.
    pub async fn set_default(&self, id: Uuid) -> Result<Template, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let find_query =
            format!("SELECT {TEMPLATE_COLUMNS} FROM templates WHERE id = $1 FOR UPDATE");
        let entity = sqlx::query_as::<_, TemplateEntity>(&find_query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("template {id}")))?;

        let template_type = entity
            .template_type
            .parse::<TemplateType>()
            .unwrap_or(TemplateType::Certificate);
        clear_default(&mut tx, template_type).await?;

        let update_query = format!(
            "UPDATE templates SET is_default = TRUE WHERE id = $1 RETURNING {TEMPLATE_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, TemplateEntity>(&update_query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated.into())
    }

    /// Deactivate a template; it stays resolvable for existing references.
    pub async fn deactivate(&self, id: Uuid) -> Result<Template, RepositoryError> {
        let query = format!(
            "UPDATE templates SET is_active = FALSE, is_default = FALSE \
             WHERE id = $1 RETURNING {TEMPLATE_COLUMNS}"
        );
        let entity = sqlx::query_as::<_, TemplateEntity>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("template {id}")))?;

        Ok(entity.into())
    }

    /// Delete a template that no certification references.
    ///
    /// The `certifications.template_id` foreign key is RESTRICT, so the
    /// database rejects the delete the moment any certification references
    /// the template; there is no window for a concurrent create to detach.
    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM templates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|err| map_delete_error(err.into(), id))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!("template {id}")).into());
        }

        tracing::info!(template_id = %id, "Deleted template");
        Ok(())
    }
}

/// Translate a blocked delete into `TemplateInUse`; other errors pass through.
fn map_delete_error(err: RepositoryError, id: Uuid) -> RepositoryError {
    if err.is_foreign_key_violation(Some(CERTIFICATION_TEMPLATE_FK)) {
        DomainError::TemplateInUse(id).into()
    } else {
        err
    }
}

/// Whether an insert failure is a collision on the allocated version.
fn is_version_collision(err: &RepositoryError) -> bool {
    VERSION_CONSTRAINTS
        .iter()
        .any(|name| err.is_unique_violation(Some(name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::testing::{foreign_key_violation, unique_violation};
    use chrono::TimeZone;

    #[test]
    fn test_same_second_default_creates_get_distinct_versions() {
        // Two defaults of one type created in the same second allocate the
        // same base version. Clearing the earlier default rewrites its
        // `(type, version, is_default)` triple, so the second insert only
        // collides on the `(template_type, version)` pair; that collision
        // must trigger the suffix retry, after which the versions differ.
        let now = Utc.with_ymd_and_hms(2026, 8, 23, 14, 30, 15).unwrap();
        let first = versioned_with_attempt(&allocate_version(now), 0);
        let second_base = allocate_version(now);
        assert_eq!(first, second_base);

        let pair_collision = unique_violation("templates_type_version_key");
        assert!(is_version_collision(&pair_collision));

        let second = versioned_with_attempt(&second_base, 1);
        assert_ne!(first, second);
    }

    #[test]
    fn test_version_collision_recognizes_both_constraints() {
        assert!(is_version_collision(&unique_violation(
            "templates_type_version_key"
        )));
        assert!(is_version_collision(&unique_violation(
            "templates_type_version_default_key"
        )));
        // A different unique constraint must surface to the caller instead
        // of burning a retry attempt.
        assert!(!is_version_collision(&unique_violation(
            "templates_template_id_key"
        )));
        assert!(!is_version_collision(&RepositoryError::Database(
            sqlx::Error::RowNotFound
        )));
    }

    #[test]
    fn test_blocked_delete_becomes_template_in_use() {
        let id = Uuid::new_v4();
        let err = map_delete_error(foreign_key_violation(CERTIFICATION_TEMPLATE_FK), id);
        match err {
            RepositoryError::Domain(DomainError::TemplateInUse(blocked)) => {
                assert_eq!(blocked, id);
            }
            other => panic!("Expected TemplateInUse, got {:?}", other),
        }
    }

    #[test]
    fn test_unrelated_delete_errors_pass_through() {
        let id = Uuid::new_v4();
        let err = map_delete_error(foreign_key_violation("certifications_client_id_fkey"), id);
        assert!(matches!(err, RepositoryError::Database(_)));
    }
}

/// Clear the current default of a type, if any, on an open transaction.
async fn clear_default(
    conn: &mut PgConnection,
    template_type: TemplateType,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE templates SET is_default = FALSE WHERE template_type = $1 AND is_default")
        .bind(template_type.to_string())
        .execute(conn)
        .await?;
    Ok(())
}
