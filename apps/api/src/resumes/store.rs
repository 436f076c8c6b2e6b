//! Resume persistence — pluggable, trait-based store.
//!
//! Default: `PgResumeStore` (Postgres, document and style kept as JSONB).
//! `AppState` holds an `Arc<dyn ResumeStore>`; tests swap in an in-memory store.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumeDocument, ResumeRecord, ResumeRow, StyleSettings};

/// Fields for a new resume.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub user_id: Uuid,
    pub title: String,
    pub template_key: String,
    pub style_settings: StyleSettings,
    pub document: ResumeDocument,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct ResumeUpdate {
    pub title: Option<String>,
    pub template_key: Option<String>,
    pub style_settings: Option<StyleSettings>,
    pub document: Option<ResumeDocument>,
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn create(&self, new: NewResume) -> Result<ResumeRecord, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<ResumeRecord>, AppError>;

    /// Newest first.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ResumeRecord>, AppError>;

    async fn update(&self, id: Uuid, update: ResumeUpdate)
        -> Result<Option<ResumeRecord>, AppError>;

    /// Replaces only the document. Returns `false` if the resume no longer exists.
    async fn update_document(&self, id: Uuid, document: &ResumeDocument)
        -> Result<bool, AppError>;

    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, AppError> {
    serde_json::to_value(value).map_err(|e| AppError::Internal(e.into()))
}

// ────────────────────────────────────────────────────────────────────────────
// PgResumeStore
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn create(&self, new: NewResume) -> Result<ResumeRecord, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resumes (id, user_id, title, template_key, style_settings, document)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(&new.title)
        .bind(&new.template_key)
        .bind(to_json(&new.style_settings)?)
        .bind(to_json(&new.document)?)
        .fetch_one(&self.pool)
        .await?;

        info!("Created resume {} for user {}", row.id, row.user_id);
        Ok(row.into())
    }

    async fn get(&self, id: Uuid) -> Result<Option<ResumeRecord>, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(ResumeRecord::from))
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ResumeRecord>, AppError> {
        let rows = sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE user_id = $1 ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ResumeRecord::from).collect())
    }

    async fn update(
        &self,
        id: Uuid,
        update: ResumeUpdate,
    ) -> Result<Option<ResumeRecord>, AppError> {
        let style = update.style_settings.as_ref().map(to_json).transpose()?;
        let document = update.document.as_ref().map(to_json).transpose()?;

        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            UPDATE resumes SET
                title          = COALESCE($2, title),
                template_key   = COALESCE($3, template_key),
                style_settings = COALESCE($4, style_settings),
                document       = COALESCE($5, document),
                updated_at     = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.title)
        .bind(update.template_key)
        .bind(style)
        .bind(document)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(ResumeRecord::from))
    }

    async fn update_document(
        &self,
        id: Uuid,
        document: &ResumeDocument,
    ) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE resumes SET document = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(to_json(document)?)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() > 0 {
            info!("Deleted resume {id}");
        }
        Ok(result.rows_affected() > 0)
    }
}
