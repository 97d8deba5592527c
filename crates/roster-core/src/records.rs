//! PostgreSQL profile record store
//!
//! Provides CRUD access to the shared roster of profile records using SQLx
//! and PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{Result, RosterError};

/// One entry in the personnel roster
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileRecord {
    /// Record UUID
    pub id: Uuid,

    /// Person's full name
    pub name: String,

    /// Contact email address
    pub email: String,

    /// Contact phone number
    pub phone: String,

    /// Date of birth
    pub date_of_birth: NaiveDate,

    /// Employment status (e.g. "active", "on-leave")
    pub status: String,

    /// Authority level (e.g. "staff", "manager")
    pub authority: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Field set for creating or replacing a profile record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecordDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub status: String,
    pub authority: String,
}

/// Profile record row from database
#[derive(Debug, FromRow)]
struct RecordRow {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    date_of_birth: NaiveDate,
    status: String,
    authority: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RecordRow> for ProfileRecord {
    fn from(row: RecordRow) -> Self {
        ProfileRecord {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            date_of_birth: row.date_of_birth,
            status: row.status,
            authority: row.authority,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Trait for profile record operations
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Store a new profile record
    async fn create_record(&self, draft: &ProfileRecordDraft) -> Result<ProfileRecord>;

    /// List profile records, newest first
    async fn list_records(&self, limit: i64, offset: i64) -> Result<Vec<ProfileRecord>>;

    /// Replace a record's fields; returns `None` when the id is unknown
    async fn update_record(
        &self,
        id: Uuid,
        draft: &ProfileRecordDraft,
    ) -> Result<Option<ProfileRecord>>;

    /// Delete a record; returns `false` when the id is unknown
    async fn delete_record(&self, id: Uuid) -> Result<bool>;
}

/// PostgreSQL profile record store
pub struct RecordStore {
    pool: PgPool,
}

impl RecordStore {
    /// Create a new record store connection
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| RosterError::DatabaseError(format!("PostgreSQL connection failed: {e}")))?;

        Ok(Self { pool })
    }

    /// Create from an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RecordRepository for RecordStore {
    async fn create_record(&self, draft: &ProfileRecordDraft) -> Result<ProfileRecord> {
        let row = sqlx::query_as::<_, RecordRow>(
            r#"
            INSERT INTO profile_records
                (id, name, email, phone, date_of_birth, status, authority, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
            RETURNING id, name, email, phone, date_of_birth, status, authority, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(draft.date_of_birth)
        .bind(&draft.status)
        .bind(&draft.authority)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_records(&self, limit: i64, offset: i64) -> Result<Vec<ProfileRecord>> {
        let rows = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT id, name, email, phone, date_of_birth, status, authority, created_at, updated_at
            FROM profile_records
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProfileRecord::from).collect())
    }

    async fn update_record(
        &self,
        id: Uuid,
        draft: &ProfileRecordDraft,
    ) -> Result<Option<ProfileRecord>> {
        let row = sqlx::query_as::<_, RecordRow>(
            r#"
            UPDATE profile_records
            SET name = $2, email = $3, phone = $4, date_of_birth = $5,
                status = $6, authority = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, phone, date_of_birth, status, authority, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(draft.date_of_birth)
        .bind(&draft.status)
        .bind(&draft.authority)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProfileRecord::from))
    }

    async fn delete_record(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM profile_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
