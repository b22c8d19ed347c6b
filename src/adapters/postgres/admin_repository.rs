//! PostgreSQL implementation of AdminRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::admin::Admin;
use crate::domain::foundation::{AdminId, DomainError, ErrorCode, Timestamp};
use crate::ports::AdminRepository;

use super::columns::{db_error, violates};

pub struct PostgresAdminRepository {
    pool: PgPool,
}

impl PostgresAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: Uuid,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Admin::reconstitute(
            AdminId::from_uuid(row.id),
            row.email,
            row.password_hash,
            row.first_name,
            row.last_name,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        )
    }
}

#[async_trait]
impl AdminRepository for PostgresAdminRepository {
    async fn find_by_id(&self, id: &AdminId) -> Result<Option<Admin>, DomainError> {
        let row: Option<AdminRow> = sqlx::query_as(
            r#"
            SELECT id, email, password_hash, first_name, last_name, created_at, updated_at
            FROM admins
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find admin", e))?;

        Ok(row.map(Admin::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, DomainError> {
        let row: Option<AdminRow> = sqlx::query_as(
            r#"
            SELECT id, email, password_hash, first_name, last_name, created_at, updated_at
            FROM admins
            WHERE email = $1
            "#,
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find admin", e))?;

        Ok(row.map(Admin::from))
    }

    async fn save(&self, admin: &Admin) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO admins (id, email, password_hash, first_name, last_name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(admin.id().as_uuid())
        .bind(admin.email())
        .bind(admin.password_hash())
        .bind(admin.first_name())
        .bind(admin.last_name())
        .bind(admin.created_at().as_datetime())
        .bind(admin.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "admins_email_key") {
                return DomainError::new(ErrorCode::Conflict, "Admin email already exists");
            }
            db_error("save admin", e)
        })?;

        Ok(())
    }
}
