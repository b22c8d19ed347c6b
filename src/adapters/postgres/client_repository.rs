//! PostgreSQL implementation of ClientRepository.
//!
//! Membership fields live on the client row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::admin::MembershipCounts;
use crate::domain::client::Client;
use crate::domain::foundation::{ClientId, DomainError, ErrorCode, Timestamp};
use crate::domain::membership::{Membership, MembershipStatus};
use crate::ports::{ClientListEntry, ClientListQuery, ClientPage, ClientRepository};

use super::columns::{contains_pattern, count, db_error, money, parse_enum, violates};

const CLIENT_COLUMNS: &str = r#"
    c.id, c.email, c.password_hash, c.first_name, c.last_name, c.profile_image,
    c.qr_code_url, c.membership_status, c.membership_paid_date, c.membership_due_date,
    c.last_paid_amount, c.membership_payment_ref, c.created_at, c.updated_at
"#;

pub struct PostgresClientRepository {
    pool: PgPool,
}

impl PostgresClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: Uuid,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    profile_image: Option<String>,
    qr_code_url: Option<String>,
    membership_status: String,
    membership_paid_date: Option<DateTime<Utc>>,
    membership_due_date: Option<DateTime<Utc>>,
    last_paid_amount: Option<i64>,
    membership_payment_ref: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ClientRow> for Client {
    type Error = DomainError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let membership = Membership {
            status: parse_enum("membership_status", &row.membership_status)?,
            paid_date: row.membership_paid_date.map(Timestamp::from_datetime),
            due_date: row.membership_due_date.map(Timestamp::from_datetime),
            last_paid_amount: row
                .last_paid_amount
                .map(|kobo| money("last_paid_amount", kobo))
                .transpose()?,
            payment_reference: row.membership_payment_ref,
        };

        Ok(Client::reconstitute(
            ClientId::from_uuid(row.id),
            row.email,
            row.password_hash,
            row.first_name,
            row.last_name,
            row.profile_image,
            row.qr_code_url,
            membership,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClientListRow {
    #[sqlx(flatten)]
    client: ClientRow,
    purchase_count: i64,
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn create(&self, client: &Client) -> Result<(), DomainError> {
        let m = client.membership();
        sqlx::query(
            r#"
            INSERT INTO clients (
                id, email, password_hash, first_name, last_name, profile_image, qr_code_url,
                membership_status, membership_paid_date, membership_due_date, last_paid_amount,
                membership_payment_ref, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(client.id().as_uuid())
        .bind(client.email())
        .bind(client.password_hash())
        .bind(client.first_name())
        .bind(client.last_name())
        .bind(client.profile_image())
        .bind(client.qr_code_url())
        .bind(m.status.as_str())
        .bind(m.paid_date.map(|t| *t.as_datetime()))
        .bind(m.due_date.map(|t| *t.as_datetime()))
        .bind(m.last_paid_amount.map(|a| a.minor()))
        .bind(m.payment_reference.as_deref())
        .bind(client.created_at().as_datetime())
        .bind(client.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "clients_email_key") {
                return DomainError::new(
                    ErrorCode::EmailAlreadyRegistered,
                    "Email already registered",
                );
            }
            db_error("create client", e)
        })?;

        Ok(())
    }

    async fn update(&self, client: &Client) -> Result<(), DomainError> {
        let m = client.membership();
        let result = sqlx::query(
            r#"
            UPDATE clients SET
                password_hash = $2,
                first_name = $3,
                last_name = $4,
                profile_image = $5,
                qr_code_url = $6,
                membership_status = $7,
                membership_paid_date = $8,
                membership_due_date = $9,
                last_paid_amount = $10,
                membership_payment_ref = $11,
                updated_at = $12
            WHERE id = $1
            "#,
        )
        .bind(client.id().as_uuid())
        .bind(client.password_hash())
        .bind(client.first_name())
        .bind(client.last_name())
        .bind(client.profile_image())
        .bind(client.qr_code_url())
        .bind(m.status.as_str())
        .bind(m.paid_date.map(|t| *t.as_datetime()))
        .bind(m.due_date.map(|t| *t.as_datetime()))
        .bind(m.last_paid_amount.map(|a| a.minor()))
        .bind(m.payment_reference.as_deref())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update client", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::ClientNotFound, "Client not found"));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError> {
        let row: Option<ClientRow> =
            sqlx::query_as(&format!("SELECT {} FROM clients c WHERE c.id = $1", CLIENT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find client", e))?;

        row.map(Client::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, DomainError> {
        let row: Option<ClientRow> = sqlx::query_as(&format!(
            "SELECT {} FROM clients c WHERE c.email = $1",
            CLIENT_COLUMNS
        ))
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find client", e))?;

        row.map(Client::try_from).transpose()
    }

    async fn delete(&self, id: &ClientId) -> Result<(), DomainError> {
        // purchases and their lines go with the client (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete client", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::ClientNotFound, "Client not found"));
        }
        Ok(())
    }

    async fn list(&self, query: &ClientListQuery) -> Result<ClientPage, DomainError> {
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(contains_pattern);
        let status = query.status.map(|s| s.as_str());

        const FILTER: &str = r#"
            ($1::TEXT IS NULL
                OR c.email ILIKE $1
                OR c.first_name ILIKE $1
                OR c.last_name ILIKE $1)
            AND ($2::TEXT IS NULL OR c.membership_status = $2)
        "#;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM clients c WHERE {}", FILTER))
            .bind(search.as_deref())
            .bind(status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("count clients", e))?;

        let rows: Vec<ClientListRow> = sqlx::query_as(&format!(
            r#"
            SELECT {},
                   (SELECT COUNT(*) FROM purchases p WHERE p.client_id = c.id) AS purchase_count
            FROM clients c
            WHERE {}
            ORDER BY c.created_at DESC
            LIMIT $3 OFFSET $4
            "#,
            CLIENT_COLUMNS, FILTER
        ))
        .bind(search.as_deref())
        .bind(status)
        .bind(i64::from(query.limit))
        .bind(i64::try_from(query.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list clients", e))?;

        let entries = rows
            .into_iter()
            .map(|row| {
                Ok(ClientListEntry {
                    purchase_count: count(row.purchase_count),
                    client: Client::try_from(row.client)?,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(ClientPage {
            entries,
            total: count(total),
        })
    }

    async fn membership_counts(&self) -> Result<MembershipCounts, DomainError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT membership_status, COUNT(*) FROM clients GROUP BY membership_status",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("count memberships", e))?;

        let mut counts = MembershipCounts::default();
        for (status, n) in rows {
            let status: MembershipStatus = parse_enum("membership_status", &status)?;
            counts.add(status, count(n));
        }
        Ok(counts)
    }
}
