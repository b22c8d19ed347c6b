//! PostgreSQL implementation of StoreItemRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, StoreItemId, Timestamp};
use crate::domain::store::StoreItem;
use crate::ports::StoreItemRepository;

use super::columns::{db_error, money};

pub struct PostgresStoreItemRepository {
    pool: PgPool,
}

impl PostgresStoreItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StoreItemRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    price: i64,
    quantity: i32,
    is_active: bool,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StoreItemRow> for StoreItem {
    type Error = DomainError;

    fn try_from(row: StoreItemRow) -> Result<Self, Self::Error> {
        Ok(StoreItem::reconstitute(
            StoreItemId::from_uuid(row.id),
            row.name,
            row.description,
            money("price", row.price)?,
            row.quantity,
            row.is_active,
            row.image_url,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

#[async_trait]
impl StoreItemRepository for PostgresStoreItemRepository {
    async fn save(&self, item: &StoreItem) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO store_items (
                id, name, description, price, quantity, is_active, image_url, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.name())
        .bind(item.description())
        .bind(item.price().minor())
        .bind(item.quantity())
        .bind(item.is_active())
        .bind(item.image_url())
        .bind(item.created_at().as_datetime())
        .bind(item.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("save store item", e))?;

        Ok(())
    }

    async fn update(&self, item: &StoreItem) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE store_items SET
                name = $2,
                description = $3,
                price = $4,
                quantity = $5,
                is_active = $6,
                image_url = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.name())
        .bind(item.description())
        .bind(item.price().minor())
        .bind(item.quantity())
        .bind(item.is_active())
        .bind(item.image_url())
        .bind(item.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update store item", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::StoreItemNotFound, "Store item not found"));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &StoreItemId) -> Result<Option<StoreItem>, DomainError> {
        let row: Option<StoreItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, price, quantity, is_active, image_url, created_at, updated_at
            FROM store_items
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find store item", e))?;

        row.map(StoreItem::try_from).transpose()
    }

    async fn list(&self, include_inactive: bool) -> Result<Vec<StoreItem>, DomainError> {
        let rows: Vec<StoreItemRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, price, quantity, is_active, image_url, created_at, updated_at
            FROM store_items
            WHERE $1 OR is_active
            ORDER BY created_at DESC
            "#,
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list store items", e))?;

        rows.into_iter().map(StoreItem::try_from).collect()
    }

    async fn delete(&self, id: &StoreItemId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM store_items WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                    DomainError::new(
                        ErrorCode::Conflict,
                        "Store item is referenced by existing purchases",
                    )
                }
                _ => db_error("delete store item", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::StoreItemNotFound, "Store item not found"));
        }
        Ok(())
    }
}
