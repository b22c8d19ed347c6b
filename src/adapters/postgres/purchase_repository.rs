//! PostgreSQL implementation of PurchaseRepository.
//!
//! A purchase is one `purchases` row plus its `purchase_items` rows. Both
//! writes (placing and completing) run in a single transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::admin::SalesSummary;
use crate::domain::foundation::{
    ClientId, DomainError, ErrorCode, PurchaseId, PurchaseItemId, StoreItemId, Timestamp,
};
use crate::domain::store::{Purchase, PurchaseItem};
use crate::ports::PurchaseRepository;

use super::columns::{count, db_error, money, parse_enum, violates};

const PURCHASE_COLUMNS: &str = r#"
    id, client_id, total_amount, delivery_option, delivery_address, payment_reference,
    payment_verified, status, created_at, updated_at
"#;

pub struct PostgresPurchaseRepository {
    pool: PgPool,
}

impl PostgresPurchaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attaches line items to purchase rows, keeping the row order.
    async fn hydrate(&self, rows: Vec<PurchaseRow>) -> Result<Vec<Purchase>, DomainError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

        let lines: Vec<PurchaseItemRow> = sqlx::query_as(
            r#"
            SELECT id, purchase_id, store_item_id, item_name, quantity, unit_price, total_price
            FROM purchase_items
            WHERE purchase_id = ANY($1)
            ORDER BY purchase_id, position
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("load purchase items", e))?;

        let mut by_purchase: HashMap<Uuid, Vec<PurchaseItem>> = HashMap::new();
        for line in lines {
            let purchase_id = line.purchase_id;
            by_purchase
                .entry(purchase_id)
                .or_default()
                .push(PurchaseItem::try_from(line)?);
        }

        rows.into_iter()
            .map(|row| {
                let items = by_purchase.remove(&row.id).unwrap_or_default();
                row.into_purchase(items)
            })
            .collect()
    }

    async fn fetch(&self, sql: &str, bind: Option<Uuid>) -> Result<Vec<Purchase>, DomainError> {
        let mut query = sqlx::query_as::<_, PurchaseRow>(sql);
        if let Some(id) = bind {
            query = query.bind(id);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("load purchases", e))?;
        self.hydrate(rows).await
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PurchaseRow {
    id: Uuid,
    client_id: Uuid,
    total_amount: i64,
    delivery_option: String,
    delivery_address: Option<String>,
    payment_reference: String,
    payment_verified: bool,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PurchaseRow {
    fn into_purchase(self, items: Vec<PurchaseItem>) -> Result<Purchase, DomainError> {
        Ok(Purchase::reconstitute(
            PurchaseId::from_uuid(self.id),
            ClientId::from_uuid(self.client_id),
            money("total_amount", self.total_amount)?,
            parse_enum("delivery_option", &self.delivery_option)?,
            self.delivery_address,
            self.payment_reference,
            self.payment_verified,
            parse_enum("status", &self.status)?,
            items,
            Timestamp::from_datetime(self.created_at),
            Timestamp::from_datetime(self.updated_at),
        ))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PurchaseItemRow {
    id: Uuid,
    purchase_id: Uuid,
    store_item_id: Uuid,
    item_name: String,
    quantity: i32,
    unit_price: i64,
    total_price: i64,
}

impl TryFrom<PurchaseItemRow> for PurchaseItem {
    type Error = DomainError;

    fn try_from(row: PurchaseItemRow) -> Result<Self, Self::Error> {
        Ok(PurchaseItem {
            id: PurchaseItemId::from_uuid(row.id),
            store_item_id: StoreItemId::from_uuid(row.store_item_id),
            item_name: row.item_name,
            quantity: u32::try_from(row.quantity).map_err(|_| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Invalid purchase item quantity: {}", row.quantity),
                )
            })?,
            unit_price: money("unit_price", row.unit_price)?,
            total_price: money("total_price", row.total_price)?,
        })
    }
}

async fn insert_lines(
    tx: &mut Transaction<'_, Postgres>,
    purchase: &Purchase,
) -> Result<(), DomainError> {
    for (position, line) in purchase.items().iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO purchase_items (
                id, purchase_id, store_item_id, item_name, quantity, unit_price, total_price, position
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(line.id.as_uuid())
        .bind(purchase.id().as_uuid())
        .bind(line.store_item_id.as_uuid())
        .bind(&line.item_name)
        .bind(i32::try_from(line.quantity).unwrap_or(i32::MAX))
        .bind(line.unit_price.minor())
        .bind(line.total_price.minor())
        .bind(i32::try_from(position).unwrap_or(i32::MAX))
        .execute(&mut **tx)
        .await
        .map_err(|e| db_error("insert purchase item", e))?;
    }
    Ok(())
}

#[async_trait]
impl PurchaseRepository for PostgresPurchaseRepository {
    async fn create(&self, purchase: &Purchase) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO purchases (
                id, client_id, total_amount, delivery_option, delivery_address,
                payment_reference, payment_verified, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(purchase.id().as_uuid())
        .bind(purchase.client_id().as_uuid())
        .bind(purchase.total_amount().minor())
        .bind(purchase.delivery_option().as_str())
        .bind(purchase.delivery_address())
        .bind(purchase.payment_reference())
        .bind(purchase.is_payment_verified())
        .bind(purchase.status().as_str())
        .bind(purchase.created_at().as_datetime())
        .bind(purchase.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if violates(&e, "purchases_payment_reference_key") {
                return DomainError::new(ErrorCode::Conflict, "Duplicate payment reference");
            }
            db_error("insert purchase", e)
        })?;

        insert_lines(&mut tx, purchase).await?;

        tx.commit()
            .await
            .map_err(|e| db_error("commit purchase", e))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &PurchaseId) -> Result<Option<Purchase>, DomainError> {
        let purchases = self
            .fetch(
                &format!("SELECT {} FROM purchases WHERE id = $1", PURCHASE_COLUMNS),
                Some(*id.as_uuid()),
            )
            .await?;
        Ok(purchases.into_iter().next())
    }

    async fn list_all(&self) -> Result<Vec<Purchase>, DomainError> {
        self.fetch(
            &format!("SELECT {} FROM purchases ORDER BY created_at DESC", PURCHASE_COLUMNS),
            None,
        )
        .await
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Purchase>, DomainError> {
        self.fetch(
            &format!(
                "SELECT {} FROM purchases ORDER BY created_at DESC LIMIT {}",
                PURCHASE_COLUMNS, limit
            ),
            None,
        )
        .await
    }

    async fn list_by_client(&self, client_id: &ClientId) -> Result<Vec<Purchase>, DomainError> {
        self.fetch(
            &format!(
                "SELECT {} FROM purchases WHERE client_id = $1 ORDER BY created_at DESC",
                PURCHASE_COLUMNS
            ),
            Some(*client_id.as_uuid()),
        )
        .await
    }

    async fn complete(&self, id: &PurchaseId) -> Result<Option<Purchase>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin transaction", e))?;

        let row: Option<PurchaseRow> = sqlx::query_as(&format!(
            r#"
            UPDATE purchases SET
                payment_verified = TRUE,
                status = 'COMPLETED',
                updated_at = NOW()
            WHERE id = $1 AND payment_verified = FALSE
            RETURNING {}
            "#,
            PURCHASE_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| db_error("complete purchase", e))?;

        let Some(row) = row else {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM purchases WHERE id = $1)")
                    .bind(id.as_uuid())
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(|e| db_error("find purchase", e))?;
            if !exists {
                return Err(DomainError::new(ErrorCode::PurchaseNotFound, "Purchase not found"));
            }
            return Ok(None);
        };

        let lines: Vec<PurchaseItemRow> = sqlx::query_as(
            r#"
            SELECT id, purchase_id, store_item_id, item_name, quantity, unit_price, total_price
            FROM purchase_items
            WHERE purchase_id = $1
            ORDER BY position
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| db_error("load purchase items", e))?;
        let items = lines
            .into_iter()
            .map(PurchaseItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        for line in &items {
            let remaining: Option<i32> = sqlx::query_scalar(
                r#"
                UPDATE store_items SET quantity = quantity - $2, updated_at = NOW()
                WHERE id = $1
                RETURNING quantity
                "#,
            )
            .bind(line.store_item_id.as_uuid())
            .bind(i32::try_from(line.quantity).unwrap_or(i32::MAX))
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("withdraw stock", e))?;

            if let Some(remaining) = remaining.filter(|q| *q < 0) {
                tracing::warn!(
                    store_item_id = %line.store_item_id,
                    remaining,
                    "Stock went negative after purchase completion"
                );
            }
        }

        tx.commit()
            .await
            .map_err(|e| db_error("commit purchase completion", e))?;
        row.into_purchase(items).map(Some)
    }

    async fn sales_summary(&self) -> Result<SalesSummary, DomainError> {
        let (total, revenue): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(total_amount) FILTER (WHERE status = 'COMPLETED'), 0)::BIGINT
            FROM purchases
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("summarise sales", e))?;

        Ok(SalesSummary {
            total_purchases: count(total),
            total_revenue: money("total_revenue", revenue)?,
        })
    }
}
