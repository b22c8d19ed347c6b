//! GetDashboardStatsHandler - headline numbers for the admin dashboard.

use std::sync::Arc;

use crate::domain::admin::{DashboardStats, RECENT_PURCHASES_LIMIT};
use crate::domain::foundation::DomainError;
use crate::ports::{ClientRepository, PurchaseRepository};

pub struct GetDashboardStatsHandler {
    clients: Arc<dyn ClientRepository>,
    purchases: Arc<dyn PurchaseRepository>,
}

impl GetDashboardStatsHandler {
    pub fn new(clients: Arc<dyn ClientRepository>, purchases: Arc<dyn PurchaseRepository>) -> Self {
        Self { clients, purchases }
    }

    pub async fn handle(&self) -> Result<DashboardStats, DomainError> {
        let counts = self.clients.membership_counts().await?;
        let sales = self.purchases.sales_summary().await?;
        let recent = self.purchases.list_recent(RECENT_PURCHASES_LIMIT).await?;
        Ok(DashboardStats::assemble(counts, sales, recent))
    }
}
