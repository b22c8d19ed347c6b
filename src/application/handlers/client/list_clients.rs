//! ListClientsHandler - paginated admin listing with search and status filter.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::client::{ClientError, ClientProfile};
use crate::domain::membership::MembershipStatus;
use crate::ports::{ClientListQuery, ClientRepository};

/// Largest page an admin can request.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone)]
pub struct ListClientsQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub status: Option<MembershipStatus>,
}

impl Default for ListClientsQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: None,
            status: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientSummary {
    #[serde(flatten)]
    pub profile: ClientProfile,
    pub purchase_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(total: u64, page: u32, limit: u32) -> Self {
        let limit_u64 = u64::from(limit.max(1));
        Self {
            total,
            page,
            limit,
            total_pages: total.div_ceil(limit_u64),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientListResult {
    pub data: Vec<ClientSummary>,
    pub pagination: Pagination,
}

pub struct ListClientsHandler {
    clients: Arc<dyn ClientRepository>,
}

impl ListClientsHandler {
    pub fn new(clients: Arc<dyn ClientRepository>) -> Self {
        Self { clients }
    }

    pub async fn handle(&self, query: ListClientsQuery) -> Result<ClientListResult, ClientError> {
        if query.page < 1 {
            return Err(ClientError::validation("page", "page must be at least 1"));
        }
        if query.limit < 1 || query.limit > MAX_PAGE_SIZE {
            return Err(ClientError::validation(
                "limit",
                format!("limit must be between 1 and {}", MAX_PAGE_SIZE),
            ));
        }

        let search = query
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let page = self
            .clients
            .list(&ClientListQuery {
                page: query.page,
                limit: query.limit,
                search,
                status: query.status,
            })
            .await?;

        Ok(ClientListResult {
            data: page
                .entries
                .into_iter()
                .map(|entry| ClientSummary {
                    profile: entry.client.profile(),
                    purchase_count: entry.purchase_count,
                })
                .collect(),
            pagination: Pagination::new(page.total, query.page, query.limit),
        })
    }
}
