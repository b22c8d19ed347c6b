//! Client repository port.
//!
//! Persists Client aggregates, including the membership fields carried on
//! each client row.

use async_trait::async_trait;

use crate::domain::admin::MembershipCounts;
use crate::domain::client::Client;
use crate::domain::foundation::{ClientId, DomainError};
use crate::domain::membership::MembershipStatus;

/// Filter and page for the admin client listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientListQuery {
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,
    /// Case-insensitive substring of email, first or last name.
    pub search: Option<String>,
    pub status: Option<MembershipStatus>,
}

impl ClientListQuery {
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

impl Default for ClientListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: None,
            status: None,
        }
    }
}

/// One client in a listing, with the number of purchases they made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientListEntry {
    pub client: Client,
    pub purchase_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientPage {
    pub entries: Vec<ClientListEntry>,
    /// Matching clients across all pages.
    pub total: u64,
}

#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Insert a new client.
    ///
    /// # Errors
    ///
    /// - `EmailAlreadyRegistered` if the email is taken
    /// - `DatabaseError` on persistence failure
    async fn create(&self, client: &Client) -> Result<(), DomainError>;

    /// Overwrite an existing client.
    ///
    /// # Errors
    ///
    /// - `ClientNotFound` if the client doesn't exist
    async fn update(&self, client: &Client) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError>;

    /// Lookup by normalized (lower-cased) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, DomainError>;

    /// Delete a client together with their purchases.
    ///
    /// # Errors
    ///
    /// - `ClientNotFound` if the client doesn't exist
    async fn delete(&self, id: &ClientId) -> Result<(), DomainError>;

    /// Newest first.
    async fn list(&self, query: &ClientListQuery) -> Result<ClientPage, DomainError>;

    async fn membership_counts(&self) -> Result<MembershipCounts, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ClientRepository) {}
    }

    #[test]
    fn offset_is_zero_based() {
        let query = ClientListQuery {
            page: 3,
            limit: 20,
            ..Default::default()
        };
        assert_eq!(query.offset(), 40);
        assert_eq!(ClientListQuery::default().offset(), 0);
    }
}
