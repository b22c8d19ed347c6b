//! Admin dashboard read model.

use serde::Serialize;

use crate::domain::foundation::Money;
use crate::domain::membership::MembershipStatus;
use crate::domain::store::Purchase;

/// Number of recent purchases shown on the dashboard.
pub const RECENT_PURCHASES_LIMIT: usize = 5;

/// Clients per membership status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MembershipCounts {
    pub active: u64,
    pub inactive: u64,
    pub expired: u64,
}

impl MembershipCounts {
    pub fn add(&mut self, status: MembershipStatus, count: u64) {
        match status {
            MembershipStatus::Active => self.active += count,
            MembershipStatus::Inactive => self.inactive += count,
            MembershipStatus::Expired => self.expired += count,
        }
    }

    pub fn total(&self) -> u64 {
        self.active + self.inactive + self.expired
    }
}

/// Aggregated sales figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SalesSummary {
    pub total_purchases: u64,
    /// Sum over completed purchases only.
    pub total_revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_clients: u64,
    pub active_members: u64,
    pub total_purchases: u64,
    pub total_revenue: Money,
    pub recent_purchases: Vec<Purchase>,
    pub membership_stats: MembershipCounts,
}

impl DashboardStats {
    pub fn assemble(
        membership: MembershipCounts,
        sales: SalesSummary,
        recent_purchases: Vec<Purchase>,
    ) -> Self {
        Self {
            total_clients: membership.total(),
            active_members: membership.active,
            total_purchases: sales.total_purchases,
            total_revenue: sales.total_revenue,
            recent_purchases,
            membership_stats: membership,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_are_derived_from_membership_counts() {
        let mut counts = MembershipCounts::default();
        counts.add(MembershipStatus::Active, 4);
        counts.add(MembershipStatus::Inactive, 2);
        counts.add(MembershipStatus::Expired, 1);

        let sales = SalesSummary {
            total_purchases: 9,
            total_revenue: Money::from_major(35000.0).unwrap(),
        };
        let stats = DashboardStats::assemble(counts, sales, vec![]);

        assert_eq!(stats.total_clients, 7);
        assert_eq!(stats.active_members, 4);
        assert_eq!(stats.total_purchases, 9);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_revenue"], 35000.0);
        assert_eq!(json["membership_stats"]["expired"], 1);
    }
}
