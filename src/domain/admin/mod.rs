//! Admin accounts and the dashboard read model.

mod aggregate;
mod dashboard;

pub use aggregate::{Admin, AdminProfile};
pub use dashboard::{DashboardStats, MembershipCounts, SalesSummary, RECENT_PURCHASES_LIMIT};
