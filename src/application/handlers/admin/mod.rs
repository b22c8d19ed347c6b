//! Admin handlers.

mod bootstrap_admin;
mod get_dashboard_stats;

pub use bootstrap_admin::{BootstrapAdminCommand, BootstrapAdminHandler, BootstrapOutcome};
pub use get_dashboard_stats::GetDashboardStatsHandler;
