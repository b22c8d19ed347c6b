//! Client directory handlers.

mod delete_client;
mod get_client;
mod list_client_purchases;
mod list_clients;
mod password_reset;
mod set_membership;
mod signup;
mod update_client;

pub use delete_client::{DeleteClientCommand, DeleteClientHandler, DeleteClientResult};
pub use get_client::{ClientDetail, GetClientHandler, GetClientQuery};
pub use list_client_purchases::{ListClientPurchasesHandler, ListClientPurchasesQuery};
pub use list_clients::{
    ClientListResult, ClientSummary, ListClientsHandler, ListClientsQuery, Pagination,
    MAX_PAGE_SIZE,
};
pub use password_reset::{
    ForgotPasswordCommand, ForgotPasswordHandler, PasswordResetMessage, ResetPasswordCommand,
    ResetPasswordHandler,
};
pub use set_membership::{
    ActivateMembershipCommand, ActivateMembershipHandler, DeactivateMembershipCommand,
    DeactivateMembershipHandler,
};
pub use signup::{SignupCommand, SignupHandler, SignupResult};
pub use update_client::{UpdateClientCommand, UpdateClientHandler};
