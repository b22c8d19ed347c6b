//! Authentication handlers.

mod login;
mod validate_credentials;

pub use login::{AdminLoginResult, ClientLoginResult, LoginCommand, LoginHandler};
pub use validate_credentials::CredentialsValidator;
