mod authenticator;
pub mod authorizor;
mod user;

pub use authenticator::{Authenticator, DynAuthenticator, TrustedHeaderAuthenticator, USER_ID_HEADER};
pub use user::User;
