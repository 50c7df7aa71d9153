use std::sync::Arc;

use axum::http::HeaderMap;
use uuid::Uuid;

use crate::auth::User;

/// Header an upstream session layer sets to the signed-in user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Resolves the signed-in user of a request, if any.
pub trait Authenticator {
    fn authenticate(&self, headers: &HeaderMap) -> Option<User>;
}

pub type DynAuthenticator = Arc<dyn Authenticator + Send + Sync>;

/// Trusts the user id forwarded by the session layer in front of this service.
#[derive(Clone, Debug, Default)]
pub struct TrustedHeaderAuthenticator;

impl Authenticator for TrustedHeaderAuthenticator {
    fn authenticate(&self, headers: &HeaderMap) -> Option<User> {
        let value = headers.get(USER_ID_HEADER)?.to_str().ok()?;

        match Uuid::parse_str(value.trim()) {
            Ok(id) => Some(User::new(id)),
            Err(err) => {
                tracing::debug!(%err, "ignoring malformed user id header");
                None
            }
        }
    }
}
