use async_trait::async_trait;
use axum::extract::{FromRequest, RequestParts};

use crate::auth::{DynAuthenticator, User};
use crate::error::{unexpected_error, Error};

/// The signed-in user, or `None` for anonymous requests.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

#[async_trait]
impl<B> FromRequest<B> for CurrentUser
where
    B: Send,
{
    type Rejection = Error;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        let authenticator = req
            .extensions()
            .get::<DynAuthenticator>()
            .cloned()
            .ok_or_else(|| {
                tracing::error!("authenticator extension missing");
                unexpected_error()
            })?;

        Ok(Self(authenticator.authenticate(req.headers())))
    }
}
