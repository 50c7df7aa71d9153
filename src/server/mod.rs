mod extract;
mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use crate::api::{DynAPI, API};
use crate::auth::{Authenticator, DynAuthenticator};
use crate::error::{unexpected_error, Error};
use crate::server::handlers::places;

pub use extract::CurrentUser;

pub const ROOT_PATH: &str = "/";

pub fn place_path(id: &uuid::Uuid) -> String {
    format!("/places/{}", id)
}

pub fn router(api: DynAPI, authenticator: DynAuthenticator) -> Router {
    Router::new()
        .route(ROOT_PATH, get(places::index))
        .route("/places", get(places::index).post(places::create))
        .route("/places/new", get(places::new))
        .route("/places/check_unique", post(places::check_unique))
        .route(
            "/places/:id",
            get(places::show)
                .patch(places::update)
                .put(places::update)
                .delete(places::destroy),
        )
        .route("/places/:id/edit", get(places::edit))
        .layer(Extension(api))
        .layer(Extension(authenticator))
}

pub async fn serve<T, A>(addr: SocketAddr, api: T, authenticator: A) -> Result<(), Error>
where
    T: API + Sync + Send + 'static,
    A: Authenticator + Sync + Send + 'static,
{
    let api = Arc::new(api) as DynAPI;
    let authenticator = Arc::new(authenticator) as DynAuthenticator;

    let app = router(api, authenticator);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!(%err, "server stopped");
            unexpected_error()
        })
}

fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}
