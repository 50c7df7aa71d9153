use axum::extract::{rejection::JsonRejection, Extension, Json, Path};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::DynAPI;
use crate::auth::User;
use crate::entities::{Place, PlaceParams};
use crate::error::{malformed_body_error, unauthenticated_error, Error};
use crate::server::{place_path, redirect, CurrentUser, ROOT_PATH};

#[derive(Serialize, Deserialize)]
pub struct PlaceForm {
    #[serde(default)]
    place: PlaceParams,
}

/// Sends the submitted form back with a conflict, for the `template` view
/// to be shown again.
fn rerender(template: &str, params: &PlaceParams, err: Error) -> Response {
    let mut body = err.body();
    body["template"] = json!(template);
    body["place"] = json!(params);

    (err.status(), Json(body)).into_response()
}

/// Anonymous callers are sent to sign in before the body is looked at.
fn form_params(
    user: &Option<User>,
    form: Result<Json<PlaceForm>, JsonRejection>,
) -> Result<PlaceParams, Error> {
    if user.is_none() {
        return Err(unauthenticated_error());
    }

    match form {
        Ok(Json(form)) => Ok(form.place),
        Err(rejection) => Err(malformed_body_error(rejection.to_string())),
    }
}

pub async fn index(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<Place>>, Error> {
    let places = api.list_places().await?;

    Ok(places.into())
}

pub async fn new(
    Extension(api): Extension<DynAPI>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<PlaceForm>, Error> {
    let place = api.new_place(user).await?;

    Ok(PlaceForm { place }.into())
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    CurrentUser(user): CurrentUser,
    form: Result<Json<PlaceForm>, JsonRejection>,
) -> Result<Response, Error> {
    let params = form_params(&user, form)?;

    match api.create_place(user, params.clone()).await {
        Ok(_) => Ok(redirect(ROOT_PATH)),
        Err(err) if err.is_conflict_error() => Ok(rerender("new", &params, err)),
        Err(err) => Err(err),
    }
}

pub async fn show(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<Json<Place>, Error> {
    let place = api.find_place(&id).await?;

    Ok(place.into())
}

pub async fn edit(
    Extension(api): Extension<DynAPI>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Place>, Error> {
    let place = api.edit_place(user, &id).await?;

    Ok(place.into())
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    form: Result<Json<PlaceForm>, JsonRejection>,
) -> Result<Response, Error> {
    let params = form_params(&user, form)?;

    match api.update_place(user, &id, params.clone()).await {
        Ok(place) => Ok(redirect(&place_path(&place.id))),
        Err(err) if err.is_conflict_error() => Ok(rerender("edit", &params, err)),
        Err(err) => Err(err),
    }
}

pub async fn destroy(
    Extension(api): Extension<DynAPI>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Response, Error> {
    api.destroy_place(user, &id).await?;

    Ok(redirect(ROOT_PATH))
}

pub async fn check_unique(
    Extension(api): Extension<DynAPI>,
    CurrentUser(user): CurrentUser,
    form: Result<Json<PlaceForm>, JsonRejection>,
) -> Result<Json<serde_json::Value>, Error> {
    let params = form_params(&user, form)?;

    api.check_unique_place(user, params).await?;

    Ok(json!({ "unique": true }).into())
}
