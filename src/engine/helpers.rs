use uuid::Uuid;

use crate::{
    auth::User,
    db::PlaceStore,
    entities::{Place, PlaceParams},
    error::{conflict_error, not_found_error, unauthenticated_error, Error},
};

pub fn require_user(user: Option<User>) -> Result<User, Error> {
    user.ok_or_else(unauthenticated_error)
}

/// Ids that do not parse can never name a stored place.
pub fn parse_id(id: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(id).map_err(|_| not_found_error())
}

#[tracing::instrument(skip(store))]
pub async fn fetch_place(store: &(dyn PlaceStore + Send + Sync), id: &str) -> Result<Place, Error> {
    let id = parse_id(id)?;

    store.find(id).await?.ok_or_else(not_found_error)
}

/// Fails with a conflict when `owner` already has a place with these
/// name and address, other than `except`.
#[tracing::instrument(skip(store))]
pub async fn ensure_unique(
    store: &(dyn PlaceStore + Send + Sync),
    owner: &User,
    params: &PlaceParams,
    except: Option<Uuid>,
) -> Result<(), Error> {
    let existing = store
        .find_by_identity(owner.id, &params.name, &params.address)
        .await?;

    match existing {
        Some(place) if Some(place.id) != except => Err(conflict_error()),
        _ => Ok(()),
    }
}

#[test]
fn parse_id_test() {
    assert!(parse_id("celia").unwrap_err().is_not_found_error());
    assert!(parse_id("12").unwrap_err().is_not_found_error());

    let id = Uuid::new_v4();
    assert_eq!(parse_id(&id.to_string()).unwrap(), id);
}

#[test]
fn require_user_test() {
    assert!(require_user(None).unwrap_err().is_unauthenticated_error());

    let user = User::new(Uuid::new_v4());
    assert_eq!(require_user(Some(user.clone())).unwrap(), user);
}
