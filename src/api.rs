use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::User;
use crate::entities::{Place, PlaceParams};
use crate::error::Error;

/// Place lifecycle as seen by a caller holding an optional signed-in user.
///
/// Failures are checked in a fixed order: authentication, existence,
/// ownership, validation, uniqueness. The first one that holds is returned.
#[async_trait]
pub trait PlaceAPI {
    async fn list_places(&self) -> Result<Vec<Place>, Error>;

    /// Blank form for a new place.
    async fn new_place(&self, user: Option<User>) -> Result<PlaceParams, Error>;

    async fn create_place(&self, user: Option<User>, params: PlaceParams)
        -> Result<Place, Error>;

    /// Anyone, signed in or not, may view a place.
    async fn find_place(&self, id: &str) -> Result<Place, Error>;

    async fn edit_place(&self, user: Option<User>, id: &str) -> Result<Place, Error>;

    async fn update_place(
        &self,
        user: Option<User>,
        id: &str,
        params: PlaceParams,
    ) -> Result<Place, Error>;

    async fn destroy_place(&self, user: Option<User>, id: &str) -> Result<(), Error>;

    /// Conflict if the user already owns a place with this name and address.
    async fn check_unique_place(&self, user: Option<User>, params: PlaceParams)
        -> Result<(), Error>;
}

pub trait API: PlaceAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
