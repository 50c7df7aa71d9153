mod memory;
mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::Place;
use crate::error::Error;

pub use memory::MemoryPlaceStore;
pub use postgres::PgPlaceStore;

/// Durable storage for places.
///
/// Implementations reject a second place with the same (owner, name, address)
/// with a conflict error, independently of any check made by the caller.
#[async_trait]
pub trait PlaceStore {
    /// All places, oldest first.
    async fn all(&self) -> Result<Vec<Place>, Error>;

    async fn find(&self, id: Uuid) -> Result<Option<Place>, Error>;

    async fn find_by_identity(
        &self,
        owner_id: Uuid,
        name: &str,
        address: &str,
    ) -> Result<Option<Place>, Error>;

    async fn insert(&self, place: &Place) -> Result<(), Error>;

    async fn update(&self, place: &Place) -> Result<(), Error>;

    async fn delete(&self, id: Uuid) -> Result<(), Error>;

    async fn count(&self) -> Result<i64, Error>;
}

pub type DynStore = Arc<dyn PlaceStore + Send + Sync>;
