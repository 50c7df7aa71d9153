use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::PlaceStore;

use crate::entities::Place;
use crate::error::{conflict_error, not_found_error, Error};

/// Process-local store, kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryPlaceStore {
    places: RwLock<Vec<Place>>,
}

impl MemoryPlaceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlaceStore for MemoryPlaceStore {
    async fn all(&self) -> Result<Vec<Place>, Error> {
        Ok(self.places.read().await.clone())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Place>, Error> {
        let places = self.places.read().await;

        Ok(places.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_identity(
        &self,
        owner_id: Uuid,
        name: &str,
        address: &str,
    ) -> Result<Option<Place>, Error> {
        let places = self.places.read().await;

        Ok(places
            .iter()
            .find(|p| p.owner_id == owner_id && p.name == name && p.address == address)
            .cloned())
    }

    #[tracing::instrument(skip(self))]
    async fn insert(&self, place: &Place) -> Result<(), Error> {
        let mut places = self.places.write().await;

        if places.iter().any(|p| p.same_identity(place)) {
            return Err(conflict_error());
        }

        places.push(place.clone());

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn update(&self, place: &Place) -> Result<(), Error> {
        let mut places = self.places.write().await;

        if places
            .iter()
            .any(|p| p.id != place.id && p.same_identity(place))
        {
            return Err(conflict_error());
        }

        let stored = places
            .iter_mut()
            .find(|p| p.id == place.id)
            .ok_or_else(not_found_error)?;
        *stored = place.clone();

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), Error> {
        self.places.write().await.retain(|p| p.id != id);

        Ok(())
    }

    async fn count(&self) -> Result<i64, Error> {
        Ok(self.places.read().await.len() as i64)
    }
}
