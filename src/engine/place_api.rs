use super::helpers::{ensure_unique, fetch_place, require_user};
use super::Engine;

use async_trait::async_trait;

use crate::{
    api::PlaceAPI,
    auth::User,
    entities::{Place, PlaceParams},
    error::Error,
};

#[async_trait]
impl PlaceAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn list_places(&self) -> Result<Vec<Place>, Error> {
        self.store.all().await
    }

    #[tracing::instrument(skip(self))]
    async fn new_place(&self, user: Option<User>) -> Result<PlaceParams, Error> {
        require_user(user)?;

        Ok(PlaceParams::default())
    }

    #[tracing::instrument(skip(self))]
    async fn create_place(
        &self,
        user: Option<User>,
        params: PlaceParams,
    ) -> Result<Place, Error> {
        let user = require_user(user)?;

        params.validate()?;
        ensure_unique(&*self.store, &user, &params, None).await?;

        let place = Place::new(user.id, params);
        self.store.insert(&place).await?;

        tracing::info!(place_id = %place.id, owner_id = %place.owner_id, "place created");

        Ok(place)
    }

    #[tracing::instrument(skip(self))]
    async fn find_place(&self, id: &str) -> Result<Place, Error> {
        fetch_place(&*self.store, id).await
    }

    #[tracing::instrument(skip(self))]
    async fn edit_place(&self, user: Option<User>, id: &str) -> Result<Place, Error> {
        let user = require_user(user)?;

        let place = fetch_place(&*self.store, id).await?;

        self.authorize(user, "edit", place.clone())?;

        Ok(place)
    }

    #[tracing::instrument(skip(self))]
    async fn update_place(
        &self,
        user: Option<User>,
        id: &str,
        params: PlaceParams,
    ) -> Result<Place, Error> {
        let user = require_user(user)?;

        let mut place = fetch_place(&*self.store, id).await?;

        self.authorize(user.clone(), "update", place.clone())?;

        params.validate()?;
        ensure_unique(&*self.store, &user, &params, Some(place.id)).await?;

        place.apply(params);
        self.store.update(&place).await?;

        tracing::info!(place_id = %place.id, "place updated");

        Ok(place)
    }

    #[tracing::instrument(skip(self))]
    async fn destroy_place(&self, user: Option<User>, id: &str) -> Result<(), Error> {
        let user = require_user(user)?;

        let place = fetch_place(&*self.store, id).await?;

        self.authorize(user, "destroy", place.clone())?;

        self.store.delete(place.id).await?;

        tracing::info!(place_id = %place.id, "place destroyed");

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn check_unique_place(
        &self,
        user: Option<User>,
        params: PlaceParams,
    ) -> Result<(), Error> {
        let user = require_user(user)?;

        ensure_unique(&*self.store, &user, &params, None).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use uuid::Uuid;

    use crate::api::PlaceAPI;
    use crate::auth::User;
    use crate::db::{MemoryPlaceStore, PlaceStore};
    use crate::engine::Engine;
    use crate::entities::PlaceParams;

    fn setup() -> (Engine, Arc<MemoryPlaceStore>) {
        let store = Arc::new(MemoryPlaceStore::new());
        let engine = Engine::new(store.clone()).unwrap();

        (engine, store)
    }

    fn user() -> Option<User> {
        Some(User::new(Uuid::new_v4()))
    }

    fn lingo() -> PlaceParams {
        PlaceParams::new(
            "Cafe Lingo",
            "Where the cool kids are.",
            "68 Jay Street, Suite 720, Brooklyn 11201",
        )
    }

    fn exchange() -> PlaceParams {
        PlaceParams::new(
            "Cafe Exchange",
            "Free coffee every Friday from 1pm to 2pm.",
            "16 State St, New York, NY",
        )
    }

    fn blank() -> PlaceParams {
        PlaceParams::new("", "", "")
    }

    #[tokio::test]
    async fn anonymous_callers_are_unauthenticated() {
        let (engine, _) = setup();
        let owner = user();
        let place = engine.create_place(owner, lingo()).await.unwrap();
        let id = place.id.to_string();

        assert!(engine.new_place(None).await.unwrap_err().is_unauthenticated_error());
        assert!(engine
            .create_place(None, lingo())
            .await
            .unwrap_err()
            .is_unauthenticated_error());
        assert!(engine
            .edit_place(None, "12")
            .await
            .unwrap_err()
            .is_unauthenticated_error());
        assert!(engine
            .update_place(None, &id, exchange())
            .await
            .unwrap_err()
            .is_unauthenticated_error());
        assert!(engine
            .destroy_place(None, &id)
            .await
            .unwrap_err()
            .is_unauthenticated_error());
        assert!(engine
            .check_unique_place(None, lingo())
            .await
            .unwrap_err()
            .is_unauthenticated_error());

        assert_eq!(engine.list_places().await.unwrap().len(), 1);
        assert_eq!(engine.find_place(&id).await.unwrap(), place);
    }

    #[tokio::test]
    async fn create_assigns_owner() {
        let (engine, store) = setup();
        let owner = user();

        let place = engine.create_place(owner.clone(), lingo()).await.unwrap();

        assert_eq!(place.name, "Cafe Lingo");
        assert_eq!(Some(place.owner_id), owner.map(|u| u.id));
        assert_eq!(store.find(place.id).await.unwrap(), Some(place));
    }

    #[tokio::test]
    async fn create_twice_conflicts_without_mutation() {
        let (engine, store) = setup();
        let owner = user();
        engine.create_place(owner.clone(), lingo()).await.unwrap();
        let count = store.count().await.unwrap();

        let err = engine.create_place(owner, lingo()).await.unwrap_err();

        assert!(err.is_conflict_error());
        assert_eq!(store.count().await.unwrap(), count);
    }

    #[tokio::test]
    async fn create_same_place_for_other_user() {
        let (engine, store) = setup();
        engine.create_place(user(), lingo()).await.unwrap();

        engine.create_place(user(), lingo()).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn create_blank_fails_validation() {
        let (engine, store) = setup();
        let err = engine.create_place(user(), blank()).await.unwrap_err();

        assert!(err.is_validation_error());
        assert_eq!(err.details.len(), 2);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn show_unknown_place() {
        let (engine, _) = setup();

        assert!(engine.find_place("celia").await.unwrap_err().is_not_found_error());
        assert!(engine
            .find_place(&Uuid::new_v4().to_string())
            .await
            .unwrap_err()
            .is_not_found_error());
    }

    #[tokio::test]
    async fn edit_checks_existence_then_ownership() {
        let (engine, _) = setup();
        let owner = user();
        let place = engine.create_place(owner.clone(), lingo()).await.unwrap();
        let id = place.id.to_string();

        assert_eq!(engine.edit_place(owner, &id).await.unwrap(), place);
        assert!(engine.edit_place(user(), &id).await.unwrap_err().is_forbidden_error());
        assert!(engine.edit_place(user(), "celia").await.unwrap_err().is_not_found_error());
    }

    #[tokio::test]
    async fn update_by_owner_persists() {
        let (engine, store) = setup();
        let owner = user();
        let place = engine.create_place(owner.clone(), lingo()).await.unwrap();

        let updated = engine
            .update_place(owner, &place.id.to_string(), exchange())
            .await
            .unwrap();

        assert_eq!(updated.id, place.id);
        let stored = store.find(place.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Cafe Exchange");
        assert_eq!(stored.address, "16 State St, New York, NY");
    }

    #[tokio::test]
    async fn update_by_stranger_is_forbidden_even_when_invalid() {
        let (engine, store) = setup();
        let place = engine.create_place(user(), lingo()).await.unwrap();
        let id = place.id.to_string();

        assert!(engine
            .update_place(user(), &id, exchange())
            .await
            .unwrap_err()
            .is_forbidden_error());
        assert!(engine
            .update_place(user(), &id, blank())
            .await
            .unwrap_err()
            .is_forbidden_error());
        assert_eq!(store.find(place.id).await.unwrap(), Some(place));
    }

    #[tokio::test]
    async fn update_with_blank_fields_keeps_place() {
        let (engine, store) = setup();
        let owner = user();
        let place = engine.create_place(owner.clone(), lingo()).await.unwrap();

        let err = engine
            .update_place(owner, &place.id.to_string(), blank())
            .await
            .unwrap_err();

        assert!(err.is_validation_error());
        let stored = store.find(place.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Cafe Lingo");
    }

    #[tokio::test]
    async fn update_into_sibling_conflicts() {
        let (engine, store) = setup();
        let owner = user();
        engine.create_place(owner.clone(), lingo()).await.unwrap();
        let other = engine.create_place(owner.clone(), exchange()).await.unwrap();

        let err = engine
            .update_place(owner, &other.id.to_string(), lingo())
            .await
            .unwrap_err();

        assert!(err.is_conflict_error());
        assert_eq!(store.find(other.id).await.unwrap(), Some(other));
    }

    #[tokio::test]
    async fn update_to_own_values_is_not_a_conflict() {
        let (engine, _) = setup();
        let owner = user();
        let place = engine.create_place(owner.clone(), lingo()).await.unwrap();

        let mut params = lingo();
        params.description = "Now with pastries.".into();
        let updated = engine
            .update_place(owner, &place.id.to_string(), params)
            .await
            .unwrap();

        assert_eq!(updated.description, "Now with pastries.");
    }

    #[tokio::test]
    async fn update_unknown_place() {
        let (engine, _) = setup();

        let err = engine.update_place(user(), "celia", exchange()).await.unwrap_err();

        assert!(err.is_not_found_error());
    }

    #[tokio::test]
    async fn destroy_checks_ownership_and_removes() {
        let (engine, _) = setup();
        let owner = user();
        let place = engine.create_place(owner.clone(), lingo()).await.unwrap();
        let id = place.id.to_string();

        assert!(engine.destroy_place(user(), "celia").await.unwrap_err().is_not_found_error());
        assert!(engine.destroy_place(user(), &id).await.unwrap_err().is_forbidden_error());

        engine.destroy_place(owner, &id).await.unwrap();

        assert!(engine.find_place(&id).await.unwrap_err().is_not_found_error());
    }

    #[tokio::test]
    async fn check_unique_is_scoped_to_current_user() {
        let (engine, store) = setup();
        let owner = user();

        engine.check_unique_place(owner.clone(), lingo()).await.unwrap();
        engine.create_place(owner.clone(), lingo()).await.unwrap();

        let err = engine.check_unique_place(owner, lingo()).await.unwrap_err();
        assert!(err.is_conflict_error());
        engine.check_unique_place(user(), lingo()).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn lingo_exchange_scenario() {
        let (engine, store) = setup();
        let owner = user();

        let place = engine.create_place(owner.clone(), lingo()).await.unwrap();
        let err = engine.create_place(owner.clone(), lingo()).await.unwrap_err();
        assert!(err.is_conflict_error());
        assert_eq!(store.count().await.unwrap(), 1);

        engine
            .update_place(owner, &place.id.to_string(), exchange())
            .await
            .unwrap();

        let reloaded = engine.find_place(&place.id.to_string()).await.unwrap();
        assert_eq!(reloaded.name, "Cafe Exchange");
    }
}
