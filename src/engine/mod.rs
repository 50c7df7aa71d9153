mod helpers;
mod place_api;

use oso::Oso;

use crate::{
    api::API,
    auth::authorizor,
    db::DynStore,
    error::{forbidden_error, Error},
};

pub struct Engine {
    store: DynStore,
    authorizor: Oso,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(store: DynStore) -> Result<Self, Error> {
        Ok(Self {
            store,
            authorizor: authorizor::new()?,
        })
    }
}

impl Engine {
    pub fn authorize<Actor, Action, Resource>(
        &self,
        actor: Actor,
        action: Action,
        resource: Resource,
    ) -> Result<(), Error>
    where
        Actor: oso::ToPolar,
        Action: oso::ToPolar,
        Resource: oso::ToPolar,
    {
        if self.authorizor.is_allowed(actor, action, resource)? {
            return Ok(());
        }

        Err(forbidden_error())
    }
}

impl API for Engine {}
