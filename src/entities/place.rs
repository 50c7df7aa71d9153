use chrono::{DateTime, Utc};
use oso::PolarClass;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{validation_error, Error};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Place {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User supplied fields of a place. Missing fields deserialize as blank.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceParams {
    pub name: String,
    pub description: String,
    pub address: String,
}

impl PlaceParams {
    pub fn new(name: &str, description: &str, address: &str) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            address: address.into(),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        let mut details = vec![];

        if self.name.trim().is_empty() {
            details.push("name can't be blank".to_string());
        }
        if self.address.trim().is_empty() {
            details.push("address can't be blank".to_string());
        }

        if details.is_empty() {
            Ok(())
        } else {
            Err(validation_error(details))
        }
    }
}

impl Place {
    pub fn new(owner_id: Uuid, params: PlaceParams) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            owner_id,
            name: params.name,
            description: params.description,
            address: params.address,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, params: PlaceParams) {
        self.name = params.name;
        self.description = params.description;
        self.address = params.address;
        self.updated_at = Utc::now();
    }

    /// Whether `self` occupies the (owner, name, address) slot of `other`.
    pub fn same_identity(&self, other: &Place) -> bool {
        self.owner_id == other.owner_id && self.name == other.name && self.address == other.address
    }
}

impl PolarClass for Place {
    fn get_polar_class_builder() -> oso::ClassBuilder<Place> {
        oso::Class::builder()
            .name("Place")
            .add_attribute_getter("id", |recv: &Place| recv.id.to_string())
            .add_attribute_getter("owner_id", |recv: &Place| recv.owner_id.to_string())
    }

    fn get_polar_class() -> oso::Class {
        let builder = Place::get_polar_class_builder();
        builder.build()
    }
}
