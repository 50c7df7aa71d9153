use oso::{Oso, PolarClass};

use crate::auth::User;
use crate::entities::Place;
use crate::error::Error;

pub fn new() -> Result<Oso, Error> {
    let mut o = Oso::new();

    o.register_class(User::get_polar_class())?;
    o.register_class(Place::get_polar_class())?;

    o.load_str(include_str!("rules.polar"))?;

    Ok(o)
}

#[test]
fn owner_relation_test() {
    use crate::entities::PlaceParams;
    use uuid::Uuid;

    let authorizor = new().unwrap();

    let owner = User::new(Uuid::new_v4());
    let stranger = User::new(Uuid::new_v4());
    let place = Place::new(owner.id, PlaceParams::new("Cafe Lingo", "", "68 Jay Street"));

    let result = authorizor.query_rule("owns", (owner.clone(), place.clone()));
    assert!(result.unwrap().next().unwrap().is_ok());

    let result = authorizor.query_rule("owns", (stranger.clone(), place.clone()));
    assert!(result.unwrap().next().is_none());
}

#[test]
fn owner_actions_test() {
    use crate::entities::PlaceParams;
    use uuid::Uuid;

    let authorizor = new().unwrap();

    let owner = User::new(Uuid::new_v4());
    let place = Place::new(owner.id, PlaceParams::new("Cafe Lingo", "", "68 Jay Street"));

    for action in ["edit", "update", "destroy"] {
        let result = authorizor.is_allowed(owner.clone(), action, place.clone());
        assert_eq!(result.unwrap(), true);
    }

    let result = authorizor.is_allowed(owner.clone(), "transfer", place.clone());
    assert_eq!(result.unwrap(), false);
}

#[test]
fn stranger_actions_test() {
    use crate::entities::PlaceParams;
    use uuid::Uuid;

    let authorizor = new().unwrap();

    let stranger = User {
        id: Uuid::new_v4(),
        roles: vec!["admin".into()],
    };
    let place = Place::new(
        Uuid::new_v4(),
        PlaceParams::new("Cafe Lingo", "", "68 Jay Street"),
    );

    for action in ["edit", "update", "destroy"] {
        let result = authorizor.is_allowed(stranger.clone(), action, place.clone());
        assert_eq!(result.unwrap(), false);
    }
}
