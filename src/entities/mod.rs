mod place;

pub use place::{Place, PlaceParams};
