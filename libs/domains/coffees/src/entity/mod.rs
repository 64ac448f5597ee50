//! SeaORM entities for the coffee schema.
//!
//! `coffee` and `flavor` are linked many-to-many through `coffee_flavors_flavor`.

pub mod coffee;
pub mod coffee_flavor;
pub mod flavor;
