//! Domain Layer
//!
//! Value objects, entities, errors and the ports the adapters implement.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod value_objects;
