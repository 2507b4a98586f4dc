//! Application Layer
//!
//! Service factories and the locate-then-resolve use case.

pub mod factory;
mod locator_service;

pub use factory::{create_address_api, create_geo_location, AddressApiConfig, GeoLocationConfig};
pub use locator_service::{create_on_focus_handler, AddressCallback, AddressLocator, FocusHandler};
