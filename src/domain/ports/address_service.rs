//! Address Service Port
//!
//! Defines the interface for turning coordinates into a readable address.

use crate::domain::errors::GeoError;
use crate::domain::value_objects::{Address, Coordinates};
use async_trait::async_trait;

/// Reverse lookup of an address by coordinates.
#[async_trait]
pub trait AddressService: Send + Sync {
    /// Resolve `coords` to an address.
    ///
    /// An empty `Address` is a valid answer meaning "not found". Errors are
    /// `InvalidInput` for malformed coordinates and `RemoteFailure` for a
    /// backend that could not be reached.
    async fn resolve_address(&self, coords: &Coordinates) -> Result<Address, GeoError>;
}
