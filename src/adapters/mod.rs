//! Adapters Layer
//!
//! Outbound implementations of the domain ports: storage backends, the
//! platform geolocation bridge, the HTTP address client and the caching
//! decorators.

pub mod outbound;
