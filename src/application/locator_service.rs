//! Locator Service - Main application use case
//!
//! Chains "determine position" → "resolve address" → "notify caller". The
//! caller only ever sees a callback invocation or nothing; failures end up
//! in the log.

use crate::application::factory::{
    create_address_api, create_geo_location, AddressApiConfig, GeoLocationConfig,
};
use crate::domain::errors::GeoError;
use crate::domain::ports::{AddressService, GeoLocationService, GeoPlatform};
use crate::domain::value_objects::Address;
use std::sync::Arc;

/// Receives the resolved address.
pub type AddressCallback = Arc<dyn Fn(Address) + Send + Sync>;

/// Locates the user and resolves their address.
pub struct AddressLocator {
    geo: Arc<dyn GeoLocationService>,
    address_api: Arc<dyn AddressService>,
}

impl AddressLocator {
    pub fn new(geo: Arc<dyn GeoLocationService>, address_api: Arc<dyn AddressService>) -> Self {
        Self { geo, address_api }
    }

    pub fn is_supported(&self) -> bool {
        self.geo.is_supported()
    }

    /// Run the chain and report the outcome.
    pub async fn locate(&self) -> Result<Address, GeoError> {
        if !self.geo.is_supported() {
            return Err(GeoError::UnsupportedCapability);
        }

        let coords = self.geo.determine_position().await?;
        self.address_api.resolve_address(&coords).await
    }

    /// Run the chain and hand the address to `callback`.
    ///
    /// Errors are logged and otherwise dropped; the callback runs at most
    /// once, and only when the chain completes.
    pub async fn locate_and_notify(&self, callback: Option<&AddressCallback>) {
        match self.locate().await {
            Ok(address) => {
                tracing::debug!("located address {:?}", address.as_str());
                if let Some(callback) = callback {
                    callback(address);
                }
            }
            Err(e) => tracing::warn!("address lookup abandoned: {}", e),
        }
    }
}

/// Handler to attach to a UI focus event.
///
/// Inactive handlers (platform without geolocation) do nothing when
/// triggered and never prompt for permission.
pub struct FocusHandler {
    locator: Option<AddressLocator>,
    callback: Option<AddressCallback>,
}

impl FocusHandler {
    /// A handler that does nothing.
    pub fn noop() -> Self {
        Self {
            locator: None,
            callback: None,
        }
    }

    pub fn new(locator: AddressLocator, callback: Option<AddressCallback>) -> Self {
        Self {
            locator: Some(locator),
            callback,
        }
    }

    pub fn is_active(&self) -> bool {
        self.locator.is_some()
    }

    /// React to the focus event.
    pub async fn handle(&self) {
        if let Some(locator) = &self.locator {
            locator.locate_and_notify(self.callback.as_ref()).await;
        }
    }
}

/// Wire the services for `platform` into a focus handler.
///
/// When the platform cannot geolocate, the address service is not even
/// built and a no-op handler is returned. Otherwise configuration errors
/// in `address_config` are returned.
pub fn create_on_focus_handler(
    platform: Arc<dyn GeoPlatform>,
    geo_config: &GeoLocationConfig,
    address_config: &AddressApiConfig,
    callback: Option<AddressCallback>,
) -> Result<FocusHandler, GeoError> {
    let geo = create_geo_location(platform, geo_config);
    if !geo.is_supported() {
        tracing::info!("geolocation not supported, focus handler disabled");
        return Ok(FocusHandler::noop());
    }

    let address_api = create_address_api(address_config)?;
    Ok(FocusHandler::new(
        AddressLocator::new(geo, address_api),
        callback,
    ))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::adapters::outbound::StaticGeoPlatform;
    use crate::domain::value_objects::Coordinates;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use tracing_test::traced_test;

    /// Address service that echoes the coordinates it was asked for.
    #[derive(Default)]
    struct EchoResolver {
        seen: Mutex<Vec<Coordinates>>,
    }

    #[async_trait]
    impl AddressService for EchoResolver {
        async fn resolve_address(&self, coords: &Coordinates) -> Result<Address, GeoError> {
            self.seen.lock().push(*coords);
            Ok(Address::new(coords.to_string()))
        }
    }

    struct BrokenResolver;

    #[async_trait]
    impl AddressService for BrokenResolver {
        async fn resolve_address(&self, _: &Coordinates) -> Result<Address, GeoError> {
            Err(GeoError::RemoteFailure("backend down".to_string()))
        }
    }

    fn recorder() -> (Arc<Mutex<Vec<Address>>>, AddressCallback) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        (received, Arc::new(move |a| sink.lock().push(a)))
    }

    fn geo(platform: &Arc<StaticGeoPlatform>) -> Arc<dyn GeoLocationService> {
        create_geo_location(platform.clone(), &GeoLocationConfig::default())
    }

    #[tokio::test]
    async fn test_locate_chains_position_into_resolver() {
        let platform = Arc::new(StaticGeoPlatform::fixed(Coordinates::new(52.5, 13.4)));
        let resolver = Arc::new(EchoResolver::default());
        let locator = AddressLocator::new(geo(&platform), resolver.clone());

        let address = locator.locate().await.unwrap();
        assert_eq!(address.as_str(), "(52.5, 13.4)");
        assert_eq!(*resolver.seen.lock(), vec![Coordinates::new(52.5, 13.4)]);
    }

    #[tokio::test]
    async fn test_locate_unsupported() {
        let platform = Arc::new(StaticGeoPlatform::unsupported());
        let locator = AddressLocator::new(geo(&platform), Arc::new(EchoResolver::default()));

        assert!(!locator.is_supported());
        assert_eq!(locator.locate().await, Err(GeoError::UnsupportedCapability));
        assert_eq!(platform.watches_started(), 0);
    }

    #[tokio::test]
    async fn test_denied_permission_resolves_unknown_location() {
        let platform = Arc::new(StaticGeoPlatform::denied());
        let resolver = Arc::new(EchoResolver::default());
        let locator = AddressLocator::new(geo(&platform), resolver.clone());
        let (received, callback) = recorder();

        locator.locate_and_notify(Some(&callback)).await;

        assert_eq!(*resolver.seen.lock(), vec![Coordinates::default()]);
        assert_eq!(received.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_notify_invokes_callback_once() {
        let platform = Arc::new(StaticGeoPlatform::fixed(Coordinates::new(52.5, 13.4)));
        let locator = AddressLocator::new(geo(&platform), Arc::new(EchoResolver::default()));
        let (received, callback) = recorder();

        locator.locate_and_notify(Some(&callback)).await;

        assert_eq!(*received.lock(), vec![Address::from("(52.5, 13.4)")]);
    }

    #[tokio::test]
    async fn test_notify_without_callback() {
        let platform = Arc::new(StaticGeoPlatform::fixed(Coordinates::new(52.5, 13.4)));
        let locator = AddressLocator::new(geo(&platform), Arc::new(EchoResolver::default()));

        locator.locate_and_notify(None).await;
        assert_eq!(platform.watches_started(), 1);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_failure_is_swallowed_and_logged() {
        let platform = Arc::new(StaticGeoPlatform::fixed(Coordinates::new(52.5, 13.4)));
        let locator = AddressLocator::new(geo(&platform), Arc::new(BrokenResolver));
        let (received, callback) = recorder();

        locator.locate_and_notify(Some(&callback)).await;

        assert!(received.lock().is_empty());
        assert!(logs_contain("address lookup abandoned"));
        assert!(logs_contain("backend down"));
    }

    #[tokio::test]
    async fn test_cached_backend_failure_notifies_empty_address() {
        use crate::adapters::outbound::{CachedAddressApi, InMemoryStorage};

        let platform = Arc::new(StaticGeoPlatform::fixed(Coordinates::new(52.5, 13.4)));
        let cached =
            CachedAddressApi::new(Arc::new(InMemoryStorage::new()), Arc::new(BrokenResolver));
        let locator = AddressLocator::new(geo(&platform), Arc::new(cached));
        let (received, callback) = recorder();

        locator.locate_and_notify(Some(&callback)).await;

        assert_eq!(*received.lock(), vec![Address::empty()]);
    }

    #[tokio::test]
    async fn test_noop_handler() {
        let handler = FocusHandler::noop();
        assert!(!handler.is_active());
        handler.handle().await;
    }

    #[tokio::test]
    async fn test_unsupported_platform_skips_address_config() {
        let platform = Arc::new(StaticGeoPlatform::unsupported());
        let (received, callback) = recorder();

        // An invalid address config is never looked at
        let handler = create_on_focus_handler(
            platform.clone(),
            &GeoLocationConfig::default(),
            &AddressApiConfig::new(""),
            Some(callback),
        )
        .unwrap();

        assert!(!handler.is_active());
        handler.handle().await;
        assert!(received.lock().is_empty());
        assert_eq!(platform.watches_started(), 0);
    }

    #[test]
    fn test_supported_platform_validates_address_config() {
        let platform = Arc::new(StaticGeoPlatform::fixed(Coordinates::new(52.5, 13.4)));

        let result = create_on_focus_handler(
            platform,
            &GeoLocationConfig::default(),
            &AddressApiConfig::new(""),
            None,
        );

        assert!(matches!(result, Err(GeoError::Configuration(_))));
    }
}
