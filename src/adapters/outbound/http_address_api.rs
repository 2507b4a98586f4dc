//! HTTP Address API
//!
//! Implements AddressService against the backend's reverse-geocoding
//! endpoint. The backend talks to the actual geocoding provider; this
//! client only knows its own server.

use crate::domain::errors::GeoError;
use crate::domain::ports::AddressService;
use crate::domain::value_objects::{Address, Coordinates};
use async_trait::async_trait;
use serde_json::Value;

/// Client for the backend address endpoint.
///
/// Sends `GET {api_url}?lat=..&lon=..` and reads the address from the
/// response body, which may be a JSON object with an `address` field, a JSON
/// string, or plain text. Any failure yields an empty address.
pub struct HttpAddressApi {
    api_url: String,
    client: reqwest::Client,
}

impl HttpAddressApi {
    /// Create a client for `api_url`. An empty URL is a configuration error.
    pub fn new(api_url: impl Into<String>) -> Result<Self, GeoError> {
        let api_url = api_url.into();
        if api_url.is_empty() {
            return Err(GeoError::Configuration("api url must not be empty".to_string()));
        }
        Ok(Self {
            api_url,
            client: reqwest::Client::new(),
        })
    }

    /// Use a preconfigured HTTP client (timeouts, proxies, headers).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn fetch(&self, coords: &Coordinates) -> Result<Address, GeoError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("lat", coords.latitude), ("lon", coords.longitude)])
            .send()
            .await
            .map_err(|e| GeoError::RemoteFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::RemoteFailure(format!(
                "backend responded with {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeoError::RemoteFailure(e.to_string()))?;

        parse_address(&body)
    }
}

/// Extract the address from a response body.
fn parse_address(body: &str) -> Result<Address, GeoError> {
    let body = body.trim();
    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(address)) => Ok(Address::from(address)),
        Ok(Value::Object(map)) => match map.get("address") {
            Some(Value::String(address)) => Ok(Address::from(address.as_str())),
            _ => Err(GeoError::RemoteFailure(
                "response object has no address field".to_string(),
            )),
        },
        Ok(Value::Null) => Ok(Address::empty()),
        Ok(other) => Err(GeoError::RemoteFailure(format!(
            "unexpected response body: {}",
            other
        ))),
        Err(_) => Ok(Address::from(body)),
    }
}

#[async_trait]
impl AddressService for HttpAddressApi {
    async fn resolve_address(&self, coords: &Coordinates) -> Result<Address, GeoError> {
        if !coords.is_finite() {
            return Err(GeoError::InvalidInput(format!(
                "coordinates must be finite numbers, got {}",
                coords
            )));
        }

        match self.fetch(coords).await {
            Ok(address) => {
                tracing::debug!("resolved {} to {:?}", coords, address.as_str());
                Ok(address)
            }
            Err(e) => {
                tracing::warn!("address lookup for {} failed: {}", coords, e);
                Ok(Address::empty())
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn berlin() -> Coordinates {
        Coordinates::new(52.5, 13.4)
    }

    // ===== Construction Tests =====

    #[test]
    fn test_empty_url_is_configuration_error() {
        let result = HttpAddressApi::new("");
        assert!(matches!(result, Err(GeoError::Configuration(_))));
    }

    #[test]
    fn test_non_empty_url_is_accepted() {
        let api = HttpAddressApi::new("/api/address").unwrap();
        assert_eq!(api.api_url(), "/api/address");
    }

    // ===== Body Parsing Tests =====

    #[test]
    fn test_parse_plain_text() {
        assert_eq!(parse_address("Berlin, DE\n").unwrap(), Address::from("Berlin, DE"));
    }

    #[test]
    fn test_parse_json_string() {
        assert_eq!(parse_address("\"Berlin, DE\"").unwrap(), Address::from("Berlin, DE"));
    }

    #[test]
    fn test_parse_json_object() {
        let body = r#"{"address": "Berlin, DE", "country": "DE"}"#;
        assert_eq!(parse_address(body).unwrap(), Address::from("Berlin, DE"));
    }

    #[test]
    fn test_parse_json_object_without_address() {
        assert!(matches!(
            parse_address(r#"{"street": "Unter den Linden"}"#),
            Err(GeoError::RemoteFailure(_))
        ));
    }

    #[test]
    fn test_parse_empty_body() {
        assert!(parse_address("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_json_null() {
        assert!(parse_address("null").unwrap().is_empty());
    }

    #[test]
    fn test_parse_other_json_values() {
        for body in ["42", "[\"Berlin\"]", "true"] {
            assert!(matches!(parse_address(body), Err(GeoError::RemoteFailure(_))));
        }
    }

    // ===== Remote Tests =====

    #[tokio::test]
    async fn test_resolves_address_from_backend() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/address"))
            .and(query_param("lat", "52.5"))
            .and(query_param("lon", "13.4"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"address": "Berlin, DE"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = HttpAddressApi::new(format!("{}/api/address", mock_server.uri())).unwrap();
        let address = api.resolve_address(&berlin()).await.unwrap();

        assert_eq!(address, Address::from("Berlin, DE"));
    }

    #[tokio::test]
    async fn test_server_error_yields_empty_address() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/address"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let api = HttpAddressApi::new(format!("{}/api/address", mock_server.uri())).unwrap();
        let address = api.resolve_address(&berlin()).await.unwrap();

        assert!(address.is_empty());
    }

    #[tokio::test]
    async fn test_not_found_yields_empty_address() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let api = HttpAddressApi::new(format!("{}/api/address", mock_server.uri())).unwrap();
        assert!(api.resolve_address(&berlin()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connection_refused_yields_empty_address() {
        // Nothing listens on port 9 (discard) on test hosts
        let api = HttpAddressApi::new("http://127.0.0.1:9/api/address").unwrap();
        assert!(api.resolve_address(&berlin()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_relative_url_yields_empty_address() {
        let api = HttpAddressApi::new("/api/address").unwrap();
        assert!(api.resolve_address(&berlin()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_finite_coordinates_are_invalid_input() {
        let api = HttpAddressApi::new("http://127.0.0.1:9/api/address").unwrap();
        let result = api
            .resolve_address(&Coordinates::new(f64::NAN, 13.4))
            .await;

        assert!(matches!(result, Err(GeoError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_custom_client_is_used() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(wiremock::matchers::header("x-client", "geo-address"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Paris, FR"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("x-client", "geo-address".parse().unwrap());
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .unwrap();

        let api = HttpAddressApi::new(mock_server.uri())
            .unwrap()
            .with_client(client);
        let address = api
            .resolve_address(&Coordinates::new(48.85, 2.35))
            .await
            .unwrap();

        assert_eq!(address.as_str(), "Paris, FR");
    }
}
