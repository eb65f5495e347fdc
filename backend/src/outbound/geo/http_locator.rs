//! Reqwest-backed geolocation adapter.
//!
//! Speaks the ip-api.com contract: `GET <base>/<ip>` answering
//! `{"status": "success"|"fail", "city": .., "regionName": .., "message": ..}`.
//! The adapter owns transport concerns only; it never decides labels.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::LookupResponseDto;
use crate::domain::ports::{GeoLocation, GeoLocator, GeoLocatorError};

const DEFAULT_USER_AGENT: &str = "eduverse-backend-geolocator/0.1";
const RESPONSE_FIELDS: &str = "status,message,city,regionName";

/// Geolocation adapter performing one HTTP GET per lookup.
pub struct HttpGeoLocator {
    client: Client,
    endpoint: Url,
}

impl HttpGeoLocator {
    /// Build an adapter whose requests are bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self { client, endpoint })
    }

    fn lookup_url(&self, address: IpAddr) -> Result<Url, GeoLocatorError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| {
                GeoLocatorError::transport(format!(
                    "lookup endpoint {} cannot carry a path",
                    self.endpoint
                ))
            })?
            .pop_if_empty()
            .push(&address.to_string());
        url.query_pairs_mut().append_pair("fields", RESPONSE_FIELDS);
        Ok(url)
    }
}

#[async_trait]
impl GeoLocator for HttpGeoLocator {
    async fn locate(&self, address: IpAddr) -> Result<Option<GeoLocation>, GeoLocatorError> {
        let url = self.lookup_url(address)?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status));
        }
        parse_location(body.as_ref())
    }
}

fn parse_location(body: &[u8]) -> Result<Option<GeoLocation>, GeoLocatorError> {
    let decoded: LookupResponseDto = serde_json::from_slice(body).map_err(|error| {
        GeoLocatorError::decode(format!("invalid geolocation JSON payload: {error}"))
    })?;
    Ok(decoded.into_location())
}

fn map_transport_error(error: reqwest::Error) -> GeoLocatorError {
    if error.is_timeout() {
        GeoLocatorError::timeout(error.to_string())
    } else {
        GeoLocatorError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode) -> GeoLocatorError {
    let message = format!("status {}", status.as_u16());
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            GeoLocatorError::timeout(message)
        }
        _ => GeoLocatorError::transport(message),
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network helpers.

    use super::*;
    use rstest::rstest;

    fn locator(endpoint: &str) -> HttpGeoLocator {
        let endpoint = Url::parse(endpoint).expect("valid endpoint");
        HttpGeoLocator::new(endpoint, Duration::from_millis(100)).expect("client builds")
    }

    #[rstest]
    #[case::trailing_slash("http://ip-api.com/json/", "81.2.69.142", "http://ip-api.com/json/81.2.69.142")]
    #[case::no_trailing_slash("http://geo.internal/lookup", "81.2.69.142", "http://geo.internal/lookup/81.2.69.142")]
    #[case::ipv6("http://ip-api.com/json/", "2a01:4f8::1", "http://ip-api.com/json/2a01:4f8::1")]
    fn appends_address_as_path_segment(
        #[case] endpoint: &str,
        #[case] address: &str,
        #[case] expected_prefix: &str,
    ) {
        let ip: IpAddr = address.parse().expect("valid address");
        let url = locator(endpoint).lookup_url(ip).expect("url builds");

        assert_eq!(
            url.as_str(),
            format!("{expected_prefix}?fields=status%2Cmessage%2Ccity%2CregionName")
        );
    }

    #[test]
    fn rejects_endpoints_without_a_path() {
        let ip: IpAddr = "81.2.69.142".parse().expect("valid address");
        let err = locator("mailto:geo@example.com")
            .lookup_url(ip)
            .expect_err("mailto URLs cannot carry segments");
        assert!(matches!(err, GeoLocatorError::Transport { .. }));
    }

    #[test]
    fn decodes_successful_lookup() {
        let body = br#"{"status":"success","city":"Paris","regionName":"Ile-de-France"}"#;
        let location = parse_location(body)
            .expect("payload decodes")
            .expect("lookup succeeded");

        assert_eq!(location.city.as_deref(), Some("Paris"));
        assert_eq!(location.region.as_deref(), Some("Ile-de-France"));
    }

    #[rstest]
    #[case::failed_lookup(br#"{"status":"fail","message":"reserved range"}"#.as_slice())]
    #[case::blank_city(br#"{"status":"success","city":"  "}"#.as_slice())]
    fn lookups_without_city_decode_to_no_city(#[case] body: &[u8]) {
        let location = parse_location(body).expect("payload decodes");
        assert!(location.and_then(|found| found.city).is_none());
    }

    #[test]
    fn rejects_undecodable_payload() {
        let err = parse_location(b"<html>busy</html>").expect_err("decode should fail");
        assert!(matches!(err, GeoLocatorError::Decode { .. }));
    }

    #[rstest]
    #[case::request_timeout(StatusCode::REQUEST_TIMEOUT, true)]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, true)]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS, false)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, false)]
    fn maps_statuses_to_domain_errors(#[case] status: StatusCode, #[case] is_timeout: bool) {
        let err = map_status_error(status);
        if is_timeout {
            assert!(matches!(err, GeoLocatorError::Timeout { .. }));
        } else {
            assert!(matches!(err, GeoLocatorError::Transport { .. }));
        }
    }
}
