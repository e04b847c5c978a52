//! Integration tests for NominatimGeocoder using wiremock.

use skycast_core::{
    Coordinates, PlaceInfo, ReverseGeocoder, StaticGeolocation, location::acquire,
    provider::nominatim::NominatimGeocoder,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_reverse_geocode_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "display_name": "Toronto, Ontario, Canada",
            "address": {
                "city": "Toronto",
                "state": "Ontario",
                "country": "Canada",
                "country_code": "ca"
            }
        })))
        .mount(&mock_server)
        .await;

    let geocoder = NominatimGeocoder::new().unwrap().with_base_url(mock_server.uri());
    let place = geocoder
        .reverse_geocode(Coordinates::new(43.65, -79.38))
        .await
        .unwrap();

    assert_eq!(place.city.as_deref(), Some("Toronto"));
    assert_eq!(place.region.as_deref(), Some("Ontario"));
    assert_eq!(place.country_code, "CA");
}

#[tokio::test]
async fn test_geocode_failure_does_not_fail_acquire() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let geocoder = NominatimGeocoder::new().unwrap().with_base_url(mock_server.uri());
    let coords = Coordinates::new(43.65, -79.38);
    let located = acquire(&StaticGeolocation::new(true, Some(coords)), &geocoder)
        .await
        .unwrap();

    assert_eq!(located.coordinates, coords);
    assert_eq!(located.place, PlaceInfo::default());
}
