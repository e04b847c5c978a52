//! Reverse geocoding over OpenStreetMap Nominatim (no API key required).

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    location::ReverseGeocoder,
    model::{Coordinates, PlaceInfo},
};

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    http: Client,
}

impl NominatimGeocoder {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create geocoding client")?;

        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    state: Option<String>,
    country_code: Option<String>,
}

impl From<NominatimAddress> for PlaceInfo {
    fn from(addr: NominatimAddress) -> Self {
        let city = addr.city.or(addr.town).or(addr.village).or(addr.municipality);
        let country_code = addr
            .country_code
            .filter(|c| !c.trim().is_empty())
            .map(|c| c.trim().to_uppercase())
            .unwrap_or_else(|| PlaceInfo::default().country_code);

        PlaceInfo {
            city,
            region: addr.state,
            country_code,
        }
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse_geocode(&self, coords: Coordinates) -> Result<PlaceInfo> {
        let url = format!("{}/reverse", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("format", "json".to_string()),
                ("addressdetails", "1".to_string()),
                ("zoom", "10".to_string()),
            ])
            .send()
            .await
            .context("Reverse geocode request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("Reverse geocode returned status {}", response.status()));
        }

        let body: NominatimResponse = response
            .json()
            .await
            .context("Failed to parse reverse geocode response")?;

        let address = body
            .address
            .ok_or_else(|| anyhow!("Reverse geocode response had no address"))?;

        Ok(address.into())
    }
}
