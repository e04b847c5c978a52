use crate::{
    Config, CurationError, NewsArticle,
    model::{Coordinates, CurrentWeather, ForecastDay},
    provider::{newsapi::NewsApiClient, nominatim::NominatimGeocoder, openweather::OpenWeatherClient},
    settings::{NewsCategory, Unit},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod newsapi;
pub mod nominatim;
pub mod openweather;

/// Providers that need a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenWeather,
    NewsApi,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::NewsApi => "newsapi",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather, ProviderId::NewsApi]
    }

    /// Environment variable that overrides the configured key.
    pub fn env_var(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "SKYCAST_OPENWEATHER_API_KEY",
            ProviderId::NewsApi => "SKYCAST_NEWSAPI_API_KEY",
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ProviderId::OpenWeather),
            "newsapi" => Ok(ProviderId::NewsApi),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather, newsapi."
            )),
        }
    }
}

/// Current conditions and forecast for a position.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_current(
        &self,
        coords: Coordinates,
        unit: Unit,
    ) -> Result<CurrentWeather, CurationError>;

    async fn fetch_forecast(
        &self,
        coords: Coordinates,
        unit: Unit,
    ) -> Result<Vec<ForecastDay>, CurationError>;
}

/// Raw top headlines, normalized but not yet curated.
#[async_trait]
pub trait NewsSource: Send + Sync + Debug {
    async fn top_headlines(
        &self,
        country_code: &str,
        category: Option<NewsCategory>,
    ) -> Result<Vec<NewsArticle>, CurationError>;
}

/// Build the weather client from config.
///
/// A missing key is not an error here: the client reports
/// [`CurationError::MissingCredential`] when it is asked to fetch.
pub fn weather_client_from_config(config: &Config) -> OpenWeatherClient {
    let api_key = config.provider_api_key(ProviderId::OpenWeather).unwrap_or_default();
    if api_key.is_empty() {
        tracing::warn!("No API key configured for provider '{}'", ProviderId::OpenWeather);
    }

    let client = OpenWeatherClient::new(api_key.to_owned());
    match config.provider_base_url(ProviderId::OpenWeather) {
        Some(url) => client.with_base_url(url),
        None => client,
    }
}

/// Build the news client from config; see [`weather_client_from_config`].
pub fn news_client_from_config(config: &Config) -> NewsApiClient {
    let api_key = config.provider_api_key(ProviderId::NewsApi).unwrap_or_default();
    if api_key.is_empty() {
        tracing::warn!("No API key configured for provider '{}'", ProviderId::NewsApi);
    }

    let client = NewsApiClient::new(api_key.to_owned()).with_page_size(config.news.page_size);
    match config.provider_base_url(ProviderId::NewsApi) {
        Some(url) => client.with_base_url(url),
        None => client,
    }
}

pub fn geocoder_from_config(config: &Config) -> anyhow::Result<NominatimGeocoder> {
    let geocoder = NominatimGeocoder::new()?;
    Ok(match &config.location.geocoder_url {
        Some(url) => geocoder.with_base_url(url),
        None => geocoder,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
