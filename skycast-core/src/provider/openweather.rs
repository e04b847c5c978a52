use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    CurationError,
    forecast::{ForecastSlot, aggregate_daily},
    model::{Coordinates, CurrentWeather, ForecastDay},
    provider::{ProviderId, truncate_body},
    settings::Unit,
};

use super::WeatherSource;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    fn ensure_credential(&self) -> Result<(), CurationError> {
        if self.has_credential() {
            Ok(())
        } else {
            Err(CurationError::MissingCredential(ProviderId::OpenWeather))
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        label: &str,
        coords: Coordinates,
        unit: Unit,
    ) -> Result<T> {
        let url = format!("{}/data/2.5/{endpoint}", self.base_url);
        tracing::debug!(%url, unit = unit.as_str(), "Requesting OpenWeather {label}");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", unit.as_str().to_string()),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({label})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {label} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather {label} request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).with_context(|| format!("Failed to parse OpenWeather {label} JSON"))
    }

    async fn current(&self, coords: Coordinates, unit: Unit) -> Result<CurrentWeather> {
        let parsed: OwCurrentResponse = self.get_json("weather", "current", coords, unit).await?;

        let condition = parsed
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("OpenWeather current response contained no weather condition"))?;

        Ok(CurrentWeather {
            temperature: parsed.main.temp,
            condition: condition.main,
            icon: condition.icon,
            city_name: parsed.name,
        })
    }

    async fn forecast(&self, coords: Coordinates, unit: Unit) -> Result<Vec<ForecastDay>> {
        let parsed: OwForecastResponse = self.get_json("forecast", "forecast", coords, unit).await?;

        let slots: Vec<ForecastSlot> = parsed
            .list
            .into_iter()
            .map(|entry| ForecastSlot {
                timestamp: entry.dt,
                min_temp: entry.main.temp_min,
                max_temp: entry.main.temp_max,
                icon: entry.weather.into_iter().next().map(|w| w.icon).unwrap_or_default(),
            })
            .collect();

        Ok(aggregate_daily(&slots))
    }
}

#[derive(Debug, Deserialize)]
struct OwCurrentMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwCurrentMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn fetch_current(
        &self,
        coords: Coordinates,
        unit: Unit,
    ) -> Result<CurrentWeather, CurationError> {
        self.ensure_credential()?;
        Ok(self.current(coords, unit).await?)
    }

    async fn fetch_forecast(
        &self,
        coords: Coordinates,
        unit: Unit,
    ) -> Result<Vec<ForecastDay>, CurationError> {
        self.ensure_credential()?;
        Ok(self.forecast(coords, unit).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_current_payload() {
        let body = r#"{
            "name": "Seattle",
            "dt": 1700000000,
            "main": {"temp": 51.3, "feels_like": 49.0, "humidity": 80},
            "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}]
        }"#;
        let parsed: OwCurrentResponse = serde_json::from_str(body).expect("valid payload");
        assert_eq!(parsed.name, "Seattle");
        assert_eq!(parsed.main.temp, 51.3);
        assert_eq!(parsed.weather[0].main, "Rain");
        assert_eq!(parsed.weather[0].icon, "10d");
    }

    #[test]
    fn current_payload_without_temp_is_rejected() {
        let body = r#"{"name": "X", "main": {}, "weather": []}"#;
        assert!(serde_json::from_str::<OwCurrentResponse>(body).is_err());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = OpenWeatherClient::new("k".into()).with_base_url("http://localhost:1/");
        assert_eq!(client.base_url(), "http://localhost:1");
    }

    #[tokio::test]
    async fn blank_key_is_missing_credential() {
        let client = OpenWeatherClient::new("  ".into()).with_base_url("http://127.0.0.1:9");
        let err = client
            .fetch_current(Coordinates::new(0.0, 0.0), Unit::Metric)
            .await
            .unwrap_err();
        assert_eq!(err, CurationError::MissingCredential(ProviderId::OpenWeather));
    }
}
