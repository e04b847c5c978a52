use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_COUNTRY_CODE: &str = "US";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Reverse-geocoded place for a set of coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceInfo {
    pub city: Option<String>,
    pub region: Option<String>,
    /// Upper-case ISO 3166-1 alpha-2 code.
    pub country_code: String,
}

impl Default for PlaceInfo {
    fn default() -> Self {
        Self {
            city: None,
            region: None,
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }
}

impl PlaceInfo {
    /// City, else region, else the name the weather provider reported.
    pub fn display_name<'a>(&'a self, weather_city: Option<&'a str>) -> Option<&'a str> {
        self.city
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.region.as_deref().filter(|s| !s.is_empty()))
            .or(weather_city.filter(|s| !s.is_empty()))
    }
}

/// Device position together with where it resolved to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Located {
    pub coordinates: Coordinates,
    pub place: PlaceInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// In the unit system the fetch was issued with.
    pub temperature: f64,
    pub condition: String,
    pub icon: String,
    pub city_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub min_temp: f64,
    pub max_temp: f64,
    pub icon: String,
}

impl ForecastDay {
    /// Calendar date as `YYYY-MM-DD`.
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    /// Empty when the provider sent none.
    pub description: String,
    pub url: String,
}
