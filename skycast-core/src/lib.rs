//! Core library for `skycast`.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Location, weather and news clients behind small traits
//! - The mood heuristic and headline curation
//! - The pipeline that sequences them into one view state
//!
//! It is used by `skycast-cli`, but can also be embedded in other front-ends.

pub mod config;
pub mod error;
pub mod forecast;
pub mod location;
pub mod model;
pub mod mood;
pub mod news;
pub mod pipeline;
pub mod provider;
pub mod settings;

pub use config::{Config, LocationConfig, NewsConfig, ProviderConfig};
pub use error::{Branch, CurationError};
pub use location::{Geolocation, Permission, ReverseGeocoder, StaticGeolocation};
pub use model::{Coordinates, CurrentWeather, ForecastDay, Located, NewsArticle, PlaceInfo};
pub use mood::{MoodCategory, classify};
pub use pipeline::{CurationPipeline, CurationState, Stage};
pub use provider::{NewsSource, ProviderId, WeatherSource};
pub use settings::{NewsCategory, Settings, SettingsStore, Unit};
