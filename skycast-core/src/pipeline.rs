//! Orchestrates location, weather, and news into one view state.
//!
//! A run goes `LocatingDevice -> FetchingInitial -> ClassifyingMood ->
//! RefetchingNews -> Settled`. Each branch (location, weather, news) owns an
//! error slot and a failure in one never stops the others. Results are
//! written as soon as their fetch completes, so overlapping runs resolve
//! per field in completion order.

use std::sync::Arc;

use serde::Serialize;
use tokio::{sync::watch, task::JoinHandle};

use crate::{
    error::Branch,
    location::{self, Geolocation, ReverseGeocoder},
    model::{CurrentWeather, ForecastDay, Located, NewsArticle},
    mood::{self, MoodCategory},
    news::fetch_headlines,
    provider::{NewsSource, WeatherSource},
    settings::{SettingsStore, Unit},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Idle,
    LocatingDevice,
    FetchingInitial,
    ClassifyingMood,
    RefetchingNews,
    Settled,
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CurationState {
    pub stage: Stage,
    pub location: Option<Located>,
    /// Unit the weather values are expressed in.
    pub unit: Option<Unit>,
    pub current: Option<CurrentWeather>,
    pub forecast: Option<Vec<ForecastDay>>,
    pub mood: Option<MoodCategory>,
    pub news: Vec<NewsArticle>,
    pub location_error: Option<String>,
    pub weather_error: Option<String>,
    pub news_error: Option<String>,
}

impl CurationState {
    pub fn is_settled(&self) -> bool {
        self.stage == Stage::Settled
    }

    /// Name to show for the location, falling back to the weather provider's.
    pub fn place_name(&self) -> Option<&str> {
        let weather_city = self.current.as_ref().map(|c| c.city_name.as_str());
        match &self.location {
            Some(located) => located.place.display_name(weather_city),
            None => weather_city.filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CurationPipeline {
    geolocation: Arc<dyn Geolocation>,
    geocoder: Arc<dyn ReverseGeocoder>,
    weather: Arc<dyn WeatherSource>,
    news: Arc<dyn NewsSource>,
    settings: SettingsStore,
    state: Arc<watch::Sender<CurationState>>,
}

impl CurationPipeline {
    pub fn new(
        geolocation: Arc<dyn Geolocation>,
        geocoder: Arc<dyn ReverseGeocoder>,
        weather: Arc<dyn WeatherSource>,
        news: Arc<dyn NewsSource>,
        settings: SettingsStore,
    ) -> Self {
        let (state, _) = watch::channel(CurationState::default());
        Self {
            geolocation,
            geocoder,
            weather,
            news,
            settings,
            state: Arc::new(state),
        }
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Copy of the current shared state.
    pub fn state(&self) -> CurationState {
        self.state.borrow().clone()
    }

    /// Receiver that sees every write to the shared state.
    pub fn subscribe(&self) -> watch::Receiver<CurationState> {
        self.state.subscribe()
    }

    /// Start a run in the background without waiting for earlier runs.
    pub fn refresh(&self) -> JoinHandle<CurationState> {
        let pipeline = self.clone();
        tokio::spawn(async move { pipeline.run().await })
    }

    fn update(&self, f: impl FnOnce(&mut CurationState)) {
        self.state.send_modify(f);
    }

    /// Run the pipeline once and return the state as it stood when this run
    /// settled.
    pub async fn run(&self) -> CurationState {
        let settings = self.settings.snapshot();
        let unit = settings.unit;
        let topic = settings.preferred_topic();

        tracing::info!(unit = %unit, topic = ?topic, "Curation run started");
        self.update(|s| {
            s.stage = Stage::LocatingDevice;
            s.location_error = None;
        });

        let located = match location::acquire(&*self.geolocation, &*self.geocoder).await {
            Ok(located) => located,
            Err(e) => {
                tracing::warn!("Location branch failed: {e}");
                self.update(|s| {
                    s.location_error = Some(e.user_message(Branch::Location));
                    s.stage = Stage::Settled;
                });
                return self.state();
            }
        };

        let coords = located.coordinates;
        let country = located.place.country_code.clone();
        self.update(|s| {
            s.location = Some(located);
            s.stage = Stage::FetchingInitial;
            s.weather_error = None;
            s.news_error = None;
        });

        let current_branch = async {
            match self.weather.fetch_current(coords, unit).await {
                Ok(current) => {
                    tracing::debug!(temp = current.temperature, "Current weather resolved");
                    self.update(|s| {
                        s.current = Some(current.clone());
                        s.unit = Some(unit);
                    });
                    Some(current)
                }
                Err(e) => {
                    tracing::warn!("Current weather fetch failed: {e}");
                    self.update(|s| {
                        s.current = None;
                        s.weather_error = Some(e.user_message(Branch::Weather));
                    });
                    None
                }
            }
        };

        let forecast_branch = async {
            match self.weather.fetch_forecast(coords, unit).await {
                Ok(days) => {
                    tracing::debug!(days = days.len(), "Forecast resolved");
                    self.update(|s| {
                        s.forecast = Some(days);
                        s.unit = Some(unit);
                    });
                }
                Err(e) => {
                    tracing::warn!("Forecast fetch failed: {e}");
                    self.update(|s| {
                        s.forecast = None;
                        s.weather_error.get_or_insert_with(|| e.user_message(Branch::Weather));
                    });
                }
            }
        };

        let news_branch = async {
            match fetch_headlines(&*self.news, &country, topic, None).await {
                Ok(articles) => self.update(|s| s.news = articles),
                Err(e) => {
                    tracing::warn!("Headline fetch failed: {e}");
                    self.update(|s| {
                        s.news = Vec::new();
                        s.news_error = Some(e.user_message(Branch::News));
                    });
                }
            }
        };

        let (current, (), ()) = tokio::join!(current_branch, forecast_branch, news_branch);

        let Some(current) = current else {
            tracing::info!("No current weather, keeping unfiltered headlines");
            self.update(|s| {
                s.mood = None;
                s.stage = Stage::Settled;
            });
            return self.state();
        };

        self.update(|s| s.stage = Stage::ClassifyingMood);
        let mood = mood::classify(unit.to_celsius(current.temperature));
        tracing::info!(%mood, "Classified weather mood");

        self.update(|s| {
            s.mood = Some(mood);
            s.stage = Stage::RefetchingNews;
        });

        match fetch_headlines(&*self.news, &country, topic, Some(mood)).await {
            Ok(articles) => self.update(|s| {
                s.news = articles;
                s.news_error = None;
            }),
            Err(e) => {
                tracing::warn!("Mood-filtered headline fetch failed: {e}");
                self.update(|s| s.news_error = Some(e.user_message(Branch::News)));
            }
        }

        self.update(|s| s.stage = Stage::Settled);
        tracing::info!("Curation run settled");
        self.state()
    }
}
