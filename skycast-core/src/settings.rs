//! Session-scoped user settings.
//!
//! Settings live only for the lifetime of the process. Readers take a
//! [`Settings`] snapshot so a value changed mid-run never leaks into a run
//! that already started.

use std::{fmt, str::FromStr, sync::Arc};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Unit system used for weather requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Metric,
    #[default]
    Imperial,
}

impl Unit {
    /// Value of the provider's `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Metric => "metric",
            Unit::Imperial => "imperial",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Metric => "°C",
            Unit::Imperial => "°F",
        }
    }

    /// Convert a temperature reported in this unit to Celsius.
    pub fn to_celsius(&self, value: f64) -> f64 {
        match self {
            Unit::Metric => value,
            Unit::Imperial => crate::mood::fahrenheit_to_celsius(value),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "metric" | "c" | "celsius" => Ok(Unit::Metric),
            "imperial" | "f" | "fahrenheit" => Ok(Unit::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit '{value}'. Supported units: metric, imperial."
            )),
        }
    }
}

/// News topics a user can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    Business,
    Entertainment,
    Health,
    Technology,
}

impl NewsCategory {
    /// Tag sent as the news provider's `category` parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsCategory::Business => "business",
            NewsCategory::Entertainment => "entertainment",
            NewsCategory::Health => "health",
            NewsCategory::Technology => "technology",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NewsCategory::Business => "Business",
            NewsCategory::Entertainment => "Entertainment",
            NewsCategory::Health => "Health",
            NewsCategory::Technology => "Technology",
        }
    }

    pub const fn all() -> &'static [NewsCategory] {
        &[
            NewsCategory::Business,
            NewsCategory::Entertainment,
            NewsCategory::Health,
            NewsCategory::Technology,
        ]
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsCategory {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lower = value.to_lowercase();
        NewsCategory::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown news category '{value}'. Supported categories: business, entertainment, health, technology."
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub unit: Unit,
    /// Selection order is kept; only the first entry reaches the news request.
    pub categories: Vec<NewsCategory>,
}

impl Settings {
    pub fn toggle_category(&mut self, category: NewsCategory) {
        if let Some(pos) = self.categories.iter().position(|c| *c == category) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category);
        }
    }

    pub fn preferred_topic(&self) -> Option<NewsCategory> {
        self.categories.first().copied()
    }
}

/// Shared handle to the session's settings.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    inner: Arc<RwLock<Settings>>,
}

impl SettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    pub fn snapshot(&self) -> Settings {
        self.inner.read().clone()
    }

    pub fn set_unit(&self, unit: Unit) {
        self.inner.write().unit = unit;
    }

    pub fn toggle_category(&self, category: NewsCategory) {
        self.inner.write().toggle_category(category);
    }

    /// Replace the selection, dropping repeats while keeping first-seen order.
    pub fn set_categories(&self, categories: impl IntoIterator<Item = NewsCategory>) {
        let mut deduped: Vec<NewsCategory> = Vec::new();
        for category in categories {
            if !deduped.contains(&category) {
                deduped.push(category);
            }
        }
        self.inner.write().categories = deduped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_imperial_without_topics() {
        let settings = Settings::default();
        assert_eq!(settings.unit, Unit::Imperial);
        assert!(settings.categories.is_empty());
        assert_eq!(settings.preferred_topic(), None);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut settings = Settings::default();
        settings.toggle_category(NewsCategory::Health);
        settings.toggle_category(NewsCategory::Business);
        assert_eq!(settings.categories, vec![NewsCategory::Health, NewsCategory::Business]);

        settings.toggle_category(NewsCategory::Health);
        assert_eq!(settings.categories, vec![NewsCategory::Business]);
    }

    #[test]
    fn first_selected_topic_wins() {
        let store = SettingsStore::default();
        store.set_categories([
            NewsCategory::Technology,
            NewsCategory::Health,
            NewsCategory::Technology,
        ]);
        let snap = store.snapshot();
        assert_eq!(snap.categories.len(), 2);
        assert_eq!(snap.preferred_topic(), Some(NewsCategory::Technology));
    }

    #[test]
    fn snapshot_is_detached_from_later_writes() {
        let store = SettingsStore::default();
        let before = store.snapshot();
        store.set_unit(Unit::Metric);
        store.toggle_category(NewsCategory::Business);

        assert_eq!(before.unit, Unit::Imperial);
        assert!(before.categories.is_empty());
        assert_eq!(store.snapshot().unit, Unit::Metric);
    }

    #[test]
    fn parse_unit_and_category() {
        assert_eq!("METRIC".parse::<Unit>().unwrap(), Unit::Metric);
        assert_eq!("f".parse::<Unit>().unwrap(), Unit::Imperial);
        assert!("kelvin".parse::<Unit>().is_err());

        assert_eq!("Health".parse::<NewsCategory>().unwrap(), NewsCategory::Health);
        let err = "sports".parse::<NewsCategory>().unwrap_err();
        assert!(err.to_string().contains("Unknown news category"));
    }
}
