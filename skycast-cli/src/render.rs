//! Plain-text rendering of a settled pipeline state.

use std::fmt;

use skycast_core::{CurationState, Unit};

/// Display adapter that prints every section of a [`CurationState`].
pub struct StateView<'a>(pub &'a CurationState);

impl fmt::Display for StateView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        let symbol = state.unit.map(|u| u.symbol()).unwrap_or(Unit::default().symbol());

        if let Some(err) = &state.location_error {
            return writeln!(f, "Location: {err}");
        }

        let place = state.place_name().unwrap_or("Unknown location");
        writeln!(f, "Weather for {place}")?;

        match &state.current {
            Some(current) => writeln!(
                f,
                "  Now: {:.0}{symbol}, {} ({})",
                current.temperature, current.condition, current.icon
            )?,
            None => writeln!(f, "  Now: unavailable")?,
        }
        if let Some(err) = &state.weather_error {
            writeln!(f, "  ! {err}")?;
        }

        if let Some(days) = state.forecast.as_ref().filter(|d| !d.is_empty()) {
            writeln!(f, "\nForecast")?;
            for day in days {
                writeln!(
                    f,
                    "  {} {}  {:>4.0}{symbol} / {:>4.0}{symbol}  {}",
                    day.date.format("%a"),
                    day.date_key(),
                    day.min_temp,
                    day.max_temp,
                    day.icon
                )?;
            }
        }

        writeln!(f)?;
        match state.mood {
            Some(mood) => writeln!(f, "Headlines (mood: {mood})")?,
            None => writeln!(f, "Headlines")?,
        }
        if state.news.is_empty() {
            writeln!(f, "  No headlines")?;
        }
        for (i, article) in state.news.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, article.title)?;
            if !article.description.is_empty() {
                writeln!(f, "     {}", article.description)?;
            }
            writeln!(f, "     {}", article.url)?;
        }
        if let Some(err) = &state.news_error {
            writeln!(f, "  ! {err}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use skycast_core::{
        Coordinates, CurrentWeather, ForecastDay, Located, MoodCategory, NewsArticle, PlaceInfo,
        Stage,
    };

    fn settled() -> CurationState {
        CurationState {
            stage: Stage::Settled,
            location: Some(Located {
                coordinates: Coordinates::new(51.5, -0.12),
                place: PlaceInfo {
                    city: Some("London".into()),
                    region: None,
                    country_code: "GB".into(),
                },
            }),
            unit: Some(Unit::Metric),
            current: Some(CurrentWeather {
                temperature: 12.4,
                condition: "Clouds".into(),
                icon: "04d".into(),
                city_name: "City of London".into(),
            }),
            forecast: Some(vec![ForecastDay {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                min_temp: 8.0,
                max_temp: 13.0,
                icon: "04d".into(),
            }]),
            mood: Some(MoodCategory::Cool),
            news: vec![NewsArticle {
                title: "Team celebrates victory".into(),
                description: String::new(),
                url: "https://news.example/victory".into(),
            }],
            ..CurationState::default()
        }
    }

    #[test]
    fn renders_all_sections() {
        let text = StateView(&settled()).to_string();

        assert!(text.contains("Weather for London"));
        assert!(text.contains("Now: 12°C, Clouds"));
        assert!(text.contains("2024-01-01"));
        assert!(text.contains("Headlines (mood: cool)"));
        assert!(text.contains("1. Team celebrates victory"));
    }

    #[test]
    fn location_error_short_circuits() {
        let state = CurationState {
            stage: Stage::Settled,
            location_error: Some("Permission to access location was denied".into()),
            ..CurationState::default()
        };
        let text = StateView(&state).to_string();

        assert_eq!(text, "Location: Permission to access location was denied\n");
    }

    #[test]
    fn branch_errors_are_shown() {
        let mut state = settled();
        state.current = None;
        state.weather_error = Some("Failed to load weather".into());
        state.news.clear();
        state.news_error = Some("Failed to load news".into());

        let text = StateView(&state).to_string();

        assert!(text.contains("Now: unavailable"));
        assert!(text.contains("! Failed to load weather"));
        assert!(text.contains("No headlines"));
        assert!(text.contains("! Failed to load news"));
        assert!(text.contains("Weather for London"));
    }

    #[test]
    fn bare_state_renders_placeholders_in_order() {
        let state = CurationState {
            stage: Stage::Settled,
            ..CurationState::default()
        };

        assert_eq!(
            StateView(&state).to_string(),
            "Weather for Unknown location\n  Now: unavailable\n\nHeadlines\n  No headlines\n"
        );
    }
}
