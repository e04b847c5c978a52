//! Temperature-derived mood used to bias headline selection.

use std::fmt;

use serde::{Deserialize, Serialize};

const COLD_BELOW_C: f64 = 10.0;
const HOT_ABOVE_C: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodCategory {
    Cold,
    Cool,
    Hot,
}

impl MoodCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodCategory::Cold => "cold",
            MoodCategory::Cool => "cool",
            MoodCategory::Hot => "hot",
        }
    }

    /// Lower-case keywords matched as substrings against headlines.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            MoodCategory::Cold => &["death", "tragedy", "loss", "disaster", "crisis"],
            MoodCategory::Hot => &["fear", "terror", "panic", "threat"],
            MoodCategory::Cool => &["win", "victory", "success", "happy", "celebration"],
        }
    }
}

impl fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cold below 10 °C, hot above 25 °C, cool in between (both bounds inclusive).
pub fn classify(celsius: f64) -> MoodCategory {
    if celsius < COLD_BELOW_C {
        MoodCategory::Cold
    } else if celsius > HOT_ABOVE_C {
        MoodCategory::Hot
    } else {
        MoodCategory::Cool
    }
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Unit;

    #[test]
    fn boundaries() {
        assert_eq!(classify(9.99), MoodCategory::Cold);
        assert_eq!(classify(10.0), MoodCategory::Cool);
        assert_eq!(classify(25.0), MoodCategory::Cool);
        assert_eq!(classify(25.01), MoodCategory::Hot);
        assert_eq!(classify(-40.0), MoodCategory::Cold);
    }

    #[test]
    fn fahrenheit_conversion() {
        assert_eq!(fahrenheit_to_celsius(32.0), 0.0);
        assert_eq!(fahrenheit_to_celsius(212.0), 100.0);
        assert!((fahrenheit_to_celsius(77.0) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn classify_after_unit_conversion() {
        // 50 °F is exactly 10 °C.
        assert_eq!(classify(Unit::Imperial.to_celsius(50.0)), MoodCategory::Cool);
        assert_eq!(classify(Unit::Imperial.to_celsius(49.9)), MoodCategory::Cold);
        assert_eq!(classify(Unit::Imperial.to_celsius(78.0)), MoodCategory::Hot);
        assert_eq!(classify(Unit::Metric.to_celsius(26.0)), MoodCategory::Hot);
    }

    #[test]
    fn keyword_tables() {
        assert!(MoodCategory::Hot.keywords().contains(&"threat"));
        assert!(MoodCategory::Cold.keywords().contains(&"crisis"));
        assert!(MoodCategory::Cool.keywords().contains(&"celebration"));
    }
}
