//! Folding of per-timeslot forecast entries into calendar days.

use chrono::{DateTime, NaiveDate};

use crate::model::ForecastDay;

pub const MAX_FORECAST_DAYS: usize = 5;

/// One provider forecast entry (typically a 3-hour slot).
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSlot {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    pub min_temp: f64,
    pub max_temp: f64,
    pub icon: String,
}

/// Collapse slots into at most [`MAX_FORECAST_DAYS`] days.
///
/// A day is keyed by the UTC calendar date of its slots. The first slot seen
/// for a date seeds the record (including its icon); later slots only widen
/// the min/max. Dates are taken in the order they first appear, so once five
/// distinct dates are known every slot for a sixth one is dropped.
pub fn aggregate_daily(slots: &[ForecastSlot]) -> Vec<ForecastDay> {
    let mut days: Vec<ForecastDay> = Vec::with_capacity(MAX_FORECAST_DAYS);

    for slot in slots {
        let Some(date) = slot_date(slot.timestamp) else {
            tracing::debug!(timestamp = slot.timestamp, "Skipping forecast slot with invalid timestamp");
            continue;
        };

        let (low, high) = if slot.min_temp <= slot.max_temp {
            (slot.min_temp, slot.max_temp)
        } else {
            (slot.max_temp, slot.min_temp)
        };

        if let Some(day) = days.iter_mut().find(|d| d.date == date) {
            day.min_temp = day.min_temp.min(low);
            day.max_temp = day.max_temp.max(high);
            continue;
        }

        if days.len() == MAX_FORECAST_DAYS {
            continue;
        }

        days.push(ForecastDay {
            date,
            min_temp: low,
            max_temp: high,
            icon: slot.icon.clone(),
        });
    }

    days.sort_by_key(|d| d.date);
    days
}

fn slot_date(timestamp: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.date_naive())
}
