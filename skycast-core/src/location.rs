//! Device location: permission, one-shot position fix, reverse geocoding.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::{
    CurationError,
    model::{Coordinates, Located, PlaceInfo},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Platform location capability.
#[async_trait]
pub trait Geolocation: Send + Sync + Debug {
    async fn request_permission(&self) -> Permission;

    /// One-shot position fix; `None` when the platform cannot produce one.
    async fn current_position(&self) -> Option<Coordinates>;
}

/// Coordinates -> place lookup. Failures are non-fatal to callers.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync + Debug {
    async fn reverse_geocode(&self, coords: Coordinates) -> anyhow::Result<PlaceInfo>;
}

/// Location source backed by fixed coordinates (flags or config file).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticGeolocation {
    allowed: bool,
    fix: Option<Coordinates>,
}

impl StaticGeolocation {
    pub fn new(allowed: bool, fix: Option<Coordinates>) -> Self {
        Self { allowed, fix }
    }

    pub fn denied() -> Self {
        Self::new(false, None)
    }
}

#[async_trait]
impl Geolocation for StaticGeolocation {
    async fn request_permission(&self) -> Permission {
        if self.allowed {
            Permission::Granted
        } else {
            Permission::Denied
        }
    }

    async fn current_position(&self) -> Option<Coordinates> {
        self.fix
    }
}

/// Geocoder that never resolves; every lookup falls back to defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeocoder;

#[async_trait]
impl ReverseGeocoder for NoGeocoder {
    async fn reverse_geocode(&self, _coords: Coordinates) -> anyhow::Result<PlaceInfo> {
        Err(anyhow::anyhow!("Reverse geocoding is disabled"))
    }
}

/// Resolve the device position and the place it belongs to.
///
/// Denied permission and a missing fix are errors. A failed reverse geocode
/// is not: the place falls back to [`PlaceInfo::default`].
pub async fn acquire(
    geolocation: &dyn Geolocation,
    geocoder: &dyn ReverseGeocoder,
) -> Result<Located, CurationError> {
    if geolocation.request_permission().await != Permission::Granted {
        tracing::warn!("Location permission denied");
        return Err(CurationError::PermissionDenied);
    }

    let coordinates = geolocation
        .current_position()
        .await
        .ok_or(CurationError::LocationUnavailable)?;

    tracing::debug!(lat = coordinates.latitude, lon = coordinates.longitude, "Got position fix");

    let place = match geocoder.reverse_geocode(coordinates).await {
        Ok(place) => {
            tracing::info!(
                city = place.city.as_deref().unwrap_or("-"),
                country = %place.country_code,
                "Reverse geocoded position"
            );
            place
        }
        Err(e) => {
            tracing::warn!("Reverse geocode failed, using defaults: {e:#}");
            PlaceInfo::default()
        }
    };

    Ok(Located { coordinates, place })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FixedGeocoder(PlaceInfo);

    #[async_trait]
    impl ReverseGeocoder for FixedGeocoder {
        async fn reverse_geocode(&self, _coords: Coordinates) -> anyhow::Result<PlaceInfo> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn denied_permission() {
        let err = acquire(&StaticGeolocation::denied(), &NoGeocoder).await.unwrap_err();
        assert_eq!(err, CurationError::PermissionDenied);
    }

    #[tokio::test]
    async fn granted_without_fix_is_unavailable() {
        let geo = StaticGeolocation::new(true, None);
        let err = acquire(&geo, &NoGeocoder).await.unwrap_err();
        assert_eq!(err, CurationError::LocationUnavailable);
    }

    #[tokio::test]
    async fn geocode_failure_falls_back_to_default_place() {
        let coords = Coordinates::new(48.85, 2.35);
        let located = acquire(&StaticGeolocation::new(true, Some(coords)), &NoGeocoder)
            .await
            .expect("location should resolve");

        assert_eq!(located.coordinates, coords);
        assert_eq!(located.place, PlaceInfo::default());
        assert_eq!(located.place.country_code, "US");
    }

    #[tokio::test]
    async fn geocoded_place_is_kept() {
        let place = PlaceInfo {
            city: Some("Paris".into()),
            region: Some("Île-de-France".into()),
            country_code: "FR".into(),
        };
        let geo = StaticGeolocation::new(true, Some(Coordinates::new(48.85, 2.35)));
        let located = acquire(&geo, &FixedGeocoder(place.clone())).await.unwrap();
        assert_eq!(located.place, place);
    }
}
