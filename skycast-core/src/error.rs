use thiserror::Error;

use crate::provider::ProviderId;

/// Failure kinds a pipeline branch can end in.
///
/// Every variant is recovered at the branch that produced it and surfaced as
/// a status string in that branch's slot; none aborts the other branches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurationError {
    #[error("Permission to access location was denied")]
    PermissionDenied,

    #[error("Current location is unavailable")]
    LocationUnavailable,

    #[error("No API key configured for provider '{0}'")]
    MissingCredential(ProviderId),

    #[error("{0}")]
    NetworkOrParse(String),
}

/// Pipeline branch an error is reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Location,
    Weather,
    News,
}

impl Branch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Branch::Location => "location",
            Branch::Weather => "weather",
            Branch::News => "news",
        }
    }
}

impl CurationError {
    /// Short message suitable for showing next to the `branch` section.
    pub fn user_message(&self, branch: Branch) -> String {
        match self {
            CurationError::PermissionDenied => "Permission to access location was denied".to_string(),
            CurationError::LocationUnavailable => "Unable to determine your location".to_string(),
            CurationError::MissingCredential(id) => format!(
                "Missing API key for {id}. Hint: run `skycast configure {id}` and enter your API key."
            ),
            CurationError::NetworkOrParse(_) => format!("Failed to load {}", branch.as_str()),
        }
    }
}

impl From<anyhow::Error> for CurationError {
    fn from(err: anyhow::Error) -> Self {
        // `{:#}` keeps the whole context chain on one line.
        CurationError::NetworkOrParse(format!("{err:#}"))
    }
}
