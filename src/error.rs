//! Error types for the Tourwatch engine.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TourwatchError>;

#[derive(Debug, Error)]
pub enum TourwatchError {
    /// No hotspot with this id exists in the current detection cycle.
    #[error("Hotspot not found: {0}")]
    HotspotNotFound(String),

    /// Rejected rating or coordinate (only raised when validation is enabled).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TourwatchError {
    /// `true` for errors a request layer should surface as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, TourwatchError::HotspotNotFound(_))
    }
}
