//! Clinic lookup types

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Geographic point used for clinic lookup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    /// Latitude must be in `[-90, 90]` and longitude in `[-180, 180]`.
    pub fn try_new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::InvalidLocation { lat, lon });
        }
        Ok(Self { lat, lon })
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// A nearby provider returned by the research backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicRecord {
    pub name: String,
    pub doctor_name: String,
    pub specialty: String,
    /// 0-5
    pub rating: f64,
    pub review_count: u32,
    pub phone: String,
    pub address: String,
    pub distance_km: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_available: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_bounds() {
        assert!(Location::try_new(47.6, -122.3).is_ok());
        assert!(Location::try_new(-90.0, 180.0).is_ok());
        assert!(Location::try_new(91.0, 0.0).is_err());
        assert!(Location::try_new(0.0, -181.0).is_err());
        assert!(Location::try_new(f64::NAN, 0.0).is_err());
    }
}
