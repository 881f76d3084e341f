//! Coordinate identifiers: `"lat,lon"` parsing and range validation.
//!
//! The HTTP layer accepts locations as plain `"lat,lon"` strings and owns
//! their validation; everything downstream only ever sees a checked
//! numeric pair.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;

/// A validated latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Checked constructor; rejects pairs outside the WGS84 ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, AdvisorError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(AdvisorError::InvalidInput(format!(
                "latitude {latitude} outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(AdvisorError::InvalidInput(format!(
                "longitude {longitude} outside [-180, 180]"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl FromStr for Coordinates {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static RE: OnceCell<Regex> = OnceCell::new();
        let re = RE.get_or_init(|| {
            Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*,\s*(-?\d+(?:\.\d+)?)\s*$").unwrap()
        });

        let caps = re.captures(s).ok_or_else(|| {
            AdvisorError::InvalidInput(format!(
                "malformed location '{s}', expected 'lat,lon'"
            ))
        })?;

        // Both captures are plain decimal numbers by construction.
        let latitude: f64 = caps[1]
            .parse()
            .map_err(|_| AdvisorError::InvalidInput(format!("unreadable latitude in '{s}'")))?;
        let longitude: f64 = caps[2]
            .parse()
            .map_err(|_| AdvisorError::InvalidInput(format!("unreadable longitude in '{s}'")))?;

        Self::new(latitude, longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
