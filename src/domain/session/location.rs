//! Geographic value objects for session venues.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// A latitude/longitude pair in decimal degrees.
///
/// Construction through [`Coordinate::new`] is unchecked so the distance
/// math can be fed anything; use [`Coordinate::validated`] at input
/// boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Creates a coordinate, rejecting values outside the valid ranges.
    pub fn validated(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::out_of_range(
                "latitude", -90.0, 90.0, latitude,
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::out_of_range(
                "longitude",
                -180.0,
                180.0,
                longitude,
            ));
        }
        Ok(Self::new(latitude, longitude))
    }
}

/// Where a session takes place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
}

impl Location {
    /// Creates a validated location.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the address is blank
    /// - `OutOfRange` if either coordinate is outside its valid range
    pub fn new(
        address: impl Into<String>,
        coordinate: Coordinate,
        place_id: Option<String>,
    ) -> Result<Self, ValidationError> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(ValidationError::empty_field("address"));
        }
        let coordinate = Coordinate::validated(coordinate.latitude, coordinate.longitude)?;
        Ok(Self {
            address: address.trim().to_string(),
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            place_id: place_id.filter(|id| !id.trim().is_empty()),
        })
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
