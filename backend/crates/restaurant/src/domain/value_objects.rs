//! Domain Value Objects

use crate::error::{RestaurantError, RestaurantResult};

const NAME_MAX_CHARS: usize = 200;

/// Trimmed, non-empty display name (restaurant, dish or address label)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(String);

impl Name {
    /// `field` names the request field in the error message.
    pub fn new(raw: impl AsRef<str>, field: &str) -> RestaurantResult<Self> {
        let trimmed = raw.as_ref().trim();

        if trimmed.is_empty() {
            return Err(RestaurantError::validation(format!("{field} is required")));
        }
        if trimmed.chars().count() > NAME_MAX_CHARS {
            return Err(RestaurantError::validation(format!(
                "{field} must be at most {NAME_MAX_CHARS} characters"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn from_db(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// WGS84 latitude/longitude in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    lat: f64,
    lng: f64,
}

impl Coordinates {
    /// Both values are required; lat in [-90, 90], lng in [-180, 180].
    pub fn new(lat: Option<f64>, lng: Option<f64>) -> RestaurantResult<Self> {
        let (Some(lat), Some(lng)) = (lat, lng) else {
            return Err(RestaurantError::validation("lat and lng are required"));
        };

        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(RestaurantError::validation(
                "lat must be between -90 and 90",
            ));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(RestaurantError::validation(
                "lng must be between -180 and 180",
            ));
        }

        Ok(Self { lat, lng })
    }

    pub fn from_db(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

/// Dish price, finite and strictly positive
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    pub fn new(raw: Option<f64>) -> RestaurantResult<Self> {
        match raw {
            Some(value) if value.is_finite() && value > 0.0 => Ok(Self(value)),
            _ => Err(RestaurantError::validation("Price must be greater than 0")),
        }
    }

    pub fn from_db(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}
