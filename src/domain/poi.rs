//! Module defining a single point of interest as found in the source documents

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::error::integrity_error;

/// A portal, gym or stop. The flags describe the same entity and are not guaranteed to be exclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoiEntry {
    pub name: String,
    #[serde(rename = "portal")]
    pub is_portal: bool,
    #[serde(rename = "gym")]
    pub is_gym: bool,
    #[serde(rename = "stop")]
    pub is_stop: bool,
    #[serde(rename = "ts")]
    pub timestamp: i64,
    /// Level-20 S2 cell id of the entry
    #[serde(rename = "s2l20")]
    pub s2_cell: String,
    #[serde(rename = "loc")]
    pub location: Geometry,
}

/// GeoJSON-like geometry. The source format only ever carries points, `[longitude, latitude]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl Geometry {
    pub fn point(lon: f64, lat: f64) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: vec![lon, lat],
        }
    }

    /// Returns the coordinate pair if the geometry holds exactly two values.
    pub fn lon_lat(&self) -> Option<LonLat> {
        match self.coordinates.as_slice() {
            [lon, lat] => Some(LonLat {
                lon: *lon,
                lat: *lat,
            }),
            _ => None,
        }
    }
}

impl PoiEntry {
    /// Short description used to identify the entry in log messages and errors.
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            format!("<unnamed> @ {}", self.s2_cell)
        } else {
            format!("{} @ {}", self.name, self.s2_cell)
        }
    }

    /// Returns the location of the entry, or a data integrity error if its geometry is not a coordinate pair.
    pub fn position(&self) -> Result<LonLat, Error> {
        self.location.lon_lat().ok_or_else(|| {
            integrity_error(
                self.label(),
                format!(
                    "expected 2 coordinates, found {}",
                    self.location.coordinates.len()
                ),
            )
        })
    }
}
