//! Module for the consumer side: turning the streamed cells into map placemarks

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::domain::{Cell, PoiEntry};


/// Marker shown for a point of interest on the map.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Gym,
    Stop,
}

impl MarkerKind {
    /// Gyms win over stops when an entry carries both flags. Entries with neither flag get no marker.
    pub fn of(poi: &PoiEntry) -> Option<Self> {
        if poi.is_gym {
            Some(MarkerKind::Gym)
        } else if poi.is_stop {
            Some(MarkerKind::Stop)
        } else {
            None
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerKind::Gym => write!(f, "Gym"),
            MarkerKind::Stop => write!(f, "Stop"),
        }
    }
}

/// Public DTO for one marker of the map overlay.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Placemark {
    pub kind: MarkerKind,
    pub name: String,
    pub lon: f64,
    pub lat: f64,
}

/// Counters of a consumer, only used for the log summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub cells: usize,
    pub pois: usize,
    pub gyms: usize,
    pub stops: usize,
    /// Gyms and stops without a usable location
    pub skipped: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cells containing {} POIs with {} gyms, {} stops ({} skipped)",
            self.cells, self.pois, self.gyms, self.stops, self.skipped
        )
    }
}

/// Turns cells into placemarks.
///
/// A POI whose geometry is not a coordinate pair is logged and skipped; the remaining entries of the cell and all
/// later cells are processed as usual.
#[derive(Debug, Default)]
pub struct PlacemarkCollector {
    summary: Summary,
}

impl PlacemarkCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_cell(&mut self, cell: &Cell) -> Vec<Placemark> {
        self.summary.cells += 1;
        cell.entries()
            .iter()
            .filter_map(|poi| self.process_poi(poi))
            .collect()
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    fn process_poi(&mut self, poi: &PoiEntry) -> Option<Placemark> {
        self.summary.pois += 1;
        let kind = MarkerKind::of(poi)?;
        let ordinal = match kind {
            MarkerKind::Gym => {
                self.summary.gyms += 1;
                self.summary.gyms
            }
            MarkerKind::Stop => {
                self.summary.stops += 1;
                self.summary.stops
            }
        };

        let position = match poi.position() {
            Ok(position) => position,
            Err(error) => {
                warn!(%error, "skipping POI without a usable location");
                self.summary.skipped += 1;
                return None;
            }
        };

        let name = if poi.name.is_empty() {
            format!("{kind} {ordinal}")
        } else {
            poi.name.clone()
        };
        Some(Placemark {
            kind,
            name,
            lon: position.lon,
            lat: position.lat,
        })
    }
}
