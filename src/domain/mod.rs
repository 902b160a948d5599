//! Module for the types defining the point-of-interest domain.

mod poi;

pub use poi::{Geometry, LonLat, PoiEntry};

use serde::{Deserialize, Serialize};


/// One array value of the source document: the POI entries grouped under a single spatial-index key.
///
/// A cell is moved into the output channel as a whole, the producer keeps no reference to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell(Vec<PoiEntry>);

impl Cell {
    pub fn new(entries: Vec<PoiEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[PoiEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<PoiEntry>> for Cell {
    fn from(entries: Vec<PoiEntry>) -> Self {
        Self(entries)
    }
}

impl IntoIterator for Cell {
    type Item = PoiEntry;
    type IntoIter = std::vec::IntoIter<PoiEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Cell {
    type Item = &'a PoiEntry;
    type IntoIter = std::slice::Iter<'a, PoiEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
