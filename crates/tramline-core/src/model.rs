//! Raw dataset types, matching the four input JSON documents.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A named reference position along the route axis. Roads are used purely
/// as bottom-axis tick labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Road {
    pub name: String,
    pub position: f64,
}

/// A stop as stored in the stops table. Identity (name, position) is shared
/// across years; per-year state (tag, direction) is attached during
/// normalization to a per-year copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopRecord {
    pub name: String,
    pub position: f64,
}

/// Stop identifier -> record, in document order.
pub type StopTable = IndexMap<String, StopRecord>;

/// One element of a year's `stops` list. The source format interleaves
/// stop-reference groups with bare numbers; a bare number is a weight marker
/// that terminates the current route group (see [`crate::normalize`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawStopSet {
    Weight(f64),
    /// Ordered stop references, optionally decorated with `!` (new) or
    /// `*` (moved).
    Stops(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawYear {
    pub year: i32,
    pub stops: Vec<RawStopSet>,
}

/// A free-text note rendered as a box to the right of one year's route.
/// `description` uses embedded line breaks for multi-line text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub year: i32,
    pub title: String,
    pub description: String,
}

/// The four input documents, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDataset {
    pub roads: Vec<Road>,
    pub stops: StopTable,
    pub years: Vec<RawYear>,
    pub annotations: Vec<Annotation>,
}
