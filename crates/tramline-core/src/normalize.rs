//! One-time normalization of the raw dataset.
//!
//! Turns the compact year encoding (stop-reference groups interleaved with
//! bare weight markers) into fully resolved per-year route segments, plus a
//! per-year rightmost-stop lookup used for annotation placement. The raw
//! dataset is borrowed, never mutated; running this twice on the same input
//! yields structurally identical output.

use crate::error::{Error, Result};
use crate::model::{Annotation, RawDataset, RawStopSet, RawYear, Road, StopTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-year status of a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopTag {
    #[serde(rename = "")]
    Untagged,
    New,
    Moved,
}

impl StopTag {
    pub fn is_tagged(self) -> bool {
        self != Self::Untagged
    }
}

/// Which side of the route line a stop is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "W")]
    West,
    #[serde(rename = "E")]
    East,
}

/// A per-year copy of a stop record, decorated with its tag, side and
/// owning-year index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStop {
    /// Bare identifier in the stops table (decorations stripped).
    pub id: String,
    pub name: String,
    pub position: f64,
    pub tag: StopTag,
    pub direction: Option<Direction>,
    pub year_index: usize,
}

/// A weighted route segment: one per weight-marker-delimited group of stop
/// sets. Weight controls rendered stroke thickness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub weight: f64,
    pub stops: Vec<Vec<ResolvedStop>>,
}

impl Route {
    pub fn resolved_stops(&self) -> impl Iterator<Item = &ResolvedStop> {
        self.stops.iter().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearModel {
    pub year: i32,
    pub index: usize,
    /// Resolved stop-set groups, weight markers dropped.
    pub stops: Vec<Vec<ResolvedStop>>,
    pub routes: Vec<Route>,
}

impl YearModel {
    pub fn resolved_stops(&self) -> impl Iterator<Item = &ResolvedStop> {
        self.stops.iter().flatten()
    }
}

/// The fully resolved model the renderer reads on every pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedModel {
    pub roads: Vec<Road>,
    pub years: Vec<YearModel>,
    pub annotations: Vec<Annotation>,
    /// year -> max stop position among that year's resolved stops. Years
    /// without any resolved stop have no entry.
    pub max_position: BTreeMap<i32, f64>,
}

/// Explicit tagged form of one raw stop-set entry, so route folding never
/// type-puns on "number or list".
enum YearEntry {
    Group(Vec<ResolvedStop>),
    WeightMarker(f64),
}

pub fn normalize(raw: &RawDataset) -> Result<NormalizedModel> {
    let mut years = Vec::with_capacity(raw.years.len());
    let mut max_position = BTreeMap::new();

    for (index, raw_year) in raw.years.iter().enumerate() {
        let entries = resolve_entries(&raw.stops, raw_year, index)?;
        let routes = fold_routes(&entries);

        let stops: Vec<Vec<ResolvedStop>> = entries
            .into_iter()
            .filter_map(|entry| match entry {
                YearEntry::Group(group) => Some(group),
                YearEntry::WeightMarker(_) => None,
            })
            .collect();

        if let Some(max) = stops
            .iter()
            .flatten()
            .map(|stop| stop.position)
            .reduce(f64::max)
        {
            max_position.insert(raw_year.year, max);
        }

        years.push(YearModel {
            year: raw_year.year,
            index,
            stops,
            routes,
        });
    }

    Ok(NormalizedModel {
        roads: raw.roads.clone(),
        years,
        annotations: raw.annotations.clone(),
        max_position,
    })
}

fn resolve_entries(stops: &StopTable, raw_year: &RawYear, index: usize) -> Result<Vec<YearEntry>> {
    raw_year
        .stops
        .iter()
        .map(|stop_set| match stop_set {
            RawStopSet::Weight(weight) => Ok(YearEntry::WeightMarker(*weight)),
            RawStopSet::Stops(refs) => {
                let mut group = Vec::with_capacity(refs.len());
                for (pos, reference) in refs.iter().enumerate() {
                    let mut stop = resolve_stop(stops, raw_year.year, reference, index)?;
                    // The last stop of each group sits east of the route
                    // line, every other one west.
                    stop.direction = Some(if pos + 1 == refs.len() {
                        Direction::East
                    } else {
                        Direction::West
                    });
                    group.push(stop);
                }
                Ok(YearEntry::Group(group))
            }
        })
        .collect()
}

fn resolve_stop(
    stops: &StopTable,
    year: i32,
    reference: &str,
    year_index: usize,
) -> Result<ResolvedStop> {
    let id: String = reference
        .chars()
        .filter(|c| !matches!(*c, '!' | '*'))
        .collect();
    let tag = if reference.contains('!') {
        StopTag::New
    } else if reference.contains('*') {
        StopTag::Moved
    } else {
        StopTag::Untagged
    };

    let record = stops.get(&id).ok_or_else(|| Error::UnknownStop {
        year,
        id: reference.to_string(),
    })?;

    Ok(ResolvedStop {
        id,
        name: record.name.clone(),
        position: record.position,
        tag,
        direction: None,
        year_index,
    })
}

/// Fold a year's entries into routes. A weight marker flushes everything
/// accumulated since the previous marker into a route carrying the marker's
/// weight; the trailing run flushes with weight 1. Completed routes are
/// inserted at the front, so the first-discovered group ends up last. That
/// ordering is an artifact of the source data format and is relied on by
/// existing datasets; keep it.
fn fold_routes(entries: &[YearEntry]) -> Vec<Route> {
    let mut routes: Vec<Route> = Vec::new();
    let mut pending: Vec<Vec<ResolvedStop>> = Vec::new();

    for entry in entries {
        match entry {
            YearEntry::Group(group) => pending.push(group.clone()),
            YearEntry::WeightMarker(weight) => routes.insert(
                0,
                Route {
                    weight: *weight,
                    stops: std::mem::take(&mut pending),
                },
            ),
        }
    }

    routes.insert(
        0,
        Route {
            weight: 1.0,
            stops: pending,
        },
    );
    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StopRecord;
    use indexmap::IndexMap;

    fn table(entries: &[(&str, &str, f64)]) -> StopTable {
        let mut out = IndexMap::new();
        for (id, name, position) in entries {
            out.insert(
                (*id).to_string(),
                StopRecord {
                    name: (*name).to_string(),
                    position: *position,
                },
            );
        }
        out
    }

    fn dataset(years: Vec<RawYear>) -> RawDataset {
        RawDataset {
            roads: Vec::new(),
            stops: table(&[
                ("a", "Alpha Street", 1.0),
                ("b", "Bridge", 4.5),
                ("c", "Church", 9.0),
                ("d", "Depot", 12.25),
            ]),
            years,
            annotations: Vec::new(),
        }
    }

    fn refs(ids: &[&str]) -> RawStopSet {
        RawStopSet::Stops(ids.iter().map(|s| (*s).to_string()).collect())
    }

    #[test]
    fn weight_marker_splits_routes_in_reverse_discovery_order() {
        let raw = dataset(vec![RawYear {
            year: 2001,
            stops: vec![refs(&["a", "b"]), RawStopSet::Weight(2.0), refs(&["c"])],
        }]);
        let model = normalize(&raw).unwrap();

        let routes = &model.years[0].routes;
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].weight, 1.0);
        assert_eq!(routes[0].stops.len(), 1);
        assert_eq!(routes[0].stops[0][0].id, "c");
        assert_eq!(routes[1].weight, 2.0);
        assert_eq!(routes[1].stops.len(), 1);
        assert_eq!(routes[1].stops[0][0].id, "a");
        assert_eq!(routes[1].stops[0][1].id, "b");
    }

    #[test]
    fn year_without_markers_folds_into_single_weight_one_route() {
        let raw = dataset(vec![RawYear {
            year: 2001,
            stops: vec![refs(&["a"]), refs(&["b", "c"])],
        }]);
        let model = normalize(&raw).unwrap();

        let routes = &model.years[0].routes;
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].weight, 1.0);
        let ids: Vec<&str> = routes[0].resolved_stops().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn direction_is_assigned_per_group_with_east_last() {
        let raw = dataset(vec![RawYear {
            year: 2001,
            stops: vec![refs(&["a", "b", "c"])],
        }]);
        let model = normalize(&raw).unwrap();

        let group = &model.years[0].stops[0];
        assert_eq!(group[0].direction, Some(Direction::West));
        assert_eq!(group[1].direction, Some(Direction::West));
        assert_eq!(group[2].direction, Some(Direction::East));
    }

    #[test]
    fn decorations_map_to_tags_and_are_stripped_from_ids() {
        let raw = dataset(vec![RawYear {
            year: 2001,
            stops: vec![refs(&["a!", "b*", "c"])],
        }]);
        let model = normalize(&raw).unwrap();

        let group = &model.years[0].stops[0];
        assert_eq!(group[0].id, "a");
        assert_eq!(group[0].tag, StopTag::New);
        assert_eq!(group[1].id, "b");
        assert_eq!(group[1].tag, StopTag::Moved);
        assert_eq!(group[2].tag, StopTag::Untagged);
        assert!(!group[2].tag.is_tagged());
    }

    #[test]
    fn max_position_tracks_rightmost_resolved_stop() {
        let raw = dataset(vec![
            RawYear {
                year: 2001,
                stops: vec![refs(&["d", "a"]), RawStopSet::Weight(3.0), refs(&["b"])],
            },
            RawYear {
                year: 2005,
                stops: vec![refs(&["a"])],
            },
        ]);
        let model = normalize(&raw).unwrap();

        assert_eq!(model.max_position.get(&2001), Some(&12.25));
        assert_eq!(model.max_position.get(&2005), Some(&1.0));
    }

    #[test]
    fn empty_year_has_no_max_position_entry() {
        let raw = dataset(vec![RawYear {
            year: 2001,
            stops: Vec::new(),
        }]);
        let model = normalize(&raw).unwrap();

        assert!(model.max_position.is_empty());
        assert_eq!(model.years[0].routes.len(), 1);
        assert!(model.years[0].routes[0].stops.is_empty());
    }

    #[test]
    fn year_index_is_attached_to_every_resolved_stop() {
        let raw = dataset(vec![
            RawYear {
                year: 2001,
                stops: vec![refs(&["a"])],
            },
            RawYear {
                year: 2005,
                stops: vec![refs(&["b", "c"])],
            },
        ]);
        let model = normalize(&raw).unwrap();

        assert!(model.years[0].resolved_stops().all(|s| s.year_index == 0));
        assert!(model.years[1].resolved_stops().all(|s| s.year_index == 1));
        assert_eq!(model.years[1].index, 1);
    }

    #[test]
    fn unknown_stop_reference_fails_fast() {
        let raw = dataset(vec![RawYear {
            year: 2001,
            stops: vec![refs(&["nope!"])],
        }]);
        let err = normalize(&raw).unwrap_err();
        assert_eq!(
            err.to_string(),
            "year 2001 references unknown stop \"nope!\""
        );
    }

    #[test]
    fn normalization_is_idempotent_and_leaves_raw_input_untouched() {
        let raw = dataset(vec![RawYear {
            year: 2001,
            stops: vec![
                refs(&["a!", "b"]),
                RawStopSet::Weight(2.0),
                refs(&["c*"]),
                RawStopSet::Weight(4.0),
                refs(&["d"]),
            ],
        }]);
        let before = raw.clone();

        let first = normalize(&raw).unwrap();
        let second = normalize(&raw).unwrap();

        assert_eq!(first, second);
        assert_eq!(raw, before);
    }
}
