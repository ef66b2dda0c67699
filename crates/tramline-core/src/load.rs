//! Loading of the four input documents.
//!
//! The combined load step is async so the four reads can be joined; callers
//! without a runtime can drive it with `futures::executor::block_on`. A
//! failure in any document fails the load as a whole.

use crate::error::{Error, Result};
use crate::model::{Annotation, RawDataset, RawYear, Road, StopTable};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Locations of the four dataset documents.
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub roads: PathBuf,
    pub stops: PathBuf,
    pub years: PathBuf,
    pub annotations: PathBuf,
}

impl DatasetPaths {
    /// Conventional layout: `<dir>/{roads,stops,years,annotations}.json`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            roads: dir.join("roads.json"),
            stops: dir.join("stops.json"),
            years: dir.join("years.json"),
            annotations: dir.join("annotations.json"),
        }
    }
}

async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| Error::Json {
        path: path.display().to_string(),
        source,
    })
}

pub async fn load_dataset(paths: &DatasetPaths) -> Result<RawDataset> {
    let (roads, stops, years, annotations) = futures::try_join!(
        load_json::<Vec<Road>>(&paths.roads),
        load_json::<StopTable>(&paths.stops),
        load_json::<Vec<RawYear>>(&paths.years),
        load_json::<Vec<Annotation>>(&paths.annotations),
    )?;

    Ok(RawDataset {
        roads,
        stops,
        years,
        annotations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawStopSet;
    use futures::executor::block_on;
    use std::path::PathBuf;

    fn fixture_paths() -> DatasetPaths {
        DatasetPaths::from_dir(
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("..")
                .join("..")
                .join("fixtures")
                .join("tram"),
        )
    }

    #[test]
    fn loads_all_four_documents() {
        let raw = block_on(load_dataset(&fixture_paths())).unwrap();
        assert_eq!(raw.roads.len(), 8);
        assert_eq!(raw.stops.len(), 12);
        assert_eq!(raw.years.len(), 7);
        assert_eq!(raw.annotations.len(), 3);
        // Document order of the stops table is preserved.
        assert_eq!(raw.stops.get_index(0).map(|(id, _)| id.as_str()), Some("depot"));
    }

    #[test]
    fn weight_markers_deserialize_as_numbers_not_groups() {
        let raw = block_on(load_dataset(&fixture_paths())).unwrap();
        let year_2010 = raw.years.iter().find(|y| y.year == 2010).unwrap();
        assert!(matches!(year_2010.stops[2], RawStopSet::Weight(w) if w == 2.0));
    }

    #[test]
    fn missing_document_fails_the_load_as_a_whole() {
        let paths = DatasetPaths::from_dir("/nonexistent");
        let err = block_on(load_dataset(&paths)).unwrap_err();
        assert!(err.to_string().contains("roads.json"), "{err}");
    }
}
