#![forbid(unsafe_code)]

//! Data model + normalizer for tramline route-evolution charts (headless).
//!
//! Design goals:
//! - deterministic, testable outputs (the normalized model is plain data)
//! - the raw dataset is never mutated; normalization runs once and the
//!   result is reused for every subsequent render
//! - runtime-agnostic async APIs (no specific executor required)

pub mod error;
pub mod load;
pub mod model;
pub mod normalize;

pub use error::{Error, Result};
pub use load::{DatasetPaths, load_dataset};
pub use model::{Annotation, RawDataset, RawStopSet, RawYear, Road, StopRecord, StopTable};
pub use normalize::{
    Direction, NormalizedModel, ResolvedStop, Route, StopTag, YearModel, normalize,
};
