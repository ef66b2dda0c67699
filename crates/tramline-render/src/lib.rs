#![forbid(unsafe_code)]

//! Layout + SVG renderer for tramline route-evolution charts (headless).
//!
//! The layout step is a pure function of the normalized model and the
//! requested drawing size: it produces a [`model::RouteChartLayout`] (plain
//! drawable data, no hidden state), which the SVG writer turns into a
//! deterministic string. Re-rendering at a new size means calling the pair
//! again with the same model; the model itself is never touched.

pub mod chart;
pub mod model;
pub mod path;
pub mod scale;
pub mod svg;
mod util;

pub use chart::{layout_route_chart, road_label};
pub use svg::render_svg;

use tramline_core::NormalizedModel;

/// Layout + emit in one go.
pub fn render(model: &NormalizedModel, container_width: f64, container_height: f64) -> String {
    render_svg(&layout_route_chart(model, container_width, container_height))
}
