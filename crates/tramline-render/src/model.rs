//! Drawable model produced by layout and consumed by the SVG writer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectData {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    #[serde(default)]
    pub opacity: Option<f64>,
    /// Corner radius, applied to both `rx` and `ry`.
    #[serde(default)]
    pub corner_radius: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathData {
    pub path: String,
    pub stroke: String,
    pub stroke_width: f64,
    #[serde(default)]
    pub fill: Option<String>,
    #[serde(default)]
    pub marker_end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleData {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextData {
    pub text: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub dx: f64,
    #[serde(default)]
    pub dy: f64,
    /// Degrees, clockwise, around (x, y).
    #[serde(default)]
    pub rotation: f64,
    pub anchor: TextAnchor,
    /// Centre the glyphs on `y` instead of sitting on the baseline.
    #[serde(default)]
    pub baseline_middle: bool,
    #[serde(default)]
    pub fill: Option<String>,
    pub font_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Drawable {
    Rect(RectData),
    Path(PathData),
    Circle(CircleData),
    Text(TextData),
}

/// One `<g>` with a translate transform; shape coordinates are relative to
/// the zone origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub class: String,
    pub dx: f64,
    pub dy: f64,
    pub shapes: Vec<Drawable>,
}

/// An arrow-head `<marker>` definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerDef {
    pub id: String,
    pub size: f64,
    pub color: String,
}

/// The chart-area clip rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRect {
    pub width: f64,
    pub y: f64,
    pub height: f64,
}

/// Everything needed to emit one SVG document. Fully regenerated per render
/// pass; holds no references back into the normalized model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteChartLayout {
    pub container_width: f64,
    pub container_height: f64,
    /// Vertical offset of the clipped chart area.
    pub margin_top: f64,
    pub clip: ClipRect,
    pub markers: Vec<MarkerDef>,
    /// Timeline strip, connector arrows and route chart, in z-order.
    pub zones: Vec<Zone>,
}

impl RouteChartLayout {
    /// The "content too wide for the viewport" disclaimer predicate.
    pub fn exceeds_viewport(&self, viewport_width: f64) -> bool {
        self.container_width > viewport_width
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Drawable> {
        self.zones.iter().flat_map(|z| z.shapes.iter())
    }
}
