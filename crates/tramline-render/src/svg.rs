//! SVG emission for a computed [`RouteChartLayout`].
//!
//! Deterministic string building, no DOM: the whole document is regenerated
//! per render pass.

use crate::model::{
    CircleData, Drawable, MarkerDef, PathData, RectData, RouteChartLayout, TextAnchor, TextData,
    Zone,
};
use crate::util::{escape_xml, fmt};
use std::fmt::Write as _;

pub fn render_svg(layout: &RouteChartLayout) -> String {
    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = fmt(layout.container_width),
        h = fmt(layout.container_height),
    );

    out.push_str("<defs>");
    let _ = write!(
        &mut out,
        r#"<clipPath id="chart-mask"><rect width="{}" y="{}" height="{}"/></clipPath>"#,
        fmt(layout.clip.width),
        fmt(layout.clip.y),
        fmt(layout.clip.height),
    );
    for marker in &layout.markers {
        write_marker(&mut out, marker);
    }
    out.push_str("</defs>");

    let _ = write!(
        &mut out,
        r#"<g clip-path="url(#chart-mask)" transform="translate(0,{})">"#,
        fmt(layout.margin_top),
    );
    for zone in &layout.zones {
        write_zone(&mut out, zone);
    }
    out.push_str("</g>");

    out.push_str("</svg>\n");
    out
}

fn write_marker(out: &mut String, marker: &MarkerDef) {
    let _ = write!(
        out,
        r#"<marker id="{id}" markerUnits="strokeWidth" refX="2" refY="2" markerWidth="{size}" markerHeight="{size}" orient="auto"><path d="M0,0 L2,2 L0,4" stroke="{color}" fill="none"/></marker>"#,
        id = escape_xml(&marker.id),
        size = fmt(marker.size),
        color = escape_xml(&marker.color),
    );
}

fn write_zone(out: &mut String, zone: &Zone) {
    let _ = write!(
        out,
        r#"<g class="{}" transform="translate({},{})">"#,
        escape_xml(&zone.class),
        fmt(zone.dx),
        fmt(zone.dy),
    );
    for shape in &zone.shapes {
        match shape {
            Drawable::Rect(rect) => write_rect(out, rect),
            Drawable::Path(path) => write_path(out, path),
            Drawable::Circle(circle) => write_circle(out, circle),
            Drawable::Text(text) => write_text(out, text),
        }
    }
    out.push_str("</g>");
}

fn write_rect(out: &mut String, rect: &RectData) {
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}""#,
        fmt(rect.x),
        fmt(rect.y),
        fmt(rect.width),
        fmt(rect.height),
        escape_xml(&rect.fill),
    );
    if let Some(opacity) = rect.opacity {
        let _ = write!(out, r#" opacity="{}""#, fmt(opacity));
    }
    if let Some(radius) = rect.corner_radius {
        let _ = write!(out, r#" rx="{r}" ry="{r}""#, r = fmt(radius));
    }
    out.push_str("/>");
}

fn write_path(out: &mut String, path: &PathData) {
    let _ = write!(
        out,
        r#"<path d="{}" stroke="{}" stroke-width="{}" fill="{}""#,
        escape_xml(&path.path),
        escape_xml(&path.stroke),
        fmt(path.stroke_width),
        escape_xml(path.fill.as_deref().unwrap_or("none")),
    );
    if let Some(marker_end) = &path.marker_end {
        let _ = write!(out, r#" marker-end="{}""#, escape_xml(marker_end));
    }
    out.push_str("/>");
}

fn write_circle(out: &mut String, circle: &CircleData) {
    let _ = write!(
        out,
        r#"<circle cx="{}" cy="{}" r="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
        fmt(circle.cx),
        fmt(circle.cy),
        fmt(circle.r),
        escape_xml(&circle.fill),
        escape_xml(&circle.stroke),
        fmt(circle.stroke_width),
    );
}

fn text_anchor(anchor: TextAnchor) -> &'static str {
    match anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    }
}

fn write_text(out: &mut String, text: &TextData) {
    out.push_str("<text");
    if text.rotation != 0.0 {
        let _ = write!(
            out,
            r#" transform="translate({},{}) rotate({})""#,
            fmt(text.x),
            fmt(text.y),
            fmt(text.rotation),
        );
    } else {
        let _ = write!(out, r#" x="{}" y="{}""#, fmt(text.x), fmt(text.y));
    }
    if text.dx != 0.0 {
        let _ = write!(out, r#" dx="{}""#, fmt(text.dx));
    }
    if text.dy != 0.0 {
        let _ = write!(out, r#" dy="{}""#, fmt(text.dy));
    }
    let _ = write!(out, r#" text-anchor="{}""#, text_anchor(text.anchor));
    if text.baseline_middle {
        out.push_str(r#" dominant-baseline="middle""#);
    }
    if let Some(fill) = &text.fill {
        let _ = write!(out, r#" fill="{}""#, escape_xml(fill));
    }
    let _ = write!(out, r#" font-size="{}""#, fmt(text.font_size));
    out.push('>');
    out.push_str(&escape_xml(&text.text));
    out.push_str("</text>");
}
