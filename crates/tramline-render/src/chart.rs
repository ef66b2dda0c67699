//! Route-chart layout: scales, zone geometry and drawable generation.
//!
//! Pure function of the normalized model and the container size. Every
//! length is a fixed fraction of the container, so re-running at a new size
//! rescales the whole drawing without touching the model.

use crate::model::{
    CircleData, ClipRect, Drawable, MarkerDef, PathData, RectData, RouteChartLayout, TextAnchor,
    TextData, Zone,
};
use crate::path::PathBuilder;
use crate::scale::{BandScale, LinearScale};
use tramline_core::{Direction, NormalizedModel, Road, StopTag};

const PALETTE: [&str; 2] = ["#f0c14a", "#1f212d"];
const NEW_STOP_COLOR: &str = "#30b22e";
const MOVED_STOP_COLOR: &str = "#cc2867";
const TICK_COLOR: &str = "#cccccc";

/// Fixed upper bound of the position scale, covering all known stop
/// positions.
const POSITION_DOMAIN_MAX: f64 = 26.7;
/// Annotation boxes fill the chart width up to this position.
const ANNOTATION_POSITION_MAX: f64 = 26.4;
/// Historical bounds of the timeline strip.
const TIMELINE_DOMAIN: (f64, f64) = (1996.0, 2026.2);
/// Vertical extent of the last year's timeline block, in years.
const LAST_BLOCK_EXTENT_YEARS: f64 = 0.2;

const ROUTE_HALF_WIDTH_MULTIPLIER: f64 = 0.03;
const ROUTE_CURVE_MULTIPLIER: f64 = 0.015;
/// Base font size is this fraction of the container width; each text's
/// multiplier scales it.
const FONT_SIZE_MULTIPLIER: f64 = 0.012;

const CHART_TITLE: &str = "route and stops over the years";
const MISSING_ROAD_LABEL: &str = "ERROR";

/// Bottom-axis tick label for a tick position: the road with exactly that
/// position. Falls back to a sentinel label rather than failing the render
/// pass.
pub fn road_label(roads: &[Road], position: f64) -> String {
    for road in roads {
        if road.position == position {
            return road.name.clone();
        }
    }
    tracing::warn!(position, "no road matches axis tick position");
    MISSING_ROAD_LABEL.to_string()
}

pub fn layout_route_chart(
    model: &NormalizedModel,
    container_width: f64,
    container_height: f64,
) -> RouteChartLayout {
    let margin_top = 0.1 * container_height;
    let margin_bottom = 0.18 * container_height;
    let margin_left = 0.07 * container_width;
    let margin_right = 0.0 * container_width;

    let width = container_width - (margin_right + margin_left);
    let height = container_height - (margin_top + margin_bottom);

    let timeline_width = width * 0.01;
    let arrow_width = width * 0.09;
    let route_width = width * 0.87;

    let x_scale = LinearScale::new(
        (0.0, POSITION_DOMAIN_MAX),
        (margin_left, route_width - margin_left),
    );
    let y_scale = BandScale::new(model.years.iter().map(|y| y.year).collect(), (0.0, height));
    let timeline_scale = LinearScale::new(TIMELINE_DOMAIN, (0.0, height));

    let font_size = |multiplier: f64| multiplier * FONT_SIZE_MULTIPLIER * container_width;
    let bandwidth = y_scale.bandwidth();

    // Bottom edge of year i's timeline block.
    let block_end = |i: usize| {
        let year = &model.years[i];
        match model.years.get(i + 1) {
            Some(next) => timeline_scale.scale(next.year as f64),
            None => timeline_scale.scale(year.year as f64 + LAST_BLOCK_EXTENT_YEARS),
        }
    };

    // Timeline strip: one block per year plus the year labels of the left
    // axis.
    let mut timeline = Zone {
        class: "timeline".to_string(),
        dx: margin_left,
        dy: 0.0,
        shapes: Vec::new(),
    };
    for (i, year) in model.years.iter().enumerate() {
        let y0 = timeline_scale.scale(year.year as f64);
        timeline.shapes.push(Drawable::Rect(RectData {
            x: 0.0,
            y: y0,
            width: timeline_width,
            height: block_end(i) - y0,
            fill: PALETTE[i % 2].to_string(),
            opacity: None,
            corner_radius: None,
        }));
    }
    for year in &model.years {
        timeline.shapes.push(Drawable::Text(TextData {
            text: year.year.to_string(),
            x: -0.003 * width,
            y: timeline_scale.scale(year.year as f64),
            dx: 0.0,
            dy: 0.0,
            rotation: 0.0,
            anchor: TextAnchor::End,
            baseline_middle: true,
            fill: None,
            font_size: font_size(1.0),
        }));
    }

    // Connector arrows: timeline block midpoint -> route row centre, two
    // quadratic segments through a horizontal midpoint.
    let mut arrows = Zone {
        class: "arrows".to_string(),
        dx: margin_left + timeline_width,
        dy: 0.0,
        shapes: Vec::new(),
    };
    for (i, year) in model.years.iter().enumerate() {
        let start_y = (block_end(i) + timeline_scale.scale(year.year as f64)) / 2.0;
        let row_center = y_scale.position_by_index(i) + bandwidth / 2.0;

        let mut path = PathBuilder::new();
        path.move_to(0.0, start_y)
            .quadratic_curve_to(
                arrow_width / 2.0,
                start_y,
                arrow_width / 2.0,
                (start_y + row_center) / 2.0,
            )
            .quadratic_curve_to(arrow_width / 2.0, row_center, arrow_width, row_center);

        arrows.shapes.push(Drawable::Path(PathData {
            path: path.finish(),
            stroke: PALETTE[i % 2].to_string(),
            stroke_width: 0.005 * height,
            fill: None,
            marker_end: Some(format!("url(#arrow-head-{})", i % 2)),
        }));
    }

    let mut chart = Zone {
        class: "chart".to_string(),
        dx: margin_left / 1.4 + timeline_width + arrow_width,
        dy: 0.0,
        shapes: Vec::new(),
    };

    // Bottom axis behind everything else: full-height tick line per road,
    // label rotated for readability.
    for road in &model.roads {
        let tick_x = x_scale.scale(road.position);
        let mut line = PathBuilder::new();
        line.move_to(tick_x, 0.0).line_to(tick_x, height);
        chart.shapes.push(Drawable::Path(PathData {
            path: line.finish(),
            stroke: TICK_COLOR.to_string(),
            stroke_width: 0.004 * route_width,
            fill: None,
            marker_end: None,
        }));
        chart.shapes.push(Drawable::Text(TextData {
            text: road_label(&model.roads, road.position),
            x: tick_x,
            y: height,
            dx: 0.01 * route_width,
            dy: 0.012 * height,
            rotation: 65.0,
            anchor: TextAnchor::Start,
            baseline_middle: false,
            fill: None,
            font_size: font_size(1.0),
        }));
    }

    let route_half_width = ROUTE_HALF_WIDTH_MULTIPLIER * height;
    let route_curve_width = ROUTE_CURVE_MULTIPLIER * width;

    for (i, year) in model.years.iter().enumerate() {
        let row_y = y_scale.position_by_index(i) + bandwidth / 2.0;

        if let Some(&max_position) = model.max_position.get(&year.year) {
            let extent = x_scale.scale(max_position);
            chart.shapes.push(Drawable::Rect(RectData {
                x: margin_left / 2.0 - 0.005 * extent,
                y: row_y - bandwidth * 0.4,
                width: 1.01 * extent,
                height: bandwidth * 0.8,
                fill: PALETTE[year.index % 2].to_string(),
                opacity: Some(0.2),
                corner_radius: Some(0.5 * route_curve_width),
            }));
        }

        for route in &year.routes {
            let positions = || route.resolved_stops().map(|s| s.position);
            let (Some(min), Some(max)) = (
                positions().reduce(f64::min),
                positions().reduce(f64::max),
            ) else {
                continue;
            };
            let left = x_scale.scale(min);
            let right = x_scale.scale(max);

            let mut lens = PathBuilder::new();
            lens.move_to(left, row_y - route_half_width)
                .line_to(right, row_y - route_half_width)
                .quadratic_curve_to(
                    right + route_curve_width,
                    row_y - route_half_width,
                    right + route_curve_width,
                    row_y,
                )
                .quadratic_curve_to(
                    right + route_curve_width,
                    row_y + route_half_width,
                    right,
                    row_y + route_half_width,
                )
                .line_to(left, row_y + route_half_width)
                .quadratic_curve_to(
                    left - route_curve_width,
                    row_y + route_half_width,
                    left - route_curve_width,
                    row_y,
                )
                .quadratic_curve_to(
                    left - route_curve_width,
                    row_y - route_half_width,
                    left,
                    row_y - route_half_width,
                );

            chart.shapes.push(Drawable::Path(PathData {
                path: lens.finish(),
                stroke: PALETTE[1].to_string(),
                stroke_width: 0.01 * height * route.weight,
                fill: None,
                marker_end: None,
            }));
        }

        for stop in year.resolved_stops() {
            let offset = match stop.direction {
                Some(Direction::West) => -route_half_width,
                Some(Direction::East) => route_half_width,
                None => 0.0,
            };
            chart.shapes.push(Drawable::Circle(CircleData {
                cx: x_scale.scale(stop.position),
                cy: row_y + offset,
                r: if stop.tag.is_tagged() {
                    0.01 * height
                } else {
                    0.007 * height
                },
                fill: match stop.tag {
                    StopTag::New => NEW_STOP_COLOR.to_string(),
                    StopTag::Moved => MOVED_STOP_COLOR.to_string(),
                    StopTag::Untagged => PALETTE[0].to_string(),
                },
                stroke: PALETTE[1].to_string(),
                stroke_width: 0.002 * height,
            }));
        }
    }

    // Annotation boxes fill the chart width past the year's rightmost stop.
    for annotation in &model.annotations {
        let (Some(&route_length), Some(band_y)) = (
            model.max_position.get(&annotation.year),
            y_scale.position(annotation.year),
        ) else {
            tracing::warn!(
                year = annotation.year,
                "annotation references a year not in the dataset; skipping"
            );
            continue;
        };

        let remainder = x_scale.scale(ANNOTATION_POSITION_MAX - route_length);
        let box_x = x_scale.scale(route_length) + 0.3 * remainder;
        chart.shapes.push(Drawable::Rect(RectData {
            x: box_x,
            y: 0.05 * bandwidth + band_y,
            width: 0.7 * remainder,
            height: 0.9 * bandwidth,
            fill: PALETTE[1].to_string(),
            opacity: None,
            corner_radius: None,
        }));

        let text_x = 0.02 * route_width + box_x;
        chart.shapes.push(Drawable::Text(TextData {
            text: annotation.year.to_string(),
            x: text_x,
            y: 0.25 * bandwidth + band_y,
            dx: 0.0,
            dy: 0.0,
            rotation: 0.0,
            anchor: TextAnchor::Start,
            baseline_middle: false,
            fill: Some("white".to_string()),
            font_size: font_size(1.0),
        }));
        for (line_no, line) in annotation.description.split('\n').enumerate() {
            chart.shapes.push(Drawable::Text(TextData {
                text: line.to_string(),
                x: text_x,
                y: 0.45 * bandwidth + band_y + line_no as f64 * 0.18 * bandwidth,
                dx: 0.0,
                dy: 0.0,
                rotation: 0.0,
                anchor: TextAnchor::Start,
                baseline_middle: false,
                fill: Some("white".to_string()),
                font_size: font_size(1.0),
            }));
        }
    }

    let legend_entries = [
        (NEW_STOP_COLOR, 0.01 * height, "new"),
        (MOVED_STOP_COLOR, 0.01 * height, "moved"),
        (PALETTE[0], 0.007 * height, "unchanged"),
    ];
    for (i, (color, radius, label)) in legend_entries.into_iter().enumerate() {
        let gx = 0.85 * route_width;
        let gy = (i as f64 * 0.2 - 0.8) * bandwidth;
        chart.shapes.push(Drawable::Circle(CircleData {
            cx: gx,
            cy: gy,
            r: radius,
            fill: color.to_string(),
            stroke: PALETTE[1].to_string(),
            stroke_width: 0.002 * height,
        }));
        chart.shapes.push(Drawable::Text(TextData {
            text: label.to_string(),
            x: gx + 0.03 * height,
            y: gy + 0.007 * height,
            dx: 0.0,
            dy: 0.0,
            rotation: 0.0,
            anchor: TextAnchor::Start,
            baseline_middle: false,
            fill: None,
            font_size: font_size(1.0),
        }));
    }

    chart.shapes.push(Drawable::Text(TextData {
        text: CHART_TITLE.to_string(),
        x: 0.0,
        y: -bandwidth / 2.0,
        dx: 0.0,
        dy: 0.0,
        rotation: 0.0,
        anchor: TextAnchor::Start,
        baseline_middle: false,
        fill: None,
        font_size: font_size(2.0),
    }));

    RouteChartLayout {
        container_width,
        container_height,
        margin_top,
        clip: ClipRect {
            width,
            y: -margin_top,
            height: container_height,
        },
        markers: (0..2usize)
            .map(|i| MarkerDef {
                id: format!("arrow-head-{i}"),
                size: 0.01 * height,
                color: PALETTE[i].to_string(),
            })
            .collect(),
        zones: vec![timeline, arrows, chart],
    }
}
