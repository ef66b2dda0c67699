//! Minimal SVG path-data builder.

use crate::util::fmt_path;

/// Accumulates `M`/`L`/`Q` path commands the way d3-path stringifies them
/// (3 fractional digits, trailing zeros trimmed).
#[derive(Debug, Default, Clone)]
pub struct PathBuilder {
    data: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.data.push('M');
        self.push_point(x, y);
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.data.push('L');
        self.push_point(x, y);
        self
    }

    pub fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) -> &mut Self {
        self.data.push('Q');
        self.push_point(cx, cy);
        self.data.push(',');
        self.push_point(x, y);
        self
    }

    pub fn finish(self) -> String {
        self.data
    }

    fn push_point(&mut self, x: f64, y: f64) {
        self.data.push_str(&fmt_path(x));
        self.data.push(',');
        self.data.push_str(&fmt_path(y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_move_line_and_quadratic_commands() {
        let mut p = PathBuilder::new();
        p.move_to(0.0, 1.5).line_to(10.0, 1.5).quadratic_curve_to(
            12.0,
            1.5,
            12.0,
            0.0,
        );
        assert_eq!(p.finish(), "M0,1.5L10,1.5Q12,1.5,12,0");
    }

    #[test]
    fn rounds_coordinates_to_three_decimals() {
        let mut p = PathBuilder::new();
        p.move_to(1.23456, -0.000_2);
        assert_eq!(p.finish(), "M1.235,0");
    }
}
