//! Coordinate scales for the chart zones.

/// Linear domain -> range mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d0 == d1 {
            return r0 + (r1 - r0) * 0.5;
        }
        let t = (value - d0) / (d1 - d0);
        r0 + t * (r1 - r0)
    }
}

/// One evenly sized band per year, in input order, no padding.
#[derive(Debug, Clone)]
pub struct BandScale {
    domain: Vec<i32>,
    range: (f64, f64),
}

impl BandScale {
    pub fn new(domain: Vec<i32>, range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn bandwidth(&self) -> f64 {
        if self.domain.is_empty() {
            return 0.0;
        }
        (self.range.1 - self.range.0) / self.domain.len() as f64
    }

    /// Top edge of the band for a domain value, if present.
    pub fn position(&self, value: i32) -> Option<f64> {
        self.domain
            .iter()
            .position(|v| *v == value)
            .map(|i| self.position_by_index(i))
    }

    pub fn position_by_index(&self, index: usize) -> f64 {
        self.range.0 + self.bandwidth() * index as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_scale_maps_domain_ends_to_range_ends() {
        let s = LinearScale::new((0.0, 10.0), (100.0, 300.0));
        assert_eq!(s.scale(0.0), 100.0);
        assert_eq!(s.scale(10.0), 300.0);
        assert_eq!(s.scale(5.0), 200.0);
    }

    #[test]
    fn linear_scale_extrapolates_past_the_domain() {
        let s = LinearScale::new((0.0, 10.0), (0.0, 100.0));
        assert_eq!(s.scale(12.0), 120.0);
    }

    #[test]
    fn band_scale_divides_range_evenly_in_domain_order() {
        let s = BandScale::new(vec![1996, 2004, 2010, 2014], (0.0, 400.0));
        assert_eq!(s.bandwidth(), 100.0);
        assert_eq!(s.position(1996), Some(0.0));
        assert_eq!(s.position(2014), Some(300.0));
        assert_eq!(s.position(2020), None);
    }
}
