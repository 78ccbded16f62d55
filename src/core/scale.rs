use crate::error::{BulletGraphError, BulletGraphResult};

/// Maps `value` from the interval `[low1, high1]` onto `[low2, high2]`.
///
/// This is the raw affine map with no guard: a degenerate source interval
/// (`low1 == high1`) produces a non-finite result. Callers that cannot rule
/// that out should go through [`LinearScale`].
#[must_use]
pub fn map_value(value: f64, low1: f64, high1: f64, low2: f64, high2: f64) -> f64 {
    low2 + (high2 - low2) * (value - low1) / (high1 - low1)
}

/// Validated linear map from a data domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> BulletGraphResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(BulletGraphError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(BulletGraphError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    /// Maps a domain value into the pixel range. Values outside the domain
    /// extrapolate linearly.
    #[must_use]
    pub fn domain_to_pixel(self, value: f64) -> f64 {
        map_value(
            value,
            self.domain_start,
            self.domain_end,
            self.range_start,
            self.range_end,
        )
    }

    pub fn pixel_to_domain(self, pixel: f64) -> BulletGraphResult<f64> {
        if self.range_start == self.range_end {
            return Err(BulletGraphError::InvalidData(
                "cannot invert a scale with an empty pixel range".to_owned(),
            ));
        }
        if !pixel.is_finite() {
            return Err(BulletGraphError::InvalidData(
                "pixel must be finite".to_owned(),
            ));
        }

        Ok(map_value(
            pixel,
            self.range_start,
            self.range_end,
            self.domain_start,
            self.domain_end,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_value_hits_both_endpoints() {
        assert_eq!(map_value(0.0, 0.0, 60.0, 0.0, 724.0), 0.0);
        assert_eq!(map_value(60.0, 0.0, 60.0, 0.0, 724.0), 724.0);
        assert_eq!(map_value(30.0, 0.0, 60.0, 0.0, 724.0), 362.0);
    }

    #[test]
    fn map_value_on_degenerate_interval_is_not_finite() {
        assert!(!map_value(5.0, 3.0, 3.0, 0.0, 100.0).is_finite());
    }

    #[test]
    fn linear_scale_rejects_degenerate_domain() {
        assert!(LinearScale::new(10.0, 10.0, 0.0, 100.0).is_err());
        assert!(LinearScale::new(f64::NAN, 10.0, 0.0, 100.0).is_err());
    }

    #[test]
    fn linear_scale_round_trips() {
        let scale = LinearScale::new(-50.0, 150.0, 0.0, 800.0).expect("valid scale");
        let px = scale.domain_to_pixel(42.5);
        let back = scale.pixel_to_domain(px).expect("invertible");
        assert!((back - 42.5).abs() <= 1e-9);
    }
}
