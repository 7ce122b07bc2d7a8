#![forbid(unsafe_code)]

//! Slider geometry: the position domain and the wrapper's bounding box.

/// Lowest position the slider may ever hold.
pub const POSITION_MIN: f64 = 1.0;

/// Highest position the slider may ever hold.
pub const POSITION_MAX: f64 = 99.0;

/// Clamp a requested position to `[POSITION_MIN, POSITION_MAX]`.
///
/// NaN clamps to [`POSITION_MIN`].
#[must_use]
pub fn clamp_position(value: f64) -> f64 {
    if value.is_nan() {
        return POSITION_MIN;
    }
    value.clamp(POSITION_MIN, POSITION_MAX)
}

/// Bounding box of the wrapper region in client coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WrapperRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl WrapperRect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Horizontal fraction of `client_x` inside the rectangle, as a
    /// percentage in `[0, 100]`.
    ///
    /// A degenerate (zero or negative width) rectangle yields `0`.
    #[must_use]
    pub fn fraction_percent(&self, client_x: f64) -> f64 {
        if self.width.is_nan() || self.width <= 0.0 || !client_x.is_finite() {
            return 0.0;
        }
        let relative = client_x - self.left;
        (relative / self.width * 100.0).clamp(0.0, 100.0)
    }

    /// Translate a client point into wrapper-local coordinates.
    #[must_use]
    pub fn local_point(&self, client_x: f64, client_y: f64) -> (f64, f64) {
        (client_x - self.left, client_y - self.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp_position(150.0), 99.0);
        assert_eq!(clamp_position(-10.0), 1.0);
        assert_eq!(clamp_position(42.5), 42.5);
        assert_eq!(clamp_position(f64::NAN), 1.0);
        assert_eq!(clamp_position(f64::INFINITY), 99.0);
        assert_eq!(clamp_position(f64::NEG_INFINITY), 1.0);
    }

    #[test]
    fn fraction_inside_rect() {
        let rect = WrapperRect::new(100.0, 0.0, 400.0, 300.0);
        assert_eq!(rect.fraction_percent(100.0), 0.0);
        assert_eq!(rect.fraction_percent(300.0), 50.0);
        assert_eq!(rect.fraction_percent(500.0), 100.0);
    }

    #[test]
    fn fraction_clamps_outside_rect() {
        let rect = WrapperRect::new(100.0, 0.0, 400.0, 300.0);
        assert_eq!(rect.fraction_percent(0.0), 0.0);
        assert_eq!(rect.fraction_percent(900.0), 100.0);
    }

    #[test]
    fn degenerate_rect_is_zero() {
        let rect = WrapperRect::new(10.0, 0.0, 0.0, 0.0);
        assert_eq!(rect.fraction_percent(50.0), 0.0);
        let rect = WrapperRect::new(10.0, 0.0, f64::NAN, 0.0);
        assert_eq!(rect.fraction_percent(50.0), 0.0);
    }

    #[test]
    fn local_point_offsets_by_origin() {
        let rect = WrapperRect::new(20.0, 30.0, 100.0, 100.0);
        assert_eq!(rect.local_point(25.0, 40.0), (5.0, 10.0));
    }
}
