use serde::Deserialize;
use thiserror::Error;

/// Maps a raw scroll offset onto [0, 1]. A degenerate range maps to 0.
pub fn normalized_fraction(raw: f32, max: f32) -> f32 {
    if !raw.is_finite() || !max.is_finite() || max <= 0.0 {
        return 0.0;
    }
    (raw / max).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollPosition {
    offset: f32,
    max: f32,
}

impl ScrollPosition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the scrollable range, keeping the offset inside it.
    pub fn set_extent(&mut self, document_height: f32, viewport_height: f32) {
        let max = document_height - viewport_height;
        self.max = if max.is_finite() { max.max(0.0) } else { 0.0 };
        self.offset = self.offset.clamp(0.0, self.max);
    }

    pub fn scroll_by(&mut self, delta: f32) {
        if delta.is_finite() {
            self.scroll_to(self.offset + delta);
        }
    }

    pub fn scroll_to(&mut self, offset: f32) {
        if offset.is_finite() {
            self.offset = offset.clamp(0.0, self.max);
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn at_end(&self) -> bool {
        self.offset >= self.max
    }

    pub fn fraction(&self) -> f32 {
        normalized_fraction(self.offset, self.max)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum CurveError {
    #[error("a curve needs at least one control point")]
    Empty,
    #[error("control point {0} is not a finite number")]
    NotFinite(usize),
    #[error("control point {0} goes back to a smaller input")]
    Decreasing(usize),
}

/// Piecewise-linear function through ordered `(input, output)` control points.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    points: Vec<(f32, f32)>,
}

impl Curve {
    pub fn new(points: Vec<(f32, f32)>) -> Result<Self, CurveError> {
        if points.is_empty() {
            return Err(CurveError::Empty);
        }
        for (i, (x, y)) in points.iter().enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(CurveError::NotFinite(i));
            }
            if i > 0 && *x < points[i - 1].0 {
                return Err(CurveError::Decreasing(i));
            }
        }
        Ok(Self { points })
    }

    pub fn linear(from: f32, to: f32) -> Self {
        Self { points: vec![(0.0, from), (1.0, to)] }
    }

    pub fn sample(&self, x: f32) -> f32 {
        let (first_x, first_y) = self.points[0];
        let (last_x, last_y) = self.points[self.points.len() - 1];
        if x.is_nan() || x <= first_x {
            return first_y;
        }
        if x >= last_x {
            return last_y;
        }
        for pair in self.points.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            // x < x1 and x >= x0 imply x1 > x0, so the division is safe.
            if x >= x0 && x < x1 {
                let t = (x - x0) / (x1 - x0);
                return y0 + (y1 - y0) * t;
            }
        }
        last_y
    }
}

/// One evaluation of every parallax layer. Offsets are percentages of the
/// layer's own height, rotation is in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxFrame {
    pub fraction: f32,
    pub content_y: f32,
    pub background_y: f32,
    pub grid_y: f32,
    pub rotation: f32,
    pub scale: f32,
}

/// Control points that replace individual default layers, as `[[input, output], ...]`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerCurves {
    pub content: Option<Vec<(f32, f32)>>,
    pub background: Option<Vec<(f32, f32)>>,
    pub grid: Option<Vec<(f32, f32)>>,
    pub rotation: Option<Vec<(f32, f32)>>,
    pub scale: Option<Vec<(f32, f32)>>,
}

#[derive(Debug, Clone)]
pub struct Parallax {
    content: Curve,
    background: Curve,
    grid: Curve,
    rotation: Curve,
    scale: Curve,
}

impl Parallax {
    /// The default layers with any curves given in `layers` swapped in.
    pub fn with_layers(layers: &LayerCurves) -> Result<Self, CurveError> {
        let mut parallax = Self::default();
        let overrides = [
            (&layers.content, &mut parallax.content),
            (&layers.background, &mut parallax.background),
            (&layers.grid, &mut parallax.grid),
            (&layers.rotation, &mut parallax.rotation),
            (&layers.scale, &mut parallax.scale),
        ];
        for (points, curve) in overrides {
            if let Some(points) = points {
                *curve = Curve::new(points.clone())?;
            }
        }
        Ok(parallax)
    }

    pub fn sample(&self, fraction: f32) -> ParallaxFrame {
        ParallaxFrame {
            fraction,
            content_y: self.content.sample(fraction),
            background_y: self.background.sample(fraction),
            grid_y: self.grid.sample(fraction),
            rotation: self.rotation.sample(fraction),
            scale: self.scale.sample(fraction),
        }
    }
}

impl Default for Parallax {
    fn default() -> Self {
        Self {
            content: Curve::linear(0.0, 50.0),
            background: Curve::linear(0.0, 30.0),
            grid: Curve::linear(0.0, 70.0),
            rotation: Curve::linear(0.0, 360.0),
            scale: Curve { points: vec![(0.0, 1.0), (0.5, 1.1), (1.0, 0.8)] },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_clamps_to_unit_range() {
        assert_eq!(normalized_fraction(250.0, 1000.0), 0.25);
        assert_eq!(normalized_fraction(-10.0, 1000.0), 0.0);
        assert_eq!(normalized_fraction(2000.0, 1000.0), 1.0);
    }

    #[test]
    fn degenerate_range_is_always_top() {
        for raw in [0.0, 10.0, 5000.0, -3.0] {
            assert_eq!(normalized_fraction(raw, 0.0), 0.0);
            assert_eq!(normalized_fraction(raw, -200.0), 0.0);
        }
        let mut position = ScrollPosition::new();
        position.set_extent(600.0, 1080.0);
        position.scroll_by(300.0);
        assert_eq!(position.max(), 0.0);
        assert_eq!(position.offset(), 0.0);
        assert_eq!(position.fraction(), 0.0);
    }

    #[test]
    fn linear_curve_interpolates_and_clamps() {
        let curve = Curve::new(vec![(0.0, 0.0), (1.0, 50.0)]).expect("curve");
        assert_eq!(curve.sample(0.5), 25.0);
        assert_eq!(curve.sample(-0.1), 0.0);
        assert_eq!(curve.sample(1.2), 50.0);
    }

    #[test]
    fn multi_segment_curve_uses_bracketing_points() {
        let curve = Curve::new(vec![(0.0, 1.0), (0.5, 1.1), (1.0, 0.8)]).expect("curve");
        assert_eq!(curve.sample(0.0), 1.0);
        assert!((curve.sample(0.25) - 1.05).abs() < 1e-6);
        assert!((curve.sample(0.5) - 1.1).abs() < 1e-6);
        assert!((curve.sample(0.75) - 0.95).abs() < 1e-6);
        assert_eq!(curve.sample(1.0), 0.8);
    }

    #[test]
    fn duplicated_input_jumps_to_later_point() {
        let curve = Curve::new(vec![(0.0, 0.0), (0.5, 10.0), (0.5, 20.0), (1.0, 30.0)]).expect("curve");
        assert_eq!(curve.sample(0.5), 20.0);
        assert_eq!(curve.sample(0.25), 5.0);
        assert_eq!(curve.sample(0.75), 25.0);
    }

    #[test]
    fn rejects_invalid_control_points() {
        assert_eq!(Curve::new(vec![]), Err(CurveError::Empty));
        assert_eq!(Curve::new(vec![(0.0, 0.0), (0.6, 1.0), (0.4, 2.0)]), Err(CurveError::Decreasing(2)));
        assert_eq!(Curve::new(vec![(0.0, f32::NAN)]), Err(CurveError::NotFinite(0)));
    }

    #[test]
    fn scroll_position_stays_in_range() {
        let mut position = ScrollPosition::new();
        position.set_extent(3080.0, 1080.0);
        position.scroll_by(500.0);
        assert_eq!(position.offset(), 500.0);
        assert_eq!(position.fraction(), 0.25);

        position.scroll_by(10_000.0);
        assert_eq!(position.offset(), 2000.0);
        assert!(position.at_end());

        // Shrinking the document pulls the offset back inside the range.
        position.set_extent(2080.0, 1080.0);
        assert_eq!(position.offset(), 1000.0);

        position.scroll_by(-5000.0);
        assert_eq!(position.offset(), 0.0);
    }

    #[test]
    fn default_parallax_matches_page_layers() {
        let parallax = Parallax::default();
        let top = parallax.sample(0.0);
        assert_eq!((top.content_y, top.background_y, top.grid_y, top.rotation, top.scale), (0.0, 0.0, 0.0, 0.0, 1.0));

        let middle = parallax.sample(0.5);
        assert_eq!(middle.content_y, 25.0);
        assert_eq!(middle.background_y, 15.0);
        assert_eq!(middle.grid_y, 35.0);
        assert_eq!(middle.rotation, 180.0);
        assert!((middle.scale - 1.1).abs() < 1e-6);

        let bottom = parallax.sample(1.0);
        assert_eq!((bottom.content_y, bottom.grid_y, bottom.rotation, bottom.scale), (50.0, 70.0, 360.0, 0.8));
    }

    #[test]
    fn default_layers_are_valid_curves() {
        let parallax = Parallax::default();
        for curve in [&parallax.content, &parallax.background, &parallax.grid, &parallax.rotation, &parallax.scale] {
            assert_eq!(Curve::new(curve.points.clone()).as_ref(), Ok(curve));
        }
    }

    #[test]
    fn layer_overrides_replace_only_named_curves() {
        let layers = LayerCurves { grid: Some(vec![(0.0, 0.0), (1.0, 10.0)]), ..LayerCurves::default() };
        let parallax = Parallax::with_layers(&layers).expect("parallax");
        let end = parallax.sample(1.0);
        assert_eq!(end.grid_y, 10.0);
        assert_eq!(end.content_y, 50.0);
        assert_eq!(Parallax::with_layers(&LayerCurves::default()).expect("defaults").sample(0.5), Parallax::default().sample(0.5));
    }

    #[test]
    fn invalid_layer_override_is_rejected() {
        let layers = LayerCurves { scale: Some(vec![(0.5, 1.0), (0.2, 2.0)]), ..LayerCurves::default() };
        assert_eq!(Parallax::with_layers(&layers).err(), Some(CurveError::Decreasing(1)));
        let layers = LayerCurves { rotation: Some(Vec::new()), ..LayerCurves::default() };
        assert_eq!(Parallax::with_layers(&layers).err(), Some(CurveError::Empty));
    }
}
