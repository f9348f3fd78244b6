//! Field-of-view zoom

use crate::manifest::CameraSpec;

const NOTCH_TOLERANCE: f32 = 1e-4;

/// Vertical field of view in degrees, stepped within fixed bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FovZoom {
    fov: f32,
    min: f32,
    max: f32,
    step: f32,
    /// Scroll travel not yet applied as a whole notch
    pending: f32,
}

impl FovZoom {
    pub fn new(fov: f32, min: f32, max: f32, step: f32) -> Self {
        Self {
            fov: fov.clamp(min, max),
            min,
            max,
            step,
            pending: 0.0,
        }
    }

    pub fn from_spec(spec: &CameraSpec) -> Self {
        Self::new(spec.fov_degrees, spec.min_fov, spec.max_fov, spec.fov_step)
    }

    pub fn degrees(&self) -> f32 {
        self.fov
    }

    pub fn radians(&self) -> f32 {
        self.fov.to_radians()
    }

    /// Narrow the view by one step. Returns whether the value changed.
    pub fn zoom_in(&mut self) -> bool {
        self.set((self.fov - self.step).max(self.min))
    }

    /// Widen the view by one step. Returns whether the value changed.
    pub fn zoom_out(&mut self) -> bool {
        self.set((self.fov + self.step).min(self.max))
    }

    /// Accumulate scroll notches and apply the whole ones; positive scrolls
    /// zoom in. The fractional part carries over to the next call.
    pub fn scroll(&mut self, notches: f32) -> bool {
        if !notches.is_finite() {
            return false;
        }
        self.pending += notches;
        // Tolerate rounding error from summing many small deltas
        let steps = (self.pending + NOTCH_TOLERANCE.copysign(self.pending)).trunc();
        self.pending -= steps;
        let steps = steps as i32;
        let mut changed = false;
        for _ in 0..steps.unsigned_abs() {
            changed |= if steps > 0 { self.zoom_in() } else { self.zoom_out() };
        }
        changed
    }

    fn set(&mut self, fov: f32) -> bool {
        let changed = fov != self.fov;
        self.fov = fov;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_in_clamps_at_min() {
        let mut zoom = FovZoom::from_spec(&CameraSpec::default());
        assert_eq!(zoom.degrees(), 75.0);
        assert!(zoom.zoom_in());
        assert_eq!(zoom.degrees(), 70.0);

        for _ in 0..20 {
            zoom.zoom_in();
        }
        assert_eq!(zoom.degrees(), 30.0);
        assert!(!zoom.zoom_in());
    }

    #[test]
    fn test_zoom_out_clamps_at_max() {
        let mut zoom = FovZoom::from_spec(&CameraSpec::default());
        assert!(zoom.zoom_out());
        assert!(zoom.zoom_out());
        assert!(zoom.zoom_out());
        assert_eq!(zoom.degrees(), 90.0);
        assert!(!zoom.zoom_out());
    }

    #[test]
    fn test_uneven_step_lands_on_bound() {
        let mut zoom = FovZoom::new(33.0, 30.0, 90.0, 5.0);
        assert!(zoom.zoom_in());
        assert_eq!(zoom.degrees(), 30.0);
    }

    #[test]
    fn test_scroll() {
        let mut zoom = FovZoom::new(60.0, 30.0, 90.0, 5.0);
        assert!(zoom.scroll(2.0));
        assert_eq!(zoom.degrees(), 50.0);
        assert!(zoom.scroll(-1.0));
        assert_eq!(zoom.degrees(), 55.0);
        assert!(!zoom.scroll(0.2));
    }

    #[test]
    fn test_small_scrolls_accumulate() {
        let mut zoom = FovZoom::from_spec(&CameraSpec::default());
        // Thirty pixels a frame at a hundred pixels per notch
        let changes = (0..10).filter(|_| zoom.scroll(0.3)).count();
        assert_eq!(changes, 3);
        assert_eq!(zoom.degrees(), 60.0);
    }

    #[test]
    fn test_scroll_direction_change_cancels_remainder() {
        let mut zoom = FovZoom::new(60.0, 30.0, 90.0, 5.0);
        assert!(!zoom.scroll(0.6));
        assert!(!zoom.scroll(-0.6));
        assert!(!zoom.scroll(-0.6));
        assert_eq!(zoom.degrees(), 60.0);
        assert!(zoom.scroll(-0.6));
        assert_eq!(zoom.degrees(), 65.0);
    }

    #[test]
    fn test_initial_value_is_clamped() {
        let zoom = FovZoom::new(120.0, 30.0, 90.0, 5.0);
        assert_eq!(zoom.degrees(), 90.0);
    }
}
