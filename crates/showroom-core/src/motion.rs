//! Camera motion math: frame-rate independent easing and drag throttling

/// Distance below which an easing axis snaps onto its target
pub const SETTLE_EPSILON: f32 = 0.01;

/// Minimum time between two applied drag updates, in seconds
pub const DRAG_MIN_INTERVAL: f64 = 0.016;

/// Pointer movement below this many pixels on both axes is ignored
pub const DRAG_DEAD_ZONE: f32 = 0.5;

/// Fraction of the remaining distance to cover this frame.
///
/// `smoothing` is the decay rate per 60 Hz frame, so at exactly 60 FPS the
/// result equals `1 - exp(-smoothing)`. Longer frames cover more ground.
pub fn decay_factor(smoothing: f32, dt: f32) -> f32 {
    1.0 - (-smoothing * 60.0 * dt.max(0.0)).exp()
}

/// Move `current` toward `target` by `factor` of the gap.
///
/// Returns the new value and whether it has settled on the target.
pub fn approach(current: f32, target: f32, factor: f32, epsilon: f32) -> (f32, bool) {
    let delta = target - current;
    if delta.abs() > epsilon {
        (current + delta * factor, false)
    } else {
        (target, true)
    }
}

/// Turns pointer positions into rate-limited drag deltas.
///
/// Skipped moves do not advance the anchor, so their motion is carried into
/// the next applied update instead of being dropped.
#[derive(Debug, Clone)]
pub struct DragThrottle {
    min_interval: f64,
    dead_zone: f32,
    anchor: Option<[f32; 2]>,
    last_applied: Option<f64>,
}

impl Default for DragThrottle {
    fn default() -> Self {
        Self::new(DRAG_MIN_INTERVAL, DRAG_DEAD_ZONE)
    }
}

impl DragThrottle {
    pub fn new(min_interval: f64, dead_zone: f32) -> Self {
        Self {
            min_interval,
            dead_zone,
            anchor: None,
            last_applied: None,
        }
    }

    /// Pointer pressed at `position`
    pub fn begin(&mut self, position: [f32; 2]) {
        self.anchor = Some(position);
    }

    /// Pointer released
    pub fn end(&mut self) {
        self.anchor = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    /// Pointer moved to `position` at time `now` (seconds).
    ///
    /// Returns the delta to apply, or `None` when not dragging, when called
    /// too soon after the last applied update, or inside the dead zone.
    pub fn update(&mut self, position: [f32; 2], now: f64) -> Option<[f32; 2]> {
        let anchor = self.anchor?;
        if let Some(last) = self.last_applied {
            if now - last < self.min_interval {
                return None;
            }
        }

        let delta = [position[0] - anchor[0], position[1] - anchor[1]];
        if delta[0].abs() < self.dead_zone && delta[1].abs() < self.dead_zone {
            return None;
        }

        self.anchor = Some(position);
        self.last_applied = Some(now);
        Some(delta)
    }
}
