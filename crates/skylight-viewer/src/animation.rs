//! Animation primitives: easing functions and tweens.

/// Standard easing functions.
///
/// Input `t` is clamped to `[0.0, 1.0]`. Output is the eased value.
pub mod easing {
    pub fn linear(t: f32) -> f32 {
        t.clamp(0.0, 1.0)
    }

    pub fn ease_out_quad(t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        t * (2.0 - t)
    }
}

/// A running animation that interpolates between two values.
pub struct Tween {
    pub start: f32,
    pub end: f32,
    pub duration_ms: u32,
    pub elapsed_ms: u32,
    pub easing: fn(f32) -> f32,
}

impl Tween {
    pub fn new(start: f32, end: f32, duration_ms: u32, easing: fn(f32) -> f32) -> Self {
        Self {
            start,
            end,
            duration_ms,
            elapsed_ms: 0,
            easing,
        }
    }

    /// Advance by `dt_ms` and return the current interpolated value.
    pub fn tick(&mut self, dt_ms: u32) -> f32 {
        self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
        self.value()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// Current value without advancing time.
    pub fn value(&self) -> f32 {
        let t = if self.duration_ms > 0 {
            self.elapsed_ms as f32 / self.duration_ms as f32
        } else {
            1.0
        };
        let eased = (self.easing)(t);
        self.start + (self.end - self.start) * eased
    }
}
