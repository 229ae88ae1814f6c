use crate::extensions::{ease, Easing};

/// Settle animation entered when deceleration completes: carries the residual
/// scroll offset through an overshoot curve and back to exactly zero.
///
/// Three segments of equal duration:
///   1. ease-out sine from the entry offset up to `+overshoot`
///   2. ease-in-out sine from `+overshoot` down to `-overshoot / 2`
///   3. ease-in sine from `-overshoot / 2` to `0`
///
/// The symbol buffer is never touched while bouncing; whatever was visible
/// at natural stop is final, only the offset moves.
#[derive(Debug, Clone)]
pub struct BounceAnimator {
    start: f32,
    overshoot: f32,
    duration: f32,
    elapsed: f32,
}

impl BounceAnimator {
    pub fn new(start_offset: f32, overshoot: f32, duration: f32) -> Self {
        Self {
            start: start_offset,
            overshoot,
            duration,
            elapsed: 0.0,
        }
    }

    /// Advance the settle curve. Returns the current scroll offset, or `None`
    /// once the bounce has run its course; the caller then snaps the offset
    /// to exactly zero and finalizes the spin.
    pub fn tick(&mut self, dt: f32) -> Option<f32> {
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            return None;
        }

        let segment_len = self.duration / 3.0;
        let segment = ((self.elapsed / segment_len) as usize).min(2);
        let t = (self.elapsed - segment as f32 * segment_len) / segment_len;

        let (from, to, easing) = match segment {
            0 => (self.start, self.overshoot, Easing::SineOut),
            1 => (self.overshoot, -self.overshoot * 0.5, Easing::SineInOut),
            _ => (-self.overshoot * 0.5, 0.0, Easing::SineIn),
        };
        Some(ease(from, to, t, easing))
    }
}
