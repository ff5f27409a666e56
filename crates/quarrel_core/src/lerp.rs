//! Timed value interpolation

use std::ops::{Add, Mul, Sub};

/// Shortest duration a transition may take
const MIN_DURATION: f32 = 0.001;

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Identity easing
#[inline]
pub fn no_ease(t: f32) -> f32 {
    t
}

/// Values that can be blended by a scalar factor
pub trait Lerp: Copy + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self> {}

impl<T> Lerp for T where T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f32, Output = T> {}

/// Moves a value from `start` to `target` over a fixed number of seconds.
///
/// `update` advances the clock and returns the current value. Once the
/// transition completes it keeps returning `target`.
#[derive(Debug, Clone, Copy)]
pub struct TimeLerper<T> {
    t: f32,
    seconds_to_target: f32,
    start: T,
    target: T,
}

impl<T: Lerp> TimeLerper<T> {
    /// Start a transition
    pub fn new(start: T, target: T, seconds: f32) -> Self {
        Self {
            t: 0.0,
            seconds_to_target: seconds.max(MIN_DURATION),
            start,
            target,
        }
    }

    /// Restart towards a new target
    pub fn set_target(&mut self, start: T, target: T, seconds: f32) {
        *self = Self::new(start, target, seconds);
    }

    /// Advance by `seconds` with linear easing
    pub fn update(&mut self, seconds: f32) -> T {
        self.update_eased(seconds, no_ease)
    }

    /// Advance by `seconds`, shaping progress with `ease`
    pub fn update_eased(&mut self, seconds: f32, ease: fn(f32) -> f32) -> T {
        if self.t < 1.0 {
            self.t = (self.t + seconds / self.seconds_to_target).min(1.0);
            return self.start + (self.target - self.start) * ease(self.t);
        }
        self.target
    }

    /// Normalised progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        self.t
    }

    /// Whether the target has been reached
    pub fn is_finished(&self) -> bool {
        self.t >= 1.0
    }

    /// The value being moved towards
    pub fn target(&self) -> T {
        self.target
    }
}
