//! Progress-driven interpolation advanced by an external clock.
//!
//! A `Tween` owns nothing but its timing: the caller advances it with the
//! frame delta and applies the eased progress to whatever it animates.

use crate::easing::Ease;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Once,
    Forever,
}

/// Result of advancing a tween by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenStep {
    /// Eased progress in \[0, 1\].
    pub progress: f32,
    /// True exactly once, on the step that reaches the end of a `Once` tween.
    pub completed: bool,
}

#[derive(Clone, Debug)]
pub struct Tween {
    duration_sec: f32,
    delay_sec: f32,
    ease: Ease,
    repeat: Repeat,
    elapsed_sec: f32,
    finished: bool,
}

impl Tween {
    pub fn new(duration_sec: f32, ease: Ease) -> Self {
        Self {
            duration_sec: duration_sec.max(0.0),
            delay_sec: 0.0,
            ease,
            repeat: Repeat::Once,
            elapsed_sec: 0.0,
            finished: false,
        }
    }

    /// Hold at the start for `delay_sec` before the first cycle. Repeats are not delayed.
    pub fn with_delay(mut self, delay_sec: f32) -> Self {
        self.delay_sec = delay_sec.max(0.0);
        self
    }

    pub fn repeat_forever(mut self) -> Self {
        self.repeat = Repeat::Forever;
        self
    }

    pub fn duration_sec(&self) -> f32 {
        self.duration_sec
    }

    pub fn delay_sec(&self) -> f32 {
        self.delay_sec
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance by `dt_sec`. Returns `None` while delayed or once finished.
    pub fn advance(&mut self, dt_sec: f32) -> Option<TweenStep> {
        if self.finished {
            return None;
        }
        self.elapsed_sec += dt_sec.max(0.0);
        let active = self.elapsed_sec - self.delay_sec;
        if active < 0.0 {
            return None;
        }

        let raw = if self.duration_sec <= f32::EPSILON {
            1.0
        } else {
            active / self.duration_sec
        };
        match self.repeat {
            Repeat::Once => {
                let completed = raw >= 1.0;
                self.finished = completed;
                Some(TweenStep {
                    progress: self.ease.apply(raw.min(1.0)),
                    completed,
                })
            }
            Repeat::Forever => Some(TweenStep {
                progress: self.ease.apply(raw.fract()),
                completed: false,
            }),
        }
    }
}

#[inline]
pub fn lerp(from: f32, to: f32, progress: f32) -> f32 {
    from + (to - from) * progress
}
