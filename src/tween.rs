//! Frame-driven scalar tweens.
//!
//! A tween does not know the wall clock until it is first sampled: the
//! first frame that samples it becomes its start time. Operations can
//! therefore be issued from input handlers without a timestamp and still
//! begin on the next animation frame, the way a timeline library would.

use crate::easing::Easing;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub value: f64,
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct Tween {
    from: f64,
    to: f64,
    duration_ms: f64,
    delay_ms: f64,
    easing: Easing,
    started_at: Option<f64>,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration_ms: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
            delay_ms: 0.0,
            easing,
            started_at: None,
        }
    }

    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    /// Total time from first sample to completion.
    pub fn total_ms(&self) -> f64 {
        self.delay_ms + self.duration_ms
    }

    pub fn sample(&mut self, now_ms: f64) -> Sample {
        let start = *self.started_at.get_or_insert(now_ms);
        let elapsed = now_ms - start - self.delay_ms;
        if elapsed < 0.0 {
            return Sample {
                value: self.from,
                finished: false,
            };
        }
        let progress = if self.duration_ms <= 0.0 {
            1.0
        } else {
            (elapsed / self.duration_ms).min(1.0)
        };
        if progress >= 1.0 {
            return Sample {
                value: self.to,
                finished: true,
            };
        }
        Sample {
            value: self.from + (self.to - self.from) * self.easing.apply(progress),
            finished: false,
        }
    }
}
