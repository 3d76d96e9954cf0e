//! Pure easing curves mapping progress in [0, 1] to eased progress.
//!
//! Names follow the GSAP vocabulary so page authors can paste the ease
//! strings they already know into the carousel configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    #[serde(rename = "none", alias = "linear")]
    Linear,
    #[serde(rename = "power2.out")]
    Power2Out,
    #[default]
    #[serde(rename = "power3.out")]
    Power3Out,
    #[serde(rename = "power3.inOut")]
    Power3InOut,
    #[serde(rename = "sine.inOut")]
    SineInOut,
}

impl Easing {
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power2Out => {
                let inv = 1.0 - t;
                1.0 - inv * inv
            }
            Easing::Power3Out => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Easing::Power3InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
            Easing::SineInOut => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
        }
    }
}
