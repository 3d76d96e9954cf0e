//! Carousel configuration.
//!
//! Deserialized from the JSON in the container's `data-config` attribute.
//! Every field has a default, so an empty object is a complete config.

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::{CarouselError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub geometry: GeometryConfig,
    pub timing: TimingConfig,
    pub background: BackgroundConfig,
    pub input: InputConfig,
    pub mount: MountConfig,
    pub log_level: LogLevel,
}

/// Fan layout parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Arc radius as a fraction of the viewport width.
    pub radius_ratio: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Angle between neighbouring cards, in degrees.
    pub card_angle_step_deg: f64,
    pub scale_step: f64,
    pub opacity_step: f64,
    /// Blur in px per step beyond the second neighbour.
    pub blur_per_step: f64,
    /// Items further than this from the center are fully transparent.
    pub max_visible: f64,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            radius_ratio: 1.1,
            min_radius: 700.0,
            max_radius: 2200.0,
            card_angle_step_deg: 9.0,
            scale_step: 0.08,
            opacity_step: 0.14,
            blur_per_step: 1.5,
            max_visible: 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub step_ms: f64,
    pub step_ease: Easing,
    pub step_background_ms: f64,
    pub fast_base_ms: f64,
    pub fast_per_step_ms: f64,
    pub fast_max_ms: f64,
    pub fast_ease: Easing,
    pub fast_background_ms: f64,
    pub settle_ms: f64,
    pub settle_offset_px: f64,
    pub settle_rotation_deg: f64,
    pub entrance: EntranceTiming,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            step_ms: 600.0,
            step_ease: Easing::Power3Out,
            step_background_ms: 700.0,
            fast_base_ms: 450.0,
            fast_per_step_ms: 110.0,
            fast_max_ms: 1600.0,
            fast_ease: Easing::Power3InOut,
            fast_background_ms: 180.0,
            settle_ms: 420.0,
            settle_offset_px: 14.0,
            settle_rotation_deg: 1.5,
            entrance: EntranceTiming::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntranceTiming {
    pub container_fade_ms: f64,
    pub item_fade_ms: f64,
    /// Extra fade-in delay per step of distance from the start center.
    pub stagger_ms: f64,
    pub first_step_ms: f64,
    pub last_step_ms: f64,
}

impl Default for EntranceTiming {
    fn default() -> Self {
        Self {
            container_fade_ms: 500.0,
            item_fade_ms: 450.0,
            stagger_ms: 60.0,
            first_step_ms: 50.0,
            last_step_ms: 200.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Background images advanced per carousel step.
    pub steps_per_item: u32,
    pub image_count: usize,
    /// Image URL template; `{index}` is replaced by the zero-based index.
    pub url_pattern: String,
    /// Explicit image list. Takes precedence over `url_pattern`.
    pub images: Vec<String>,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            steps_per_item: 3,
            image_count: 45,
            url_pattern: "assets/backgrounds/{index}.webp".to_string(),
            images: Vec::new(),
        }
    }
}

impl BackgroundConfig {
    pub fn total_images(&self) -> usize {
        if self.images.is_empty() {
            self.image_count
        } else {
            self.images.len()
        }
    }

    pub fn image_url(&self, index: usize) -> Option<String> {
        if self.images.is_empty() {
            (index < self.image_count)
                .then(|| self.url_pattern.replace("{index}", &index.to_string()))
        } else {
            self.images.get(index).cloned()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub wheel_cooldown_ms: f64,
    pub swipe_threshold_px: f64,
    pub keyboard: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            wheel_cooldown_ms: 180.0,
            swipe_threshold_px: 40.0,
            keyboard: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountConfig {
    /// `<script type="application/json">` holding the poster list.
    pub data_id: String,
    pub backdrop_id: String,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            data_id: "carousel-data".to_string(),
            backdrop_id: "carousel-backdrop".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogLevel(pub LevelFilter);

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel(LevelFilter::Info)
    }
}

impl CarouselConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: CarouselConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let g = &self.geometry;
        let t = &self.timing;
        let e = &t.entrance;
        let non_negative = [
            ("geometry.radius_ratio", g.radius_ratio),
            ("geometry.min_radius", g.min_radius),
            ("geometry.max_radius", g.max_radius),
            ("geometry.scale_step", g.scale_step),
            ("geometry.opacity_step", g.opacity_step),
            ("geometry.blur_per_step", g.blur_per_step),
            ("geometry.max_visible", g.max_visible),
            ("timing.step_ms", t.step_ms),
            ("timing.step_background_ms", t.step_background_ms),
            ("timing.fast_base_ms", t.fast_base_ms),
            ("timing.fast_per_step_ms", t.fast_per_step_ms),
            ("timing.fast_max_ms", t.fast_max_ms),
            ("timing.fast_background_ms", t.fast_background_ms),
            ("timing.settle_ms", t.settle_ms),
            ("timing.entrance.container_fade_ms", e.container_fade_ms),
            ("timing.entrance.item_fade_ms", e.item_fade_ms),
            ("timing.entrance.stagger_ms", e.stagger_ms),
            ("timing.entrance.first_step_ms", e.first_step_ms),
            ("timing.entrance.last_step_ms", e.last_step_ms),
            ("input.wheel_cooldown_ms", self.input.wheel_cooldown_ms),
            ("input.swipe_threshold_px", self.input.swipe_threshold_px),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(CarouselError::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("geometry.card_angle_step_deg", g.card_angle_step_deg),
            ("timing.settle_offset_px", t.settle_offset_px),
            ("timing.settle_rotation_deg", t.settle_rotation_deg),
        ] {
            if !value.is_finite() {
                return Err(CarouselError::InvalidConfig(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if g.min_radius > g.max_radius {
            return Err(CarouselError::InvalidConfig(format!(
                "geometry.min_radius ({}) exceeds geometry.max_radius ({})",
                g.min_radius, g.max_radius
            )));
        }
        if self.background.steps_per_item == 0 {
            return Err(CarouselError::InvalidConfig(
                "background.steps_per_item must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
