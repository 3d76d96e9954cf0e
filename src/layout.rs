//! Fan/arc geometry for carousel posters.
//!
//! [`transform`] is the single source of item geometry. Discrete steps and
//! continuous sweeps both feed it a relative offset, so whole-step frames
//! of a sweep are identical to resting frames.

use crate::config::GeometryConfig;

/// Vertical flattening of the arc relative to its radius.
const ARC_SQUASH: f64 = 0.38;
/// Card rotation as a fraction of its angle on the arc.
const ROTATION_DAMPING: f64 = 0.55;
const BASE_Z_INDEX: f64 = 1000.0;
const Z_INDEX_STEP: f64 = 60.0;
/// Neighbours this close to the center are never blurred.
const SHARP_DISTANCE: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTransform {
    pub x: f64,
    pub y: f64,
    /// Degrees.
    pub rotation: f64,
    pub scale: f64,
    pub z_index: i32,
    pub opacity: f64,
    /// Pixels.
    pub blur: f64,
}

impl ItemTransform {
    pub const HIDDEN: ItemTransform = ItemTransform {
        x: 0.0,
        y: 0.0,
        rotation: 0.0,
        scale: 1.0,
        z_index: 0,
        opacity: 0.0,
        blur: 0.0,
    };

    /// Linear blend towards `to`. Stacking order snaps to the target so
    /// the incoming center is on top for the whole move.
    pub fn lerp(&self, to: &ItemTransform, t: f64) -> ItemTransform {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        ItemTransform {
            x: mix(self.x, to.x),
            y: mix(self.y, to.y),
            rotation: mix(self.rotation, to.rotation),
            scale: mix(self.scale, to.scale),
            z_index: to.z_index,
            opacity: mix(self.opacity, to.opacity),
            blur: mix(self.blur, to.blur),
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> ItemTransform {
        self.opacity = opacity;
        self
    }

    pub fn css_transform(&self) -> String {
        format!(
            "translate(-50%, -50%) translate({:.2}px, {:.2}px) rotate({:.3}deg) scale({:.4})",
            self.x, self.y, self.rotation, self.scale
        )
    }

    pub fn css_filter(&self) -> String {
        if self.blur > 0.0 {
            format!("blur({:.2}px)", self.blur)
        } else {
            "none".to_string()
        }
    }
}

/// Geometry resolved against the current viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub radius: f64,
    pub vertical_offset: f64,
    /// Radians between neighbouring cards.
    pub card_angle_step: f64,
    pub scale_step: f64,
    pub opacity_step: f64,
    pub blur_per_step: f64,
    pub max_visible: f64,
}

impl LayoutParams {
    pub fn for_viewport(geometry: &GeometryConfig, viewport_width: f64) -> Self {
        let radius = (viewport_width * geometry.radius_ratio)
            .clamp(geometry.min_radius, geometry.max_radius);
        Self {
            radius,
            // Lifts the arc so the centered card sits at y = 0.
            vertical_offset: radius * ARC_SQUASH,
            card_angle_step: geometry.card_angle_step_deg.to_radians(),
            scale_step: geometry.scale_step,
            opacity_step: geometry.opacity_step,
            blur_per_step: geometry.blur_per_step,
            max_visible: geometry.max_visible,
        }
    }
}

pub fn transform(rel: f64, params: &LayoutParams) -> ItemTransform {
    let distance = rel.abs();
    let visible = distance <= params.max_visible;
    let angle = rel * params.card_angle_step;
    let opacity = if visible {
        (1.0 - distance * params.opacity_step).clamp(0.0, 1.0)
    } else {
        0.0
    };
    ItemTransform {
        x: angle.sin() * params.radius,
        y: params.vertical_offset - angle.cos() * params.radius * ARC_SQUASH,
        rotation: angle.to_degrees() * ROTATION_DAMPING,
        scale: (1.0 - distance * params.scale_step).max(0.0),
        z_index: (BASE_Z_INDEX - distance * Z_INDEX_STEP).round() as i32,
        opacity,
        blur: (distance - SHARP_DISTANCE).max(0.0) * params.blur_per_step,
    }
}
