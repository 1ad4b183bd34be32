//! Tunables for the globe controller.
//!
//! Defaults reproduce the landing page's feel. A developer can override any subset
//! by storing a JSON object under the `globe_config` localStorage key; the page only
//! ever reads it.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const STORAGE_KEY: &str = "globe_config";

/// Hard limits on any configured zoom range.
pub const SCALE_LIMITS: (f64, f64) = (0.5, 3.0);

/// How momentum friction relates to frame timing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DecayMode {
    /// Multiply by the decay factor once per rendered frame (frame-rate dependent).
    PerFrame,
    /// Multiply by `decay ^ (dt / reference_dt)`.
    TimeScaled { reference_dt: f64 },
}

/// Which sample feeds the latitude/longitude readout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// Last point where a pointer touched the sphere.
    AnchorPoint,
    /// Whatever sits under a fixed screen point, re-sampled every frame.
    RayCast,
}

/// Mapping from local Cartesian axes to spherical coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisConvention {
    /// `lat = asin(y / r)`, `lng = atan2(z, x)`.
    YUp,
    /// `lat = asin(z / r)`, `lng = atan2(y, x)`.
    ZUp,
}

/// Where the ray-cast sample sits on screen.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaySample {
    ViewportCenter,
    /// Projected centre of the globe, the point facing the camera.
    GlobeCenter,
    /// Normalised device coordinates, both axes in [-1, 1], +y up.
    Ndc { x: f64, y: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// Radians of rotation per pixel of drag, both axes.
    pub rotation_sensitivity: f64,
    pub velocity_decay: f64,
    pub decay_mode: DecayMode,
    pub velocity_deadband: f64,
    /// Radians per second of yaw once momentum is exhausted.
    pub idle_spin_rate: f64,
    pub max_frame_dt: f64,
    pub scale_smoothing: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub hover_boost: f64,
    pub base_scale: f64,
    pub sphere_radius: f64,
    pub globe_center: [f64; 3],
    pub projection_mode: ProjectionMode,
    pub axis_convention: AxisConvention,
    pub ray_sample: RaySample,
    pub atmosphere_spin_rate: f64,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            rotation_sensitivity: 0.005,
            velocity_decay: 0.95,
            decay_mode: DecayMode::PerFrame,
            velocity_deadband: 0.0001,
            idle_spin_rate: 0.1,
            max_frame_dt: 0.1,
            scale_smoothing: 0.15,
            min_scale: 0.5,
            max_scale: 3.0,
            hover_boost: 1.05,
            base_scale: 0.9,
            sphere_radius: 2.0,
            globe_center: [3.5, 0.0, 0.0],
            projection_mode: ProjectionMode::AnchorPoint,
            axis_convention: AxisConvention::YUp,
            ray_sample: RaySample::GlobeCenter,
            atmosphere_spin_rate: 0.05,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "invalid globe config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl GlobeConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: GlobeConfig = serde_json::from_str(raw)?;
        Ok(cfg.validated())
    }

    /// Replace values that would break the controller with their defaults.
    pub fn validated(mut self) -> Self {
        let d = GlobeConfig::default();
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let unit = |v: f64| v.is_finite() && v > 0.0 && v <= 1.0;
        if !self.rotation_sensitivity.is_finite() {
            self.rotation_sensitivity = d.rotation_sensitivity;
        }
        if !unit(self.velocity_decay) {
            self.velocity_decay = d.velocity_decay;
        }
        if let DecayMode::TimeScaled { reference_dt } = self.decay_mode {
            if !positive(reference_dt) {
                self.decay_mode = DecayMode::TimeScaled {
                    reference_dt: 1.0 / 60.0,
                };
            }
        }
        if !(self.velocity_deadband.is_finite() && self.velocity_deadband >= 0.0) {
            self.velocity_deadband = d.velocity_deadband;
        }
        if !self.idle_spin_rate.is_finite() {
            self.idle_spin_rate = d.idle_spin_rate;
        }
        if !positive(self.max_frame_dt) {
            self.max_frame_dt = d.max_frame_dt;
        }
        if !unit(self.scale_smoothing) {
            self.scale_smoothing = d.scale_smoothing;
        }
        if !positive(self.min_scale) || !positive(self.max_scale) || self.min_scale > self.max_scale {
            self.min_scale = d.min_scale;
            self.max_scale = d.max_scale;
        }
        self.min_scale = self.min_scale.clamp(SCALE_LIMITS.0, SCALE_LIMITS.1);
        self.max_scale = self.max_scale.clamp(SCALE_LIMITS.0, SCALE_LIMITS.1);
        if !positive(self.hover_boost) {
            self.hover_boost = d.hover_boost;
        }
        if !positive(self.base_scale) {
            self.base_scale = d.base_scale;
        }
        if !positive(self.sphere_radius) {
            self.sphere_radius = d.sphere_radius;
        }
        if !self.globe_center.iter().all(|c| c.is_finite()) {
            self.globe_center = d.globe_center;
        }
        if !self.atmosphere_spin_rate.is_finite() {
            self.atmosphere_spin_rate = d.atmosphere_spin_rate;
        }
        self
    }
}

/// Read the optional override from localStorage, falling back to defaults.
pub fn load() -> GlobeConfig {
    let raw = web_sys::window()
        .and_then(|win| win.local_storage().ok().flatten())
        .and_then(|store| store.get_item(STORAGE_KEY).ok().flatten());
    match raw {
        Some(raw) => match GlobeConfig::from_json(&raw) {
            Ok(cfg) => {
                log::info!("loaded globe config override from localStorage");
                cfg
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                GlobeConfig::default()
            }
        },
        None => GlobeConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = GlobeConfig::from_json(r#"{"velocity_decay": 0.9, "projection_mode": "ray_cast"}"#)
            .unwrap();
        assert_eq!(cfg.velocity_decay, 0.9);
        assert_eq!(cfg.projection_mode, ProjectionMode::RayCast);
        assert_eq!(cfg.rotation_sensitivity, 0.005);
        assert_eq!(cfg.max_scale, 3.0);
    }

    #[test]
    fn tagged_decay_mode_parses() {
        let cfg = GlobeConfig::from_json(
            r#"{"decay_mode": {"mode": "time_scaled", "reference_dt": 0.02}}"#,
        )
        .unwrap();
        assert_eq!(cfg.decay_mode, DecayMode::TimeScaled { reference_dt: 0.02 });
    }

    #[test]
    fn bad_json_is_an_error() {
        let err = GlobeConfig::from_json("{not json").unwrap_err();
        assert!(err.to_string().starts_with("invalid globe config"));
    }

    #[test]
    fn out_of_range_values_are_repaired() {
        let cfg = GlobeConfig {
            velocity_decay: 1.5,
            scale_smoothing: 0.0,
            min_scale: 4.0,
            max_scale: 1.0,
            max_frame_dt: -1.0,
            decay_mode: DecayMode::TimeScaled { reference_dt: 0.0 },
            ..GlobeConfig::default()
        }
        .validated();
        assert_eq!(cfg.velocity_decay, 0.95);
        assert_eq!(cfg.scale_smoothing, 0.15);
        assert_eq!((cfg.min_scale, cfg.max_scale), (0.5, 3.0));
        assert_eq!(cfg.max_frame_dt, 0.1);
        assert_eq!(
            cfg.decay_mode,
            DecayMode::TimeScaled {
                reference_dt: 1.0 / 60.0
            }
        );
    }

    #[test]
    fn scale_bounds_stay_inside_limits() {
        let cfg = GlobeConfig::from_json(r#"{"min_scale": 0.1, "max_scale": 8.0}"#).unwrap();
        assert_eq!((cfg.min_scale, cfg.max_scale), (0.5, 3.0));
        let cfg = GlobeConfig::from_json(r#"{"min_scale": 0.8, "max_scale": 2.0}"#).unwrap();
        assert_eq!((cfg.min_scale, cfg.max_scale), (0.8, 2.0));
        let cfg = GlobeConfig::from_json(r#"{"min_scale": 5.0, "max_scale": 9.0}"#).unwrap();
        assert_eq!((cfg.min_scale, cfg.max_scale), (3.0, 3.0));
    }

    #[test]
    fn ray_sample_variants_parse() {
        let cfg = GlobeConfig::from_json(r#"{"ray_sample": {"ndc": {"x": 0.5, "y": -0.25}}}"#).unwrap();
        assert_eq!(cfg.ray_sample, RaySample::Ndc { x: 0.5, y: -0.25 });
        let cfg = GlobeConfig::from_json(r#"{"ray_sample": "viewport_center"}"#).unwrap();
        assert_eq!(cfg.ray_sample, RaySample::ViewportCenter);
    }
}
