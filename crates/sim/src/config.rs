//! Simulation tunables.
//!
//! Every struct deserializes with `#[serde(default)]`, so a config file only
//! needs the fields it overrides. Call [`SimConfig::validate`] (done by
//! [`SimConfig::from_json_str`]) before handing a config to the simulation.

use std::f64::consts::TAU;
use std::fmt;

use scene::prefabs::GlobeSpec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimConfig {
    pub globe: GlobeConfig,
    pub sweep: SweepConfig,
    pub satellite: SatelliteConfig,
    pub spin: SpinConfig,
    pub markers: MarkerStyle,
    pub controls: ControlConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub earth_radius: f64,
    pub cloud_radius: f64,
    pub star_radius: f64,
    pub segments: u32,
    pub star_segments: u32,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        let spec = GlobeSpec::default();
        Self {
            earth_radius: spec.earth_radius,
            cloud_radius: spec.cloud_radius,
            star_radius: spec.star_radius,
            segments: spec.segments,
            star_segments: spec.star_segments,
        }
    }
}

impl GlobeConfig {
    pub fn spec(&self) -> GlobeSpec {
        GlobeSpec {
            earth_radius: self.earth_radius,
            cloud_radius: self.cloud_radius,
            star_radius: self.star_radius,
            segments: self.segments,
            star_segments: self.star_segments,
        }
    }
}

/// Sweep timing and the text it reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Angle the sweep starts from (and resets to).
    pub start_angle_rad: f64,
    /// Angle decrement per frame.
    pub step_rad: f64,
    /// The status ellipsis advances every this many frames.
    pub status_every_frames: u64,
    pub status_label: String,
    /// Final message. `{visited}`, `{total}` and `{frames}` are substituted.
    pub summary_template: String,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start_angle_rad: 0.0,
            step_rad: 0.01,
            status_every_frames: 20,
            status_label: "Calculating".to_string(),
            summary_template:
                "Simulation complete: satellite passed over {visited} of {total} markers in {frames} frames."
                    .to_string(),
        }
    }
}

impl SweepConfig {
    /// Where the sweep stops: one full turn below the start angle.
    pub fn bound_rad(&self) -> f64 {
        -TAU + self.start_angle_rad
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SatelliteConfig {
    pub lat_deg: f64,
    pub lon_deg: f64,
    /// Height above the reference sphere, in scene units.
    pub altitude: f64,
    pub scale: f64,
    /// Rotation about the model's z axis per frame.
    pub spin_rad_per_frame: f64,
}

impl Default for SatelliteConfig {
    fn default() -> Self {
        Self {
            lat_deg: 18.840_555_555_55,
            lon_deg: 8.759_722_222,
            altitude: 0.5,
            scale: 0.01,
            spin_rad_per_frame: 0.01,
        }
    }
}

impl SatelliteConfig {
    /// Same spawn position and size; spin may differ.
    pub fn same_placement(&self, other: &SatelliteConfig) -> bool {
        (self.lat_deg, self.lon_deg, self.altitude, self.scale)
            == (other.lat_deg, other.lon_deg, other.altitude, other.scale)
    }
}

/// Idle rotation of each shell about y, radians per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinConfig {
    pub stars: f64,
    pub earth: f64,
    pub clouds: f64,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            stars: -0.004,
            earth: -0.003,
            clouds: -0.002,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub unvisited_rgb: u32,
    pub visited_rgb: u32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            unvisited_rgb: 0x00ff00,
            visited_rgb: 0xff3b30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Globe rotation per arrow key press.
    pub rotate_step_rad: f64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            rotate_step_rad: 0.1,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: String },
    UnknownKey(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "config parse error: {err}"),
            ConfigError::Invalid { field, reason } => write!(f, "invalid {field}: {reason}"),
            ConfigError::UnknownKey(key) => write!(f, "unknown config key: {key}"),
        }
    }
}

impl std::error::Error for ConfigError {}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

impl SimConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(payload).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.globe;
        if !(g.earth_radius.is_finite() && g.earth_radius > 0.0) {
            return Err(invalid("globe.earth_radius", "must be positive"));
        }
        if !(g.cloud_radius.is_finite() && g.cloud_radius > 0.0) {
            return Err(invalid("globe.cloud_radius", "must be positive"));
        }
        if !(g.star_radius.is_finite() && g.star_radius > g.cloud_radius) {
            return Err(invalid("globe.star_radius", "must enclose the cloud shell"));
        }

        let s = &self.sweep;
        if !(s.step_rad.is_finite() && s.step_rad > 0.0) {
            return Err(invalid("sweep.step_rad", "must be positive"));
        }
        // The bound must be negative so the progress fraction climbs to 1.
        if !(s.start_angle_rad.is_finite() && s.start_angle_rad < TAU) {
            return Err(invalid("sweep.start_angle_rad", "must be below one full turn"));
        }
        if s.status_every_frames == 0 {
            return Err(invalid("sweep.status_every_frames", "must be at least 1"));
        }

        let sat = &self.satellite;
        if foundation::math::LatLon::new(sat.lat_deg, sat.lon_deg).is_err() {
            return Err(invalid("satellite", format!(
                "position ({}, {}) is not a valid coordinate",
                sat.lat_deg, sat.lon_deg
            )));
        }
        if !(sat.scale.is_finite() && sat.scale > 0.0) {
            return Err(invalid("satellite.scale", "must be positive"));
        }
        if !(sat.altitude.is_finite() && sat.altitude >= 0.0) {
            return Err(invalid("satellite.altitude", "must be non-negative"));
        }

        if !self.controls.rotate_step_rad.is_finite() {
            return Err(invalid("controls.rotate_step_rad", "must be finite"));
        }
        Ok(())
    }

    /// Sets a single numeric tunable by dotted key, clamping to a sane range.
    pub fn set_by_key(&mut self, key: &str, value: f64) -> Result<(), ConfigError> {
        if !value.is_finite() {
            return Err(invalid("value", format!("{key} must be finite")));
        }
        match key {
            "sweep.step_rad" => self.sweep.step_rad = value.clamp(1e-4, 0.5),
            "sweep.status_every_frames" => {
                self.sweep.status_every_frames = value.clamp(1.0, 600.0) as u64
            }
            "satellite.spin_rad_per_frame" => {
                self.satellite.spin_rad_per_frame = value.clamp(-0.5, 0.5)
            }
            "spin.stars" => self.spin.stars = value.clamp(-0.1, 0.1),
            "spin.earth" => self.spin.earth = value.clamp(-0.1, 0.1),
            "spin.clouds" => self.spin.clouds = value.clamp(-0.1, 0.1),
            "controls.rotate_step_rad" => self.controls.rotate_step_rad = value.clamp(0.01, 1.0),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, SimConfig};
    use pretty_assertions::assert_eq;
    use std::f64::consts::TAU;

    #[test]
    fn defaults_are_valid() {
        let config = SimConfig::default();
        config.validate().unwrap();
        assert_eq!(config.sweep.bound_rad(), -TAU);
        assert_eq!(config.sweep.step_rad, 0.01);
        assert_eq!(config.controls.rotate_step_rad, 0.1);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config =
            SimConfig::from_json_str(r#"{ "sweep": { "step_rad": 0.05 }, "markers": { "visited_rgb": 255 } }"#)
                .unwrap();
        assert_eq!(config.sweep.step_rad, 0.05);
        assert_eq!(config.sweep.status_every_frames, 20);
        assert_eq!(config.markers.visited_rgb, 255);
        assert_eq!(config.markers.unvisited_rgb, 0x00ff00);
        assert_eq!(config.satellite, SimConfig::default().satellite);
    }

    #[test]
    fn bound_follows_start_angle() {
        let config = SimConfig::from_json_str(r#"{ "sweep": { "start_angle_rad": 0.5 } }"#).unwrap();
        assert_eq!(config.sweep.bound_rad(), -TAU + 0.5);
    }

    #[test]
    fn rejects_non_positive_step() {
        let err = SimConfig::from_json_str(r#"{ "sweep": { "step_rad": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "sweep.step_rad", .. }));
    }

    #[test]
    fn rejects_start_angle_that_makes_bound_non_negative() {
        let err = SimConfig::from_json_str(r#"{ "sweep": { "start_angle_rad": 7.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "sweep.start_angle_rad", .. }));
    }

    #[test]
    fn rejects_invalid_satellite_position() {
        let err = SimConfig::from_json_str(r#"{ "satellite": { "lat_deg": 123.0 } }"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid satellite"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SimConfig::from_json_str("{ sweep: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn set_by_key_clamps_and_rejects_unknown() {
        let mut config = SimConfig::default();
        config.set_by_key("controls.rotate_step_rad", 5.0).unwrap();
        assert_eq!(config.controls.rotate_step_rad, 1.0);
        config.set_by_key("sweep.status_every_frames", 0.0).unwrap();
        assert_eq!(config.sweep.status_every_frames, 1);
        assert!(matches!(
            config.set_by_key("sweep.nope", 1.0),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(config.set_by_key("spin.earth", f64::NAN).is_err());
    }
}
