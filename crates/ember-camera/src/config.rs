// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Camera lens and transition settings loaded from JSON.

use std::path::Path;
use std::time::Duration;

use ember_math::{deg_to_rad, EulerAngles, Matrix, Quat, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for camera config loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON could not be parsed into a [`CameraConfig`].
    #[error("serde error: {0}")]
    Parse(#[from] serde_json::Error),
    /// I/O error while reading the config file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A field holds a value the projection cannot use.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Offending field name.
        field: &'static str,
        /// What the field must satisfy.
        reason: &'static str,
    },
}

/// Perspective lens, transition length, and destination pose.
///
/// Every field has a default, so a partial (or empty) JSON object is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Viewport width over height.
    pub aspect: f32,
    /// Transition length in milliseconds.
    pub transition_ms: u64,
    /// Where a transition ends up.
    pub destination_position: Vec3,
    /// Orientation a transition ends up at.
    pub destination_angles: EulerAngles,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 10000.0,
            aspect: 16.0 / 9.0,
            transition_ms: 1000,
            destination_position: Vec3::new(10.0, 0.0, 0.0),
            destination_angles: EulerAngles::yaw_pitch_roll(deg_to_rad(90.0), 0.0, 0.0),
        }
    }
}

impl CameraConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that the lens describes a usable perspective projection.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });
        if !is_positive(self.near) {
            return invalid("near", "must be a finite value > 0");
        }
        if !self.far.is_finite() || self.far <= self.near {
            return invalid("far", "must be finite and greater than near");
        }
        if !is_positive(self.fov_y_degrees) || self.fov_y_degrees >= 180.0 {
            return invalid("fov_y_degrees", "must lie strictly between 0 and 180");
        }
        if !is_positive(self.aspect) {
            return invalid("aspect", "must be a finite value > 0");
        }
        if self.destination_position.has_nan() || self.destination_angles.has_nan() {
            return invalid("destination", "must not contain NaN");
        }
        Ok(())
    }

    /// Perspective projection for this lens.
    pub fn projection_matrix(&self) -> Matrix {
        Matrix::perspective(
            deg_to_rad(self.fov_y_degrees),
            self.aspect,
            self.near,
            self.far,
        )
    }

    /// Transition length.
    pub const fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Destination orientation as a quaternion.
    pub fn destination_rotation(&self) -> Quat {
        self.destination_angles.to_quat()
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config = CameraConfig::from_json_str("{}").unwrap();
        assert_eq!(config.fov_y_degrees, 60.0);
        assert_eq!(config.near, 0.1);
        assert_eq!(config.far, 10000.0);
        assert_eq!(config.transition(), Duration::from_secs(1));
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            CameraConfig::from_json_str(r#"{ "fov_y_degrees": 90.0, "transition_ms": 250 }"#)
                .unwrap();
        assert_eq!(config.fov_y_degrees, 90.0);
        assert_eq!(config.transition(), Duration::from_millis(250));
        assert_eq!(config.aspect, 16.0 / 9.0);
    }

    #[test]
    fn destination_pose_is_plain_json() {
        let config = CameraConfig::from_json_str(
            r#"{
                "destination_position": [1.0, 2.0, 3.0],
                "destination_angles": { "vector": [0.0, 0.5, 0.0], "convention": "Yxz" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.destination_position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(config.destination_angles.yaw(), 0.5);
    }

    #[test]
    fn far_must_exceed_near() {
        let err = CameraConfig::from_json_str(r#"{ "near": 5.0, "far": 1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "far", .. }), "{err}");
    }

    #[test]
    fn fov_must_be_below_a_half_turn() {
        let config = CameraConfig {
            fov_y_degrees: 180.0,
            ..CameraConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "fov_y_degrees",
                ..
            })
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = CameraConfig::from_json_str("{ near: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn round_trips_through_json() {
        let config = CameraConfig::default();
        let json = config.to_json_pretty().unwrap();
        let back = CameraConfig::from_json_str(&json).unwrap();
        assert_eq!(back.projection_matrix(), config.projection_matrix());
        assert_eq!(back.destination_position, config.destination_position);
    }
}
