// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Ember math core: spatial transforms and rotations for the renderer.

This crate provides:
- Immutable vector values (`Vec2`, `Vec3`, `UnitVec3`).
- A dense `Matrix` with an explicit mutable accumulator (`MatrixBuf`) and a
  reusable column-major export buffer (`ExportBuffer`).
- Convention-aware Euler angles (`EulerAngles`, `EulerConvention`).
- Unit-quaternion rotations (`Quat`) with Euler conversion, fractional
  powers, and shortest-arc slerp.
- A seeded `Prng` for reproducible sampling of angles and directions.

Design notes:
- Float32 throughout; every value type is `Copy` or cheaply `Clone` and
  `Send + Sync`.
- No operation in this crate produces NaN from finite input. Degenerate
  cases are either mapped to a documented value or reported as `MathError`.
"]

use std::f32::consts::{PI, TAU};

mod error;
mod euler;
mod export;
mod matrix;
mod matrix_buf;
mod prng;
mod quat;
mod vec2;
mod vec3;

pub use error::{MathError, Shape};
pub use euler::{Axis, EulerAngles, EulerConvention};
pub use export::ExportBuffer;
pub use matrix::{Matrix, IDENTITY_4, ZERO_4};
pub use matrix_buf::{Access, MatrixBuf};
pub use prng::Prng;
pub use quat::Quat;
pub use vec2::Vec2;
pub use vec3::{UnitVec3, Vec3};

/// Global epsilon used by math routines when detecting degenerate values.
pub const EPSILON: f32 = 1e-6;

/// Cosine of the middle Euler angle below which a decomposition is treated
/// as gimbal-locked. Sits just above the `f32` noise in the rotation matrix
/// at the pole.
pub const GIMBAL_THRESHOLD: f32 = 1e-5;

/// Clamps `value` to the inclusive `[min, max]` range.
///
/// A reversed range is treated as `[max, min]`.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    value.max(lo).min(hi)
}

/// Clamps `value` to `[0, 1]`. NaN maps to `0`.
pub fn saturate(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Converts degrees to radians with float32 precision.
pub fn deg_to_rad(value: f32) -> f32 {
    value * (TAU / 360.0)
}

/// Converts radians to degrees with float32 precision.
pub fn rad_to_deg(value: f32) -> f32 {
    value * (360.0 / TAU)
}

/// Wraps an angle in radians into `(-π, π]`.
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_accepts_reversed_ranges() {
        assert_eq!(clamp(5.0, 1.0, 0.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn saturate_maps_nan_to_zero() {
        assert_eq!(saturate(f32::NAN), 0.0);
        assert_eq!(saturate(1.5), 1.0);
        assert_eq!(saturate(0.25), 0.25);
    }

    #[test]
    fn wrap_angle_lands_in_half_open_interval() {
        for raw in [-7.0f32, -PI, -1.0, 0.0, 1.0, PI, 4.0, 13.0] {
            let w = wrap_angle(raw);
            assert!(w > -PI - 1e-6 && w <= PI + 1e-6, "{raw} wrapped to {w}");
            let delta = (raw - w) / TAU;
            assert!((delta - delta.round()).abs() < 1e-4, "{raw} vs {w}");
        }
        assert!((wrap_angle(-PI) - PI).abs() < 1e-6);
    }
}
