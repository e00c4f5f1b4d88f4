// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Euler angles tagged with an explicit rotation-order convention.

use crate::{wrap_angle, Quat, Vec3};

/// Cartesian rotation axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// +X (pitch).
    X,
    /// +Y (yaw).
    Y,
    /// +Z (roll).
    Z,
}

impl Axis {
    /// Component index in a `Vec3` / row or column index in a rotation matrix.
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Unit vector along the axis.
    pub const fn unit(self) -> Vec3 {
        match self {
            Self::X => Vec3::UNIT_X,
            Self::Y => Vec3::UNIT_Y,
            Self::Z => Vec3::UNIT_Z,
        }
    }
}

/// Tait-Bryan rotation order.
///
/// Each variant lists its axes outermost first: `Yxz` composes
/// `R = R_y · R_x · R_z`, so a vector is rolled first, then pitched, then
/// yawed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EulerConvention {
    /// `R_x · R_y · R_z`.
    Xyz,
    /// `R_x · R_z · R_y`.
    Xzy,
    /// `R_y · R_x · R_z` (yaw, pitch, roll).
    #[default]
    Yxz,
    /// `R_y · R_z · R_x`.
    Yzx,
    /// `R_z · R_x · R_y`.
    Zxy,
    /// `R_z · R_y · R_x`.
    Zyx,
}

impl EulerConvention {
    /// Yaw about +Y, then pitch about +X, then roll about +Z.
    pub const YAW_PITCH_ROLL: Self = Self::Yxz;

    /// Axes outermost first.
    pub const fn axes(self) -> [Axis; 3] {
        match self {
            Self::Xyz => [Axis::X, Axis::Y, Axis::Z],
            Self::Xzy => [Axis::X, Axis::Z, Axis::Y],
            Self::Yxz => [Axis::Y, Axis::X, Axis::Z],
            Self::Yzx => [Axis::Y, Axis::Z, Axis::X],
            Self::Zxy => [Axis::Z, Axis::X, Axis::Y],
            Self::Zyx => [Axis::Z, Axis::Y, Axis::X],
        }
    }

    /// `true` for the even permutations (`Xyz`, `Yzx`, `Zxy`).
    pub const fn is_cyclic(self) -> bool {
        matches!(self, Self::Xyz | Self::Yzx | Self::Zxy)
    }

    /// All six conventions.
    pub const ALL: [Self; 6] = [
        Self::Xyz,
        Self::Xzy,
        Self::Yxz,
        Self::Yzx,
        Self::Zxy,
        Self::Zyx,
    ];
}

/// Three rotation angles in radians plus the order they compose in.
///
/// Component mapping is fixed: `x` rotates about +X (pitch), `y` about +Y
/// (yaw), `z` about +Z (roll). The convention only decides the order.
///
/// There is no `PartialEq`: distinct triples can describe the same
/// orientation, so comparisons go through [`EulerAngles::is_equal`].
#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EulerAngles {
    vector: Vec3,
    convention: EulerConvention,
}

impl EulerAngles {
    /// Creates angles from a `(pitch, yaw, roll)` vector.
    pub const fn new(vector: Vec3, convention: EulerConvention) -> Self {
        Self { vector, convention }
    }

    /// Yaw/pitch/roll angles in the [`EulerConvention::YAW_PITCH_ROLL`] order.
    pub const fn yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self::new(
            Vec3::new(pitch, yaw, roll),
            EulerConvention::YAW_PITCH_ROLL,
        )
    }

    /// Angles as `(x, y, z)`.
    pub const fn vector(&self) -> Vec3 {
        self.vector
    }

    /// Composition order.
    pub const fn convention(&self) -> EulerConvention {
        self.convention
    }

    /// Angle about `axis`.
    pub const fn angle(&self, axis: Axis) -> f32 {
        self.vector.component(axis.index())
    }

    /// Rotation about +X.
    pub const fn pitch(&self) -> f32 {
        self.vector.x()
    }

    /// Rotation about +Y.
    pub const fn yaw(&self) -> f32 {
        self.vector.y()
    }

    /// Rotation about +Z.
    pub const fn roll(&self) -> f32 {
        self.vector.z()
    }

    const fn with_vector(&self, vector: Vec3) -> Self {
        Self::new(vector, self.convention)
    }

    /// Keeps yaw, zeroes pitch and roll.
    pub const fn with_only_yaw(&self) -> Self {
        self.with_vector(self.vector.with_only_y())
    }

    /// Keeps pitch, zeroes yaw and roll.
    pub const fn with_only_pitch(&self) -> Self {
        self.with_vector(self.vector.with_only_x())
    }

    /// Keeps roll, zeroes yaw and pitch.
    pub const fn with_only_roll(&self) -> Self {
        self.with_vector(self.vector.with_only_z())
    }

    /// Zeroes yaw.
    pub const fn with_zero_yaw(&self) -> Self {
        self.with_vector(self.vector.with_zero_y())
    }

    /// Zeroes pitch.
    pub const fn with_zero_pitch(&self) -> Self {
        self.with_vector(self.vector.with_zero_x())
    }

    /// Zeroes roll.
    pub const fn with_zero_roll(&self) -> Self {
        self.with_vector(self.vector.with_zero_z())
    }

    /// Same angles reinterpreted under another convention.
    pub const fn with_convention(&self, convention: EulerConvention) -> Self {
        Self::new(self.vector, convention)
    }

    /// Returns `true` if any angle is NaN.
    pub fn has_nan(&self) -> bool {
        self.vector.has_nan()
    }

    /// Quaternion for these angles; see [`Quat::from_euler`].
    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(self)
    }

    /// Tolerance comparison modulo full turns.
    ///
    /// Conventions must match; each component difference is wrapped into
    /// `(-π, π]` before being compared against `tolerance`.
    pub fn is_equal(a: &Self, b: &Self, tolerance: f32) -> bool {
        if a.convention != b.convention {
            return false;
        }
        let diff = a.vector - b.vector;
        diff.to_array()
            .iter()
            .all(|d| wrap_angle(*d).abs() <= tolerance)
    }
}

impl Default for EulerAngles {
    fn default() -> Self {
        Self::new(Vec3::ZERO, EulerConvention::default())
    }
}
