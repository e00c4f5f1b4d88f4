// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::{ExportBuffer, MathError, Vec2, EPSILON};

/// Immutable 3D vector used for positions, directions, and angle triples.
///
/// * Components are `f32`; equality is componentwise.
/// * Every operation returns a fresh value; nothing mutates the receiver.
/// * There is no `length()`: hot paths compare [`Vec3::length_squared`] and
///   only [`Vec3::normalize`] pays for the square root.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Vec3 {
    data: [f32; 3],
}

impl Vec3 {
    /// Number of components written by [`Vec3::write_to`].
    pub const DIMENSIONS: usize = 3;

    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// All components set to one.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Unit vector pointing along the positive X axis.
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit vector pointing along the positive Y axis.
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit vector pointing along the positive Z axis.
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a vector from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { data: [x, y, z] }
    }

    /// X component.
    pub const fn x(&self) -> f32 {
        self.data[0]
    }

    /// Y component.
    pub const fn y(&self) -> f32 {
        self.data[1]
    }

    /// Z component.
    pub const fn z(&self) -> f32 {
        self.data[2]
    }

    /// Returns the components as an array in `(x, y, z)` order.
    pub const fn to_array(self) -> [f32; 3] {
        self.data
    }

    pub(crate) const fn component(&self, idx: usize) -> f32 {
        self.data[idx]
    }

    /// Applies `f` to every component.
    pub fn map(&self, mut f: impl FnMut(f32) -> f32) -> Self {
        Self::new(f(self.x()), f(self.y()), f(self.z()))
    }

    /// Scales the vector by a scalar.
    pub fn scale(&self, scalar: f32) -> Self {
        Self::new(self.x() * scalar, self.y() * scalar, self.z() * scalar)
    }

    /// Divides every component by a scalar.
    pub fn div_scalar(&self, scalar: f32) -> Self {
        Self::new(self.x() / scalar, self.y() / scalar, self.z() / scalar)
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: &Self) -> f32 {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }

    /// Right-handed cross product.
    pub fn cross(&self, other: &Self) -> Self {
        let (ax, ay, az) = (self.x(), self.y(), self.z());
        let (bx, by, bz) = (other.x(), other.y(), other.z());
        Self::new(ay * bz - by * az, az * bx - bz * ax, ax * by - bx * ay)
    }

    /// Squared magnitude of the vector.
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Squared distance to `other`.
    pub fn distance_squared(&self, other: &Self) -> f32 {
        (*self - *other).length_squared()
    }

    /// Normalises the vector.
    ///
    /// Fails with [`MathError::DegenerateVector`] when the squared length is
    /// at most `EPSILON²` or not finite, so a NaN "unit" vector can never
    /// escape.
    pub fn normalize(&self) -> Result<UnitVec3, MathError> {
        let len_sq = self.length_squared();
        if !len_sq.is_finite() || len_sq <= EPSILON * EPSILON {
            return Err(MathError::DegenerateVector);
        }
        Ok(UnitVec3(self.scale(1.0 / len_sq.sqrt())))
    }

    /// Linear blend `self + (to - self) * t`. `t` is not clamped.
    pub fn lerp(&self, to: &Self, t: f32) -> Self {
        (*to - *self) * t + *self
    }

    /// Returns `true` if any component is NaN.
    pub fn has_nan(&self) -> bool {
        self.data.iter().any(|c| c.is_nan())
    }

    /// Copy with X replaced by `x`.
    pub const fn with_x(&self, x: f32) -> Self {
        Self::new(x, self.y(), self.z())
    }

    /// Copy with Y replaced by `y`.
    pub const fn with_y(&self, y: f32) -> Self {
        Self::new(self.x(), y, self.z())
    }

    /// Copy with Z replaced by `z`.
    pub const fn with_z(&self, z: f32) -> Self {
        Self::new(self.x(), self.y(), z)
    }

    /// Copy with X zeroed.
    pub const fn with_zero_x(&self) -> Self {
        self.with_x(0.0)
    }

    /// Copy with Y zeroed.
    pub const fn with_zero_y(&self) -> Self {
        self.with_y(0.0)
    }

    /// Copy with Z zeroed.
    pub const fn with_zero_z(&self) -> Self {
        self.with_z(0.0)
    }

    /// Copy keeping only X.
    pub const fn with_only_x(&self) -> Self {
        Self::new(self.x(), 0.0, 0.0)
    }

    /// Copy keeping only Y.
    pub const fn with_only_y(&self) -> Self {
        Self::new(0.0, self.y(), 0.0)
    }

    /// Copy keeping only Z.
    pub const fn with_only_z(&self) -> Self {
        Self::new(0.0, 0.0, self.z())
    }

    /// Projection onto the XY plane.
    pub const fn xy(&self) -> Vec2 {
        Vec2::new(self.x(), self.y())
    }

    /// Projection onto the XZ (ground) plane.
    pub const fn xz(&self) -> Vec2 {
        Vec2::new(self.x(), self.z())
    }

    /// Appends `x, y, z` to `buffer`.
    pub fn write_to(&self, buffer: &mut ExportBuffer) {
        buffer.extend_from_slice(&self.data);
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(value: [f32; 3]) -> Self {
        Self { data: value }
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(value: Vec3) -> Self {
        value.data
    }
}

/// Componentwise sum.
impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x() + rhs.x(), self.y() + rhs.y(), self.z() + rhs.z())
    }
}

/// Componentwise difference.
impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x() - rhs.x(), self.y() - rhs.y(), self.z() - rhs.z())
    }
}

/// Componentwise (Hadamard) product.
impl Mul for Vec3 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(self.x() * rhs.x(), self.y() * rhs.y(), self.z() * rhs.z())
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self::Output {
        self.scale(rhs)
    }
}

/// Componentwise quotient; a zero component divides per IEEE 754.
impl Div for Vec3 {
    type Output = Self;
    fn div(self, rhs: Self) -> Self::Output {
        Self::new(self.x() / rhs.x(), self.y() / rhs.y(), self.z() / rhs.z())
    }
}

impl Div<f32> for Vec3 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self::Output {
        self.div_scalar(rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}

/// A [`Vec3`] whose length is 1 within float tolerance.
///
/// Only produced by [`Vec3::normalize`] and [`crate::Prng::next_unit_vec3`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UnitVec3(Vec3);

impl UnitVec3 {
    /// Unit vector along +X.
    pub const X: Self = Self(Vec3::UNIT_X);
    /// Unit vector along +Y.
    pub const Y: Self = Self(Vec3::UNIT_Y);
    /// Unit vector along +Z.
    pub const Z: Self = Self(Vec3::UNIT_Z);

    /// The underlying vector.
    pub const fn as_vec3(&self) -> Vec3 {
        self.0
    }

    /// X component.
    pub const fn x(&self) -> f32 {
        self.0.x()
    }

    /// Y component.
    pub const fn y(&self) -> f32 {
        self.0.y()
    }

    /// Z component.
    pub const fn z(&self) -> f32 {
        self.0.z()
    }

    /// Reversed direction; still unit length.
    pub fn flip(&self) -> Self {
        Self(-self.0)
    }
}

impl From<UnitVec3> for Vec3 {
    fn from(value: UnitVec3) -> Self {
        value.0
    }
}
