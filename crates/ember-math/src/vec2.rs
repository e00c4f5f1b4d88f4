// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::{MathError, EPSILON};

/// Immutable 2D vector (screen space, ground-plane projections).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Vec2 {
    data: [f32; 2],
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a vector from components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { data: [x, y] }
    }

    /// X component.
    pub const fn x(&self) -> f32 {
        self.data[0]
    }

    /// Y component.
    pub const fn y(&self) -> f32 {
        self.data[1]
    }

    /// Returns the components as an array.
    pub const fn to_array(self) -> [f32; 2] {
        self.data
    }

    /// Scales the vector by a scalar.
    pub fn scale(&self, scalar: f32) -> Self {
        Self::new(self.x() * scalar, self.y() * scalar)
    }

    /// Dot product.
    pub fn dot(&self, other: &Self) -> f32 {
        self.x() * other.x() + self.y() * other.y()
    }

    /// Squared magnitude.
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Returns a unit-length copy, or [`MathError::DegenerateVector`] at zero.
    pub fn normalize(&self) -> Result<Self, MathError> {
        let len_sq = self.length_squared();
        if !len_sq.is_finite() || len_sq <= EPSILON * EPSILON {
            return Err(MathError::DegenerateVector);
        }
        Ok(self.scale(1.0 / len_sq.sqrt()))
    }

    /// Returns `true` if any component is NaN.
    pub fn has_nan(&self) -> bool {
        self.data.iter().any(|c| c.is_nan())
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from(value: [f32; 2]) -> Self {
        Self { data: value }
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x() + rhs.x(), self.y() + rhs.y())
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x() - rhs.x(), self.y() - rhs.y())
    }
}

impl Mul for Vec2 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(self.x() * rhs.x(), self.y() * rhs.y())
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self::Output {
        self.scale(rhs)
    }
}

impl Div for Vec2 {
    type Output = Self;
    fn div(self, rhs: Self) -> Self::Output {
        Self::new(self.x() / rhs.x(), self.y() / rhs.y())
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.x() / rhs, self.y() / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_rejects_zero() {
        assert_eq!(Vec2::ZERO.normalize(), Err(MathError::DegenerateVector));
        let n = Vec2::new(0.0, -2.0).normalize().unwrap();
        assert_eq!(n, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn arithmetic_matches_components() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, 4.0);
        assert_eq!(a + b, Vec2::new(4.0, 6.0));
        assert_eq!(b - a, Vec2::new(2.0, 2.0));
        assert_eq!(a * b, Vec2::new(3.0, 8.0));
        assert_eq!(b / 2.0, Vec2::new(1.5, 2.0));
        assert_eq!(a.dot(&b), 11.0);
    }
}
