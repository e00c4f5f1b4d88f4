// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::ops::{Mul, Neg};

use crate::{
    wrap_angle, Axis, EulerAngles, EulerConvention, Matrix, Vec3, EPSILON, GIMBAL_THRESHOLD,
};

/// Quaternion stored as `(x, y, z, w)`.
///
/// * All angles are expressed in radians.
/// * Treated as a unit quaternion whenever it represents a rotation; only
///   [`Quat::pow`] of a non-unit input yields a non-unit result.
/// * `a * b` applies `b` first, then `a`, so the rotation matrix of `a * b`
///   is `M(a) · M(b)`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Quat {
    data: [f32; 4],
}

impl Quat {
    /// Creates a quaternion from components.
    ///
    /// Use [`Quat::from_axis_angle`] or [`Quat::from_euler`] for rotations.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Returns the identity quaternion.
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Returns the quaternion as an `(x, y, z, w)` array.
    pub const fn to_array(self) -> [f32; 4] {
        self.data
    }

    /// Vector part, X.
    pub const fn x(&self) -> f32 {
        self.data[0]
    }

    /// Vector part, Y.
    pub const fn y(&self) -> f32 {
        self.data[1]
    }

    /// Vector part, Z.
    pub const fn z(&self) -> f32 {
        self.data[2]
    }

    /// Scalar part.
    pub const fn w(&self) -> f32 {
        self.data[3]
    }

    /// Vector part `(x, y, z)`.
    pub const fn vector(&self) -> Vec3 {
        Vec3::new(self.x(), self.y(), self.z())
    }

    /// Rotation of `angle` radians about `axis`.
    ///
    /// Returns the identity when the axis length is ≤ `EPSILON`.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let Ok(unit) = axis.normalize() else {
            return Self::identity();
        };
        let (sin_half, cos_half) = (angle * 0.5).sin_cos();
        let v = unit.as_vec3().scale(sin_half);
        Self::new(v.x(), v.y(), v.z(), cos_half)
    }

    /// Composite rotation for `angles`.
    ///
    /// Each elemental rotation becomes an axis-angle quaternion and the three
    /// are composed outermost first: for [`EulerConvention::YAW_PITCH_ROLL`]
    /// this is `yaw * (pitch * roll)`. Finite input never yields NaN,
    /// including pitch at ±π/2.
    pub fn from_euler(angles: &EulerAngles) -> Self {
        let [outer, middle, inner] = angles.convention().axes();
        let elemental = |axis: Axis| Self::from_axis_angle(axis.unit(), angles.angle(axis));
        elemental(outer).multiply(&elemental(middle).multiply(&elemental(inner)))
    }

    /// Decomposes into [`EulerConvention::YAW_PITCH_ROLL`] angles.
    pub fn to_euler_angles(&self) -> EulerAngles {
        self.to_euler(EulerConvention::YAW_PITCH_ROLL)
    }

    /// Decomposes into angles under `convention`.
    ///
    /// Every angle comes from `atan2`, so the result never contains NaN. The
    /// middle angle lands in `[-π/2, π/2]`, the others in `(-π, π]`. The
    /// middle and inner angles are read off the rotation matrix; the outer
    /// angle is whatever rotation remains once those two are undone, so any
    /// error in the inner angle near the pole is absorbed rather than
    /// compounded. When the middle angle's cosine drops below
    /// [`GIMBAL_THRESHOLD`] the outer and inner axes coincide; the inner angle
    /// is pinned to 0 and the outer angle carries the combined rotation.
    pub fn to_euler(&self, convention: EulerConvention) -> EulerAngles {
        let [outer, middle, inner] = convention.axes();
        let (i, j, k) = (outer.index(), middle.index(), inner.index());
        let s = if convention.is_cyclic() { 1.0 } else { -1.0 };
        let q = self.normalize();
        let r = q.rotation_3x3();

        let cos_middle = r[i][i].hypot(r[i][j]);
        let middle_angle = (s * r[i][k]).atan2(cos_middle);
        let inner_angle = if cos_middle > GIMBAL_THRESHOLD {
            (-s * r[i][j]).atan2(r[i][i])
        } else {
            0.0
        };

        // q = outer * (middle * inner), so the residual is a pure outer turn.
        let tail = Self::from_axis_angle(middle.unit(), middle_angle)
            .multiply(&Self::from_axis_angle(inner.unit(), inner_angle));
        let head = q.multiply(&tail.conjugate());
        let outer_angle = wrap_angle(2.0 * head.data[i].atan2(head.w()));

        let mut angles = [0.0; 3];
        angles[i] = outer_angle;
        angles[j] = middle_angle;
        angles[k] = inner_angle;
        EulerAngles::new(Vec3::from(angles), convention)
    }

    /// Hamilton product `self * other`: applies `other`, then `self`.
    ///
    /// Inputs need not be normalized; for unit inputs the result is the
    /// composed rotation (re-normalize over long chains).
    ///
    /// # Examples
    /// ```
    /// use core::f32::consts::FRAC_PI_2;
    /// use ember_math::{Quat, Vec3};
    /// let yaw = Quat::from_axis_angle(Vec3::UNIT_Y, FRAC_PI_2);
    /// let pitch = Quat::from_axis_angle(Vec3::UNIT_X, FRAC_PI_2);
    /// // Non-commutative: pitch*yaw is different
    /// assert_ne!(yaw.multiply(&pitch), pitch.multiply(&yaw));
    /// ```
    pub fn multiply(&self, other: &Self) -> Self {
        let (ax, ay, az, aw) = (self.x(), self.y(), self.z(), self.w());
        let (bx, by, bz, bw) = (other.x(), other.y(), other.z(), other.w());
        Self::new(
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by - ax * bz + ay * bw + az * bx,
            aw * bz + ax * by - ay * bx + az * bw,
            aw * bw - ax * bx - ay * by - az * bz,
        )
    }

    /// Negates the vector part. For a unit quaternion this is the inverse
    /// rotation.
    pub const fn conjugate(&self) -> Self {
        Self::new(-self.x(), -self.y(), -self.z(), self.w())
    }

    /// Four-component dot product.
    pub fn dot(&self, other: &Self) -> f32 {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z() + self.w() * other.w()
    }

    /// Squared norm.
    pub fn norm_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Normalises the quaternion; returns identity when the norm is ~0 or not
    /// finite.
    pub fn normalize(&self) -> Self {
        let len_sq = self.norm_squared();
        if !len_sq.is_finite() || len_sq <= EPSILON * EPSILON {
            return Self::identity();
        }
        self.scale(1.0 / len_sq.sqrt())
    }

    fn scale(&self, s: f32) -> Self {
        Self::new(self.x() * s, self.y() * s, self.z() * s, self.w() * s)
    }

    /// Fractional power via the polar form.
    ///
    /// With `q = |q| (cos θ, n sin θ)` this returns
    /// `|q|^t (cos tθ, n sin tθ)`. A vector part shorter than `EPSILON` has
    /// no usable axis, so the result is the positive scalar `|q|^t` and the
    /// sign of `w` is dropped: `(0, 0, 0, -1).pow(1.0)` is the identity, which
    /// is the same rotation but not the same quaternion.
    pub fn pow(&self, t: f32) -> Self {
        let v = self.vector();
        let v_len_sq = v.length_squared();
        let norm = self.norm_squared().sqrt();
        let scaled_norm = norm.powf(t);
        if v_len_sq <= EPSILON * EPSILON {
            return Self::new(0.0, 0.0, 0.0, scaled_norm);
        }
        let v_len = v_len_sq.sqrt();
        let theta = v_len.atan2(self.w());
        let (sin_t, cos_t) = (theta * t).sin_cos();
        let axis = v.scale(scaled_norm * sin_t / v_len);
        Self::new(axis.x(), axis.y(), axis.z(), scaled_norm * cos_t)
    }

    /// Spherical linear interpolation along the shortest arc.
    ///
    /// Computes `a · (a⁻¹ · b)^t`, flipping `b` first when `a · b < 0` so the
    /// path never goes the long way round. `t` is not clamped; values outside
    /// `[0, 1]` extrapolate along the same great circle. Identical or
    /// antipodal inputs hit the degenerate branch of [`Quat::pow`] and return
    /// `a`, never NaN.
    pub fn slerp(a: &Self, b: &Self, t: f32) -> Self {
        let b = if a.dot(b) < 0.0 { -*b } else { *b };
        let delta = a.conjugate().multiply(&b);
        a.multiply(&delta.pow(t)).normalize()
    }

    /// Normalized linear blend along the shortest arc. Cheaper than
    /// [`Quat::slerp`] but not constant-velocity.
    pub fn nlerp(a: &Self, b: &Self, t: f32) -> Self {
        let b = if a.dot(b) < 0.0 { -*b } else { *b };
        let blend = |x: f32, y: f32| x + (y - x) * t;
        Self::new(
            blend(a.x(), b.x()),
            blend(a.y(), b.y()),
            blend(a.z(), b.z()),
            blend(a.w(), b.w()),
        )
        .normalize()
    }

    /// Rotates `v` by this quaternion.
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let u = self.vector();
        let w = self.w();
        // v + 2w(u × v) + 2u × (u × v)
        let uv = u.cross(&v);
        let uuv = u.cross(&uv);
        v + uv * (2.0 * w) + uuv * 2.0
    }

    /// Upper-left 3×3 of the rotation matrix as rows.
    fn rotation_3x3(&self) -> [[f32; 3]; 3] {
        let (x, y, z, w) = (self.x(), self.y(), self.z(), self.w());
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);
        [
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz), 2.0 * (xz + wy)],
            [2.0 * (xy + wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx)],
            [2.0 * (xz - wy), 2.0 * (yz + wx), 1.0 - 2.0 * (xx + yy)],
        ]
    }

    /// 4×4 rotation matrix (bottom-right entry 1, no translation).
    ///
    /// The quaternion is normalized first.
    pub fn to_rotation_matrix(&self) -> Matrix {
        self.to_transform_matrix(Vec3::ZERO)
    }

    /// Rigid 4×4 transform: rotate by this quaternion, then translate by
    /// `translation` (last column).
    pub fn to_transform_matrix(&self, translation: Vec3) -> Matrix {
        let r = self.normalize().rotation_3x3();
        let t = translation;
        Matrix::from_parts(
            4,
            4,
            vec![
                r[0][0], r[0][1], r[0][2], t.x(), //
                r[1][0], r[1][1], r[1][2], t.y(), //
                r[2][0], r[2][1], r[2][2], t.z(), //
                0.0, 0.0, 0.0, 1.0,
            ],
        )
    }

    /// Returns `true` if any component is NaN.
    pub fn has_nan(&self) -> bool {
        self.data.iter().any(|c| c.is_nan())
    }

    /// Componentwise tolerance comparison (sign-sensitive).
    pub fn approx_eq(a: &Self, b: &Self, tolerance: f32) -> bool {
        a.data
            .iter()
            .zip(&b.data)
            .all(|(x, y)| (x - y).abs() <= tolerance)
    }

    /// `true` when `a` and `b` describe the same rotation (`q` and `-q`
    /// included): `1 - |a · b| ≤ tolerance` after normalization.
    pub fn same_rotation(a: &Self, b: &Self, tolerance: f32) -> bool {
        1.0 - a.normalize().dot(&b.normalize()).abs() <= tolerance
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::identity()
    }
}

/// Converts a 4‑element `[f32; 4]` array `(x, y, z, w)` into a `Quat`.
/// The components are taken verbatim; normalization is not enforced.
impl From<[f32; 4]> for Quat {
    fn from(value: [f32; 4]) -> Self {
        Self { data: value }
    }
}

impl Mul for Quat {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl Neg for Quat {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::{FRAC_PI_2, PI};

    const TOLERANCE: f32 = 1e-5;

    #[test]
    fn identity_properties() {
        let id = Quat::identity();
        assert_eq!(id.multiply(&id), id);
        assert_eq!(id.to_rotation_matrix(), Matrix::identity(4));
        assert_eq!(id.pow(0.37), id);
    }

    #[test]
    fn conjugate_inverts_unit_rotation() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 2.0, 3.0), 0.8);
        let r = q.conjugate().multiply(&q);
        assert!(Quat::approx_eq(&r, &Quat::identity(), TOLERANCE));
    }

    #[test]
    fn pow_scales_the_angle() {
        let q = Quat::from_axis_angle(Vec3::UNIT_Z, FRAC_PI_2);
        let half = q.pow(0.5);
        let expected = Quat::from_axis_angle(Vec3::UNIT_Z, FRAC_PI_2 * 0.5);
        assert!(Quat::approx_eq(&half, &expected, TOLERANCE));
        let back = half.multiply(&half);
        assert!(Quat::approx_eq(&back, &q, TOLERANCE));
    }

    #[test]
    fn pow_of_non_unit_scales_norm() {
        let q = Quat::new(0.0, 0.0, 0.0, 4.0);
        assert!(Quat::approx_eq(&q.pow(0.5), &Quat::new(0.0, 0.0, 0.0, 2.0), TOLERANCE));
    }

    #[test]
    fn pow_of_negative_scalar_drops_the_sign() {
        let minus_one = Quat::new(0.0, 0.0, 0.0, -1.0);
        for t in [0.5, 1.0, 2.0, 3.0] {
            let p = minus_one.pow(t);
            assert_eq!(p, Quat::identity(), "t = {t}");
            assert!(Quat::same_rotation(&p, &minus_one, TOLERANCE));
        }
    }

    #[test]
    fn slerp_hits_endpoints() {
        let a = Quat::from_axis_angle(Vec3::UNIT_Y, 0.3);
        let b = Quat::from_axis_angle(Vec3::UNIT_Y, 1.7);
        assert!(Quat::approx_eq(&Quat::slerp(&a, &b, 0.0), &a, TOLERANCE));
        assert!(Quat::approx_eq(&Quat::slerp(&a, &b, 1.0), &b, TOLERANCE));
        let mid = Quat::slerp(&a, &b, 0.5);
        let expected = Quat::from_axis_angle(Vec3::UNIT_Y, 1.0);
        assert!(Quat::approx_eq(&mid, &expected, TOLERANCE));
    }

    #[test]
    fn slerp_takes_the_short_arc_for_antipodal_inputs() {
        let a = Quat::from_axis_angle(Vec3::UNIT_X, 0.5);
        let b = -a;
        for t in [-0.5, 0.0, 0.25, 1.0, 1.5] {
            let s = Quat::slerp(&a, &b, t);
            assert!(!s.has_nan());
            assert!(Quat::same_rotation(&s, &a, TOLERANCE));
        }
    }

    #[test]
    fn rotate_matches_rotation_matrix() {
        let q = Quat::from_axis_angle(Vec3::new(0.3, -1.0, 0.2), 1.1);
        let v = Vec3::new(1.0, 2.0, -0.5);
        let by_quat = q.rotate(v);
        let by_matrix = q.to_rotation_matrix().transform_point(v).unwrap();
        assert!(by_quat.distance_squared(&by_matrix) < 1e-10);
    }

    #[test]
    fn transform_matrix_rotates_then_translates() {
        let q = Quat::from_axis_angle(Vec3::UNIT_Y, FRAC_PI_2);
        let m = q.to_transform_matrix(Vec3::new(0.0, 5.0, 0.0));
        let p = m.transform_point(Vec3::UNIT_Z).unwrap();
        assert!(p.distance_squared(&Vec3::new(1.0, 5.0, 0.0)) < 1e-10);
    }

    #[test]
    fn zero_axis_is_identity() {
        assert_eq!(Quat::from_axis_angle(Vec3::ZERO, PI), Quat::identity());
    }

    #[test]
    fn normalize_of_zero_is_identity() {
        assert_eq!(Quat::new(0.0, 0.0, 0.0, 0.0).normalize(), Quat::identity());
    }

    #[test]
    fn yaw_turns_forward_toward_plus_x() {
        // Yaw=90°: +Z maps to +X
        let q = Quat::from_euler(&EulerAngles::yaw_pitch_roll(FRAC_PI_2, 0.0, 0.0));
        let v = q.rotate(Vec3::UNIT_Z);
        assert!(v.distance_squared(&Vec3::UNIT_X) < 1e-10);
    }
}
