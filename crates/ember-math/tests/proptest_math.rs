// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]

use ember_math::{EulerAngles, Matrix, Quat, Vec3};
use proptest::prelude::*;

fn component() -> impl Strategy<Value = f32> {
    -100.0f32..100.0
}

fn vec3() -> impl Strategy<Value = Vec3> {
    (component(), component(), component()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn matrix(rows: usize, cols: usize) -> impl Strategy<Value = Matrix> {
    prop::collection::vec(-10.0f32..10.0, rows * cols)
        .prop_map(move |data| Matrix::from_row_major(rows, cols, data).unwrap())
}

fn angle() -> impl Strategy<Value = f32> {
    -core::f32::consts::PI..core::f32::consts::PI
}

proptest! {
    #[test]
    fn cross_is_orthogonal_to_both_inputs(a in vec3(), b in vec3()) {
        let c = a.cross(&b);
        let scale = (a.length_squared() * b.length_squared()).sqrt().max(1.0);
        prop_assert!(c.dot(&a).abs() <= 1e-3 * scale * a.length_squared().sqrt().max(1.0));
        prop_assert!(c.dot(&b).abs() <= 1e-3 * scale * b.length_squared().sqrt().max(1.0));
    }

    #[test]
    fn normalize_yields_unit_length(v in vec3()) {
        prop_assume!(v.length_squared() > 1e-6);
        let unit = v.normalize().unwrap().as_vec3();
        prop_assert!((unit.length_squared() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn column_major_is_row_major_of_transpose(
        rows in 1usize..6,
        cols in 1usize..6,
        seed in prop::collection::vec(-10.0f32..10.0, 36)
    ) {
        let m = Matrix::from_row_major(rows, cols, seed[..rows * cols].to_vec()).unwrap();
        prop_assert_eq!(m.to_column_major(), m.transpose().as_row_major().to_vec());
    }

    #[test]
    fn transpose_of_product_reverses_order(a in matrix(3, 4), b in matrix(4, 2)) {
        let lhs = a.multiply(&b).unwrap().transpose();
        let rhs = b.transpose().multiply(&a.transpose()).unwrap();
        prop_assert!(Matrix::is_equal(&lhs, &rhs, 1e-3));
    }

    #[test]
    fn quaternion_rotation_preserves_length(
        yaw in angle(),
        pitch in angle(),
        roll in angle(),
        v in vec3()
    ) {
        let q = EulerAngles::yaw_pitch_roll(yaw, pitch, roll).to_quat();
        let rotated = q.rotate(v);
        let before = v.length_squared().sqrt();
        let after = rotated.length_squared().sqrt();
        prop_assert!((before - after).abs() <= 1e-3 * before.max(1.0));
    }

    #[test]
    fn slerp_output_is_unit_and_finite(
        a in (angle(), angle(), angle()),
        b in (angle(), angle(), angle()),
        t in -1.0f32..2.0
    ) {
        let qa = EulerAngles::yaw_pitch_roll(a.0, a.1, a.2).to_quat();
        let qb = EulerAngles::yaw_pitch_roll(b.0, b.1, b.2).to_quat();
        let s = Quat::slerp(&qa, &qb, t);
        prop_assert!(!s.has_nan());
        prop_assert!((s.norm_squared() - 1.0).abs() < 1e-4);
    }
}
