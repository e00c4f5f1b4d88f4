// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The camera capability and a fixed-pose implementation.

use std::rc::Rc;
use std::sync::Arc;

use ember_math::{MathError, Matrix, Quat, Vec3};

/// Anything that can be rendered from: a pose plus a projection.
///
/// Implementors provide position, orientation, and a projection matrix; the
/// view and combined matrices are derived. Cameras are read-only through
/// this trait, so the same value can back several consumers.
pub trait Camera {
    /// World-space position.
    fn position(&self) -> Vec3;

    /// World-space orientation.
    fn rotation(&self) -> Quat;

    /// Projection matrix (4×4).
    fn projection_matrix(&self) -> &Matrix;

    /// World-to-camera transform; see [`view_matrix_for`].
    fn view_matrix(&self) -> Matrix {
        view_matrix_for(self.position(), self.rotation())
    }

    /// `projection * view`.
    fn view_projection(&self) -> Result<Matrix, MathError> {
        self.projection_matrix().multiply(&self.view_matrix())
    }
}

/// Inverse of the rigid transform placing a camera at `position` with
/// orientation `rotation`: `Rᵀ · T(-position)`.
pub fn view_matrix_for(position: Vec3, rotation: Quat) -> Matrix {
    let inverse = rotation.normalize().conjugate();
    inverse.to_transform_matrix(-inverse.rotate(position))
}

macro_rules! forward_camera {
    ($($ptr:ty),+ $(,)?) => {
        $(
            impl<C: Camera + ?Sized> Camera for $ptr {
                fn position(&self) -> Vec3 {
                    (**self).position()
                }
                fn rotation(&self) -> Quat {
                    (**self).rotation()
                }
                fn projection_matrix(&self) -> &Matrix {
                    (**self).projection_matrix()
                }
                fn view_matrix(&self) -> Matrix {
                    (**self).view_matrix()
                }
                fn view_projection(&self) -> Result<Matrix, MathError> {
                    (**self).view_projection()
                }
            }
        )+
    };
}

forward_camera!(&C, Box<C>, Rc<C>, Arc<C>);

/// Camera with a pose fixed at construction.
///
/// Used as the destination of a transition and in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedCamera {
    position: Vec3,
    rotation: Quat,
    projection: Matrix,
}

impl FixedCamera {
    /// Creates a camera at `position` facing along `rotation`.
    pub fn new(position: Vec3, rotation: Quat, projection: Matrix) -> Self {
        Self {
            position,
            rotation: rotation.normalize(),
            projection,
        }
    }

    /// Captures the current pose and projection of any camera.
    pub fn snapshot<C: Camera + ?Sized>(camera: &C) -> Self {
        Self::new(
            camera.position(),
            camera.rotation(),
            camera.projection_matrix().clone(),
        )
    }
}

impl Camera for FixedCamera {
    fn position(&self) -> Vec3 {
        self.position
    }
    fn rotation(&self) -> Quat {
        self.rotation
    }
    fn projection_matrix(&self) -> &Matrix {
        &self.projection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;

    #[test]
    fn view_matrix_moves_camera_to_origin() {
        let cam = FixedCamera::new(
            Vec3::new(3.0, 1.0, -2.0),
            Quat::from_axis_angle(Vec3::UNIT_Y, FRAC_PI_2),
            Matrix::identity(4),
        );
        let p = cam.view_matrix().transform_point(cam.position()).unwrap();
        assert!(p.length_squared() < 1e-10, "{p:?}");
    }

    #[test]
    fn view_matrix_undoes_camera_rotation() {
        let rotation = Quat::from_axis_angle(Vec3::UNIT_Y, FRAC_PI_2);
        let cam = FixedCamera::new(Vec3::ZERO, rotation, Matrix::identity(4));
        // The camera's local +Z in world space maps back to +Z in view space.
        let world_forward = rotation.rotate(Vec3::UNIT_Z);
        let p = cam.view_matrix().transform_point(world_forward).unwrap();
        assert!(p.distance_squared(&Vec3::UNIT_Z) < 1e-10, "{p:?}");
    }

    #[test]
    fn smart_pointers_forward_to_the_camera() {
        let cam = FixedCamera::new(Vec3::ONE, Quat::identity(), Matrix::identity(4));
        let boxed: Box<dyn Camera> = Box::new(cam.clone());
        let shared = Arc::new(cam.clone());
        assert_eq!(boxed.position(), Vec3::ONE);
        assert_eq!(shared.view_matrix(), cam.view_matrix());
        assert_eq!(FixedCamera::snapshot(&shared), cam);
    }

    /// Reports a fixed combined matrix regardless of its pose.
    struct PinnedCamera(FixedCamera, Matrix);

    impl Camera for PinnedCamera {
        fn position(&self) -> Vec3 {
            self.0.position()
        }
        fn rotation(&self) -> Quat {
            self.0.rotation()
        }
        fn projection_matrix(&self) -> &Matrix {
            self.0.projection_matrix()
        }
        fn view_projection(&self) -> Result<Matrix, MathError> {
            Ok(self.1.clone())
        }
    }

    #[test]
    fn smart_pointers_keep_overridden_view_projection() {
        let pinned = Matrix::scaling(Vec3::new(3.0, 3.0, 3.0));
        let cam = || {
            PinnedCamera(
                FixedCamera::new(Vec3::ONE, Quat::identity(), Matrix::identity(4)),
                pinned.clone(),
            )
        };
        fn combined<C: Camera>(camera: C) -> Matrix {
            camera.view_projection().unwrap()
        }
        let direct = cam();
        let boxed: Box<dyn Camera> = Box::new(cam());
        let shared: Arc<dyn Camera> = Arc::new(cam());
        assert_eq!(combined(&direct), pinned);
        assert_eq!(combined(boxed), pinned);
        assert_eq!(combined(Rc::new(cam())), pinned);
        assert_eq!(combined(shared), pinned);
        assert_ne!(combined(&direct.0), pinned);
    }

    #[test]
    fn view_projection_applies_projection_last() {
        let cam = FixedCamera::new(
            Vec3::new(0.0, 0.0, 5.0),
            Quat::identity(),
            Matrix::scaling(Vec3::new(2.0, 2.0, 2.0)),
        );
        let vp = cam.view_projection().unwrap();
        let p = vp.transform_point(Vec3::ZERO).unwrap();
        assert!(p.distance_squared(&Vec3::new(0.0, 0.0, -10.0)) < 1e-10);
    }
}
