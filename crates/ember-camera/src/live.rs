// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Cameras that follow an externally owned transform.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use ember_math::{Matrix, Quat, Vec3};

use crate::Camera;

/// Read side of an entity transform.
pub trait TransformSource {
    /// Current world-space position.
    fn position(&self) -> Vec3;
    /// Current world-space orientation.
    fn rotation(&self) -> Quat;
}

macro_rules! forward_source {
    ($($ptr:ty),+ $(,)?) => {
        $(
            impl<S: TransformSource + ?Sized> TransformSource for $ptr {
                fn position(&self) -> Vec3 {
                    (**self).position()
                }
                fn rotation(&self) -> Quat {
                    (**self).rotation()
                }
            }
        )+
    };
}

forward_source!(&S, Rc<S>, Arc<S>);

/// Entity-owned transform that can be updated through a shared reference.
///
/// The owning entity writes through `set_*`; cameras holding `&Pose` see the
/// new values on their next query. Single-threaded by construction (`Cell`).
#[derive(Debug, Default, Clone)]
pub struct Pose {
    position: Cell<Vec3>,
    rotation: Cell<Quat>,
}

impl Pose {
    /// Creates a pose.
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            position: Cell::new(position),
            rotation: Cell::new(rotation),
        }
    }

    /// Moves the pose.
    pub fn set_position(&self, position: Vec3) {
        self.position.set(position);
    }

    /// Re-orients the pose.
    pub fn set_rotation(&self, rotation: Quat) {
        self.rotation.set(rotation);
    }
}

impl TransformSource for Pose {
    fn position(&self) -> Vec3 {
        self.position.get()
    }
    fn rotation(&self) -> Quat {
        self.rotation.get()
    }
}

/// Camera whose pose is read from a [`TransformSource`] on every query.
///
/// `S` is usually a borrow (`&Pose`) or a shared handle, so the camera never
/// owns or copies the entity's transform.
#[derive(Debug, Clone)]
pub struct LiveCamera<S> {
    source: S,
    projection: Matrix,
}

impl<S: TransformSource> LiveCamera<S> {
    /// Attaches a camera to `source`.
    pub const fn new(source: S, projection: Matrix) -> Self {
        Self { source, projection }
    }

    /// The observed transform.
    pub const fn source(&self) -> &S {
        &self.source
    }
}

impl<S: TransformSource> Camera for LiveCamera<S> {
    fn position(&self) -> Vec3 {
        self.source.position()
    }
    fn rotation(&self) -> Quat {
        self.source.rotation()
    }
    fn projection_matrix(&self) -> &Matrix {
        &self.projection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_observes_pose_updates() {
        let pose = Pose::new(Vec3::ZERO, Quat::identity());
        let cam = LiveCamera::new(&pose, Matrix::identity(4));
        assert_eq!(cam.position(), Vec3::ZERO);

        pose.set_position(Vec3::new(1.0, 2.0, 3.0));
        let turned = Quat::from_axis_angle(Vec3::UNIT_Y, 0.5);
        pose.set_rotation(turned);
        assert_eq!(cam.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(cam.rotation(), turned);
    }

    #[test]
    fn shared_source_is_not_copied() {
        let pose = Rc::new(Pose::default());
        let cam = LiveCamera::new(Rc::clone(&pose), Matrix::identity(4));
        pose.set_position(Vec3::ONE);
        assert_eq!(cam.position(), Vec3::ONE);
        assert_eq!(Rc::strong_count(&pose), 2);
    }
}
