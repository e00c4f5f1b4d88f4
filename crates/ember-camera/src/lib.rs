// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Ember cameras built on `ember-math`.

- `Camera`: position, rotation, and projection, with derived view matrices.
- `FixedCamera` and `LiveCamera` (which follows an entity-owned `Pose`).
- `InterpolatedCamera`: a timed transition between two cameras that
  signals completion once through `DoneSignal`.
- `CameraConfig`: JSON lens and transition settings.

Time is injected through the `Clock` trait so transitions can be driven
deterministically with `ManualClock`.
"]

mod camera;
mod clock;
mod config;
mod interpolated;
mod live;
mod signal;

pub use camera::{view_matrix_for, Camera, FixedCamera};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CameraConfig, ConfigError};
pub use interpolated::{CameraSample, InterpolatedCamera};
pub use live::{LiveCamera, Pose, TransformSource};
pub use signal::{DoneSignal, TransitionState};
