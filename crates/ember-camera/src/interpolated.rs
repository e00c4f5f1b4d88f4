// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Time-based transition between two cameras.

use std::time::{Duration, Instant};

use ember_math::{saturate, Matrix, Quat, Vec3};
use tracing::{debug, info, trace};

use crate::{view_matrix_for, Camera, Clock, DoneSignal, SystemClock, TransitionState};

/// One consistent reading of an [`InterpolatedCamera`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraSample {
    /// Progress in `[0, 1]`.
    pub t: f32,
    /// Transition state at the time of the reading.
    pub state: TransitionState,
    /// Interpolated position.
    pub position: Vec3,
    /// Interpolated orientation.
    pub rotation: Quat,
}

/// Camera that moves from `from` to `to` over `duration`, starting at
/// `start`.
///
/// Position is linear in `t`; orientation follows the shortest-arc slerp.
/// The projection is always the destination's. Once `t` reaches 1 the
/// transition is done for good: every later reading returns the destination
/// pose exactly, and the completion listeners run once.
///
/// Time comes from `C`, [`SystemClock`] unless a test clock is injected via
/// [`InterpolatedCamera::with_clock`].
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use ember_camera::{Camera, FixedCamera, InterpolatedCamera, ManualClock};
/// use ember_math::{Matrix, Quat, Vec3};
///
/// let clock = ManualClock::new();
/// let from = FixedCamera::new(Vec3::ZERO, Quat::identity(), Matrix::identity(4));
/// let to = FixedCamera::new(Vec3::new(10.0, 0.0, 0.0), Quat::identity(), Matrix::identity(4));
/// let cam = InterpolatedCamera::with_clock(from, to, clock.origin(), Duration::from_secs(1), &clock);
///
/// clock.advance(Duration::from_millis(500));
/// assert_eq!(cam.position(), Vec3::new(5.0, 0.0, 0.0));
/// ```
#[derive(Debug)]
pub struct InterpolatedCamera<F, T, C = SystemClock> {
    from: F,
    to: T,
    start: Instant,
    duration: Duration,
    clock: C,
    signal: DoneSignal,
}

impl<F: Camera, T: Camera> InterpolatedCamera<F, T, SystemClock> {
    /// Transition driven by the wall clock.
    pub fn new(from: F, to: T, start: Instant, duration: Duration) -> Self {
        Self::with_clock(from, to, start, duration, SystemClock)
    }
}

impl<F: Camera, T: Camera, C: Clock> InterpolatedCamera<F, T, C> {
    /// Transition driven by `clock`.
    pub fn with_clock(from: F, to: T, start: Instant, duration: Duration, clock: C) -> Self {
        debug!(
            ?duration,
            from = ?from.position().to_array(),
            to = ?to.position().to_array(),
            "camera transition created"
        );
        Self {
            from,
            to,
            start,
            duration,
            clock,
            signal: DoneSignal::new(),
        }
    }

    /// Progress at the current instant, saturated to `[0, 1]`.
    ///
    /// Reaching 1 completes the transition. A zero `duration` is complete on
    /// the first query; an instant before `start` reads as 0.
    pub fn calc_t(&self) -> f32 {
        self.progress_at(self.clock.now())
    }

    fn progress_at(&self, now: Instant) -> f32 {
        if self.signal.is_done() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        let raw = if self.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f32() / self.duration.as_secs_f32()
        };
        if raw >= 1.0 {
            self.finish(elapsed);
            return 1.0;
        }
        saturate(raw)
    }

    fn finish(&self, elapsed: Duration) {
        if self.signal.complete() {
            info!(?elapsed, duration = ?self.duration, "camera transition complete");
        }
    }

    /// Reads the clock once and derives every output from that reading.
    pub fn sample(&self) -> CameraSample {
        let t = self.progress_at(self.clock.now());
        if self.signal.is_done() {
            return CameraSample {
                t: 1.0,
                state: TransitionState::Done,
                position: self.to.position(),
                rotation: self.to.rotation(),
            };
        }
        let position = self.from.position().lerp(&self.to.position(), t);
        let rotation = Quat::slerp(&self.from.rotation(), &self.to.rotation(), t);
        trace!(t, "camera sample");
        CameraSample {
            t,
            state: TransitionState::InProgress,
            position,
            rotation,
        }
    }

    /// Returns `true` once the transition has completed.
    ///
    /// Only a query (`calc_t`, `sample`, or a `Camera` method) can complete
    /// the transition; this accessor does not read the clock.
    pub fn is_done(&self) -> bool {
        self.signal.is_done()
    }

    /// Current transition state; see [`InterpolatedCamera::is_done`].
    pub fn state(&self) -> TransitionState {
        self.signal.state()
    }

    /// Runs `listener` once when the transition completes, or immediately if
    /// it already has.
    pub fn on_done<L>(&self, listener: L)
    where
        L: FnOnce(TransitionState) + Send + 'static,
    {
        self.signal.subscribe(listener);
    }

    /// Completion signal shared by every listener.
    pub const fn done_signal(&self) -> &DoneSignal {
        &self.signal
    }

    /// Source camera.
    pub const fn from(&self) -> &F {
        &self.from
    }

    /// Destination camera.
    pub const fn to(&self) -> &T {
        &self.to
    }

    /// Instant at which `t = 0`.
    pub const fn start(&self) -> Instant {
        self.start
    }

    /// Length of the transition.
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Injected clock.
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Drops the transition and hands back the destination camera, which is
    /// what consumers swap to once the transition is done.
    pub fn into_destination(self) -> T {
        self.to
    }
}

impl<F: Camera, T: Camera, C: Clock> Camera for InterpolatedCamera<F, T, C> {
    fn position(&self) -> Vec3 {
        self.sample().position
    }

    fn rotation(&self) -> Quat {
        self.sample().rotation
    }

    fn projection_matrix(&self) -> &Matrix {
        self.to.projection_matrix()
    }

    fn view_matrix(&self) -> Matrix {
        let sample = self.sample();
        view_matrix_for(sample.position, sample.rotation)
    }
}
