// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::{EulerAngles, UnitVec3, Vec3};

/// Seeded `xoroshiro128+` generator for sampling angles and directions.
///
/// * Not cryptographically secure; meant for camera shake, spawn jitter, and
///   randomized test sweeps.
/// * Matching seeds yield identical sequences on every platform.
#[derive(Debug, Clone, Copy)]
pub struct Prng {
    state: [u64; 2],
}

impl Prng {
    /// Largest pitch magnitude produced by [`Prng::next_yaw_pitch_roll`]:
    /// one hundredth of a radian short of the gimbal-lock pole.
    pub const MAX_PITCH: f32 = FRAC_PI_2 - 0.01;

    /// Constructs a generator from a single 64-bit seed via SplitMix64
    /// expansion.
    pub fn from_seed(seed: u64) -> Self {
        fn splitmix64(state: &mut u64) -> u64 {
            *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
            let mut z = *state;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
            z ^ (z >> 31)
        }

        let mut sm_state = seed;
        let mut state = [splitmix64(&mut sm_state), splitmix64(&mut sm_state)];
        if state == [0, 0] {
            state[0] = 0x9e37_79b9_7f4a_7c15;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(55) ^ s1 ^ (s1 << 14);
        self.state[1] = s1.rotate_left(36);

        result
    }

    /// Returns the next float in `[0, 1)`.
    ///
    /// The high 23 bits fill the mantissa of a float in `[1, 2)`.
    pub fn next_f32(&mut self) -> f32 {
        let raw = self.next_u64();
        #[allow(clippy::cast_possible_truncation)]
        let bits = ((raw >> 41) as u32) | 0x3f80_0000;
        f32::from_bits(bits) - 1.0
    }

    /// Uniform float in `[min, max)`.
    pub fn next_range(&mut self, min: f32, max: f32) -> f32 {
        (max - min).mul_add(self.next_f32(), min)
    }

    /// Uniform angle in `[-π, π)`.
    pub fn next_angle(&mut self) -> f32 {
        self.next_f32().mul_add(TAU, -PI)
    }

    /// Random yaw/pitch/roll with yaw and roll in `[-π, π)` and pitch in
    /// `[-MAX_PITCH, MAX_PITCH)`, i.e. away from gimbal lock.
    pub fn next_yaw_pitch_roll(&mut self) -> EulerAngles {
        let yaw = self.next_angle();
        let pitch = self.next_range(-Self::MAX_PITCH, Self::MAX_PITCH);
        let roll = self.next_angle();
        EulerAngles::yaw_pitch_roll(yaw, pitch, roll)
    }

    /// Direction uniformly distributed on the unit sphere.
    pub fn next_unit_vec3(&mut self) -> UnitVec3 {
        // z uniform in [-1, 1) and a uniform azimuth give a uniform sphere.
        let z = self.next_range(-1.0, 1.0);
        let azimuth = self.next_angle();
        let ring = (1.0 - z * z).max(0.0).sqrt();
        let (s, c) = azimuth.sin_cos();
        match Vec3::new(ring * c, ring * s, z).normalize() {
            Ok(unit) => unit,
            Err(_) => UnitVec3::Z,
        }
    }
}
