// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Reusable float scratch buffer for the per-frame upload path.

use crate::{Matrix, Vec3};

/// Growable `f32` buffer reused across frames to avoid per-upload allocation.
///
/// Layout contract with the renderer:
/// - [`ExportBuffer::put_matrix`] appends entries column-major (outer loop over
///   columns, inner loop over rows).
/// - [`ExportBuffer::put_vec3`] appends `x, y, z`.
///
/// Reuse requires `&mut self`, so a single buffer can never be filled from
/// two threads at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportBuffer {
    data: Vec<f32>,
}

impl ExportBuffer {
    /// Creates an empty buffer with room for `capacity` floats.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Drops the contents but keeps the allocation.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Appends a single float.
    pub fn push(&mut self, value: f32) {
        self.data.push(value);
    }

    pub(crate) fn extend_from_slice(&mut self, values: &[f32]) {
        self.data.extend_from_slice(values);
    }

    /// Appends `matrix` in column-major order.
    pub fn put_matrix(&mut self, matrix: &Matrix) {
        matrix.write_column_major(self);
    }

    /// Appends `vector` as `x, y, z`.
    pub fn put_vec3(&mut self, vector: Vec3) {
        vector.write_to(self);
    }

    /// Clears the buffer, writes `matrix`, and returns the filled slice.
    pub fn load_matrix(&mut self, matrix: &Matrix) -> &[f32] {
        self.clear();
        self.put_matrix(matrix);
        &self.data
    }

    /// Contents as floats.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Contents as native-endian bytes, ready for a GPU upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Number of floats written.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
