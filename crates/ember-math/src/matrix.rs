// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;
use core::ops::{Index, Mul};

use once_cell::sync::Lazy;

use crate::{EulerAngles, ExportBuffer, MathError, Shape, Vec3};

/// Shared 4×4 identity.
pub static IDENTITY_4: Lazy<Matrix> = Lazy::new(|| Matrix::identity(4));

/// Shared 4×4 zero matrix.
pub static ZERO_4: Lazy<Matrix> = Lazy::new(|| Matrix::zeros(4, 4));

/// Immutable dense `rows × cols` matrix of `f32`.
///
/// - Stored row-major internally; the export path is column-major (see
///   [`Matrix::write_column_major`]).
/// - `PartialEq` is exact and shape-aware. Use [`Matrix::is_equal`] for
///   numeric comparisons.
/// - For in-place accumulation use [`crate::MatrixBuf`].
///
/// # Examples
/// ```
/// use ember_math::{Matrix, Vec3};
/// let t = Matrix::translation(Vec3::new(5.0, -3.0, 2.0));
/// let p = t.transform_point(Vec3::new(2.0, 4.0, -1.0)).unwrap();
/// assert_eq!(p.to_array(), [7.0, 1.0, 1.0]);
/// ```
#[derive(Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Zero-filled `rows × cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Square identity of the given size.
    pub fn identity(size: usize) -> Self {
        let mut m = Self::zeros(size, size);
        for i in 0..size {
            m.data[i * size + i] = 1.0;
        }
        m
    }

    /// Builds a matrix from row-major data, checking the length.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self, MathError> {
        if data.len() != rows * cols {
            return Err(MathError::ShapeMismatch {
                expected: rows * cols,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix from nested rows; every row must have the same width.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self, MathError> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(MathError::RaggedRows {
                    row: idx,
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    pub(crate) const fn from_parts(rows: usize, cols: usize, data: Vec<f32>) -> Self {
        Self { rows, cols, data }
    }

    pub(crate) fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Builds a 4×4 matrix from rows without a length check.
    fn from_4x4(rows: [[f32; 4]; 4]) -> Self {
        Self::from_parts(4, 4, rows.concat())
    }

    /// Number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub const fn shape(&self) -> Shape {
        (self.rows, self.cols)
    }

    /// Entry at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Row-major view of the entries.
    pub fn as_row_major(&self) -> &[f32] {
        &self.data
    }

    pub(crate) fn at(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    /// Matrix product `self * rhs`.
    ///
    /// Fails with [`MathError::DimensionMismatch`] unless
    /// `self.cols() == rhs.rows()`.
    pub fn multiply(&self, rhs: &Self) -> Result<Self, MathError> {
        if self.cols != rhs.rows {
            return Err(MathError::DimensionMismatch {
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        let mut out = Self::zeros(self.rows, rhs.cols);
        multiply_into(&mut out.data, self, rhs);
        Ok(out)
    }

    /// Transforms a point as the homogeneous column `(x, y, z, 1)`.
    ///
    /// Only the first three rows are evaluated (no perspective divide), so
    /// the matrix needs exactly 4 columns and at least 3 rows.
    pub fn transform_point(&self, point: Vec3) -> Result<Vec3, MathError> {
        if self.cols != 4 || self.rows < 3 {
            return Err(MathError::DimensionMismatch {
                left: self.shape(),
                right: (4, 1),
            });
        }
        let row = |r: usize| {
            self.at(r, 0) * point.x()
                + self.at(r, 1) * point.y()
                + self.at(r, 2) * point.z()
                + self.at(r, 3)
        };
        Ok(Vec3::new(row(0), row(1), row(2)))
    }

    /// Transposed copy (`cols × rows`).
    pub fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        transpose_into(&mut out.data, self);
        out
    }

    /// Appends the entries column-major: outer loop over columns, inner over
    /// rows.
    pub fn write_column_major(&self, buffer: &mut ExportBuffer) {
        for col in 0..self.cols {
            for row in 0..self.rows {
                buffer.push(self.at(row, col));
            }
        }
    }

    /// Column-major copy of the entries (`rows * cols` floats).
    pub fn to_column_major(&self) -> Vec<f32> {
        let mut buffer = ExportBuffer::with_capacity(self.data.len());
        self.write_column_major(&mut buffer);
        buffer.as_slice().to_vec()
    }

    /// Tolerance comparison: shapes match and every entry differs by at most
    /// `delta`.
    pub fn is_equal(a: &Self, b: &Self, delta: f32) -> bool {
        a.shape() == b.shape()
            && a
                .data
                .iter()
                .zip(&b.data)
                .all(|(x, y)| (x - y).abs() <= delta)
    }

    /// Returns `true` if any entry is NaN.
    pub fn has_nan(&self) -> bool {
        self.data.iter().any(|v| v.is_nan())
    }

    /// Rotation about +X by `angle` radians (4×4).
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_4x4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about +Y by `angle` radians (4×4).
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_4x4([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about +Z by `angle` radians (4×4).
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_4x4([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation matrix for Euler angles, built directly from the elemental
    /// axis matrices in convention order (outermost on the left).
    ///
    /// For [`crate::EulerConvention::YAW_PITCH_ROLL`] this is
    /// `R_y(yaw) * R_x(pitch) * R_z(roll)`.
    pub fn rotation_from_euler(angles: &EulerAngles) -> Self {
        let [outer, middle, inner] = angles.convention().axes();
        let elemental = |axis: crate::Axis| {
            let angle = angles.angle(axis);
            match axis {
                crate::Axis::X => Self::rotation_x(angle),
                crate::Axis::Y => Self::rotation_y(angle),
                crate::Axis::Z => Self::rotation_z(angle),
            }
        };
        let mut tmp = Self::zeros(4, 4);
        let mut out = Self::zeros(4, 4);
        multiply_into(&mut tmp.data, &elemental(middle), &elemental(inner));
        multiply_into(&mut out.data, &elemental(outer), &tmp);
        out
    }

    /// Translation by `offset` (last column).
    pub fn translation(offset: Vec3) -> Self {
        Self::from_4x4([
            [1.0, 0.0, 0.0, offset.x()],
            [0.0, 1.0, 0.0, offset.y()],
            [0.0, 0.0, 1.0, offset.z()],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Non-uniform scale.
    pub fn scaling(factors: Vec3) -> Self {
        Self::from_4x4([
            [factors.x(), 0.0, 0.0, 0.0],
            [0.0, factors.y(), 0.0, 0.0],
            [0.0, 0.0, factors.z(), 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed perspective projection into OpenGL clip space
    /// (`z ∈ [-1, 1]`).
    ///
    /// `fov_y` is the vertical field of view in radians. Callers validate
    /// `near > 0`, `far > near`, and `aspect > 0`.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y * 0.5).tan();
        let range = near - far;
        Self::from_4x4([
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, (far + near) / range, 2.0 * far * near / range],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Right-handed orthographic projection into OpenGL clip space.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let w = right - left;
        let h = top - bottom;
        let d = far - near;
        Self::from_4x4([
            [2.0 / w, 0.0, 0.0, -(right + left) / w],
            [0.0, 2.0 / h, 0.0, -(top + bottom) / h],
            [0.0, 0.0, -2.0 / d, -(far + near) / d],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }
}

/// Writes `left * right` into row-major `out`. Shapes are checked by callers.
pub(crate) fn multiply_into(out: &mut [f32], left: &Matrix, right: &Matrix) {
    for i in 0..left.rows {
        for j in 0..right.cols {
            let mut sum = 0.0;
            for k in 0..right.rows {
                sum += left.at(i, k) * right.at(k, j);
            }
            out[i * right.cols + j] = sum;
        }
    }
}

/// Writes `operandᵀ` into row-major `out` (`operand.cols × operand.rows`).
pub(crate) fn transpose_into(out: &mut [f32], operand: &Matrix) {
    for i in 0..operand.rows {
        for j in 0..operand.cols {
            out[j * operand.rows + i] = operand.at(i, j);
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f32;
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for [{} x {}] matrix",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl Mul for &Matrix {
    type Output = Result<Matrix, MathError>;
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(rhs)
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matrix[{} x {}]", self.rows, self.cols)?;
        let mut list = f.debug_list();
        for row in self.data.chunks(self.cols.max(1)) {
            list.entry(&row);
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiply_guards_dimensions() {
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(4, 2);
        assert_eq!(
            a.multiply(&b),
            Err(MathError::DimensionMismatch {
                left: (2, 3),
                right: (4, 2)
            })
        );
        let ok = a.multiply(&Matrix::zeros(3, 4)).unwrap();
        assert_eq!(ok.shape(), (2, 4));
    }

    #[test]
    fn dimension_error_names_both_shapes() {
        let err = Matrix::zeros(2, 3).multiply(&Matrix::zeros(4, 2)).unwrap_err();
        assert_eq!(err.to_string(), "cannot multiply [2 x 3] by [4 x 2]");
    }

    #[test]
    fn transpose_swaps_shape() {
        let m = Matrix::from_rows(&[[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let t = m.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.get(2, 1), Some(6.0));
        assert_eq!(t.get(0, 1), Some(4.0));
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn column_major_export_walks_columns_first() {
        let m = Matrix::from_rows(&[[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.to_column_major(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let rows: Vec<Vec<f32>> = vec![vec![1.0, 2.0], vec![3.0]];
        assert_eq!(
            Matrix::from_rows(&rows),
            Err(MathError::RaggedRows {
                row: 1,
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn transform_point_requires_four_columns() {
        let err = Matrix::identity(3).transform_point(Vec3::ONE).unwrap_err();
        assert_eq!(
            err,
            MathError::DimensionMismatch {
                left: (3, 3),
                right: (4, 1)
            }
        );
    }

    #[test]
    fn exact_equality_is_shape_aware() {
        assert_ne!(Matrix::zeros(2, 3), Matrix::zeros(3, 2));
        assert!(!Matrix::is_equal(
            &Matrix::zeros(2, 3),
            &Matrix::zeros(3, 2),
            1.0
        ));
    }

    #[test]
    fn perspective_maps_near_and_far_planes() {
        let p = Matrix::perspective(core::f32::consts::FRAC_PI_2, 1.0, 1.0, 10.0);
        // clip z / clip w for points on the near and far planes.
        let ndc_z = |z: f32| (p.at(2, 2) * z + p.at(2, 3)) / (p.at(3, 2) * z);
        assert!((ndc_z(-1.0) + 1.0).abs() < 1e-5);
        assert!((ndc_z(-10.0) - 1.0).abs() < 1e-5);
    }
}
