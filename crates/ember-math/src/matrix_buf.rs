// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::matrix::{multiply_into, transpose_into};
use crate::{MathError, Matrix, Shape};

/// Whether a [`MatrixBuf`] accepts writes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Access {
    /// Writes are applied in place.
    Mutable,
    /// Every write fails with [`MathError::Unmodifiable`].
    Unmodifiable,
}

/// In-place matrix accumulator for hot paths that want to reuse storage.
///
/// [`Matrix`] values never change; `MatrixBuf` is the explicit escape hatch.
/// An unmodifiable buffer delegates every read to the wrapped matrix and
/// rejects every write, which lets shared constants such as
/// [`crate::IDENTITY_4`] be handed to code written against the mutable API.
///
/// # Examples
/// ```
/// use ember_math::{MathError, Matrix, MatrixBuf, IDENTITY_4};
/// let mut locked = MatrixBuf::unmodifiable(IDENTITY_4.clone());
/// assert_eq!(locked.set(0, 0, 2.0), Err(MathError::Unmodifiable));
/// assert_eq!(locked.matrix(), &Matrix::identity(4));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixBuf {
    matrix: Matrix,
    access: Access,
}

impl MatrixBuf {
    /// Zero-filled mutable buffer.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::from_matrix(Matrix::zeros(rows, cols))
    }

    /// Mutable buffer seeded with `matrix`.
    pub const fn from_matrix(matrix: Matrix) -> Self {
        Self {
            matrix,
            access: Access::Mutable,
        }
    }

    /// Read-only wrapper around `matrix`.
    pub const fn unmodifiable(matrix: Matrix) -> Self {
        Self {
            matrix,
            access: Access::Unmodifiable,
        }
    }

    /// Current access mode.
    pub const fn access(&self) -> Access {
        self.access
    }

    /// `(rows, cols)` of the buffer.
    pub const fn shape(&self) -> Shape {
        self.matrix.shape()
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        self.matrix.get(row, col)
    }

    /// Borrow the current contents.
    pub const fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Consume the buffer, returning its contents.
    pub fn into_matrix(self) -> Matrix {
        self.matrix
    }

    fn writable(&mut self) -> Result<&mut Matrix, MathError> {
        match self.access {
            Access::Mutable => Ok(&mut self.matrix),
            Access::Unmodifiable => Err(MathError::Unmodifiable),
        }
    }

    fn expect_shape(&self, shape: Shape) -> Result<(), MathError> {
        if self.shape() == shape {
            Ok(())
        } else {
            Err(MathError::DimensionMismatch {
                left: self.shape(),
                right: shape,
            })
        }
    }

    /// Writes a single entry.
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<(), MathError> {
        let shape = self.shape();
        let m = self.writable()?;
        if row >= shape.0 || col >= shape.1 {
            return Err(MathError::IndexOutOfBounds { row, col, shape });
        }
        m.data_mut()[row * shape.1 + col] = value;
        Ok(())
    }

    /// Copies every entry from `source`, which must have the same shape.
    pub fn set_all(&mut self, source: &Matrix) -> Result<(), MathError> {
        self.writable()?;
        self.expect_shape(source.shape())?;
        self.writable()?.data_mut().copy_from_slice(source.as_row_major());
        Ok(())
    }

    /// Zeroes every entry.
    pub fn clear(&mut self) -> Result<(), MathError> {
        self.writable()?.data_mut().fill(0.0);
        Ok(())
    }

    /// Stores `left * right` without allocating.
    ///
    /// The buffer must already be `left.rows() × right.cols()`.
    pub fn multiply_into(&mut self, left: &Matrix, right: &Matrix) -> Result<(), MathError> {
        self.writable()?;
        if left.cols() != right.rows() {
            return Err(MathError::DimensionMismatch {
                left: left.shape(),
                right: right.shape(),
            });
        }
        self.expect_shape((left.rows(), right.cols()))?;
        multiply_into(self.writable()?.data_mut(), left, right);
        Ok(())
    }

    /// Stores `operandᵀ` without allocating.
    pub fn transpose_into(&mut self, operand: &Matrix) -> Result<(), MathError> {
        self.writable()?;
        self.expect_shape((operand.cols(), operand.rows()))?;
        transpose_into(self.writable()?.data_mut(), operand);
        Ok(())
    }
}

impl From<Matrix> for MatrixBuf {
    fn from(value: Matrix) -> Self {
        Self::from_matrix(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IDENTITY_4, ZERO_4};

    #[test]
    fn unmodifiable_rejects_every_write() {
        let mut buf = MatrixBuf::unmodifiable(IDENTITY_4.clone());
        assert_eq!(buf.set(0, 0, 3.0), Err(MathError::Unmodifiable));
        assert_eq!(buf.set_all(&ZERO_4), Err(MathError::Unmodifiable));
        assert_eq!(buf.clear(), Err(MathError::Unmodifiable));
        assert_eq!(
            buf.multiply_into(&IDENTITY_4, &IDENTITY_4),
            Err(MathError::Unmodifiable)
        );
        assert_eq!(buf.transpose_into(&IDENTITY_4), Err(MathError::Unmodifiable));
        assert_eq!(buf.matrix(), &Matrix::identity(4));
        assert_eq!(buf.get(3, 3), Some(1.0));
    }

    #[test]
    fn mutable_buffer_accumulates_in_place() {
        let mut buf = MatrixBuf::new(2, 2);
        buf.set(0, 1, 5.0).unwrap();
        assert_eq!(buf.get(0, 1), Some(5.0));
        assert_eq!(
            buf.set(2, 0, 1.0),
            Err(MathError::IndexOutOfBounds {
                row: 2,
                col: 0,
                shape: (2, 2)
            })
        );
        let t = buf.matrix().clone();
        buf.transpose_into(&t).unwrap();
        assert_eq!(buf.get(1, 0), Some(5.0));
        buf.clear().unwrap();
        assert_eq!(buf.matrix(), &Matrix::zeros(2, 2));
    }

    #[test]
    fn multiply_into_checks_output_shape() {
        let mut out = MatrixBuf::new(2, 2);
        let a = Matrix::zeros(2, 3);
        let b = Matrix::zeros(3, 4);
        assert_eq!(
            out.multiply_into(&a, &b),
            Err(MathError::DimensionMismatch {
                left: (2, 2),
                right: (2, 4)
            })
        );
        let mut right_sized = MatrixBuf::new(2, 4);
        right_sized.multiply_into(&a, &b).unwrap();
        assert_eq!(right_sized.matrix(), &a.multiply(&b).unwrap());
    }
}
