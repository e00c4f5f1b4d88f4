// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error type shared by the math value types.

use thiserror::Error;

/// Matrix shape expressed as `(rows, cols)`.
pub type Shape = (usize, usize);

/// Failures raised by fallible math operations.
///
/// Every variant is a programmer error: the operations are pure, so retrying
/// with the same inputs fails the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    /// Operand shapes are incompatible (e.g. `left.cols != right.rows`).
    #[error("cannot multiply [{} x {}] by [{} x {}]", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        /// Shape of the left operand.
        left: Shape,
        /// Shape of the right operand.
        right: Shape,
    },
    /// Mutation attempted on an unmodifiable matrix buffer.
    #[error("cannot modify matrix: buffer is unmodifiable")]
    Unmodifiable,
    /// Row/column index outside the matrix.
    #[error("index ({row}, {col}) out of bounds for [{} x {}] matrix", .shape.0, .shape.1)]
    IndexOutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Shape of the indexed matrix.
        shape: Shape,
    },
    /// Flat data length does not match the declared shape.
    #[error("expected {expected} components, got {actual}")]
    ShapeMismatch {
        /// `rows * cols` for the declared shape.
        expected: usize,
        /// Length of the supplied data.
        actual: usize,
    },
    /// Row `row` has a different width than the first row.
    #[error("row {row} has {actual} columns, expected {expected}")]
    RaggedRows {
        /// Offending row index.
        row: usize,
        /// Width of row 0.
        expected: usize,
        /// Width of the offending row.
        actual: usize,
    },
    /// Normalization of a zero-length (or non-finite) vector.
    #[error("cannot normalize a degenerate vector")]
    DegenerateVector,
}
