// Copyright 2026 the polytess authors
// License: MIT

use thiserror::Error;

/// Errors surfaced by [`Tessellator::tessellate`](crate::Tessellator::tessellate).
///
/// Degenerate but valid input (empty contours, coincident or colinear
/// points) is not an error; it produces empty output. Internal sweep
/// invariant violations are debug assertions, not errors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum TessError {
    /// A contour coordinate was NaN or outside the range representable
    /// exactly enough for the sweep predicates.
    #[error("contour coordinate is NaN or outside the valid range")]
    InvalidCoordinate,
}
