// Copyright 2026 the polytess authors
// License: MIT

//! Robust polygon tessellation.
//!
//! `polytess` converts arbitrary closed contours — self-intersecting,
//! nested, or wound multiple times — into a non-overlapping planar
//! subdivision, then triangulates (or merges into convex polygons, or
//! extracts the boundary of) the regions a [`WindingRule`] selects.
//!
//! The pipeline: contours become edges of a half-edge [`mesh`]; vertices
//! are swept left to right ([`queue`], [`status`]), classifying every
//! region of the arrangement by winding number and cutting edges where
//! they cross; the interior, now guaranteed monotone, is fan-triangulated;
//! finally the mesh is flattened into vertex and element buffers.
//!
//! See [`Tessellator`] for the entry point.

pub mod error;
pub mod geom;
pub mod mesh;
mod monotone;
mod output;
pub mod queue;
pub mod status;
mod sweep;
pub mod tess;

pub use error::TessError;
pub use geom::Real;
pub use tess::{
    CombineCallback, ContourOrientation, ContourVertex, ElementType, Tessellator, WindingRule,
    UNDEF,
};
