// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Openings Geometry
//!
//! Value geometry for opening placement: duct and pipe centreline curves,
//! rays cast along them, and wall solids that rays can cross. All math is
//! done with nalgebra in `f64`.

pub mod curve;
pub mod error;
pub mod intersect;
pub mod ray;
pub mod solid;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use curve::{Arc, Curve, LineSegment};
pub use error::{Error, Result};
pub use intersect::{ray_triangle_distance, Aabb};
pub use ray::Ray;
pub use solid::{FaceHit, FaceKind, WallFace, WallSolid};

/// Length below which a segment or vector is treated as degenerate.
pub const EPSILON: f64 = 1e-9;
