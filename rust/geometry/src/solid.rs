// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall solids
//!
//! A straight wall is modelled as a rectangular prism swept from its location
//! line: the line is offset by half the thickness to either side and extruded
//! vertically by the wall height. Each of the six planar faces is tested
//! independently, so a ray passing through a wall reports both the face it
//! enters and the face it leaves.

use nalgebra::{Point3, Vector3};
use smallvec::SmallVec;

use crate::curve::LineSegment;
use crate::error::{Error, Result};
use crate::intersect::{ray_triangle_distance, Aabb};
use crate::ray::Ray;
use crate::EPSILON;

/// Which side of the prism a face lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceKind {
    /// Face on the left of the location line (looking start → end)
    Exterior,
    /// Face on the right of the location line
    Interior,
    Start,
    End,
    Bottom,
    Top,
}

/// A planar quad face with corners in winding order.
#[derive(Debug, Clone, Copy)]
pub struct WallFace {
    pub kind: FaceKind,
    pub corners: [Point3<f64>; 4],
}

impl WallFace {
    /// Distance along `ray` to this face, if it is crossed
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f64> {
        let [a, b, c, d] = &self.corners;
        ray_triangle_distance(ray, a, b, c).or_else(|| ray_triangle_distance(ray, a, c, d))
    }
}

/// One face crossing along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceHit {
    pub distance: f64,
    pub face: FaceKind,
}

/// Per-ray hit list; a convex prism yields at most two crossings.
pub type FaceHits = SmallVec<[FaceHit; 4]>;

/// Rectangular wall prism.
#[derive(Debug, Clone)]
pub struct WallSolid {
    faces: [WallFace; 6],
    bounds: Aabb,
}

impl WallSolid {
    /// Build a wall solid from its location line
    ///
    /// The base of the wall is at the elevation of `location.start`; only the
    /// horizontal component of the line is swept.
    pub fn new(location: &LineSegment, thickness: f64, height: f64) -> Result<Self> {
        if !(thickness > 0.0) {
            return Err(Error::InvalidSolid(format!("thickness must be positive, got {}", thickness)));
        }
        if !(height > 0.0) {
            return Err(Error::InvalidSolid(format!("height must be positive, got {}", height)));
        }

        let base_z = location.start.z;
        let plan = Vector3::new(
            location.end.x - location.start.x,
            location.end.y - location.start.y,
            0.0,
        );
        let plan_len = plan.norm();
        if plan_len < EPSILON {
            return Err(Error::InvalidSolid("location line has no horizontal extent".into()));
        }

        let along = plan / plan_len;
        // Left-hand normal in plan
        let side = Vector3::new(-along.y, along.x, 0.0) * (thickness / 2.0);
        let up = Vector3::new(0.0, 0.0, height);

        let s = Point3::new(location.start.x, location.start.y, base_z);
        let e = s + plan;

        // Bottom ring: start-left, end-left, end-right, start-right
        let b0 = s + side;
        let b1 = e + side;
        let b2 = e - side;
        let b3 = s - side;
        let [t0, t1, t2, t3] = [b0 + up, b1 + up, b2 + up, b3 + up];

        let faces = [
            WallFace { kind: FaceKind::Exterior, corners: [b0, b1, t1, t0] },
            WallFace { kind: FaceKind::Interior, corners: [b2, b3, t3, t2] },
            WallFace { kind: FaceKind::Start, corners: [b3, b0, t0, t3] },
            WallFace { kind: FaceKind::End, corners: [b1, b2, t2, t1] },
            WallFace { kind: FaceKind::Bottom, corners: [b0, b3, b2, b1] },
            WallFace { kind: FaceKind::Top, corners: [t0, t1, t2, t3] },
        ];

        let corners = [b0, b1, b2, b3, t0, t1, t2, t3];
        let bounds = Aabb::from_points(&corners)
            .ok_or_else(|| Error::InvalidSolid("no corners".into()))?;

        Ok(Self { faces, bounds })
    }

    /// All six faces
    pub fn faces(&self) -> &[WallFace; 6] {
        &self.faces
    }

    /// Axis-aligned bounds of the prism
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Every face crossing along `ray`, nearest first.
    pub fn intersect_ray(&self, ray: &Ray) -> FaceHits {
        let mut hits = FaceHits::new();

        if !self.bounds.expanded(EPSILON).intersects_ray(ray) {
            return hits;
        }

        for face in &self.faces {
            if let Some(distance) = face.intersect_ray(ray) {
                hits.push(FaceHit { distance, face: face.kind });
            }
        }

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// 200 thick, 3000 high wall along Y at x = 3000
    fn wall_at_x3000() -> WallSolid {
        let location = LineSegment::new(
            Point3::new(3000.0, -5000.0, 0.0),
            Point3::new(3000.0, 5000.0, 0.0),
        );
        WallSolid::new(&location, 200.0, 3000.0).unwrap()
    }

    #[test]
    fn ray_through_wall_hits_both_faces() {
        let wall = wall_at_x3000();
        let ray = Ray::new(Point3::new(0.0, 0.0, 1500.0), Vector3::x()).unwrap();

        let hits = wall.intersect_ray(&ray);
        assert_eq!(hits.len(), 2);
        assert_relative_eq!(hits[0].distance, 2900.0, epsilon = 1e-9);
        assert_relative_eq!(hits[1].distance, 3100.0, epsilon = 1e-9);
        assert_ne!(hits[0].face, hits[1].face);
    }

    #[test]
    fn ray_above_wall_misses() {
        let wall = wall_at_x3000();
        let ray = Ray::new(Point3::new(0.0, 0.0, 3500.0), Vector3::x()).unwrap();
        assert!(wall.intersect_ray(&ray).is_empty());
    }

    #[test]
    fn ray_pointing_away_misses() {
        let wall = wall_at_x3000();
        let ray = Ray::new(Point3::new(0.0, 0.0, 1500.0), -Vector3::x()).unwrap();
        assert!(wall.intersect_ray(&ray).is_empty());
    }

    #[test]
    fn origin_inside_wall_hits_exit_face_only() {
        let wall = wall_at_x3000();
        let ray = Ray::new(Point3::new(3000.0, 0.0, 1500.0), Vector3::x()).unwrap();

        let hits = wall.intersect_ray(&ray);
        assert_eq!(hits.len(), 1);
        assert_relative_eq!(hits[0].distance, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn diagonal_wall_bounds() {
        let location = LineSegment::new(Point3::new(0.0, 0.0, 100.0), Point3::new(1000.0, 1000.0, 100.0));
        let wall = WallSolid::new(&location, 100.0, 2000.0).unwrap();
        assert_relative_eq!(wall.bounds().min.z, 100.0);
        assert_relative_eq!(wall.bounds().max.z, 2100.0);
    }

    #[test]
    fn invalid_dimensions_rejected() {
        let location = LineSegment::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        assert!(WallSolid::new(&location, 0.0, 1.0).is_err());
        assert!(WallSolid::new(&location, 1.0, -1.0).is_err());

        let vertical = LineSegment::new(Point3::origin(), Point3::new(0.0, 0.0, 5.0));
        assert!(matches!(
            WallSolid::new(&vertical, 1.0, 1.0),
            Err(Error::InvalidSolid(_))
        ));
    }
}
