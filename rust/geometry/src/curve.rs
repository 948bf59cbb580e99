// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Centreline curves for linear mechanical elements and wall location lines.

use nalgebra::{Point3, Vector3};

use crate::error::{Error, Result};
use crate::EPSILON;

/// A straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineSegment {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl LineSegment {
    /// Create a segment from its two endpoints
    #[inline]
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    /// Euclidean length of the segment
    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Unit vector from `start` towards `end`
    ///
    /// Returns [`Error::DegenerateSegment`] when both endpoints coincide.
    pub fn direction(&self) -> Result<Vector3<f64>> {
        let delta = self.end - self.start;
        let len = delta.norm();
        if len < EPSILON {
            return Err(Error::DegenerateSegment);
        }
        Ok(delta / len)
    }

    /// Point at `distance` from `start`, measured along the segment
    pub fn point_at(&self, distance: f64) -> Result<Point3<f64>> {
        Ok(self.start + self.direction()? * distance)
    }

    /// Endpoint by index (0 = start, anything else = end)
    #[inline]
    pub fn end_point(&self, index: usize) -> Point3<f64> {
        if index == 0 {
            self.start
        } else {
            self.end
        }
    }
}

/// A circular arc, parameterised in its own plane.
///
/// Points are `center + radius * (cos(a) * x_axis + sin(a) * y_axis)` for
/// `a` in `start_angle..=end_angle` (radians).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc {
    pub center: Point3<f64>,
    pub radius: f64,
    pub x_axis: Vector3<f64>,
    pub y_axis: Vector3<f64>,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc {
    /// Arc in the horizontal plane through `center`
    pub fn horizontal(center: Point3<f64>, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            center,
            radius,
            x_axis: Vector3::x(),
            y_axis: Vector3::y(),
            start_angle,
            end_angle,
        }
    }

    /// Point on the arc at angle `a`
    pub fn point_at_angle(&self, a: f64) -> Point3<f64> {
        self.center + (self.x_axis * a.cos() + self.y_axis * a.sin()) * self.radius
    }

    /// Length along the arc
    pub fn length(&self) -> f64 {
        (self.end_angle - self.start_angle).abs() * self.radius
    }
}

/// Location curve of an element.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Curve {
    Line(LineSegment),
    Arc(Arc),
}

impl Curve {
    /// The straight segment, if this curve is one
    #[inline]
    pub fn as_line(&self) -> Option<&LineSegment> {
        match self {
            Curve::Line(line) => Some(line),
            Curve::Arc(_) => None,
        }
    }

    /// Endpoint by index (0 = start, anything else = end)
    pub fn end_point(&self, index: usize) -> Point3<f64> {
        match self {
            Curve::Line(line) => line.end_point(index),
            Curve::Arc(arc) => {
                let a = if index == 0 { arc.start_angle } else { arc.end_angle };
                arc.point_at_angle(a)
            }
        }
    }

    /// Length along the curve
    pub fn length(&self) -> f64 {
        match self {
            Curve::Line(line) => line.length(),
            Curve::Arc(arc) => arc.length(),
        }
    }
}

impl From<LineSegment> for Curve {
    fn from(line: LineSegment) -> Self {
        Curve::Line(line)
    }
}

impl From<Arc> for Curve {
    fn from(arc: Arc) -> Self {
        Curve::Arc(arc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn line_length_and_direction() {
        let line = LineSegment::new(Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 6.0, 3.0));
        assert_relative_eq!(line.length(), 5.0);

        let dir = line.direction().unwrap();
        assert_relative_eq!(dir, Vector3::new(0.6, 0.8, 0.0));
        assert_relative_eq!(dir.norm(), 1.0);
    }

    #[test]
    fn degenerate_line_has_no_direction() {
        let p = Point3::new(5.0, 5.0, 5.0);
        let line = LineSegment::new(p, p);
        assert_eq!(line.direction(), Err(Error::DegenerateSegment));
    }

    #[test]
    fn point_at_distance() {
        let line = LineSegment::new(Point3::origin(), Point3::new(0.0, 0.0, 10.0));
        assert_relative_eq!(line.point_at(2.5).unwrap(), Point3::new(0.0, 0.0, 2.5));
    }

    #[test]
    fn arc_is_not_a_line() {
        let arc = Arc::horizontal(Point3::origin(), 2.0, 0.0, PI / 2.0);
        let curve = Curve::from(arc);
        assert!(curve.as_line().is_none());
        assert_relative_eq!(curve.length(), PI);
        assert_relative_eq!(curve.end_point(0), Point3::new(2.0, 0.0, 0.0));
        assert_relative_eq!(curve.end_point(1), Point3::new(0.0, 2.0, 0.0), epsilon = 1e-12);
    }
}
