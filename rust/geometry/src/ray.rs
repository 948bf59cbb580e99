// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Half-infinite rays.

use nalgebra::{Point3, Vector3};

use crate::error::{Error, Result};
use crate::EPSILON;

/// A ray from `origin` along a unit `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    /// Create a ray, normalizing `direction`
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Result<Self> {
        let len = direction.norm();
        if len < EPSILON || !len.is_finite() {
            return Err(Error::InvalidDirection);
        }
        Ok(Self {
            origin,
            direction: direction / len,
        })
    }

    /// Point at distance `t` along the ray
    #[inline]
    pub fn at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }

    /// The same ray with its origin shifted by `offset`
    #[inline]
    pub fn translated(&self, offset: &Vector3<f64>) -> Self {
        Self {
            origin: self.origin + offset,
            direction: self.direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ray_normalizes_direction() {
        let ray = Ray::new(Point3::origin(), Vector3::new(0.0, 3.0, 4.0)).unwrap();
        assert_relative_eq!(ray.direction.norm(), 1.0);
        assert_relative_eq!(ray.at(5.0), Point3::new(0.0, 3.0, 4.0));
    }

    #[test]
    fn zero_direction_rejected() {
        assert_eq!(
            Ray::new(Point3::origin(), Vector3::zeros()),
            Err(Error::InvalidDirection)
        );
    }

    #[test]
    fn translation_keeps_direction() {
        let ray = Ray::new(Point3::origin(), Vector3::x()).unwrap();
        let moved = ray.translated(&Vector3::new(0.0, -10.0, 0.0));
        assert_relative_eq!(moved.origin, Point3::new(0.0, -10.0, 0.0));
        assert_relative_eq!(moved.direction, Vector3::x());
    }
}
