// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Linear mechanical elements (round ducts and pipes).

use std::fmt;

use openings_geometry::{Curve, LineSegment, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::ids::ElementId;

/// Category of a linear mechanical element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MechanicalKind {
    Duct,
    Pipe,
}

impl MechanicalKind {
    pub const ALL: [MechanicalKind; 2] = [MechanicalKind::Duct, MechanicalKind::Pipe];
}

impl fmt::Display for MechanicalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MechanicalKind::Duct => f.write_str("duct"),
            MechanicalKind::Pipe => f.write_str("pipe"),
        }
    }
}

/// An element as reported by the secondary model, before reduction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawElement {
    pub id: ElementId,
    pub kind: MechanicalKind,
    /// Location curve; `None` when the element has no curve location
    pub location: Option<Curve>,
    pub diameter: f64,
}

/// Why an element was left out of collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ElementSkipReason {
    /// No location curve at all
    MissingLocation,
    /// Location is a curve other than a straight line
    NonLinear,
    /// Straight line with coincident endpoints
    DegenerateLine,
    /// Diameter is zero, negative or not a number
    InvalidDiameter { diameter: f64 },
}

impl fmt::Display for ElementSkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementSkipReason::MissingLocation => f.write_str("no location curve"),
            ElementSkipReason::NonLinear => f.write_str("centreline is not a straight line"),
            ElementSkipReason::DegenerateLine => f.write_str("centreline has zero length"),
            ElementSkipReason::InvalidDiameter { diameter } => {
                write!(f, "invalid diameter {}", diameter)
            }
        }
    }
}

/// A duct or pipe reduced to its straight centreline.
///
/// `direction` is a unit vector from the first endpoint towards the second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MechanicalElement {
    id: ElementId,
    kind: MechanicalKind,
    origin: Point3<f64>,
    direction: Vector3<f64>,
    length: f64,
    diameter: f64,
}

impl MechanicalElement {
    /// Reduce a straight centreline to origin, direction and length
    pub fn from_line(
        id: ElementId,
        kind: MechanicalKind,
        line: &LineSegment,
        diameter: f64,
    ) -> Result<Self, ElementSkipReason> {
        if !(diameter > 0.0) || !diameter.is_finite() {
            return Err(ElementSkipReason::InvalidDiameter { diameter });
        }
        let direction = line
            .direction()
            .map_err(|_| ElementSkipReason::DegenerateLine)?;

        Ok(Self {
            id,
            kind,
            origin: line.start,
            direction,
            length: line.length(),
            diameter,
        })
    }

    /// Reduce a raw element; only straight-line locations are accepted
    pub fn from_raw(raw: &RawElement) -> Result<Self, ElementSkipReason> {
        match &raw.location {
            None => Err(ElementSkipReason::MissingLocation),
            Some(Curve::Line(line)) => Self::from_line(raw.id, raw.kind, line, raw.diameter),
            Some(_) => Err(ElementSkipReason::NonLinear),
        }
    }

    #[inline]
    pub fn id(&self) -> ElementId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> MechanicalKind {
        self.kind
    }

    #[inline]
    pub fn origin(&self) -> &Point3<f64> {
        &self.origin
    }

    #[inline]
    pub fn direction(&self) -> &Vector3<f64> {
        &self.direction
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[inline]
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Point on the centreline at `distance` from the origin
    #[inline]
    pub fn point_at(&self, distance: f64) -> Point3<f64> {
        self.origin + self.direction * distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use openings_geometry::Arc;

    fn raw(location: Option<Curve>, diameter: f64) -> RawElement {
        RawElement {
            id: ElementId(1),
            kind: MechanicalKind::Duct,
            location,
            diameter,
        }
    }

    #[test]
    fn straight_duct_is_reduced() {
        let line = LineSegment::new(Point3::new(0.0, 0.0, 1000.0), Point3::new(0.0, 4000.0, 1000.0));
        let element = MechanicalElement::from_raw(&raw(Some(line.into()), 250.0)).unwrap();

        assert_eq!(element.id(), ElementId(1));
        assert_relative_eq!(*element.origin(), Point3::new(0.0, 0.0, 1000.0));
        assert_relative_eq!(*element.direction(), Vector3::y());
        assert_relative_eq!(element.length(), 4000.0);
        assert_relative_eq!(element.diameter(), 250.0);
        assert_relative_eq!(element.point_at(1000.0), Point3::new(0.0, 1000.0, 1000.0));
    }

    #[test]
    fn arc_is_excluded() {
        let arc = Arc::horizontal(Point3::origin(), 1000.0, 0.0, 1.0);
        assert_eq!(
            MechanicalElement::from_raw(&raw(Some(arc.into()), 100.0)),
            Err(ElementSkipReason::NonLinear)
        );
    }

    #[test]
    fn missing_location_is_excluded() {
        assert_eq!(
            MechanicalElement::from_raw(&raw(None, 100.0)),
            Err(ElementSkipReason::MissingLocation)
        );
    }

    #[test]
    fn zero_length_and_bad_diameter_are_excluded() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let point_line = LineSegment::new(p, p);
        assert_eq!(
            MechanicalElement::from_raw(&raw(Some(point_line.into()), 100.0)),
            Err(ElementSkipReason::DegenerateLine)
        );

        let line = LineSegment::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        assert!(matches!(
            MechanicalElement::from_raw(&raw(Some(line.into()), 0.0)),
            Err(ElementSkipReason::InvalidDiameter { .. })
        ));
        assert!(matches!(
            MechanicalElement::from_raw(&raw(Some(line.into()), f64::NAN)),
            Err(ElementSkipReason::InvalidDiameter { .. })
        ));
    }
}
