// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Intersection Engine
//!
//! Casts a ray along a mechanical element's centreline and returns the walls
//! it crosses within the element's length, one hit per wall.

use openings_geometry::{Point3, Vector3};

use crate::element::MechanicalElement;
use crate::hit::{dedup_hits, DedupedHit};
use crate::host::RayCaster;

/// Finds wall crossings through a wall-scoped [`RayCaster`].
pub struct IntersectionEngine<'a> {
    caster: &'a dyn RayCaster,
}

impl<'a> IntersectionEngine<'a> {
    pub fn new(caster: &'a dyn RayCaster) -> Self {
        Self { caster }
    }

    /// Walls crossed by the ray within `max_distance`, nearest first.
    ///
    /// Hits beyond `max_distance` are dropped before deduplication, so a
    /// wall is only reported if some face of it lies within range. Order is
    /// the caster's; ties are not re-sorted.
    pub fn find_wall_crossings(
        &self,
        origin: &Point3<f64>,
        direction: &Vector3<f64>,
        max_distance: f64,
    ) -> Vec<DedupedHit> {
        let raw = self.caster.cast_ray(origin, direction);
        let raw_count = raw.len();

        let crossings = dedup_hits(raw.into_iter().filter(|hit| hit.distance <= max_distance));

        tracing::trace!(raw = raw_count, walls = crossings.len(), max_distance, "Ray cast");
        crossings
    }

    /// Walls crossed by `element` along its own length
    pub fn crossings_for(&self, element: &MechanicalElement) -> Vec<DedupedHit> {
        self.find_wall_crossings(element.origin(), element.direction(), element.length())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::MechanicalKind;
    use crate::hit::RawHit;
    use crate::ids::ElementId;
    use openings_geometry::LineSegment;

    struct ScriptedCaster(Vec<RawHit>);

    impl RayCaster for ScriptedCaster {
        fn cast_ray(&self, _origin: &Point3<f64>, _direction: &Vector3<f64>) -> Vec<RawHit> {
            self.0.clone()
        }
    }

    #[test]
    fn hits_beyond_length_are_dropped() {
        let caster = ScriptedCaster(vec![
            RawHit::new(900.0, ElementId(1)),
            RawHit::new(1100.0, ElementId(1)),
            RawHit::new(4000.0, ElementId(2)),
            RawHit::new(5000.0, ElementId(3)),
            RawHit::new(5000.5, ElementId(4)),
        ]);
        let engine = IntersectionEngine::new(&caster);

        let hits = engine.find_wall_crossings(&Point3::origin(), &Vector3::x(), 5000.0);
        let ids: Vec<ElementId> = hits.iter().map(|h| h.element_id()).collect();
        assert_eq!(ids, vec![ElementId(1), ElementId(2), ElementId(3)]);
        assert!(hits.iter().all(|h| h.distance() <= 5000.0));
    }

    #[test]
    fn out_of_range_face_does_not_shadow_wall() {
        // Wall 1's near face is in range, its far face is not
        let caster = ScriptedCaster(vec![RawHit::new(950.0, ElementId(1)), RawHit::new(1150.0, ElementId(1))]);
        let engine = IntersectionEngine::new(&caster);

        let hits = engine.find_wall_crossings(&Point3::origin(), &Vector3::x(), 1000.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].distance(), 950.0);
    }

    #[test]
    fn no_intersections_is_empty() {
        let caster = ScriptedCaster(Vec::new());
        let engine = IntersectionEngine::new(&caster);
        assert!(engine.find_wall_crossings(&Point3::origin(), &Vector3::z(), 10.0).is_empty());
    }

    #[test]
    fn element_length_bounds_the_search() {
        let caster = ScriptedCaster(vec![RawHit::new(1500.0, ElementId(1)), RawHit::new(2500.0, ElementId(2))]);
        let engine = IntersectionEngine::new(&caster);
        let line = LineSegment::new(Point3::origin(), Point3::new(2000.0, 0.0, 0.0));
        let element = MechanicalElement::from_line(ElementId(100), MechanicalKind::Pipe, &line, 50.0).unwrap();

        let hits = engine.crossings_for(&element);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].element_id(), ElementId(1));
    }
}
