// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall ray casting over a document and its linked models.
//!
//! Wall solids are built once when the caster is created. Every face
//! crossing is reported as its own hit, so a ray through a wall yields one
//! hit for the face it enters and one for the face it leaves. Hits inside a
//! linked model carry the link instance id as element id and the wall's id
//! in the linked document as linked element id.

use nalgebra::{Point3, Vector3};
use openings_core::{ElementId, RawHit, RayCaster};
use openings_geometry::{Ray, WallSolid};

use crate::document::Document;
use crate::element::Element;

struct WallEntry {
    id: ElementId,
    solid: WallSolid,
}

struct LinkEntry {
    id: ElementId,
    /// Subtracted from host coordinates to get link coordinates
    offset: Vector3<f64>,
    walls: Vec<WallEntry>,
}

/// Ray caster restricted to walls.
pub struct WallRayCaster {
    walls: Vec<WallEntry>,
    links: Vec<LinkEntry>,
}

fn wall_entries(doc: &Document) -> Vec<WallEntry> {
    doc.iter()
        .filter_map(|(id, element)| {
            let wall = element.as_wall()?;
            match WallSolid::new(&wall.location, wall.thickness, wall.height) {
                Ok(solid) => Some(WallEntry { id, solid }),
                Err(err) => {
                    tracing::warn!(wall = %id, error = %err, "Wall has no usable solid");
                    None
                }
            }
        })
        .collect()
}

impl WallRayCaster {
    /// Build a caster over the walls of `doc` and of every linked document
    pub fn new(doc: &Document) -> Self {
        let walls = wall_entries(doc);
        let links: Vec<LinkEntry> = doc
            .iter()
            .filter_map(|(id, element)| match element {
                Element::Link(link) => Some(LinkEntry {
                    id,
                    offset: link.offset,
                    walls: wall_entries(&link.document),
                }),
                _ => None,
            })
            .collect();

        tracing::debug!(
            walls = walls.len(),
            links = links.len(),
            linked_walls = links.iter().map(|l| l.walls.len()).sum::<usize>(),
            "Built wall ray caster"
        );

        Self { walls, links }
    }

    /// Number of wall solids, linked ones included
    pub fn wall_count(&self) -> usize {
        self.walls.len() + self.links.iter().map(|l| l.walls.len()).sum::<usize>()
    }
}

impl RayCaster for WallRayCaster {
    fn cast_ray(&self, origin: &Point3<f64>, direction: &Vector3<f64>) -> Vec<RawHit> {
        let ray = match Ray::new(*origin, *direction) {
            Ok(ray) => ray,
            Err(err) => {
                tracing::warn!(error = %err, "Ray cast with invalid direction");
                return Vec::new();
            }
        };

        let mut hits = Vec::new();

        for wall in &self.walls {
            for face_hit in wall.solid.intersect_ray(&ray) {
                hits.push(RawHit::new(face_hit.distance, wall.id));
            }
        }

        for link in &self.links {
            let local = ray.translated(&-link.offset);
            for wall in &link.walls {
                for face_hit in wall.solid.intersect_ray(&local) {
                    hits.push(RawHit::linked(face_hit.distance, link.id, wall.id));
                }
            }
        }

        // Stable: equal distances keep document order
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use openings_geometry::LineSegment;

    fn wall_along_y(doc: &mut Document, x: f64) -> ElementId {
        doc.add_wall(
            LineSegment::new(Point3::new(x, -2000.0, 0.0), Point3::new(x, 2000.0, 0.0)),
            200.0,
            3000.0,
            None,
        )
        .unwrap()
    }

    #[test]
    fn hits_are_sorted_across_walls() {
        let mut doc = Document::new("AR");
        let far = wall_along_y(&mut doc, 5000.0);
        let near = wall_along_y(&mut doc, 2000.0);

        let caster = WallRayCaster::new(&doc);
        let hits = caster.cast_ray(&Point3::new(0.0, 0.0, 1000.0), &Vector3::x());

        let ids: Vec<ElementId> = hits.iter().map(|h| h.element_id).collect();
        assert_eq!(ids, vec![near, near, far, far]);
        assert_relative_eq!(hits[0].distance, 1900.0, epsilon = 1e-9);
        assert_relative_eq!(hits[3].distance, 5100.0, epsilon = 1e-9);
        assert!(hits.iter().all(|h| !h.linked_element_id.is_valid()));
    }

    #[test]
    fn linked_walls_are_offset_and_tagged() {
        let mut linked = Document::new("AR link");
        let linked_wall = wall_along_y(&mut linked, 0.0);

        let mut doc = Document::new("AR");
        let link = doc.add_link(linked, Vector3::new(3000.0, 0.0, 0.0));

        let caster = WallRayCaster::new(&doc);
        assert_eq!(caster.wall_count(), 1);

        let hits = caster.cast_ray(&Point3::new(0.0, 0.0, 1000.0), &Vector3::x());
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].element_id, link);
        assert_eq!(hits[0].linked_element_id, linked_wall);
        assert_relative_eq!(hits[0].distance, 2900.0, epsilon = 1e-9);
    }

    #[test]
    fn non_wall_elements_are_ignored() {
        let mut doc = Document::new("AR");
        doc.add_generic("column");
        let caster = WallRayCaster::new(&doc);
        assert_eq!(caster.wall_count(), 0);
        assert!(caster.cast_ray(&Point3::origin(), &Vector3::x()).is_empty());
    }

    #[test]
    fn zero_direction_yields_no_hits() {
        let mut doc = Document::new("AR");
        wall_along_y(&mut doc, 1000.0);
        let caster = WallRayCaster::new(&doc);
        assert!(caster.cast_ray(&Point3::origin(), &Vector3::zeros()).is_empty());
    }
}
