// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based document storage.
//!
//! Every element lives in a slot map under a stable [`ElementKey`]. Host
//! element ids are allocated sequentially from 1 and mapped to keys through
//! an ordered index, so iteration (and "first match" lookups) follow id
//! order.

use std::collections::BTreeMap;

use nalgebra::Vector3;
use openings_core::{ElementId, MechanicalKind};
use openings_geometry::{Curve, LineSegment, WallSolid};
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::element::*;
use crate::error::{Error, Result};
use crate::snapshot::DocumentSnapshot;

new_key_type! {
    /// Arena key for a stored element.
    pub struct ElementKey;
}

/// An in-memory BIM document.
///
/// # Example
///
/// ```
/// use openings_model::Document;
/// use openings_geometry::{LineSegment, Point3};
///
/// let mut doc = Document::new("AR");
/// let level = doc.add_level("Level 1", 0.0);
/// let line = LineSegment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(5000.0, 0.0, 0.0));
/// let wall = doc.add_wall(line, 200.0, 3000.0, Some(level)).unwrap();
///
/// assert_eq!(doc.len(), 2);
/// assert!(doc.get(wall).unwrap().as_wall().is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "DocumentSnapshot", try_from = "DocumentSnapshot")]
pub struct Document {
    pub(crate) title: String,
    pub(crate) elements: SlotMap<ElementKey, ElementRecord>,
    pub(crate) index: BTreeMap<ElementId, ElementKey>,
    pub(crate) next_id: i64,
}

impl Document {
    /// Creates a new, empty document.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            elements: SlotMap::with_key(),
            index: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Looks up an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        let key = self.index.get(&id)?;
        self.elements.get(*key).map(|record| &record.element)
    }

    /// All elements in id order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> + '_ {
        self.index
            .iter()
            .filter_map(move |(id, key)| self.elements.get(*key).map(|r| (*id, &r.element)))
    }

    /// Removes an element, returning it if it existed.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let key = self.index.remove(&id)?;
        self.elements.remove(key).map(|record| record.element)
    }

    /// Placed openings in id order.
    pub fn openings(&self) -> impl Iterator<Item = (ElementId, &OpeningInstance)> + '_ {
        self.iter()
            .filter_map(|(id, element)| element.as_opening().map(|o| (id, o)))
    }

    pub(crate) fn allocate_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Stores `element` under an already allocated id.
    pub(crate) fn insert_with_id(&mut self, id: ElementId, element: Element) {
        if let Some(old) = self.index.get(&id).copied() {
            self.elements.remove(old);
        }
        let key = self.elements.insert(ElementRecord { id, element });
        self.index.insert(id, key);
        if id.value() >= self.next_id {
            self.next_id = id.value() + 1;
        }
    }

    /// Adds an element and returns its new id.
    pub fn insert(&mut self, element: Element) -> ElementId {
        let id = self.allocate_id();
        self.insert_with_id(id, element);
        id
    }

    pub(crate) fn expect_kind<'a, T>(
        &'a self,
        id: ElementId,
        expected: &'static str,
        project: impl FnOnce(&'a Element) -> Option<&'a T>,
    ) -> Result<&'a T> {
        let element = self.get(id).ok_or(Error::NotFound(id))?;
        project(element).ok_or(Error::WrongKind { id, expected })
    }

    // --- Builders ---

    pub fn add_level(&mut self, name: impl Into<String>, elevation: f64) -> ElementId {
        self.insert(Element::Level(Level {
            name: name.into(),
            elevation,
        }))
    }

    /// Adds a straight wall.
    ///
    /// Returns an error if the wall geometry is invalid or `level` is not a
    /// level of this document.
    pub fn add_wall(
        &mut self,
        location: LineSegment,
        thickness: f64,
        height: f64,
        level: Option<ElementId>,
    ) -> Result<ElementId> {
        WallSolid::new(&location, thickness, height)?;
        if let Some(level_id) = level {
            self.expect_kind(level_id, "level", |e| match e {
                Element::Level(level) => Some(level),
                _ => None,
            })?;
        }

        Ok(self.insert(Element::Wall(Wall {
            location,
            thickness,
            height,
            level,
        })))
    }

    /// Adds a duct or pipe; `location` may be any curve, or none.
    pub fn add_mechanical(&mut self, kind: MechanicalKind, location: Option<Curve>, diameter: f64) -> ElementId {
        self.insert(Element::Mechanical(MechanicalRun {
            kind,
            location,
            diameter,
        }))
    }

    pub fn add_duct(&mut self, location: impl Into<Curve>, diameter: f64) -> ElementId {
        self.add_mechanical(MechanicalKind::Duct, Some(location.into()), diameter)
    }

    pub fn add_pipe(&mut self, location: impl Into<Curve>, diameter: f64) -> ElementId {
        self.add_mechanical(MechanicalKind::Pipe, Some(location.into()), diameter)
    }

    pub fn add_family_symbol(
        &mut self,
        family_name: impl Into<String>,
        name: impl Into<String>,
        active: bool,
        parameters: &[&str],
    ) -> ElementId {
        self.insert(Element::FamilySymbol(FamilySymbol {
            family_name: family_name.into(),
            name: name.into(),
            active,
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
        }))
    }

    pub fn add_view_3d(&mut self, name: impl Into<String>, is_template: bool) -> ElementId {
        self.insert(Element::View3d(View3d {
            name: name.into(),
            is_template,
        }))
    }

    /// Links `document` into this one, its origin placed at `offset`.
    pub fn add_link(&mut self, document: Document, offset: Vector3<f64>) -> ElementId {
        self.insert(Element::Link(LinkInstance {
            offset,
            document: Box::new(document),
        }))
    }

    pub fn add_generic(&mut self, category: impl Into<String>) -> ElementId {
        self.insert(Element::Generic {
            category: category.into(),
        })
    }
}
