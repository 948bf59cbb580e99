// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Staged edits on a document.
//!
//! A [`Transaction`] validates every change against the document as it is
//! made but only applies them on commit. Rolling back (or dropping an
//! uncommitted transaction) leaves the document untouched.

use std::collections::BTreeMap;

use nalgebra::Point3;
use openings_core::{EditSession, ElementId, InstanceHandle, SymbolHandle};
use rustc_hash::FxHashSet;

use crate::document::Document;
use crate::element::{Element, FamilySymbol, OpeningInstance};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
enum Change {
    Activate(ElementId),
    CreateOpening(ElementId, OpeningInstance),
    SetParameter {
        instance: ElementId,
        name: String,
        value: f64,
    },
}

pub struct Transaction<'a> {
    doc: &'a mut Document,
    name: String,
    changes: Vec<Change>,
    activated: FxHashSet<ElementId>,
    /// Openings created in this transaction, by id
    staged: BTreeMap<ElementId, OpeningInstance>,
    next_id: i64,
}

impl<'a> Transaction<'a> {
    pub fn new(doc: &'a mut Document, name: impl Into<String>) -> Self {
        let next_id = doc.next_id;
        Self {
            doc,
            name: name.into(),
            changes: Vec::new(),
            activated: FxHashSet::default(),
            staged: BTreeMap::new(),
            next_id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of staged changes
    pub fn pending(&self) -> usize {
        self.changes.len()
    }

    fn symbol(&self, id: ElementId) -> Result<&FamilySymbol> {
        self.doc
            .expect_kind(id, "family symbol", Element::as_family_symbol)
    }

    fn symbol_is_active(&self, id: ElementId) -> Result<bool> {
        Ok(self.symbol(id)?.active || self.activated.contains(&id))
    }

    pub fn activate(&mut self, symbol: ElementId) -> Result<()> {
        if !self.symbol_is_active(symbol)? {
            self.activated.insert(symbol);
            self.changes.push(Change::Activate(symbol));
        }
        Ok(())
    }

    pub fn create_opening(
        &mut self,
        position: Point3<f64>,
        symbol: ElementId,
        host_wall: ElementId,
        level: ElementId,
    ) -> Result<ElementId> {
        if !self.symbol_is_active(symbol)? {
            return Err(Error::SymbolInactive(symbol));
        }
        self.doc.expect_kind(host_wall, "wall", Element::as_wall)?;
        self.doc.expect_kind(level, "level", |e| match e {
            Element::Level(level) => Some(level),
            _ => None,
        })?;

        let parameters = self
            .symbol(symbol)?
            .parameters
            .iter()
            .map(|name| (name.clone(), 0.0))
            .collect();
        let opening = OpeningInstance {
            symbol,
            host_wall,
            level,
            position,
            parameters,
        };

        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.staged.insert(id, opening.clone());
        self.changes.push(Change::CreateOpening(id, opening));
        Ok(id)
    }

    pub fn set_parameter(&mut self, instance: ElementId, name: &str, value: f64) -> Result<()> {
        if !self.staged.contains_key(&instance) {
            // Existing openings are edited through a staged copy
            let existing = self.doc.expect_kind(instance, "opening", Element::as_opening)?.clone();
            self.staged.insert(instance, existing);
        }
        let opening = self
            .staged
            .get_mut(&instance)
            .ok_or(Error::NotFound(instance))?;

        match opening.parameters.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                return Err(Error::ParameterNotFound {
                    id: instance,
                    name: name.to_string(),
                })
            }
        }

        self.changes.push(Change::SetParameter {
            instance,
            name: name.to_string(),
            value,
        });
        Ok(())
    }

    /// Apply every staged change to the document
    pub fn commit(self) -> Result<()> {
        let count = self.changes.len();
        for change in self.changes {
            match change {
                Change::Activate(id) => {
                    if let Some(key) = self.doc.index.get(&id).copied() {
                        if let Some(Element::FamilySymbol(symbol)) =
                            self.doc.elements.get_mut(key).map(|r| &mut r.element)
                        {
                            symbol.active = true;
                        }
                    }
                }
                Change::CreateOpening(id, opening) => {
                    self.doc.insert_with_id(id, Element::Opening(opening));
                }
                Change::SetParameter { instance, name, value } => {
                    if let Some(key) = self.doc.index.get(&instance).copied() {
                        if let Some(Element::Opening(opening)) =
                            self.doc.elements.get_mut(key).map(|r| &mut r.element)
                        {
                            opening.parameters.insert(name, value);
                        }
                    }
                }
            }
        }
        tracing::debug!(name = %self.name, changes = count, "Transaction committed");
        Ok(())
    }

    pub fn rollback(self) {
        tracing::debug!(name = %self.name, discarded = self.changes.len(), "Transaction rolled back");
    }
}

impl EditSession for Transaction<'_> {
    fn activate_symbol(&mut self, symbol: &SymbolHandle) -> openings_core::Result<()> {
        Ok(self.activate(symbol.id)?)
    }

    fn create_opening_instance(
        &mut self,
        position: &Point3<f64>,
        symbol: &SymbolHandle,
        host_wall: ElementId,
        host_level: ElementId,
    ) -> openings_core::Result<InstanceHandle> {
        let id = self.create_opening(*position, symbol.id, host_wall, host_level)?;
        Ok(InstanceHandle { id })
    }

    fn set_parameter(&mut self, instance: &InstanceHandle, name: &str, value: f64) -> openings_core::Result<()> {
        Ok(Transaction::set_parameter(self, instance.id, name, value)?)
    }

    fn commit(self: Box<Self>) -> openings_core::Result<()> {
        Ok(Transaction::commit(*self)?)
    }

    fn rollback(self: Box<Self>) {
        Transaction::rollback(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openings_geometry::LineSegment;

    struct Fixture {
        doc: Document,
        symbol: ElementId,
        wall: ElementId,
        level: ElementId,
    }

    fn fixture(active: bool) -> Fixture {
        let mut doc = Document::new("AR");
        let level = doc.add_level("Level 1", 0.0);
        let wall = doc
            .add_wall(
                LineSegment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(5000.0, 0.0, 0.0)),
                200.0,
                3000.0,
                Some(level),
            )
            .unwrap();
        let symbol = doc.add_family_symbol("Holes", "Square", active, &["Width", "Height"]);
        Fixture { doc, symbol, wall, level }
    }

    #[test]
    fn changes_apply_on_commit_only() {
        let mut f = fixture(true);
        let before = f.doc.len();

        let mut tx = Transaction::new(&mut f.doc, "Place");
        let id = tx.create_opening(Point3::new(1000.0, 0.0, 1500.0), f.symbol, f.wall, f.level).unwrap();
        tx.set_parameter(id, "Width", 200.0).unwrap();
        assert_eq!(tx.pending(), 2);
        tx.commit().unwrap();

        assert_eq!(f.doc.len(), before + 1);
        let opening = f.doc.get(id).unwrap().as_opening().unwrap();
        assert_eq!(opening.parameters["Width"], 200.0);
        assert_eq!(opening.parameters["Height"], 0.0);
        assert_eq!(opening.host_wall, f.wall);
    }

    #[test]
    fn rollback_discards_everything() {
        let mut f = fixture(false);
        let before = f.doc.len();

        let mut tx = Transaction::new(&mut f.doc, "Place");
        tx.activate(f.symbol).unwrap();
        tx.create_opening(Point3::origin(), f.symbol, f.wall, f.level).unwrap();
        tx.rollback();

        assert_eq!(f.doc.len(), before);
        assert!(!f.doc.get(f.symbol).unwrap().as_family_symbol().unwrap().active);
    }

    #[test]
    fn inactive_symbol_cannot_be_placed() {
        let mut f = fixture(false);
        let mut tx = Transaction::new(&mut f.doc, "Place");
        assert_eq!(
            tx.create_opening(Point3::origin(), f.symbol, f.wall, f.level),
            Err(Error::SymbolInactive(f.symbol))
        );

        tx.activate(f.symbol).unwrap();
        assert!(tx.create_opening(Point3::origin(), f.symbol, f.wall, f.level).is_ok());
    }

    #[test]
    fn activation_persists_after_commit() {
        let mut f = fixture(false);
        let mut tx = Transaction::new(&mut f.doc, "Activate");
        tx.activate(f.symbol).unwrap();
        tx.commit().unwrap();
        assert!(f.doc.get(f.symbol).unwrap().as_family_symbol().unwrap().active);
    }

    #[test]
    fn unknown_parameter_and_wrong_host() {
        let mut f = fixture(true);
        let mut tx = Transaction::new(&mut f.doc, "Place");
        let id = tx.create_opening(Point3::origin(), f.symbol, f.wall, f.level).unwrap();

        assert_eq!(
            tx.set_parameter(id, "Depth", 1.0),
            Err(Error::ParameterNotFound { id, name: "Depth".into() })
        );
        assert_eq!(
            tx.create_opening(Point3::origin(), f.symbol, f.level, f.level),
            Err(Error::WrongKind { id: f.level, expected: "wall" })
        );
    }
}
