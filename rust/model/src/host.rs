// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `openings-core` collaborator traits for [`Document`].

use openings_core::{
    EditSession, ElementHandle, ElementId, ElementSource, HostDocument, LevelHandle, MechanicalKind,
    RawElement, RayCaster, SymbolHandle, ViewHandle, WallHandle,
};

use crate::caster::WallRayCaster;
use crate::document::Document;
use crate::element::Element;
use crate::error::Error;
use crate::transaction::Transaction;

impl ElementSource for Document {
    fn list_mechanical_elements(&self, kind: MechanicalKind) -> Vec<RawElement> {
        self.iter()
            .filter_map(|(id, element)| match element {
                Element::Mechanical(run) if run.kind == kind => Some(RawElement {
                    id,
                    kind,
                    location: run.location,
                    diameter: run.diameter,
                }),
                _ => None,
            })
            .collect()
    }
}

impl HostDocument for Document {
    fn resolve_element(&self, id: ElementId) -> Option<ElementHandle> {
        let element = self.get(id)?;
        Some(match element {
            Element::Wall(wall) => ElementHandle::Wall(WallHandle {
                id,
                level_id: wall.level,
            }),
            other => ElementHandle::Other {
                id,
                category: other.category().to_string(),
            },
        })
    }

    fn resolve_level(&self, id: ElementId) -> Option<LevelHandle> {
        match self.get(id)? {
            Element::Level(level) => Some(LevelHandle {
                id,
                name: level.name.clone(),
                elevation: level.elevation,
            }),
            _ => None,
        }
    }

    fn find_opening_symbol(&self, family_name: &str) -> Option<SymbolHandle> {
        self.iter().find_map(|(id, element)| {
            let symbol = element.as_family_symbol()?;
            (symbol.family_name == family_name).then(|| SymbolHandle {
                id,
                family_name: symbol.family_name.clone(),
                name: symbol.name.clone(),
                is_active: symbol.active,
            })
        })
    }

    fn find_3d_view(&self) -> Option<ViewHandle> {
        self.iter().find_map(|(id, element)| match element {
            Element::View3d(view) if !view.is_template => Some(ViewHandle {
                id,
                name: view.name.clone(),
            }),
            _ => None,
        })
    }

    fn wall_ray_caster(&self, view: &ViewHandle) -> openings_core::Result<Box<dyn RayCaster + '_>> {
        match self.get(view.id) {
            Some(Element::View3d(v)) if !v.is_template => Ok(Box::new(WallRayCaster::new(self))),
            Some(_) => Err(Error::UnusableView(view.id).into()),
            None => Err(Error::NotFound(view.id).into()),
        }
    }

    fn begin_edit(&mut self, name: &str) -> openings_core::Result<Box<dyn EditSession + '_>> {
        Ok(Box::new(Transaction::new(self, name)))
    }
}
