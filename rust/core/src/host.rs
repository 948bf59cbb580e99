// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collaborator interfaces provided by the BIM host.
//!
//! The placement core never touches a document directly. It reads through
//! [`ElementSource`], [`RayCaster`] and [`HostDocument`], and writes only
//! through an [`EditSession`] opened on the primary document.

use openings_geometry::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::element::{MechanicalKind, RawElement};
use crate::error::Result;
use crate::hit::RawHit;
use crate::ids::ElementId;

/// Query service over the model holding ducts and pipes.
pub trait ElementSource {
    /// Every element of `kind` currently in the model
    fn list_mechanical_elements(&self, kind: MechanicalKind) -> Vec<RawElement>;
}

/// Ray intersection service scoped to walls.
pub trait RayCaster {
    /// All wall intersections along the ray, nearest first
    fn cast_ray(&self, origin: &Point3<f64>, direction: &Vector3<f64>) -> Vec<RawHit>;
}

/// A wall in the primary document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallHandle {
    pub id: ElementId,
    /// Owning level; `None` when the wall has no base level
    pub level_id: Option<ElementId>,
}

/// Result of resolving an element id in the primary document.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementHandle {
    Wall(WallHandle),
    Other { id: ElementId, category: String },
}

impl ElementHandle {
    pub fn as_wall(&self) -> Option<&WallHandle> {
        match self {
            ElementHandle::Wall(wall) => Some(wall),
            ElementHandle::Other { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelHandle {
    pub id: ElementId,
    pub name: String,
    pub elevation: f64,
}

/// An opening family type that instances are placed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolHandle {
    pub id: ElementId,
    pub family_name: String,
    pub name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewHandle {
    pub id: ElementId,
    pub name: String,
}

/// A placed opening instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceHandle {
    pub id: ElementId,
}

/// The primary (architectural) document.
pub trait HostDocument {
    fn resolve_element(&self, id: ElementId) -> Option<ElementHandle>;

    fn resolve_level(&self, id: ElementId) -> Option<LevelHandle>;

    /// First opening symbol whose family name equals `family_name`
    fn find_opening_symbol(&self, family_name: &str) -> Option<SymbolHandle>;

    /// First 3D view that is not a template
    fn find_3d_view(&self) -> Option<ViewHandle>;

    /// Ray caster over the walls visible in `view`, linked models included
    fn wall_ray_caster(&self, view: &ViewHandle) -> Result<Box<dyn RayCaster + '_>>;

    /// Open an edit session; nothing it does is visible until commit
    fn begin_edit(&mut self, name: &str) -> Result<Box<dyn EditSession + '_>>;
}

/// Mutations on the primary document, applied all-or-nothing.
pub trait EditSession {
    fn activate_symbol(&mut self, symbol: &SymbolHandle) -> Result<()>;

    fn create_opening_instance(
        &mut self,
        position: &Point3<f64>,
        symbol: &SymbolHandle,
        host_wall: ElementId,
        host_level: ElementId,
    ) -> Result<InstanceHandle>;

    fn set_parameter(&mut self, instance: &InstanceHandle, name: &str, value: f64) -> Result<()>;

    fn commit(self: Box<Self>) -> Result<()>;

    fn rollback(self: Box<Self>);
}
