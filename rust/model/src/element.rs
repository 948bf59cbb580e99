// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element records stored in a [`Document`](crate::Document).

use std::collections::BTreeMap;

use nalgebra::{Point3, Vector3};
use openings_core::{ElementId, MechanicalKind};
use openings_geometry::{Curve, LineSegment};
use serde::{Deserialize, Serialize};

use crate::document::Document;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub elevation: f64,
}

/// A straight wall swept from its location line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub location: LineSegment,
    pub thickness: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<ElementId>,
}

/// A round duct or pipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanicalRun {
    pub kind: MechanicalKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Curve>,
    pub diameter: f64,
}

/// An opening family type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilySymbol {
    pub family_name: String,
    pub name: String,
    #[serde(default)]
    pub active: bool,
    /// Instance parameters every placed instance carries
    #[serde(default)]
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View3d {
    pub name: String,
    #[serde(default)]
    pub is_template: bool,
}

/// A linked model placed in this document with a translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkInstance {
    /// Position of the linked model's origin in this document
    pub offset: Vector3<f64>,
    pub document: Box<Document>,
}

/// A placed opening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningInstance {
    pub symbol: ElementId,
    pub host_wall: ElementId,
    pub level: ElementId,
    pub position: Point3<f64>,
    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
}

/// Any element a document can hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Level(Level),
    Wall(Wall),
    Mechanical(MechanicalRun),
    FamilySymbol(FamilySymbol),
    View3d(View3d),
    Link(LinkInstance),
    Opening(OpeningInstance),
    /// Anything else, identified only by category
    Generic { category: String },
}

impl Element {
    /// Host category name
    pub fn category(&self) -> &str {
        match self {
            Element::Level(_) => "level",
            Element::Wall(_) => "wall",
            Element::Mechanical(run) => match run.kind {
                MechanicalKind::Duct => "duct",
                MechanicalKind::Pipe => "pipe",
            },
            Element::FamilySymbol(_) => "family symbol",
            Element::View3d(_) => "3D view",
            Element::Link(_) => "link instance",
            Element::Opening(_) => "opening",
            Element::Generic { category } => category,
        }
    }

    pub fn as_wall(&self) -> Option<&Wall> {
        match self {
            Element::Wall(wall) => Some(wall),
            _ => None,
        }
    }

    pub fn as_family_symbol(&self) -> Option<&FamilySymbol> {
        match self {
            Element::FamilySymbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn as_opening(&self) -> Option<&OpeningInstance> {
        match self {
            Element::Opening(opening) => Some(opening),
            _ => None,
        }
    }
}

/// An element together with its id, as stored and serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementRecord {
    pub id: ElementId,
    pub element: Element,
}
