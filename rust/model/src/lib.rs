// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Openings Model
//!
//! An in-memory BIM document that implements every collaborator trait of
//! `openings-core`: element queries for ducts and pipes, wall ray casting
//! (linked models included), id resolution, and staged all-or-nothing edits.
//!
//! Documents are stored in an arena with stable keys and can be saved to and
//! loaded from JSON.

pub mod caster;
pub mod document;
pub mod element;
pub mod error;
pub mod host;
pub mod snapshot;
pub mod transaction;

pub use caster::WallRayCaster;
pub use document::{Document, ElementKey};
pub use element::{
    Element, ElementRecord, FamilySymbol, Level, LinkInstance, MechanicalRun, OpeningInstance, View3d, Wall,
};
pub use error::{Error, Result};
pub use snapshot::DocumentSnapshot;
pub use transaction::Transaction;
