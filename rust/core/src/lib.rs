// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Openings Core
//!
//! Automatic placement of wall openings where round ducts and pipes from a
//! mechanical model pass through walls of an architectural model.
//!
//! The pipeline runs in three stages:
//!
//! 1. [`collect_elements`] reduces every duct and pipe to a straight
//!    centreline ([`MechanicalElement`]).
//! 2. [`IntersectionEngine`] casts a ray along each centreline and keeps one
//!    hit per wall within the element's length.
//! 3. [`PlacementDriver`] turns each hit into a [`HolePlacementRequest`] and
//!    places it through an [`EditScope`].
//!
//! [`AddOpeningsCommand`] wires the stages together against the host
//! collaborators declared in [`host`].

pub mod collector;
pub mod command;
pub mod config;
pub mod driver;
pub mod element;
pub mod engine;
pub mod error;
pub mod hit;
pub mod host;
pub mod ids;
pub mod report;
pub mod session;

pub use collector::{collect_elements, Collection, SkippedElement};
pub use command::AddOpeningsCommand;
pub use config::PlacementConfig;
pub use driver::{HitSkipReason, HolePlacementRequest, PlacedOpening, PlanOutcome, PlacementDriver, SkippedHit};
pub use element::{ElementSkipReason, MechanicalElement, MechanicalKind, RawElement};
pub use engine::IntersectionEngine;
pub use error::{Error, Result};
pub use hit::{dedup_hits, DedupedHit, RawHit};
pub use host::{
    EditSession, ElementHandle, ElementSource, HostDocument, InstanceHandle, LevelHandle, RayCaster,
    SymbolHandle, ViewHandle, WallHandle,
};
pub use ids::{ElementId, HitKey};
pub use report::PlacementReport;
pub use session::EditScope;
