// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hole Placement Driver
//!
//! Turns the wall crossings of a mechanical element into fully specified
//! placement requests, then hands them to an edit session.
//!
//! Planning is read-only: each hit is resolved to a wall and its level and
//! the insertion point is computed as `origin + direction * distance`.
//! Hits that do not resolve to a wall with a level are skipped and reported.
//! Placement creates one opening instance per request and sets its width and
//! height parameters.

use std::fmt;

use openings_geometry::Point3;
use serde::Serialize;

use crate::config::PlacementConfig;
use crate::element::MechanicalElement;
use crate::error::Result;
use crate::hit::DedupedHit;
use crate::host::{ElementHandle, HostDocument, SymbolHandle};
use crate::ids::{ElementId, HitKey};
use crate::session::EditScope;

/// A ready-to-place square opening.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HolePlacementRequest {
    /// Mechanical element the opening is for
    pub source: ElementId,
    pub position: Point3<f64>,
    pub host_wall_id: ElementId,
    pub host_level_id: ElementId,
    pub width: f64,
    pub height: f64,
}

/// Why a wall hit did not produce a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum HitSkipReason {
    /// The hit element id does not resolve in the primary document
    UnresolvedElement,
    /// The hit element is not a wall (for example a link instance)
    NotAWall { category: String },
    /// The wall has no level, or its level does not resolve
    LevelMissing { wall: ElementId },
}

impl fmt::Display for HitSkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HitSkipReason::UnresolvedElement => f.write_str("element not found"),
            HitSkipReason::NotAWall { category } => write!(f, "element is a {}, not a wall", category),
            HitSkipReason::LevelMissing { wall } => write!(f, "wall {} has no resolvable level", wall),
        }
    }
}

/// A wall hit that was dropped during planning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedHit {
    pub element: ElementId,
    pub hit: HitKey,
    pub distance: f64,
    #[serde(flatten)]
    pub reason: HitSkipReason,
}

/// Requests and skips for one mechanical element.
#[derive(Debug, Clone, Default)]
pub struct PlanOutcome {
    pub requests: Vec<HolePlacementRequest>,
    pub skipped: Vec<SkippedHit>,
}

/// A request that was turned into an opening instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacedOpening {
    pub instance: ElementId,
    #[serde(flatten)]
    pub request: HolePlacementRequest,
}

/// Plans and places openings.
pub struct PlacementDriver<'a> {
    config: &'a PlacementConfig,
}

impl<'a> PlacementDriver<'a> {
    pub fn new(config: &'a PlacementConfig) -> Self {
        Self { config }
    }

    /// Build one request per resolvable hit, in hit order.
    pub fn plan<H: HostDocument + ?Sized>(
        &self,
        element: &MechanicalElement,
        hits: &[DedupedHit],
        host: &H,
    ) -> PlanOutcome {
        let mut outcome = PlanOutcome {
            requests: Vec::with_capacity(hits.len()),
            skipped: Vec::new(),
        };

        for hit in hits {
            match resolve_request(element, hit, host) {
                Ok(request) => outcome.requests.push(request),
                Err(reason) => {
                    tracing::warn!(
                        element = %element.id(),
                        hit = %hit.key(),
                        distance = hit.distance(),
                        %reason,
                        "Skipping wall hit"
                    );
                    outcome.skipped.push(SkippedHit {
                        element: element.id(),
                        hit: hit.key(),
                        distance: hit.distance(),
                        reason,
                    });
                }
            }
        }

        outcome
    }

    /// Create an opening instance for every request inside `scope`.
    ///
    /// Any failure is returned immediately; the caller's scope then rolls
    /// back the instances created so far.
    pub fn place(
        &self,
        scope: &mut EditScope<'_>,
        symbol: &SymbolHandle,
        requests: &[HolePlacementRequest],
    ) -> Result<Vec<PlacedOpening>> {
        let mut placed = Vec::with_capacity(requests.len());

        for request in requests {
            let instance = scope.create_opening_instance(
                &request.position,
                symbol,
                request.host_wall_id,
                request.host_level_id,
            )?;
            scope.set_parameter(&instance, &self.config.width_parameter, request.width)?;
            scope.set_parameter(&instance, &self.config.height_parameter, request.height)?;

            tracing::debug!(
                instance = %instance.id,
                wall = %request.host_wall_id,
                x = request.position.x,
                y = request.position.y,
                z = request.position.z,
                size = request.width,
                "Placed opening"
            );
            placed.push(PlacedOpening {
                instance: instance.id,
                request: *request,
            });
        }

        Ok(placed)
    }
}

fn resolve_request<H: HostDocument + ?Sized>(
    element: &MechanicalElement,
    hit: &DedupedHit,
    host: &H,
) -> std::result::Result<HolePlacementRequest, HitSkipReason> {
    let handle = host
        .resolve_element(hit.element_id())
        .ok_or(HitSkipReason::UnresolvedElement)?;

    let wall = match handle {
        ElementHandle::Wall(wall) => wall,
        ElementHandle::Other { category, .. } => return Err(HitSkipReason::NotAWall { category }),
    };

    let level = wall
        .level_id
        .and_then(|id| host.resolve_level(id))
        .ok_or(HitSkipReason::LevelMissing { wall: wall.id })?;

    Ok(HolePlacementRequest {
        source: element.id(),
        position: element.point_at(hit.distance()),
        host_wall_id: wall.id,
        host_level_id: level.id,
        width: element.diameter(),
        height: element.diameter(),
    })
}
