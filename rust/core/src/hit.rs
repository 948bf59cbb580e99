// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ray hits and their deduplication by wall identity.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::ids::{ElementId, HitKey};

/// One intersection reported by the ray caster.
///
/// A single wall may produce several raw hits (entry and exit faces, nested
/// solids), each with its own distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawHit {
    /// Distance from the ray origin to the intersection
    pub distance: f64,
    /// Element hit, or the link instance when the hit is inside a linked model
    pub element_id: ElementId,
    /// Element inside the linked model, or [`ElementId::INVALID`]
    pub linked_element_id: ElementId,
}

impl RawHit {
    pub fn new(distance: f64, element_id: ElementId) -> Self {
        Self {
            distance,
            element_id,
            linked_element_id: ElementId::INVALID,
        }
    }

    pub fn linked(distance: f64, element_id: ElementId, linked_element_id: ElementId) -> Self {
        Self {
            distance,
            element_id,
            linked_element_id,
        }
    }

    #[inline]
    pub fn key(&self) -> HitKey {
        HitKey::new(self.linked_element_id, self.element_id)
    }
}

/// A raw hit kept after deduplication: the first hit seen for its wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DedupedHit(RawHit);

impl DedupedHit {
    #[inline]
    pub fn distance(&self) -> f64 {
        self.0.distance
    }

    #[inline]
    pub fn element_id(&self) -> ElementId {
        self.0.element_id
    }

    #[inline]
    pub fn key(&self) -> HitKey {
        self.0.key()
    }

    #[inline]
    pub fn raw(&self) -> &RawHit {
        &self.0
    }
}

impl From<DedupedHit> for RawHit {
    fn from(hit: DedupedHit) -> Self {
        hit.0
    }
}

/// Keep the first hit for every distinct (linked id, element id) pair.
///
/// Emission order is preserved; later hits on an already-seen wall are
/// dropped regardless of their distance.
pub fn dedup_hits<I>(hits: I) -> Vec<DedupedHit>
where
    I: IntoIterator<Item = RawHit>,
{
    let mut seen: FxHashSet<HitKey> = FxHashSet::default();
    hits.into_iter()
        .filter(|hit| seen.insert(hit.key()))
        .map(DedupedHit)
        .collect()
}
