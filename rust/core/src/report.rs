// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Summary of a placement run.

use serde::Serialize;

use crate::collector::SkippedElement;
use crate::driver::{PlacedOpening, SkippedHit};

/// What a completed run collected, placed and skipped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlacementReport {
    /// Ducts collected with a straight centreline
    pub ducts: usize,
    /// Pipes collected with a straight centreline
    pub pipes: usize,
    /// Whether the opening symbol had to be activated first
    pub symbol_activated: bool,
    pub placed: Vec<PlacedOpening>,
    pub skipped_elements: Vec<SkippedElement>,
    pub skipped_hits: Vec<SkippedHit>,
}

impl PlacementReport {
    #[inline]
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    /// True if anything was left out along the way
    pub fn has_skips(&self) -> bool {
        !self.skipped_elements.is_empty() || !self.skipped_hits.is_empty()
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
