// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element identifiers and the composite wall-hit key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque element identifier within one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub i64);

impl ElementId {
    /// Sentinel for "no element", also used as the linked id of hits that
    /// are not inside a linked model.
    pub const INVALID: ElementId = ElementId(-1);

    #[inline]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    #[inline]
    pub fn value(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ElementId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Identity of the wall a ray hit: the linked-model element id plus the
/// element id in the primary model. Two hits with equal keys are the same
/// physical wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HitKey {
    pub linked: ElementId,
    pub element: ElementId,
}

impl HitKey {
    #[inline]
    pub fn new(linked: ElementId, element: ElementId) -> Self {
        Self { linked, element }
    }

    /// True when the hit lies inside a linked model
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.linked.is_valid()
    }
}

impl fmt::Display for HitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_linked() {
            write!(f, "{}:{}", self.element, self.linked)
        } else {
            write!(f, "{}", self.element)
        }
    }
}
