// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element Collector
//!
//! Gathers ducts and pipes from the secondary model and reduces each to a
//! straight centreline. Elements whose location is not a usable straight
//! line are left out and reported; collection itself never fails.

use serde::Serialize;

use crate::element::{ElementSkipReason, MechanicalElement, MechanicalKind};
use crate::host::ElementSource;
use crate::ids::ElementId;

/// An element excluded from collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedElement {
    pub id: ElementId,
    pub kind: MechanicalKind,
    #[serde(flatten)]
    pub reason: ElementSkipReason,
}

/// Result of collecting one category.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub elements: Vec<MechanicalElement>,
    pub skipped: Vec<SkippedElement>,
}

impl Collection {
    /// Append another collection, keeping order
    pub fn extend(&mut self, other: Collection) {
        self.elements.extend(other.elements);
        self.skipped.extend(other.skipped);
    }
}

/// Collect every element of `kind` from `source`
pub fn collect_elements(source: &dyn ElementSource, kind: MechanicalKind) -> Collection {
    let raw = source.list_mechanical_elements(kind);
    let mut collection = Collection {
        elements: Vec::with_capacity(raw.len()),
        skipped: Vec::new(),
    };

    for element in &raw {
        match MechanicalElement::from_raw(element) {
            Ok(reduced) => collection.elements.push(reduced),
            Err(reason) => {
                tracing::debug!(id = %element.id, kind = %kind, %reason, "Skipping mechanical element");
                collection.skipped.push(SkippedElement {
                    id: element.id,
                    kind: element.kind,
                    reason,
                });
            }
        }
    }

    tracing::debug!(
        kind = %kind,
        collected = collection.elements.len(),
        skipped = collection.skipped.len(),
        "Collected mechanical elements"
    );

    collection
}
