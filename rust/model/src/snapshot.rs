// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON serialization for documents.
//!
//! A document is stored as its title plus the list of element records in id
//! order. Arena keys are not persisted; they are rebuilt on load. Linked
//! documents are nested inside their link instance record.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::element::ElementRecord;
use crate::error::{Error, Result};

/// Serializable representation of a [`Document`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub title: String,
    #[serde(default)]
    pub elements: Vec<ElementRecord>,
}

impl From<Document> for DocumentSnapshot {
    fn from(doc: Document) -> Self {
        let Document {
            title,
            mut elements,
            index,
            ..
        } = doc;

        let elements = index
            .values()
            .filter_map(|key| elements.remove(*key))
            .collect();

        Self { title, elements }
    }
}

impl TryFrom<DocumentSnapshot> for Document {
    type Error = Error;

    fn try_from(snapshot: DocumentSnapshot) -> Result<Self> {
        let mut doc = Document::new(snapshot.title);
        let mut seen = FxHashSet::default();

        for record in snapshot.elements {
            if !record.id.is_valid() || record.id.value() <= 0 {
                return Err(Error::Serialization(format!("invalid element id {}", record.id)));
            }
            if !seen.insert(record.id) {
                return Err(Error::Serialization(format!("duplicate element id {}", record.id)));
            }
            doc.insert_with_id(record.id, record.element);
        }

        Ok(doc)
    }
}

impl Document {
    /// Serializes the document to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Parses a document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};
    use openings_core::ElementId;
    use openings_geometry::{Arc, LineSegment};

    #[test]
    fn json_round_trip_keeps_ids_and_links() {
        let mut linked = Document::new("AR link");
        linked
            .add_wall(
                LineSegment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 3000.0, 0.0)),
                250.0,
                2800.0,
                None,
            )
            .unwrap();

        let mut doc = Document::new("AR");
        let level = doc.add_level("Level 1", 0.0);
        doc.add_generic("furniture");
        doc.remove(ElementId(2));
        let wall = doc
            .add_wall(
                LineSegment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(6000.0, 0.0, 0.0)),
                200.0,
                3000.0,
                Some(level),
            )
            .unwrap();
        doc.add_duct(Arc::horizontal(Point3::origin(), 1000.0, 0.0, 1.0), 200.0);
        let link = doc.add_link(linked, Vector3::new(10_000.0, 0.0, 0.0));

        let json = doc.to_json().unwrap();
        let restored = Document::from_json(&json).unwrap();

        assert_eq!(restored.title(), "AR");
        assert_eq!(restored.len(), doc.len());
        assert!(restored.get(ElementId(2)).is_none());
        assert_eq!(restored.get(wall).unwrap().as_wall(), doc.get(wall).unwrap().as_wall());

        match restored.get(link) {
            Some(crate::Element::Link(instance)) => {
                assert_eq!(instance.document.title(), "AR link");
                assert_eq!(instance.document.len(), 1);
                assert_eq!(instance.offset, Vector3::new(10_000.0, 0.0, 0.0));
            }
            other => panic!("expected link, got {:?}", other),
        }

        // New ids continue after the highest restored id
        let mut restored = restored;
        assert_eq!(restored.add_generic("column"), ElementId(link.value() + 1));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let json = r#"{
            "title": "AR",
            "elements": [
                { "id": 1, "element": { "type": "level", "name": "L1", "elevation": 0.0 } },
                { "id": 1, "element": { "type": "generic", "category": "column" } }
            ]
        }"#;
        assert!(matches!(Document::from_json(json), Err(Error::Serialization(_))));
    }

    #[test]
    fn hand_written_document_loads() {
        let json = r#"{
            "title": "OV",
            "elements": [
                { "id": 3, "element": { "type": "mechanical", "kind": "pipe", "diameter": 32.0,
                  "location": { "type": "line", "start": [0.0, 0.0, 0.0], "end": [0.0, 0.0, 3000.0] } } },
                { "id": 4, "element": { "type": "mechanical", "kind": "duct", "diameter": 160.0 } }
            ]
        }"#;
        let doc = Document::from_json(json).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get(ElementId(3)).unwrap().category(), "pipe");
        assert_eq!(doc.get(ElementId(4)).unwrap().category(), "duct");
    }
}
