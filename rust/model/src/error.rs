// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the in-memory host model.

use openings_core::ElementId;

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or editing a document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A referenced element does not exist.
    #[error("element not found: {0}")]
    NotFound(ElementId),

    /// A referenced element exists but has the wrong type.
    #[error("element {id} is not a {expected}")]
    WrongKind { id: ElementId, expected: &'static str },

    /// Instances cannot be placed from an inactive family symbol.
    #[error("family symbol {0} is not active")]
    SymbolInactive(ElementId),

    /// The instance has no parameter with this name.
    #[error("parameter \"{name}\" not found on element {id}")]
    ParameterNotFound { id: ElementId, name: String },

    /// The view cannot be used for ray casting.
    #[error("view {0} is a template or not a 3D view")]
    UnusableView(ElementId),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Wall or curve geometry is invalid.
    #[error("geometry error: {0}")]
    Geometry(#[from] openings_geometry::Error),
}

impl From<Error> for openings_core::Error {
    fn from(err: Error) -> Self {
        openings_core::Error::Host(err.to_string())
    }
}
