// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for opening placement.

use thiserror::Error;

/// Result type for opening placement
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort an opening placement run.
///
/// Per-element and per-hit problems are not errors; they are recorded in the
/// [`PlacementReport`](crate::PlacementReport) and processing continues.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Secondary (mechanical) model not found")]
    SecondaryModelMissing,

    #[error("Opening family \"{family}\" not found")]
    OpeningSymbolMissing { family: String },

    #[error("No non-template 3D view found")]
    View3dMissing,

    #[error("Edit session already closed")]
    SessionClosed,

    #[error("Host error: {0}")]
    Host(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for failures detected before any model change is attempted
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Error::SecondaryModelMissing | Error::OpeningSymbolMissing { .. } | Error::View3dMissing
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(format!("JSON error: {}", err))
    }
}
