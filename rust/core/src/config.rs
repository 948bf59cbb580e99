// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement configuration loaded from environment variables or JSON.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Opening placement configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Family name of the opening symbol to place.
    pub opening_family_name: String,
    /// Instance parameter receiving the opening width.
    pub width_parameter: String,
    /// Instance parameter receiving the opening height.
    pub height_parameter: String,
    /// Place openings for ducts.
    pub include_ducts: bool,
    /// Place openings for pipes.
    pub include_pipes: bool,
}

impl PlacementConfig {
    pub const DEFAULT_FAMILY_NAME: &'static str = "Отверстия";
    pub const DEFAULT_WIDTH_PARAMETER: &'static str = "Ширина";
    pub const DEFAULT_HEIGHT_PARAMETER: &'static str = "Высота";

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from a JSON document; absent fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let text = |key: &str, default: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| default.into())
        };
        let flag = |key: &str| {
            lookup(key)
                .and_then(|s| parse_flag(&s))
                .unwrap_or(true)
        };

        Self {
            opening_family_name: text("OPENINGS_FAMILY_NAME", Self::DEFAULT_FAMILY_NAME),
            width_parameter: text("OPENINGS_WIDTH_PARAM", Self::DEFAULT_WIDTH_PARAMETER),
            height_parameter: text("OPENINGS_HEIGHT_PARAM", Self::DEFAULT_HEIGHT_PARAMETER),
            include_ducts: flag("OPENINGS_INCLUDE_DUCTS"),
            include_pipes: flag("OPENINGS_INCLUDE_PIPES"),
        }
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            opening_family_name: Self::DEFAULT_FAMILY_NAME.into(),
            width_parameter: Self::DEFAULT_WIDTH_PARAMETER.into(),
            height_parameter: Self::DEFAULT_HEIGHT_PARAMETER.into(),
            include_ducts: true,
            include_pipes: true,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
