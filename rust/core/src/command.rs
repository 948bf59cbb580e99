// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The "add openings" command: collect, intersect, place.

use crate::collector::{collect_elements, Collection};
use crate::config::PlacementConfig;
use crate::driver::PlacementDriver;
use crate::element::MechanicalKind;
use crate::engine::IntersectionEngine;
use crate::error::{Error, Result};
use crate::host::{ElementSource, HostDocument};
use crate::report::PlacementReport;
use crate::session::EditScope;

pub const ACTIVATE_SYMBOL_EDIT: &str = "Activate opening symbol";
pub const PLACE_OPENINGS_EDIT: &str = "Place openings";

/// Places an opening in every wall crossed by a duct or pipe.
#[derive(Debug, Clone, Default)]
pub struct AddOpeningsCommand {
    config: PlacementConfig,
}

impl AddOpeningsCommand {
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Run the command against `primary`, reading ducts and pipes from
    /// `secondary`.
    ///
    /// Missing preconditions (secondary model, opening symbol, 3D view) fail
    /// before anything is changed. Placement happens in a single edit scope:
    /// either every opening is committed or none is.
    pub fn execute<H>(&self, primary: &mut H, secondary: Option<&dyn ElementSource>) -> Result<PlacementReport>
    where
        H: HostDocument + ?Sized,
    {
        let secondary = secondary.ok_or(Error::SecondaryModelMissing)?;

        let family = &self.config.opening_family_name;
        let mut symbol = primary
            .find_opening_symbol(family)
            .ok_or_else(|| Error::OpeningSymbolMissing { family: family.clone() })?;
        let view = primary.find_3d_view().ok_or(Error::View3dMissing)?;

        let mut report = PlacementReport::default();

        if !symbol.is_active {
            let mut scope = EditScope::begin(&mut *primary, ACTIVATE_SYMBOL_EDIT)?;
            scope.activate_symbol(&symbol)?;
            scope.commit()?;
            symbol.is_active = true;
            report.symbol_activated = true;
            tracing::info!(family = %symbol.family_name, symbol = %symbol.name, "Activated opening symbol");
        }

        let mut collection = Collection::default();
        for kind in MechanicalKind::ALL {
            let enabled = match kind {
                MechanicalKind::Duct => self.config.include_ducts,
                MechanicalKind::Pipe => self.config.include_pipes,
            };
            if !enabled {
                continue;
            }
            let collected = collect_elements(secondary, kind);
            match kind {
                MechanicalKind::Duct => report.ducts = collected.elements.len(),
                MechanicalKind::Pipe => report.pipes = collected.elements.len(),
            }
            collection.extend(collected);
        }
        report.skipped_elements = collection.skipped;

        let driver = PlacementDriver::new(&self.config);
        let mut requests = Vec::new();
        {
            let caster = primary.wall_ray_caster(&view)?;
            let engine = IntersectionEngine::new(caster.as_ref());

            for element in &collection.elements {
                let hits = engine.crossings_for(element);
                let outcome = driver.plan(element, &hits, &*primary);
                requests.extend(outcome.requests);
                report.skipped_hits.extend(outcome.skipped);
            }
        }

        tracing::info!(
            ducts = report.ducts,
            pipes = report.pipes,
            requests = requests.len(),
            skipped_elements = report.skipped_elements.len(),
            skipped_hits = report.skipped_hits.len(),
            "Planned openings"
        );

        let mut scope = EditScope::begin(&mut *primary, PLACE_OPENINGS_EDIT)?;
        report.placed = driver.place(&mut scope, &symbol, &requests)?;
        scope.commit()?;

        tracing::info!(placed = report.placed.len(), "Openings placed");
        Ok(report)
    }
}
