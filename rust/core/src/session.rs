// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scoped edit sessions.
//!
//! An [`EditScope`] owns an open [`EditSession`] and guarantees it is closed:
//! [`EditScope::commit`] commits it, and dropping the scope on any other path
//! (early return, `?`, panic unwinding) rolls it back.

use openings_geometry::Point3;

use crate::error::{Error, Result};
use crate::host::{EditSession, HostDocument, InstanceHandle, SymbolHandle};
use crate::ids::ElementId;

pub struct EditScope<'a> {
    name: String,
    session: Option<Box<dyn EditSession + 'a>>,
}

impl<'a> EditScope<'a> {
    /// Open a named edit session on `host`
    pub fn begin<H: HostDocument + ?Sized>(host: &'a mut H, name: &str) -> Result<Self> {
        let session = host.begin_edit(name)?;
        tracing::debug!(name, "Edit session started");
        Ok(Self {
            name: name.to_string(),
            session: Some(session),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn session(&mut self) -> Result<&mut (dyn EditSession + 'a)> {
        self.session.as_deref_mut().ok_or(Error::SessionClosed)
    }

    pub fn activate_symbol(&mut self, symbol: &SymbolHandle) -> Result<()> {
        self.session()?.activate_symbol(symbol)
    }

    pub fn create_opening_instance(
        &mut self,
        position: &Point3<f64>,
        symbol: &SymbolHandle,
        host_wall: ElementId,
        host_level: ElementId,
    ) -> Result<InstanceHandle> {
        self.session()?
            .create_opening_instance(position, symbol, host_wall, host_level)
    }

    pub fn set_parameter(&mut self, instance: &InstanceHandle, name: &str, value: f64) -> Result<()> {
        self.session()?.set_parameter(instance, name, value)
    }

    /// Commit every change made in this scope
    pub fn commit(mut self) -> Result<()> {
        let session = self.session.take().ok_or(Error::SessionClosed)?;
        session.commit()?;
        tracing::debug!(name = %self.name, "Edit session committed");
        Ok(())
    }
}

impl Drop for EditScope<'_> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::warn!(name = %self.name, "Edit session not committed, rolling back");
            session.rollback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ElementHandle, LevelHandle, RayCaster, ViewHandle};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Journal {
        events: Vec<&'static str>,
    }

    struct RecordingSession {
        journal: Rc<RefCell<Journal>>,
    }

    impl EditSession for RecordingSession {
        fn activate_symbol(&mut self, _symbol: &SymbolHandle) -> Result<()> {
            self.journal.borrow_mut().events.push("activate");
            Ok(())
        }

        fn create_opening_instance(
            &mut self,
            _position: &Point3<f64>,
            _symbol: &SymbolHandle,
            _host_wall: ElementId,
            _host_level: ElementId,
        ) -> Result<InstanceHandle> {
            self.journal.borrow_mut().events.push("create");
            Ok(InstanceHandle { id: ElementId(1) })
        }

        fn set_parameter(&mut self, _instance: &InstanceHandle, _name: &str, _value: f64) -> Result<()> {
            Err(Error::Host("parameter is read-only".into()))
        }

        fn commit(self: Box<Self>) -> Result<()> {
            self.journal.borrow_mut().events.push("commit");
            Ok(())
        }

        fn rollback(self: Box<Self>) {
            self.journal.borrow_mut().events.push("rollback");
        }
    }

    struct RecordingHost {
        journal: Rc<RefCell<Journal>>,
    }

    impl HostDocument for RecordingHost {
        fn resolve_element(&self, _id: ElementId) -> Option<ElementHandle> {
            None
        }

        fn resolve_level(&self, _id: ElementId) -> Option<LevelHandle> {
            None
        }

        fn find_opening_symbol(&self, _family_name: &str) -> Option<SymbolHandle> {
            None
        }

        fn find_3d_view(&self) -> Option<ViewHandle> {
            None
        }

        fn wall_ray_caster(&self, _view: &ViewHandle) -> Result<Box<dyn RayCaster + '_>> {
            Err(Error::Host("no geometry".into()))
        }

        fn begin_edit(&mut self, _name: &str) -> Result<Box<dyn EditSession + '_>> {
            Ok(Box::new(RecordingSession {
                journal: Rc::clone(&self.journal),
            }))
        }
    }

    fn symbol() -> SymbolHandle {
        SymbolHandle {
            id: ElementId(3),
            family_name: "Holes".into(),
            name: "Square".into(),
            is_active: false,
        }
    }

    #[test]
    fn commit_closes_session() {
        let journal = Rc::new(RefCell::new(Journal::default()));
        let mut host = RecordingHost { journal: Rc::clone(&journal) };

        let mut scope = EditScope::begin(&mut host, "Activate").unwrap();
        assert_eq!(scope.name(), "Activate");
        scope.activate_symbol(&symbol()).unwrap();
        scope.commit().unwrap();

        assert_eq!(journal.borrow().events, vec!["activate", "commit"]);
    }

    #[test]
    fn early_exit_rolls_back() {
        let journal = Rc::new(RefCell::new(Journal::default()));
        let mut host = RecordingHost { journal: Rc::clone(&journal) };

        let run = |host: &mut RecordingHost| -> Result<()> {
            let mut scope = EditScope::begin(host, "Place")?;
            let instance = scope.create_opening_instance(&Point3::origin(), &symbol(), ElementId(1), ElementId(2))?;
            scope.set_parameter(&instance, "Width", 100.0)?;
            scope.commit()
        };

        assert!(run(&mut host).is_err());
        assert_eq!(journal.borrow().events, vec!["create", "rollback"]);
    }
}
