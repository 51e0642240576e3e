//! Document appearance contracts.

use std::{cell::RefCell, rc::Rc};

/// Host service that installs a user-supplied web font.
pub trait FontInstaller {
    /// Points the document at the stylesheet `url` and applies `family`. Empty values clear.
    ///
    /// # Errors
    ///
    /// Returns an error when the document cannot be mutated.
    fn apply(&self, url: &str, family: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Font installer that does nothing.
pub struct NoopFontInstaller;

impl FontInstaller for NoopFontInstaller {
    fn apply(&self, _url: &str, _family: &str) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// Font installer that records `(url, family)` pairs.
pub struct RecordingFontInstaller {
    applied: Rc<RefCell<Vec<(String, String)>>>,
}

impl RecordingFontInstaller {
    /// Returns every applied `(url, family)` pair, oldest first.
    pub fn applied(&self) -> Vec<(String, String)> {
        self.applied.borrow().clone()
    }
}

impl FontInstaller for RecordingFontInstaller {
    fn apply(&self, url: &str, family: &str) -> Result<(), String> {
        self.applied
            .borrow_mut()
            .push((url.to_string(), family.to_string()));
        Ok(())
    }
}
