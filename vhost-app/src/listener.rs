//! Notification of records acquiring unsaved changes.

use std::sync::Mutex;

use crate::application::Application;

/// Told whenever a record is marked dirty.
pub trait DirtyListener: Send + Sync {
    fn application_marked_dirty(&self, app: &Application);
}

#[derive(Debug, Default)]
pub struct NoopListener;

impl DirtyListener for NoopListener {
    fn application_marked_dirty(&self, _app: &Application) {}
}

/// Collects the paths of records that have been marked dirty, once each.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    paths: Mutex<Vec<String>>,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dirty_paths(&self) -> Vec<String> {
        self.paths.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl DirtyListener for DirtyTracker {
    fn application_marked_dirty(&self, app: &Application) {
        let mut paths = self.paths.lock().unwrap_or_else(|e| e.into_inner());
        if !paths.iter().any(|p| p == app.path()) {
            paths.push(app.path().to_string());
        }
    }
}
