//! Script double that records install and uninstall calls for tests.

use std::sync::Mutex;

use vhost_core::error::Result;

use crate::data::{from_payload, ApplicationData};
use crate::scripts::ConfigScripts;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCall {
    Install(String),
    Uninstall(String),
}

impl ScriptCall {
    pub fn payload(&self) -> &str {
        match self {
            ScriptCall::Install(p) | ScriptCall::Uninstall(p) => p,
        }
    }

    pub fn records(&self) -> Result<Vec<ApplicationData>> {
        from_payload(self.payload())
    }
}

/// Records every script invocation in order instead of running anything.
#[derive(Debug, Default)]
pub struct RecordingScripts {
    calls: Mutex<Vec<ScriptCall>>,
}

impl RecordingScripts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ScriptCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn push(&self, call: ScriptCall) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(call);
    }
}

impl ConfigScripts for RecordingScripts {
    fn install(&self, payload: &str) -> Result<()> {
        self.push(ScriptCall::Install(payload.to_string()));
        Ok(())
    }

    fn uninstall(&self, payload: &str) -> Result<()> {
        self.push(ScriptCall::Uninstall(payload.to_string()));
        Ok(())
    }
}
