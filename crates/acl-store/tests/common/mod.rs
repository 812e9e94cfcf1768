//! Shared helpers for the acl-store integration tests.

#![allow(dead_code)]

use acl_core::{AclValue, Entry};
use acl_store::{AclChangedEvent, AclManager, Change, HandlerId};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Install a test subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn grant(resource: &str, action: &str, subject: &str) -> Entry {
    Entry::new(resource, action, subject, AclValue::Grant).unwrap()
}

pub fn deny(resource: &str, action: &str, subject: &str) -> Entry {
    Entry::new(resource, action, subject, AclValue::Deny).unwrap()
}

/// Captures every event a manager emits, in dispatch order.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<AclChangedEvent>>>,
}

impl Recorder {
    /// Subscribe a new recorder to `manager`.
    pub fn attach(manager: &AclManager) -> (Self, HandlerId) {
        let recorder = Self::default();
        let sink = recorder.events.clone();
        let id = manager.subscribe_fn(move |event| sink.lock().push(event.clone()));
        (recorder, id)
    }

    pub fn events(&self) -> Vec<AclChangedEvent> {
        self.events.lock().clone()
    }

    /// `(change, entry count)` per event.
    pub fn shape(&self) -> Vec<(Change, usize)> {
        self.events
            .lock()
            .iter()
            .map(|e| (e.change, e.entries.len()))
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}
