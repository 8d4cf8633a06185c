//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::sync::Arc;

use unihelp::config::Policy;
use unihelp::model::{Actor, ManualClock, Role, Snapshot};
use unihelp::persist::MemoryStore;
use unihelp::store::QaStore;

/// 2023-11-14T22:13:20Z
pub const START_MS: i64 = 1_700_000_000_000;

/// A container wired to an in-memory slot and a manual clock.
pub struct Harness {
    pub store: QaStore,
    pub slot: MemoryStore,
    pub clock: Arc<ManualClock>,
}

impl Harness {
    pub fn new(policy: Policy) -> Self {
        Self::with_snapshot(Snapshot::default(), policy)
    }

    pub fn with_snapshot(snapshot: Snapshot, policy: Policy) -> Self {
        let slot = MemoryStore::new();
        let clock = Arc::new(ManualClock::from_millis(START_MS));
        let store = QaStore::with_snapshot(
            snapshot,
            Box::new(slot.clone()),
            Box::new(Arc::clone(&clock)),
            policy,
        );
        Self { store, slot, clock }
    }

    /// Move time forward so the next id/timestamp is distinct.
    pub fn tick(&self) {
        self.clock.advance_millis(1_000);
    }
}

pub fn nikita() -> Actor {
    Actor::new("Nikita", Role::Student)
}

pub fn anna() -> Actor {
    Actor::new("Anna", Role::Student)
}

pub fn helper() -> Actor {
    Actor::new("Helper", Role::Helper)
}
