//! Reducer trait.

use super::intent::Intent;
use super::state::SnapshotState;

/// Reducer transforms a snapshot based on intents.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure, total function: (State, Intent) -> State
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: SnapshotState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Process an intent and return the new state.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
