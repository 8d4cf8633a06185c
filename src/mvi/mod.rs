//! Model-View-Intent (MVI) primitives.
//!
//! Every change to application state flows through a reducer:
//!
//! ```text
//! Operation ──→ Intent ──→ Reducer ──→ Snapshot ──→ Views
//!     ↑                                               │
//!     └───────────────────────────────────────────────┘
//! ```
//!
//! - **Snapshot**: immutable value holding the whole application state
//! - **Intent**: a fully resolved request (ids and timestamps already allocated)
//! - **Reducer**: pure function that computes the next snapshot

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::SnapshotState;
