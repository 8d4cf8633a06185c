//! The state container and its transition rules.

mod container;
mod error;
pub mod guard;
mod intent;
mod reducer;

pub use container::QaStore;
pub use error::StoreError;
pub use intent::StoreIntent;
pub use reducer::SnapshotReducer;
