//! Base trait for state snapshots.

/// Marker trait for state snapshots.
///
/// Snapshots are replaced wholesale, never patched in place by callers,
/// and compared with `PartialEq` to detect whether anything changed.
pub trait SnapshotState: Clone + PartialEq + Default + Send + 'static {}
