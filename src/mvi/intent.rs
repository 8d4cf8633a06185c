//! Base trait for intents.

/// Marker trait for intent objects.
///
/// An intent carries everything its reducer needs. Anything
/// non-deterministic (clock reads, id allocation) happens before the
/// intent is built, so reducing the same intent twice gives the same result.
pub trait Intent: Send + 'static {}
