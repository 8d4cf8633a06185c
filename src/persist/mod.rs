//! Snapshot persistence.
//!
//! The whole snapshot lives in one slot. It is loaded once at startup and
//! rewritten after every change. A slot that is missing, unparseable, or
//! holds no usable questions yields the seed dataset instead of an error.

mod file;
mod memory;

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{
    seed_snapshot, Answer, AnswerId, ChatMessage, Question, QuestionId, Rating, Snapshot,
    MAX_RECORD_ID,
};

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Errors raised while reading or writing the snapshot slot.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to read state file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write state file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock state file '{path}': {source}")]
    LockError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode state: {0}")]
    EncodeError(#[from] serde_json::Error),
}

/// A single slot holding the serialized snapshot.
pub trait SnapshotStore: Send {
    /// Raw contents of the slot, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<String>, PersistError>;

    fn save(&self, contents: &str) -> Result<(), PersistError>;
}

/// Where a loaded snapshot came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    Saved,
    Seed(SeedReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedReason {
    Empty,
    Malformed,
    NoQuestions,
    Unreadable,
}

#[derive(Debug)]
pub struct LoadOutcome {
    pub snapshot: Snapshot,
    pub source: LoadSource,
}

/// Loose form of the saved snapshot. Every record is checked on its own so
/// a single bad entry does not throw the rest away.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedSnapshot {
    #[serde(default)]
    questions: Vec<Value>,
    #[serde(default)]
    answers: Value,
    #[serde(default)]
    best_answers: Value,
    #[serde(default)]
    chats: Value,
    #[serde(default)]
    ratings: Value,
}

/// Entries of a map keyed by question id. Non-numeric keys are skipped, as
/// is a map that is not a JSON object at all.
fn keyed_entries(map: Value) -> impl Iterator<Item = (QuestionId, Value)> {
    let entries = match map {
        Value::Object(entries) => entries,
        _ => Map::new(),
    };
    entries
        .into_iter()
        .filter_map(|(key, value)| Some((key.parse::<QuestionId>().ok()?, value)))
}

/// Parse one record, dropping it (with a warning) if it does not fit.
fn record<T: DeserializeOwned>(kind: &'static str, value: Value) -> Option<T> {
    serde_json::from_value(value)
        .inspect_err(|e| tracing::warn!(kind, error = %e, "Dropping malformed saved record"))
        .ok()
}

/// Per-question lists, keeping the well-formed items of each list.
fn keyed_lists<T: DeserializeOwned>(
    kind: &'static str,
    map: Value,
) -> BTreeMap<QuestionId, Vec<T>> {
    keyed_entries(map)
        .filter_map(|(id, value)| match value {
            Value::Array(items) => Some((
                id,
                items.into_iter().filter_map(|v| record(kind, v)).collect(),
            )),
            _ => None,
        })
        .collect()
}

fn keyed_records<T: DeserializeOwned>(kind: &'static str, map: Value) -> BTreeMap<QuestionId, T> {
    keyed_entries(map)
        .filter_map(|(id, value)| Some((id, record(kind, value)?)))
        .collect()
}

/// Parse a saved snapshot. `Err` carries the reason the seed should be used.
///
/// Questions with a duplicate id keep only their first occurrence, records
/// with an id above [`MAX_RECORD_ID`] are dropped, and `answersCount` is
/// recomputed from the stored answers.
pub fn decode(contents: &str) -> Result<Snapshot, SeedReason> {
    if contents.trim().is_empty() {
        return Err(SeedReason::Empty);
    }
    let saved: SavedSnapshot = serde_json::from_str(contents).map_err(|e| {
        tracing::warn!(error = %e, "Saved state is malformed");
        SeedReason::Malformed
    })?;

    let mut answers: BTreeMap<QuestionId, Vec<Answer>> = keyed_lists("answer", saved.answers);
    for list in answers.values_mut() {
        list.retain(|a| a.id <= MAX_RECORD_ID);
    }

    let mut seen = HashSet::new();
    let questions: Vec<Question> = saved
        .questions
        .into_iter()
        .filter_map(|value| record::<Question>("question", value))
        .filter(|q| q.is_well_formed() && q.id <= MAX_RECORD_ID)
        .filter(|q| seen.insert(q.id))
        .map(|q| Question {
            answers_count: answers.get(&q.id).map_or(0, Vec::len),
            ..q
        })
        .collect();

    if questions.is_empty() {
        return Err(SeedReason::NoQuestions);
    }

    Ok(Snapshot {
        questions,
        answers,
        best_answers: keyed_records::<AnswerId>("best answer", saved.best_answers),
        chats: keyed_lists::<ChatMessage>("chat message", saved.chats),
        ratings: keyed_records::<Rating>("rating", saved.ratings),
    })
}

pub fn encode(snapshot: &Snapshot) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Load the last saved snapshot, or the seed.
pub fn load_or_seed(store: &dyn SnapshotStore) -> LoadOutcome {
    let seeded = |reason: SeedReason| {
        tracing::info!(?reason, "Starting from seed data");
        LoadOutcome {
            snapshot: seed_snapshot(),
            source: LoadSource::Seed(reason),
        }
    };

    match store.load() {
        Ok(Some(contents)) => match decode(&contents) {
            Ok(snapshot) => {
                tracing::debug!(questions = snapshot.questions.len(), "Loaded saved state");
                LoadOutcome {
                    snapshot,
                    source: LoadSource::Saved,
                }
            }
            Err(reason) => seeded(reason),
        },
        Ok(None) => seeded(SeedReason::Empty),
        Err(e) => {
            tracing::warn!(error = %e, "Could not read saved state");
            seeded(SeedReason::Unreadable)
        }
    }
}
