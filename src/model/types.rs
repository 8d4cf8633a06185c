use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mvi::SnapshotState;

pub type QuestionId = u64;
pub type AnswerId = u64;

/// Which side of the help desk a user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Helper,
}

impl Role {
    /// The role a message from `self` is addressed to.
    pub fn counterpart(self) -> Self {
        match self {
            Self::Student => Self::Helper,
            Self::Helper => Self::Student,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Helper => "helper",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Student => "Newcomer",
            Self::Helper => "Helper",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}' (expected student or helper)")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "helper" => Ok(Self::Helper),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

/// Subject a question is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Math,
    Physics,
    Programming,
    #[default]
    Other,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[Self::Math, Self::Physics, Self::Programming, Self::Other]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::Physics => "physics",
            Self::Programming => "programming",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Math => "Mathematics",
            Self::Physics => "Physics",
            Self::Programming => "Programming",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}' (expected math, physics, programming or other)")]
pub struct ParseCategoryError(String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == wanted)
            .ok_or(ParseCategoryError(wanted))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    pub body: String,
    /// Display name of the user who asked.
    pub author: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub answers_count: usize,
    #[serde(default)]
    pub resolved: bool,
}

impl Question {
    /// Persisted questions with a blank title are dropped on load.
    pub fn is_well_formed(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: AnswerId,
    pub question_id: QuestionId,
    pub text: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub text: String,
    pub sender_name: String,
    pub sender_role: Role,
    pub created_at: DateTime<Utc>,
    /// Role that has not read this message yet; `None` once read.
    #[serde(default)]
    pub unread_for: Option<Role>,
}

impl ChatMessage {
    pub fn is_unread_for(&self, role: Role) -> bool {
        self.unread_for == Some(role)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub value: u8,
    pub helper_name: String,
}

/// The whole application state.
///
/// Maps are keyed by question id. `BTreeMap` keeps the serialized form
/// stable between saves.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Newest first.
    pub questions: Vec<Question>,
    /// Per question, newest first.
    #[serde(default)]
    pub answers: BTreeMap<QuestionId, Vec<Answer>>,
    #[serde(default)]
    pub best_answers: BTreeMap<QuestionId, AnswerId>,
    /// Per question, oldest first.
    #[serde(default)]
    pub chats: BTreeMap<QuestionId, Vec<ChatMessage>>,
    #[serde(default)]
    pub ratings: BTreeMap<QuestionId, Rating>,
}

impl SnapshotState for Snapshot {}

impl Snapshot {
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn has_question(&self, id: QuestionId) -> bool {
        self.question(id).is_some()
    }

    pub fn answers_for(&self, id: QuestionId) -> &[Answer] {
        self.answers.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn chat_for(&self, id: QuestionId) -> &[ChatMessage] {
        self.chats.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The answer currently marked best, if the mark points at a known answer.
    pub fn best_answer_for(&self, id: QuestionId) -> Option<&Answer> {
        let best_id = *self.best_answers.get(&id)?;
        self.answers_for(id).iter().find(|a| a.id == best_id)
    }

    /// Author of the best answer, i.e. the helper who gets rated.
    pub fn helper_for(&self, id: QuestionId) -> Option<&str> {
        self.best_answer_for(id).map(|a| a.author.as_str())
    }

    /// Full scan; `QaStore` keeps a memoized copy of these counts.
    pub fn count_unread(&self, role: Role) -> usize {
        self.chats
            .values()
            .flatten()
            .filter(|m| m.is_unread_for(role))
            .count()
    }

    /// Largest id in use by any question or answer.
    pub fn max_id(&self) -> u64 {
        let questions = self.questions.iter().map(|q| q.id);
        let answers = self.answers.values().flatten().map(|a| a.id);
        questions.chain(answers).max().unwrap_or(0)
    }
}

/// Lifecycle of a question, derived from the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStatus {
    Open,
    HasBestAnswer,
    Resolved,
}

impl QuestionStatus {
    pub fn of(snapshot: &Snapshot, question: &Question) -> Self {
        if question.resolved {
            Self::Resolved
        } else if snapshot.best_answers.contains_key(&question.id) {
            Self::HasBestAnswer
        } else {
            Self::Open
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::HasBestAnswer => "best answer chosen",
            Self::Resolved => "resolved",
        }
    }
}

/// Identity of whoever is calling a guarded operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub name: String,
    pub role: Role,
}

impl Actor {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    /// Only a student who asked the question owns it.
    pub fn owns(&self, question: &Question) -> bool {
        self.role == Role::Student && question.author == self.name
    }
}
