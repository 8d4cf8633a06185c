//! Question feed filtering.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::{Category, Question, QuestionId, Role, Snapshot};

/// Which slice of the feed to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    All,
    /// Students: questions they asked. Helpers: questions they answered.
    Mine,
    Resolved,
    Open,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Mine => "mine",
            Self::Resolved => "resolved",
            Self::Open => "open",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown view mode '{0}' (expected all, mine, resolved or open)")]
pub struct ParseViewModeError(String);

impl FromStr for ViewMode {
    type Err = ParseViewModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "mine" => Ok(Self::Mine),
            "resolved" => Ok(Self::Resolved),
            "open" => Ok(Self::Open),
            other => Err(ParseViewModeError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeedQuery {
    pub mode: ViewMode,
    pub category: Option<Category>,
    /// Case-insensitive substring of title or body. Empty matches everything.
    pub search: String,
}

impl FeedQuery {
    fn matches_text(&self, question: &Question) -> bool {
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || question.title.to_lowercase().contains(&needle)
            || question.body.to_lowercase().contains(&needle)
    }

    fn matches_category(&self, question: &Question) -> bool {
        self.category.map_or(true, |c| c == question.category)
    }
}

fn answered_by(snapshot: &Snapshot, name: &str) -> HashSet<QuestionId> {
    snapshot
        .answers
        .iter()
        .filter(|(_, answers)| answers.iter().any(|a| a.author == name))
        .map(|(&id, _)| id)
        .collect()
}

/// Questions matching `query` for the given viewer, in feed order.
pub fn filter_questions<'a>(
    snapshot: &'a Snapshot,
    query: &FeedQuery,
    role: Role,
    name: &str,
) -> Vec<&'a Question> {
    let answered = match (query.mode, role) {
        (ViewMode::Mine, Role::Helper) => answered_by(snapshot, name),
        _ => HashSet::new(),
    };

    snapshot
        .questions
        .iter()
        .filter(|q| match query.mode {
            ViewMode::All => true,
            ViewMode::Mine => match role {
                Role::Student => q.author == name,
                Role::Helper => answered.contains(&q.id),
            },
            ViewMode::Resolved => q.resolved,
            ViewMode::Open => !q.resolved,
        })
        .filter(|q| query.matches_category(q) && query.matches_text(q))
        .collect()
}
