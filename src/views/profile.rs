//! Per-user statistics shown on the profile page.

use crate::model::{Role, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StudentStats {
    pub total: usize,
    pub resolved: usize,
    pub unresolved: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HelperStats {
    pub answers_given: usize,
    /// Questions where one of the helper's answers is the best answer.
    pub accepted: usize,
    pub ratings_received: usize,
    pub average_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileStats {
    Student(StudentStats),
    Helper(HelperStats),
}

impl ProfileStats {
    pub fn for_user(snapshot: &Snapshot, role: Role, name: &str) -> Self {
        match role {
            Role::Student => Self::Student(student_stats(snapshot, name)),
            Role::Helper => Self::Helper(helper_stats(snapshot, name)),
        }
    }
}

pub fn student_stats(snapshot: &Snapshot, name: &str) -> StudentStats {
    let (resolved, unresolved) = snapshot
        .questions
        .iter()
        .filter(|q| q.author == name)
        .fold((0, 0), |(done, open), q| {
            if q.resolved {
                (done + 1, open)
            } else {
                (done, open + 1)
            }
        });
    StudentStats {
        total: resolved + unresolved,
        resolved,
        unresolved,
    }
}

/// Ratings only count when the rated best answer is the helper's own.
pub fn helper_stats(snapshot: &Snapshot, name: &str) -> HelperStats {
    let mut stats = HelperStats::default();
    let mut ratings: Vec<u8> = Vec::new();

    for question in &snapshot.questions {
        let mine = snapshot
            .answers_for(question.id)
            .iter()
            .filter(|a| a.author == name);
        let mut mine_count = 0;
        let mut has_best = false;
        let best_id = snapshot.best_answers.get(&question.id).copied();
        for answer in mine {
            mine_count += 1;
            has_best |= Some(answer.id) == best_id;
        }
        stats.answers_given += mine_count;
        if has_best {
            stats.accepted += 1;
            if let Some(rating) = snapshot.ratings.get(&question.id) {
                ratings.push(rating.value);
            }
        }
    }

    stats.ratings_received = ratings.len();
    if !ratings.is_empty() {
        let sum: u32 = ratings.iter().map(|&v| u32::from(v)).sum();
        stats.average_rating = Some(f64::from(sum) / ratings.len() as f64);
    }
    stats
}
