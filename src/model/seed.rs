//! Fixture data used on first run and whenever the saved snapshot is unusable.

use super::types::{Category, Question, Snapshot};

fn question(id: u64, title: &str, body: &str, author: &str, category: Category) -> Question {
    Question {
        id,
        title: title.to_string(),
        body: body.to_string(),
        author: author.to_string(),
        category,
        answers_count: 0,
        resolved: false,
    }
}

/// Snapshot a fresh install starts from.
pub fn seed_snapshot() -> Snapshot {
    Snapshot {
        questions: vec![
            question(
                4,
                "How do I read a stack trace?",
                "My program crashes with a long list of function names. Where do I start looking?",
                "Nikita",
                Category::Programming,
            ),
            question(
                3,
                "Why does a heavier object not fall faster?",
                "Intuitively more mass should mean more force. What am I missing?",
                "Anna",
                Category::Physics,
            ),
            question(
                2,
                "What is the derivative of x^x?",
                "I tried the power rule and got x * x^(x-1), which the answer key says is wrong.",
                "Nikita",
                Category::Math,
            ),
            question(
                1,
                "How should I plan my first exam session?",
                "Four exams in two weeks. Is it better to study one subject at a time or mix them?",
                "Maria",
                Category::Other,
            ),
        ],
        ..Snapshot::default()
    }
}
