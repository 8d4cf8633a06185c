use thiserror::Error;

use crate::model::{AnswerId, QuestionId};
use crate::persist::PersistError;

/// Reasons a container operation is refused.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Question {question_id} not found")]
    QuestionNotFound { question_id: QuestionId },

    #[error("Answer {answer_id} does not belong to question {question_id}")]
    AnswerNotInQuestion {
        question_id: QuestionId,
        answer_id: AnswerId,
    },

    #[error("Only the author of question {question_id} can do that")]
    NotQuestionAuthor { question_id: QuestionId },

    #[error("Question {question_id} has no best answer yet")]
    NoBestAnswer { question_id: QuestionId },

    #[error("Question {question_id} is not resolved yet")]
    NotResolved { question_id: QuestionId },

    #[error("Rating must be between 1 and 5, got {value}")]
    RatingOutOfRange { value: u8 },

    /// The new snapshot is live in memory but could not be written.
    #[error("Failed to save state: {0}")]
    Persist(#[from] PersistError),
}
