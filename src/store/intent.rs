use crate::model::{Answer, AnswerId, ChatMessage, Question, QuestionId, Rating, Role};
use crate::mvi::Intent;

/// A container operation after validation, with ids and timestamps filled in.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreIntent {
    AddQuestion {
        question: Question,
    },
    AddAnswer {
        answer: Answer,
    },
    ChooseBestAnswer {
        question_id: QuestionId,
        answer_id: AnswerId,
    },
    SetResolved {
        question_id: QuestionId,
        resolved: bool,
    },
    AddChatMessage {
        question_id: QuestionId,
        message: ChatMessage,
    },
    /// Clears `unread_for` on every message addressed to `role`.
    MarkChatRead {
        question_id: QuestionId,
        role: Role,
    },
    RateHelper {
        question_id: QuestionId,
        rating: Rating,
    },
}

impl Intent for StoreIntent {}

impl StoreIntent {
    /// Short name for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddQuestion { .. } => "add_question",
            Self::AddAnswer { .. } => "add_answer",
            Self::ChooseBestAnswer { .. } => "choose_best_answer",
            Self::SetResolved { .. } => "set_resolved",
            Self::AddChatMessage { .. } => "add_chat_message",
            Self::MarkChatRead { .. } => "mark_chat_read",
            Self::RateHelper { .. } => "rate_helper",
        }
    }
}
