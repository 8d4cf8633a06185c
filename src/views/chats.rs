//! Conversation list.

use crate::model::{ChatMessage, Question, QuestionId, Role, Snapshot};

/// One row of the conversation list.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSummary {
    pub question_id: QuestionId,
    pub question_title: String,
    pub question_resolved: bool,
    pub last_message: ChatMessage,
    /// Some message in this chat is still unread by the viewer's role.
    pub has_unread: bool,
}

/// Whether the viewer takes part in the conversation about `question`.
///
/// A helper is in a chat they wrote to, any chat a helper wrote to, and any
/// chat holding a message waiting for a helper. A student is in chats about
/// their own questions and chats where they or any student wrote.
pub fn is_participant(question: &Question, messages: &[ChatMessage], role: Role, name: &str) -> bool {
    match role {
        Role::Helper => messages.iter().any(|m| {
            m.sender_name == name || m.sender_role == Role::Helper || m.is_unread_for(Role::Helper)
        }),
        Role::Student => {
            question.author == name
                || messages
                    .iter()
                    .any(|m| m.sender_name == name || m.sender_role == Role::Student)
        }
    }
}

/// Conversations visible to the viewer, most recent activity first.
pub fn chat_list(snapshot: &Snapshot, role: Role, name: &str) -> Vec<ChatSummary> {
    let mut rows: Vec<ChatSummary> = snapshot
        .chats
        .iter()
        .filter_map(|(&question_id, messages)| {
            let question = snapshot.question(question_id)?;
            let last_message = messages.last()?;
            if !is_participant(question, messages, role, name) {
                return None;
            }
            Some(ChatSummary {
                question_id,
                question_title: question.title.clone(),
                question_resolved: question.resolved,
                last_message: last_message.clone(),
                has_unread: messages.iter().any(|m| m.is_unread_for(role)),
            })
        })
        .collect();

    rows.sort_by(|a, b| b.last_message.created_at.cmp(&a.last_message.created_at));
    rows
}
