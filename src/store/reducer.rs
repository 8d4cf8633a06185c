use crate::model::Snapshot;
use crate::mvi::Reducer;
use crate::store::intent::StoreIntent;

pub struct SnapshotReducer;

impl Reducer for SnapshotReducer {
    type State = Snapshot;
    type Intent = StoreIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            StoreIntent::AddQuestion { question } => {
                let mut questions = Vec::with_capacity(state.questions.len() + 1);
                questions.push(question);
                questions.extend(state.questions);
                Snapshot { questions, ..state }
            }
            StoreIntent::AddAnswer { answer } => {
                let Snapshot {
                    mut questions,
                    mut answers,
                    best_answers,
                    chats,
                    ratings,
                } = state;
                let question_id = answer.question_id;
                let list = answers.entry(question_id).or_default();
                list.insert(0, answer);
                let count = list.len();
                for question in questions.iter_mut().filter(|q| q.id == question_id) {
                    question.answers_count = count;
                }
                Snapshot {
                    questions,
                    answers,
                    best_answers,
                    chats,
                    ratings,
                }
            }
            StoreIntent::ChooseBestAnswer {
                question_id,
                answer_id,
            } => {
                let mut best_answers = state.best_answers;
                best_answers.insert(question_id, answer_id);
                Snapshot {
                    best_answers,
                    ..state
                }
            }
            StoreIntent::SetResolved {
                question_id,
                resolved,
            } => {
                let mut questions = state.questions;
                for question in questions.iter_mut().filter(|q| q.id == question_id) {
                    question.resolved = resolved;
                }
                Snapshot { questions, ..state }
            }
            StoreIntent::AddChatMessage {
                question_id,
                message,
            } => {
                let mut chats = state.chats;
                chats.entry(question_id).or_default().push(message);
                Snapshot { chats, ..state }
            }
            StoreIntent::MarkChatRead { question_id, role } => {
                let needs_clearing = state
                    .chats
                    .get(&question_id)
                    .is_some_and(|msgs| msgs.iter().any(|m| m.is_unread_for(role)));
                if !needs_clearing {
                    return state;
                }
                let mut chats = state.chats;
                if let Some(msgs) = chats.get_mut(&question_id) {
                    for message in msgs.iter_mut().filter(|m| m.is_unread_for(role)) {
                        message.unread_for = None;
                    }
                }
                Snapshot { chats, ..state }
            }
            StoreIntent::RateHelper {
                question_id,
                rating,
            } => {
                let mut ratings = state.ratings;
                ratings.insert(question_id, rating);
                Snapshot { ratings, ..state }
            }
        }
    }
}
