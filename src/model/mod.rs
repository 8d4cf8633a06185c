//! Domain records and the snapshot that holds them.

mod clock;
mod seed;
mod types;

pub use clock::{Clock, IdAllocator, ManualClock, SystemClock, MAX_RECORD_ID};
pub use seed::seed_snapshot;
pub use types::{
    Actor, Answer, AnswerId, Category, ChatMessage, ParseCategoryError, ParseRoleError, Question,
    QuestionId, QuestionStatus, Rating, Role, Snapshot,
};
