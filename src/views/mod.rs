//! Read-only projections of the snapshot used by the front-end.

mod chats;
mod feed;
mod profile;
mod question;

pub use chats::{chat_list, is_participant, ChatSummary};
pub use feed::{filter_questions, FeedQuery, ParseViewModeError, ViewMode};
pub use profile::{helper_stats, student_stats, HelperStats, ProfileStats, StudentStats};
pub use question::QuestionDetail;
