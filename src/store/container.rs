use crate::config::Policy;
use crate::model::{
    Actor, Answer, AnswerId, Category, ChatMessage, Clock, IdAllocator, Question, QuestionId,
    Rating, Role, Snapshot,
};
use crate::mvi::Reducer;
use crate::persist::{self, LoadSource, SnapshotStore};
use crate::store::error::StoreError;
use crate::store::guard;
use crate::store::intent::StoreIntent;
use crate::store::reducer::SnapshotReducer;

/// Per-role unread message counts, kept in step with the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct UnreadCounts {
    student: usize,
    helper: usize,
}

impl UnreadCounts {
    fn scan(snapshot: &Snapshot) -> Self {
        Self {
            student: snapshot.count_unread(Role::Student),
            helper: snapshot.count_unread(Role::Helper),
        }
    }

    fn slot(&mut self, role: Role) -> &mut usize {
        match role {
            Role::Student => &mut self.student,
            Role::Helper => &mut self.helper,
        }
    }

    fn get(&self, role: Role) -> usize {
        match role {
            Role::Student => self.student,
            Role::Helper => self.helper,
        }
    }
}

/// The single authoritative copy of application state.
///
/// Owned by the top-level application and handed out by reference. Every
/// mutation goes through one of the named operations below, which build a
/// [`StoreIntent`], run it through [`SnapshotReducer`], swap in the new
/// snapshot and write it to the backing [`SnapshotStore`].
///
/// If the write fails the operation returns [`StoreError::Persist`], but
/// the new snapshot stays live in memory.
pub struct QaStore {
    snapshot: Snapshot,
    unread: UnreadCounts,
    ids: IdAllocator,
    revision: u64,
    source: LoadSource,
    policy: Policy,
    clock: Box<dyn Clock>,
    persistence: Box<dyn SnapshotStore>,
}

impl QaStore {
    /// Load the last saved snapshot from `persistence`, falling back to the
    /// seed dataset.
    pub fn open(
        persistence: Box<dyn SnapshotStore>,
        clock: Box<dyn Clock>,
        policy: Policy,
    ) -> Self {
        let outcome = persist::load_or_seed(persistence.as_ref());
        let mut store = Self::with_snapshot(outcome.snapshot, persistence, clock, policy);
        store.source = outcome.source;
        store
    }

    /// Start from an explicit snapshot. Nothing is written until the first
    /// mutation.
    pub fn with_snapshot(
        snapshot: Snapshot,
        persistence: Box<dyn SnapshotStore>,
        clock: Box<dyn Clock>,
        policy: Policy,
    ) -> Self {
        tracing::info!(
            questions = snapshot.questions.len(),
            enforce_ownership = policy.enforce_ownership,
            "State container ready"
        );
        Self {
            unread: UnreadCounts::scan(&snapshot),
            ids: IdAllocator::starting_after(snapshot.max_id()),
            snapshot,
            revision: 0,
            source: LoadSource::Saved,
            policy,
            clock,
            persistence,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Incremented on every change; unchanged by no-op operations.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn load_source(&self) -> &LoadSource {
        &self.source
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn questions(&self) -> &[Question] {
        &self.snapshot.questions
    }

    pub fn question(&self, question_id: QuestionId) -> Option<&Question> {
        self.snapshot.question(question_id)
    }

    pub fn answers(&self, question_id: QuestionId) -> &[Answer] {
        self.snapshot.answers_for(question_id)
    }

    pub fn best_answer(&self, question_id: QuestionId) -> Option<AnswerId> {
        self.snapshot.best_answers.get(&question_id).copied()
    }

    pub fn chat(&self, question_id: QuestionId) -> &[ChatMessage] {
        self.snapshot.chat_for(question_id)
    }

    pub fn rating(&self, question_id: QuestionId) -> Option<&Rating> {
        self.snapshot.ratings.get(&question_id)
    }

    pub fn add_question(
        &mut self,
        title: &str,
        body: &str,
        author: &str,
        category: Category,
    ) -> Result<QuestionId, StoreError> {
        let id = self.ids.next(self.clock.now());
        let question = Question {
            id,
            title: title.to_string(),
            body: body.to_string(),
            author: author.to_string(),
            category,
            answers_count: 0,
            resolved: false,
        };
        self.apply(StoreIntent::AddQuestion { question })?;
        Ok(id)
    }

    pub fn add_answer(
        &mut self,
        question_id: QuestionId,
        text: &str,
        author: &str,
    ) -> Result<AnswerId, StoreError> {
        guard::require_question(&self.snapshot, question_id)?;
        let now = self.clock.now();
        let id = self.ids.next(now);
        let answer = Answer {
            id,
            question_id,
            text: text.to_string(),
            author: author.to_string(),
            created_at: now,
        };
        self.apply(StoreIntent::AddAnswer { answer })?;
        Ok(id)
    }

    pub fn choose_best_answer(
        &mut self,
        actor: &Actor,
        question_id: QuestionId,
        answer_id: AnswerId,
    ) -> Result<(), StoreError> {
        guard::check_choose_best(&self.snapshot, &self.policy, actor, question_id, Some(answer_id))
            .inspect_err(|e| tracing::warn!(actor = %actor.name, error = %e, "Best answer refused"))?;
        self.apply(StoreIntent::ChooseBestAnswer {
            question_id,
            answer_id,
        })
    }

    pub fn mark_question_resolved(
        &mut self,
        actor: &Actor,
        question_id: QuestionId,
        resolved: bool,
    ) -> Result<(), StoreError> {
        guard::check_resolve(&self.snapshot, &self.policy, actor, question_id, resolved)
            .inspect_err(|e| tracing::warn!(actor = %actor.name, error = %e, "Resolve refused"))?;
        self.apply(StoreIntent::SetResolved {
            question_id,
            resolved,
        })
    }

    pub fn add_chat_message(
        &mut self,
        question_id: QuestionId,
        text: &str,
        sender_role: Role,
        sender_name: &str,
    ) -> Result<(), StoreError> {
        guard::require_question(&self.snapshot, question_id)?;
        let recipient = sender_role.counterpart();
        let message = ChatMessage {
            text: text.to_string(),
            sender_name: sender_name.to_string(),
            sender_role,
            created_at: self.clock.now(),
            unread_for: Some(recipient),
        };
        *self.unread.slot(recipient) += 1;
        self.apply(StoreIntent::AddChatMessage {
            question_id,
            message,
        })
    }

    /// Returns whether anything was cleared. When nothing was, the snapshot,
    /// revision and backing store are left untouched.
    pub fn mark_chat_read(&mut self, question_id: QuestionId, role: Role) -> Result<bool, StoreError> {
        let cleared = self.unread_count_in(question_id, role);
        if cleared == 0 {
            return Ok(false);
        }
        let slot = self.unread.slot(role);
        *slot = slot.saturating_sub(cleared);
        self.apply(StoreIntent::MarkChatRead { question_id, role })?;
        Ok(true)
    }

    /// Unread messages addressed to `role` across every chat.
    pub fn unread_count_for_role(&self, role: Role) -> usize {
        self.unread.get(role)
    }

    /// Unread messages addressed to `role` in one chat.
    pub fn unread_count_in(&self, question_id: QuestionId, role: Role) -> usize {
        self.snapshot
            .chat_for(question_id)
            .iter()
            .filter(|m| m.is_unread_for(role))
            .count()
    }

    pub fn rate_helper(
        &mut self,
        actor: &Actor,
        question_id: QuestionId,
        value: u8,
        helper_name: &str,
    ) -> Result<(), StoreError> {
        guard::check_rate(&self.snapshot, &self.policy, actor, question_id, Some(value))
            .inspect_err(|e| tracing::warn!(actor = %actor.name, error = %e, "Rating refused"))?;
        self.apply(StoreIntent::RateHelper {
            question_id,
            rating: Rating {
                value,
                helper_name: helper_name.to_string(),
            },
        })
    }

    fn apply(&mut self, intent: StoreIntent) -> Result<(), StoreError> {
        let kind = intent.kind();
        let previous = std::mem::take(&mut self.snapshot);
        self.snapshot = SnapshotReducer::reduce(previous, intent);
        self.revision += 1;
        tracing::debug!(operation = kind, revision = self.revision, "State updated");
        debug_assert_eq!(self.unread, UnreadCounts::scan(&self.snapshot));

        let contents = persist::encode(&self.snapshot)?;
        self.persistence.save(&contents).inspect_err(|e| {
            tracing::warn!(operation = kind, error = %e, "State change not saved");
        })?;
        Ok(())
    }
}
