//! Question detail page model.

use crate::config::Policy;
use crate::model::{Actor, Answer, Question, QuestionId, QuestionStatus, Rating, Snapshot};
use crate::store::guard;

/// Everything needed to render one question for one viewer.
#[derive(Debug, Clone)]
pub struct QuestionDetail<'a> {
    pub question: &'a Question,
    pub status: QuestionStatus,
    pub answers: &'a [Answer],
    pub best_answer: Option<&'a Answer>,
    /// Author of the best answer.
    pub helper_name: Option<&'a str>,
    pub rating: Option<&'a Rating>,
    pub can_choose_best: bool,
    pub can_resolve: bool,
    pub can_rate: bool,
    /// A chat becomes available once a best answer is chosen.
    pub can_open_chat: bool,
}

impl<'a> QuestionDetail<'a> {
    /// `None` if the question does not exist.
    ///
    /// Action gates always use the strict policy: the page only offers what
    /// the question's author may do, whatever the container enforces.
    pub fn build(snapshot: &'a Snapshot, question_id: QuestionId, viewer: &Actor) -> Option<Self> {
        let question = snapshot.question(question_id)?;
        let strict = Policy::default();
        let best_answer = snapshot.best_answer_for(question_id);

        Some(Self {
            question,
            status: QuestionStatus::of(snapshot, question),
            answers: snapshot.answers_for(question_id),
            best_answer,
            helper_name: best_answer.map(|a| a.author.as_str()),
            rating: snapshot.ratings.get(&question_id),
            can_choose_best: guard::check_choose_best(snapshot, &strict, viewer, question_id, None)
                .is_ok(),
            can_resolve: !question.resolved
                && guard::check_resolve(snapshot, &strict, viewer, question_id, true).is_ok(),
            can_rate: best_answer.is_some()
                && guard::check_rate(snapshot, &strict, viewer, question_id, None).is_ok(),
            can_open_chat: best_answer.is_some(),
        })
    }

    pub fn is_best(&self, answer: &Answer) -> bool {
        self.best_answer.is_some_and(|best| best.id == answer.id)
    }
}
