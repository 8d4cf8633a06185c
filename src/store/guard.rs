//! Preconditions for the guarded operations.
//!
//! The container runs these before dispatching, and the question detail
//! view runs them to decide which actions to offer, so both agree on who
//! may do what.

use crate::config::Policy;
use crate::model::{Actor, AnswerId, Question, QuestionId, Snapshot};
use crate::store::error::StoreError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

pub fn require_question(snapshot: &Snapshot, question_id: QuestionId) -> Result<&Question, StoreError> {
    snapshot
        .question(question_id)
        .ok_or(StoreError::QuestionNotFound { question_id })
}

fn require_owner(policy: &Policy, actor: &Actor, question: &Question) -> Result<(), StoreError> {
    if policy.enforce_ownership && !actor.owns(question) {
        return Err(StoreError::NotQuestionAuthor {
            question_id: question.id,
        });
    }
    Ok(())
}

pub fn check_choose_best(
    snapshot: &Snapshot,
    policy: &Policy,
    actor: &Actor,
    question_id: QuestionId,
    answer_id: Option<AnswerId>,
) -> Result<(), StoreError> {
    let question = require_question(snapshot, question_id)?;
    require_owner(policy, actor, question)?;
    if let Some(answer_id) = answer_id {
        let known = snapshot
            .answers_for(question_id)
            .iter()
            .any(|a| a.id == answer_id);
        if policy.validate_answer_refs && !known {
            return Err(StoreError::AnswerNotInQuestion {
                question_id,
                answer_id,
            });
        }
    }
    Ok(())
}

pub fn check_resolve(
    snapshot: &Snapshot,
    policy: &Policy,
    actor: &Actor,
    question_id: QuestionId,
    resolved: bool,
) -> Result<(), StoreError> {
    let question = require_question(snapshot, question_id)?;
    require_owner(policy, actor, question)?;
    if policy.enforce_ownership && resolved && !snapshot.best_answers.contains_key(&question_id) {
        return Err(StoreError::NoBestAnswer { question_id });
    }
    Ok(())
}

/// `value` is `None` when only asking whether rating is possible at all.
pub fn check_rate(
    snapshot: &Snapshot,
    policy: &Policy,
    actor: &Actor,
    question_id: QuestionId,
    value: Option<u8>,
) -> Result<(), StoreError> {
    if let Some(value) = value {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(StoreError::RatingOutOfRange { value });
        }
    }
    let question = require_question(snapshot, question_id)?;
    if !snapshot.best_answers.contains_key(&question_id) {
        return Err(StoreError::NoBestAnswer { question_id });
    }
    require_owner(policy, actor, question)?;
    if policy.enforce_ownership && !question.resolved {
        return Err(StoreError::NotResolved { question_id });
    }
    Ok(())
}
