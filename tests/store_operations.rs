mod common;

use common::{anna, helper, nikita, Harness, START_MS};
use unihelp::config::Policy;
use unihelp::model::{Category, QuestionStatus, Role};
use unihelp::store::StoreError;

#[test]
fn add_question_ids_are_unique_and_newest_first() {
    let mut h = Harness::new(Policy::default());
    let mut ids = Vec::new();
    for i in 0..5 {
        // Same millisecond on purpose: ids must still differ.
        let id = h
            .store
            .add_question(&format!("Q{i}"), "body", "Nikita", Category::Other)
            .unwrap();
        ids.push(id);
    }

    let mut unique = ids.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), ids.len());

    let listed: Vec<u64> = h.store.questions().iter().map(|q| q.id).collect();
    let mut expected = ids.clone();
    expected.reverse();
    assert_eq!(listed, expected);
}

#[test]
fn new_question_starts_open_with_no_answers() {
    let mut h = Harness::new(Policy::default());
    let id = h
        .store
        .add_question("Limits?", "How do limits work?", "Nikita", Category::Math)
        .unwrap();
    assert_eq!(id, START_MS as u64);

    let q = h.store.question(id).unwrap();
    assert_eq!(q.answers_count, 0);
    assert!(!q.resolved);
    assert_eq!(q.category, Category::Math);
    assert_eq!(QuestionStatus::of(h.store.snapshot(), q), QuestionStatus::Open);
}

#[test]
fn add_answer_goes_first_and_updates_count() {
    let mut h = Harness::new(Policy::default());
    let q = h.store.add_question("Q", "B", "Nikita", Category::Math).unwrap();
    h.tick();
    let first = h.store.add_answer(q, "first", "Helper").unwrap();
    h.tick();
    let second = h.store.add_answer(q, "second", "Anna").unwrap();

    let answers = h.store.answers(q);
    assert_eq!(answers[0].id, second);
    assert_eq!(answers[1].id, first);
    assert_eq!(answers[0].question_id, q);
    assert_eq!(h.store.question(q).unwrap().answers_count, answers.len());
}

#[test]
fn add_answer_to_missing_question_fails_closed() {
    let mut h = Harness::new(Policy::default());
    let result = h.store.add_answer(404, "orphan", "Helper");
    assert!(matches!(result, Err(StoreError::QuestionNotFound { question_id: 404 })));
    assert!(h.store.snapshot().answers.is_empty());
    assert_eq!(h.slot.write_count(), 0);
}

#[test]
fn choose_best_answer_is_idempotent_and_overwrites() {
    let mut h = Harness::new(Policy::default());
    let q = h.store.add_question("Q", "B", "Nikita", Category::Math).unwrap();
    h.tick();
    let a1 = h.store.add_answer(q, "one", "Helper").unwrap();
    h.tick();
    let a2 = h.store.add_answer(q, "two", "Helper").unwrap();

    h.store.choose_best_answer(&nikita(), q, a1).unwrap();
    let once = h.store.snapshot().clone();
    h.store.choose_best_answer(&nikita(), q, a1).unwrap();
    assert_eq!(h.store.snapshot(), &once);

    h.store.choose_best_answer(&nikita(), q, a2).unwrap();
    assert_eq!(h.store.best_answer(q), Some(a2));
}

#[test]
fn only_author_chooses_best_answer_when_enforced() {
    let mut h = Harness::new(Policy::default());
    let q = h.store.add_question("Q", "B", "Nikita", Category::Math).unwrap();
    h.tick();
    let a = h.store.add_answer(q, "one", "Helper").unwrap();

    for actor in [anna(), helper()] {
        let result = h.store.choose_best_answer(&actor, q, a);
        assert!(matches!(result, Err(StoreError::NotQuestionAuthor { .. })));
    }
    assert_eq!(h.store.best_answer(q), None);
}

#[test]
fn best_answer_must_belong_to_question_when_validated() {
    let mut h = Harness::new(Policy::default());
    let q1 = h.store.add_question("Q1", "B", "Nikita", Category::Math).unwrap();
    h.tick();
    let q2 = h.store.add_question("Q2", "B", "Nikita", Category::Math).unwrap();
    h.tick();
    let foreign = h.store.add_answer(q2, "elsewhere", "Helper").unwrap();

    let result = h.store.choose_best_answer(&nikita(), q1, foreign);
    assert!(matches!(result, Err(StoreError::AnswerNotInQuestion { .. })));
}

#[test]
fn permissive_policy_trusts_the_caller() {
    let mut h = Harness::new(Policy::permissive());
    let q = h.store.add_question("Q", "B", "Nikita", Category::Math).unwrap();

    h.store.choose_best_answer(&helper(), q, 999).unwrap();
    assert_eq!(h.store.best_answer(q), Some(999));
    h.store.mark_question_resolved(&anna(), q, true).unwrap();
    assert!(h.store.question(q).unwrap().resolved);
}

#[test]
fn resolving_requires_a_best_answer_when_enforced() {
    let mut h = Harness::new(Policy::default());
    let q = h.store.add_question("Q", "B", "Nikita", Category::Math).unwrap();
    let result = h.store.mark_question_resolved(&nikita(), q, true);
    assert!(matches!(result, Err(StoreError::NoBestAnswer { .. })));
    assert!(!h.store.question(q).unwrap().resolved);
}

#[test]
fn rating_needs_resolution_and_valid_range() {
    let mut h = Harness::new(Policy::default());
    let q = h.store.add_question("Q", "B", "Nikita", Category::Math).unwrap();
    h.tick();
    let a = h.store.add_answer(q, "one", "Helper").unwrap();

    let early = h.store.rate_helper(&nikita(), q, 5, "Helper");
    assert!(matches!(early, Err(StoreError::NoBestAnswer { .. })));

    h.store.choose_best_answer(&nikita(), q, a).unwrap();
    let unresolved = h.store.rate_helper(&nikita(), q, 5, "Helper");
    assert!(matches!(unresolved, Err(StoreError::NotResolved { .. })));

    h.store.mark_question_resolved(&nikita(), q, true).unwrap();
    for value in [0, 6] {
        let result = h.store.rate_helper(&nikita(), q, value, "Helper");
        assert!(matches!(result, Err(StoreError::RatingOutOfRange { .. })));
    }

    h.store.rate_helper(&nikita(), q, 4, "Helper").unwrap();
    h.store.rate_helper(&nikita(), q, 2, "Helper").unwrap();
    let rating = h.store.rating(q).unwrap();
    assert_eq!(rating.value, 2);
    assert_eq!(rating.helper_name, "Helper");
}

#[test]
fn full_question_lifecycle() {
    let mut h = Harness::new(Policy::default());
    let x = h
        .store
        .add_question("Limits?", "How do limits work?", "Nikita", Category::Math)
        .unwrap();
    h.tick();
    let a = h.store.add_answer(x, "Use epsilon-delta", "Helper").unwrap();
    assert_eq!(h.store.question(x).unwrap().answers_count, 1);

    h.store.choose_best_answer(&nikita(), x, a).unwrap();
    let status = QuestionStatus::of(h.store.snapshot(), h.store.question(x).unwrap());
    assert_eq!(status, QuestionStatus::HasBestAnswer);

    h.store.mark_question_resolved(&nikita(), x, true).unwrap();
    let status = QuestionStatus::of(h.store.snapshot(), h.store.question(x).unwrap());
    assert_eq!(status, QuestionStatus::Resolved);

    h.store.rate_helper(&nikita(), x, 5, "Helper").unwrap();
    assert_eq!(h.store.rating(x).map(|r| r.value), Some(5));

    // Resolved questions still take answers and chat.
    h.tick();
    h.store.add_answer(x, "Also see Cauchy", "Anna").unwrap();
    h.store.add_chat_message(x, "thanks!", Role::Student, "Nikita").unwrap();
    assert_eq!(h.store.question(x).unwrap().answers_count, 2);
}

#[test]
fn every_change_is_persisted() {
    let mut h = Harness::new(Policy::default());
    let q = h.store.add_question("Q", "B", "Nikita", Category::Math).unwrap();
    h.store.add_chat_message(q, "hi", Role::Student, "Nikita").unwrap();
    assert_eq!(h.slot.write_count(), 2);
    assert_eq!(h.store.revision(), 2);

    let saved = h.slot.contents().unwrap();
    assert!(saved.contains("\"unreadFor\": \"helper\""));
}
