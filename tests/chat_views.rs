mod common;

use common::{nikita, Harness};
use unihelp::config::Policy;
use unihelp::model::{Category, Role};
use unihelp::views::{chat_list, helper_stats, student_stats, QuestionDetail};

#[test]
fn message_is_unread_for_the_other_role() {
    let mut h = Harness::new(Policy::default());
    let x = h.store.add_question("Limits?", "How?", "Nikita", Category::Math).unwrap();

    h.store.add_chat_message(x, "hi", Role::Student, "Nikita").unwrap();
    let message = &h.store.chat(x)[0];
    assert_eq!(message.unread_for, Some(Role::Helper));
    assert_eq!(message.sender_role, Role::Student);
    assert_eq!(h.store.unread_count_for_role(Role::Helper), 1);
    assert_eq!(h.store.unread_count_for_role(Role::Student), 0);
}

#[test]
fn mark_chat_read_clears_and_second_call_is_a_no_op() {
    let mut h = Harness::new(Policy::default());
    let x = h.store.add_question("Limits?", "How?", "Nikita", Category::Math).unwrap();
    h.store.add_chat_message(x, "hi", Role::Student, "Nikita").unwrap();

    assert!(h.store.mark_chat_read(x, Role::Helper).unwrap());
    assert_eq!(h.store.chat(x)[0].unread_for, None);
    assert_eq!(h.store.unread_count_in(x, Role::Helper), 0);

    let snapshot = h.store.snapshot().clone();
    let revision = h.store.revision();
    let writes = h.slot.write_count();

    assert!(!h.store.mark_chat_read(x, Role::Helper).unwrap());
    assert_eq!(h.store.snapshot(), &snapshot);
    assert_eq!(h.store.revision(), revision);
    assert_eq!(h.slot.write_count(), writes);
}

#[test]
fn reading_as_the_sender_role_clears_nothing() {
    let mut h = Harness::new(Policy::default());
    let x = h.store.add_question("Q", "B", "Nikita", Category::Math).unwrap();
    h.store.add_chat_message(x, "hi", Role::Student, "Nikita").unwrap();

    assert!(!h.store.mark_chat_read(x, Role::Student).unwrap());
    assert_eq!(h.store.chat(x)[0].unread_for, Some(Role::Helper));
}

#[test]
fn mark_chat_read_on_unknown_question_is_a_no_op() {
    let mut h = Harness::new(Policy::default());
    assert!(!h.store.mark_chat_read(12345, Role::Helper).unwrap());
    assert_eq!(h.store.revision(), 0);
}

#[test]
fn memoized_unread_counts_match_a_full_scan() {
    let mut h = Harness::new(Policy::default());
    let q1 = h.store.add_question("Q1", "B", "Nikita", Category::Math).unwrap();
    let q2 = h.store.add_question("Q2", "B", "Anna", Category::Physics).unwrap();

    h.store.add_chat_message(q1, "a", Role::Student, "Nikita").unwrap();
    h.store.add_chat_message(q1, "b", Role::Student, "Nikita").unwrap();
    h.store.add_chat_message(q2, "c", Role::Student, "Anna").unwrap();
    h.store.add_chat_message(q1, "d", Role::Helper, "Helper").unwrap();
    h.store.mark_chat_read(q1, Role::Helper).unwrap();

    for role in [Role::Student, Role::Helper] {
        assert_eq!(
            h.store.unread_count_for_role(role),
            h.store.snapshot().count_unread(role)
        );
    }
    assert_eq!(h.store.unread_count_for_role(Role::Helper), 1);
    assert_eq!(h.store.unread_count_for_role(Role::Student), 1);
}

#[test]
fn chat_list_sorts_by_latest_message_and_skips_empty_chats() {
    let mut h = Harness::new(Policy::default());
    let older = h.store.add_question("Older", "B", "Nikita", Category::Math).unwrap();
    let newer = h.store.add_question("Newer", "B", "Nikita", Category::Math).unwrap();
    h.store.add_question("Silent", "B", "Nikita", Category::Math).unwrap();

    h.store.add_chat_message(newer, "first", Role::Student, "Nikita").unwrap();
    h.tick();
    h.store.add_chat_message(older, "second", Role::Student, "Nikita").unwrap();

    let rows = chat_list(h.store.snapshot(), Role::Student, "Nikita");
    let ids: Vec<u64> = rows.iter().map(|r| r.question_id).collect();
    assert_eq!(ids, vec![older, newer]);
    assert_eq!(rows[0].last_message.text, "second");
    assert!(!rows[0].has_unread);

    let helper_rows = chat_list(h.store.snapshot(), Role::Helper, "Helper");
    assert_eq!(helper_rows.len(), 2);
    assert!(helper_rows.iter().all(|r| r.has_unread));
}

#[test]
fn helper_stops_seeing_a_read_chat_they_never_joined() {
    let mut h = Harness::new(Policy::default());
    let q = h.store.add_question("Q", "B", "Nikita", Category::Math).unwrap();
    h.store.add_chat_message(q, "anyone?", Role::Student, "Nikita").unwrap();
    assert_eq!(chat_list(h.store.snapshot(), Role::Helper, "Helper").len(), 1);

    h.store.mark_chat_read(q, Role::Helper).unwrap();
    assert!(chat_list(h.store.snapshot(), Role::Helper, "Helper").is_empty());

    h.store.add_chat_message(q, "here", Role::Helper, "Helper").unwrap();
    assert_eq!(chat_list(h.store.snapshot(), Role::Helper, "Helper").len(), 1);
}

#[test]
fn question_detail_gates_actions_for_the_author() {
    let mut h = Harness::new(Policy::default());
    let q = h.store.add_question("Q", "B", "Nikita", Category::Math).unwrap();
    h.tick();
    let a = h.store.add_answer(q, "answer", "Helper").unwrap();

    let detail = QuestionDetail::build(h.store.snapshot(), q, &nikita()).unwrap();
    assert!(detail.can_choose_best);
    assert!(!detail.can_resolve);
    assert!(!detail.can_rate);
    assert!(!detail.can_open_chat);

    let stranger = QuestionDetail::build(h.store.snapshot(), q, &common::helper()).unwrap();
    assert!(!stranger.can_choose_best);

    h.store.choose_best_answer(&nikita(), q, a).unwrap();
    let detail = QuestionDetail::build(h.store.snapshot(), q, &nikita()).unwrap();
    assert!(detail.can_resolve);
    assert!(detail.can_open_chat);
    assert_eq!(detail.helper_name, Some("Helper"));
    assert!(detail.is_best(&detail.answers[0]));

    h.store.mark_question_resolved(&nikita(), q, true).unwrap();
    let detail = QuestionDetail::build(h.store.snapshot(), q, &nikita()).unwrap();
    assert!(!detail.can_resolve);
    assert!(detail.can_rate);

    assert!(QuestionDetail::build(h.store.snapshot(), 1, &nikita()).is_none());
}

#[test]
fn profile_stats_follow_best_answers_and_ratings() {
    let mut h = Harness::new(Policy::default());
    let q1 = h.store.add_question("Q1", "B", "Nikita", Category::Math).unwrap();
    h.tick();
    let q2 = h.store.add_question("Q2", "B", "Nikita", Category::Math).unwrap();
    h.tick();
    let a1 = h.store.add_answer(q1, "mine", "Helper").unwrap();
    h.tick();
    h.store.add_answer(q2, "mine too", "Helper").unwrap();
    h.tick();
    let other = h.store.add_answer(q2, "not mine", "Anna").unwrap();

    h.store.choose_best_answer(&nikita(), q1, a1).unwrap();
    h.store.mark_question_resolved(&nikita(), q1, true).unwrap();
    h.store.rate_helper(&nikita(), q1, 4, "Helper").unwrap();

    h.store.choose_best_answer(&nikita(), q2, other).unwrap();
    h.store.mark_question_resolved(&nikita(), q2, true).unwrap();
    h.store.rate_helper(&nikita(), q2, 1, "Anna").unwrap();

    let stats = helper_stats(h.store.snapshot(), "Helper");
    assert_eq!(stats.answers_given, 2);
    assert_eq!(stats.accepted, 1);
    assert_eq!(stats.ratings_received, 1);
    assert_eq!(stats.average_rating, Some(4.0));

    let student = student_stats(h.store.snapshot(), "Nikita");
    assert_eq!(student.total, 2);
    assert_eq!(student.resolved, 2);
    assert_eq!(student.unresolved, 0);
}
