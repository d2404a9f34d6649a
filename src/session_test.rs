use std::cell::Cell;
use std::rc::Rc;

use super::*;

// --- Registry ---

#[test]
fn begin_claims_the_target() {
    let mut registry = Registry::new();
    let status = registry.begin(1);
    assert!(matches!(status, StartStatus::Started(_)));
    assert!(registry.is_busy(1));
    assert_eq!(registry.active_count(), 1);
}

#[test]
fn second_begin_is_rejected_without_queueing() {
    let mut registry = Registry::new();
    let first = registry.begin(1);
    assert_eq!(registry.begin(1), StartStatus::AlreadyRunning);
    // The original session is untouched.
    let StartStatus::Started(id) = first else {
        panic!("first begin must start");
    };
    assert_eq!(registry.finish(1), Some(id));
    // The rejected trigger was not queued: the target is free now.
    assert!(!registry.is_busy(1));
}

#[test]
fn finish_releases_and_allows_restart() {
    let mut registry = Registry::new();
    let StartStatus::Started(first) = registry.begin(1) else {
        panic!("begin must start");
    };
    registry.finish(1);
    let StartStatus::Started(second) = registry.begin(1) else {
        panic!("restart must start");
    };
    assert_ne!(first, second);
}

#[test]
fn finish_on_idle_target_is_none() {
    let mut registry = Registry::new();
    assert_eq!(registry.finish(42), None);
}

#[test]
fn targets_are_independent() {
    let mut registry = Registry::new();
    assert!(matches!(registry.begin(1), StartStatus::Started(_)));
    assert!(matches!(registry.begin(2), StartStatus::Started(_)));
    assert_eq!(registry.active_count(), 2);
    registry.finish(1);
    assert!(!registry.is_busy(1));
    assert!(registry.is_busy(2));
}

#[test]
fn session_ids_are_distinct() {
    let mut registry = Registry::new();
    let StartStatus::Started(a) = registry.begin(1) else {
        panic!("begin must start");
    };
    let StartStatus::Started(b) = registry.begin(2) else {
        panic!("begin must start");
    };
    assert_ne!(a, b);
}

// --- Completion ---

#[test]
fn new_completion_is_unsettled() {
    let completion = Completion::new();
    assert!(!completion.is_settled());
    assert_eq!(completion.outcome(), None);
}

#[test]
fn settle_is_first_wins() {
    let completion = Completion::new();
    assert!(completion.settle(Outcome::Finished));
    assert!(!completion.settle(Outcome::Failed(crate::error::Error::invalid("late"))));
    assert_eq!(completion.outcome(), Some(Outcome::Finished));
}

#[test]
fn callback_runs_on_settle() {
    let completion = Completion::new();
    let seen = Rc::new(Cell::new(false));
    let flag = Rc::clone(&seen);
    completion.on_settled(move |outcome| {
        assert_eq!(*outcome, Outcome::Finished);
        flag.set(true);
    });
    assert!(!seen.get());
    completion.settle(Outcome::Finished);
    assert!(seen.get());
}

#[test]
fn callback_after_settle_runs_immediately() {
    let completion = Completion::new();
    completion.settle(Outcome::Finished);
    let seen = Rc::new(Cell::new(false));
    let flag = Rc::clone(&seen);
    completion.on_settled(move |_| flag.set(true));
    assert!(seen.get());
}

#[test]
fn all_callbacks_run_once() {
    let completion = Completion::new();
    let count = Rc::new(Cell::new(0));
    for _ in 0..3 {
        let counter = Rc::clone(&count);
        completion.on_settled(move |_| counter.set(counter.get() + 1));
    }
    completion.settle(Outcome::Finished);
    completion.settle(Outcome::Finished);
    assert_eq!(count.get(), 3);
}

#[test]
fn clones_share_settlement() {
    let completion = Completion::new();
    let observer = completion.clone();
    completion.settle(Outcome::Failed(crate::error::Error::invalid("boom")));
    assert!(observer.is_settled());
    assert!(matches!(observer.outcome(), Some(Outcome::Failed(_))));
}

// --- CompletionSlot ---

#[test]
fn slot_hands_each_session_its_own_handle() {
    let slot = CompletionSlot::new();

    // First run: settle through the slot, as a finishing session does.
    let first = slot.current();
    assert!(slot.settle(Outcome::Finished));
    assert_eq!(first.outcome(), Some(Outcome::Finished));

    // Re-armed second run gets a fresh, unsettled handle.
    let second = slot.current();
    assert!(!second.is_settled());
    assert!(slot.settle(Outcome::Failed(crate::error::Error::invalid("load"))));
    assert!(matches!(second.outcome(), Some(Outcome::Failed(_))));

    // The first run's outcome is untouched by the second settlement.
    assert_eq!(first.outcome(), Some(Outcome::Finished));
}

#[test]
fn slot_callback_sees_only_its_sessions_outcome() {
    let slot = CompletionSlot::new();
    let count = Rc::new(Cell::new(0));

    let counter = Rc::clone(&count);
    slot.current().on_settled(move |_| counter.set(counter.get() + 1));
    slot.settle(Outcome::Finished);
    assert_eq!(count.get(), 1);

    // A callback on the rotated handle waits for the next settlement.
    let counter = Rc::clone(&count);
    slot.current().on_settled(move |_| counter.set(counter.get() + 1));
    assert_eq!(count.get(), 1);
    slot.settle(Outcome::Finished);
    assert_eq!(count.get(), 2);
}

#[test]
fn slot_clones_observe_the_rotation() {
    let slot = CompletionSlot::new();
    let observer = slot.clone();
    let handle = observer.current();
    slot.settle(Outcome::Finished);
    assert!(handle.is_settled());
    assert!(!observer.current().is_settled());
}

#[test]
fn callback_may_poll_the_handle() {
    // Callbacks run after the internal borrow is released.
    let completion = Completion::new();
    let other = completion.clone();
    let seen = Rc::new(Cell::new(false));
    let flag = Rc::clone(&seen);
    completion.on_settled(move |_| {
        assert!(other.is_settled());
        flag.set(true);
    });
    completion.settle(Outcome::Finished);
    assert!(seen.get());
}
