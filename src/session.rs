//! Session ownership and completion reporting.
//!
//! The original implementation guarded re-entry with an ad hoc busy flag
//! stuck onto the DOM node and mixed callback- with promise-based
//! completion. Here both are explicit: a [`Registry`] maps target keys to
//! their live session, and every session settles exactly one [`Completion`]
//! handle that supports both callback registration and polling. A
//! [`CompletionSlot`] hands a fresh handle to each session in turn, so
//! repeat triggers never reuse a settled handle.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::Error;

/// Identity of an effect target. The DOM shell assigns one per element and
/// stores it in an attribute; tests use plain numbers.
pub type TargetKey = u64;

/// Identifier of one live effect session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

/// Result of asking the registry to start a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartStatus {
    /// A new session now owns the target.
    Started(SessionId),
    /// The target already has a live session; nothing was changed and the
    /// existing session is unaffected. Triggers are never queued.
    AlreadyRunning,
}

/// Maps each busy target to its live session.
#[derive(Debug, Default)]
pub struct Registry {
    next_id: u64,
    active: HashMap<TargetKey, SessionId>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the target for a new session, or report it busy.
    pub fn begin(&mut self, key: TargetKey) -> StartStatus {
        if self.active.contains_key(&key) {
            debug!(key, "trigger rejected; session already running");
            return StartStatus::AlreadyRunning;
        }
        self.next_id += 1;
        let id = SessionId(self.next_id);
        self.active.insert(key, id);
        debug!(key, session = id.0, "session started");
        StartStatus::Started(id)
    }

    /// Release the target. Returns the session that owned it, if any.
    pub fn finish(&mut self, key: TargetKey) -> Option<SessionId> {
        let id = self.active.remove(&key);
        if let Some(id) = id {
            debug!(key, session = id.0, "session finished");
        }
        id
    }

    /// Whether the target currently has a live session.
    #[must_use]
    pub fn is_busy(&self, key: TargetKey) -> bool {
        self.active.contains_key(&key)
    }

    /// Number of live sessions.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The animation ran to completion and the transient DOM was removed.
    Finished,
    /// The session failed (image load error or timeout); teardown still ran.
    Failed(Error),
}

type SettleCallback = Box<dyn FnOnce(&Outcome)>;

struct CompletionInner {
    outcome: Option<Outcome>,
    callbacks: Vec<SettleCallback>,
}

/// Completion handle for one session: settled exactly once, consumable as a
/// callback target or by polling.
///
/// Cheap to clone; all clones observe the same settlement.
#[derive(Clone)]
pub struct Completion {
    inner: Rc<RefCell<CompletionInner>>,
}

impl Completion {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(CompletionInner { outcome: None, callbacks: Vec::new() })),
        }
    }

    /// Settle the handle. The first call wins; later calls are ignored with
    /// a log line. Registered callbacks run immediately, after the borrow on
    /// the shared state is released so they may inspect the handle.
    pub fn settle(&self, outcome: Outcome) -> bool {
        let callbacks = {
            let mut inner = self.inner.borrow_mut();
            if inner.outcome.is_some() {
                warn!("completion settled twice; second outcome dropped");
                return false;
            }
            inner.outcome = Some(outcome);
            std::mem::take(&mut inner.callbacks)
        };
        let settled = self.inner.borrow().outcome.clone();
        if let Some(outcome) = settled {
            for callback in callbacks {
                callback(&outcome);
            }
        }
        true
    }

    /// Register a callback, invoked exactly once when (or immediately if)
    /// the handle settles.
    pub fn on_settled(&self, callback: impl FnOnce(&Outcome) + 'static) {
        let already = self.inner.borrow().outcome.clone();
        match already {
            Some(outcome) => callback(&outcome),
            None => self.inner.borrow_mut().callbacks.push(Box::new(callback)),
        }
    }

    /// Poll the settlement.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.inner.borrow().outcome.clone()
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.inner.borrow().outcome.is_some()
    }
}

impl Default for Completion {
    fn default() -> Self {
        Self::new()
    }
}

/// Hands one [`Completion`] handle to each session in turn.
///
/// [`CompletionSlot::current`] is the handle the in-flight session will
/// settle, or the one the next session will claim when the target is idle.
/// Settling through the slot rotates a fresh handle in, so with repeat
/// triggers every run gets its own settle-once handle.
///
/// Cheap to clone; all clones observe the same rotation.
#[derive(Clone, Default)]
pub struct CompletionSlot {
    current: Rc<RefCell<Completion>>,
}

impl CompletionSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The handle for the session in flight, or for the next one to start.
    #[must_use]
    pub fn current(&self) -> Completion {
        self.current.borrow().clone()
    }

    /// Settle the current handle and install a fresh one for the next
    /// session. Returns `false` when the current handle was already settled.
    pub fn settle(&self, outcome: Outcome) -> bool {
        let completion = self.current.borrow().clone();
        let settled = completion.settle(outcome);
        *self.current.borrow_mut() = Completion::new();
        settled
    }
}
