//! Deterministic timer wheel
//!
//! Repeating and one-shot timers keyed by handle, grouped into cancellation
//! scopes. Time only moves when the owner advances it, so a whole round can
//! be replayed from a seed and an input log.
//!
//! Due timers are handed out one at a time (`pop_due`) in deadline order,
//! ties broken by registration order. The caller dispatches each before
//! asking for the next, so anything canceled by an earlier firing within
//! the same advance never fires.

use serde::{Deserialize, Serialize};

/// Milliseconds of simulated time
pub type Millis = u64;

/// Handle of a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(u64);

/// Group of timers torn down together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Schedule {
    Once,
    Every(Millis),
}

#[derive(Debug, Clone)]
struct Timer<E> {
    id: TimerId,
    scope: ScopeId,
    deadline: Millis,
    schedule: Schedule,
    payload: E,
}

/// A timer that came due
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<E> {
    pub id: TimerId,
    /// Simulated time the timer was due at
    pub at: Millis,
    pub payload: E,
}

/// Simulated clock owning every pending timer
#[derive(Debug, Clone)]
pub struct Clock<E> {
    now: Millis,
    /// Pending timers, sorted by id (registration order)
    timers: Vec<Timer<E>>,
    next_timer: u64,
    next_scope: u32,
}

impl<E: Clone> Default for Clock<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Clock<E> {
    pub fn new() -> Self {
        Self {
            now: 0,
            timers: Vec::new(),
            next_timer: 1,
            next_scope: 1,
        }
    }

    /// Current simulated time
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Open a fresh cancellation scope
    pub fn open_scope(&mut self) -> ScopeId {
        let scope = ScopeId(self.next_scope);
        self.next_scope += 1;
        scope
    }

    /// Cancel every timer registered under `scope`, returning how many were pending
    pub fn close_scope(&mut self, scope: ScopeId) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| t.scope != scope);
        before - self.timers.len()
    }

    /// Fire `payload` every `period` ms, first firing one period from now
    pub fn every(&mut self, scope: ScopeId, period: Millis, payload: E) -> TimerId {
        // A zero period would fire forever within a single advance
        let period = period.max(1);
        self.insert(scope, period, Schedule::Every(period), payload)
    }

    /// Fire `payload` once, `delay` ms from now
    pub fn after(&mut self, scope: ScopeId, delay: Millis, payload: E) -> TimerId {
        self.insert(scope, delay, Schedule::Once, payload)
    }

    fn insert(&mut self, scope: ScopeId, delay: Millis, schedule: Schedule, payload: E) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers.push(Timer {
            id,
            scope,
            deadline: self.now + delay,
            schedule,
            payload,
        });
        id
    }

    /// Cancel a single timer. Returns false if it already fired or was canceled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.timers.iter().position(|t| t.id == id) {
            Some(i) => {
                self.timers.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Number of pending timers
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Number of pending timers in `scope`
    pub fn pending_in(&self, scope: ScopeId) -> usize {
        self.timers.iter().filter(|t| t.scope == scope).count()
    }

    /// Earliest deadline among pending timers
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.iter().map(|t| t.deadline).min()
    }

    /// Take the earliest timer due at or before `until`, moving `now` to its deadline.
    ///
    /// Repeating timers are re-armed one period later; one-shots are dropped.
    pub fn pop_due(&mut self, until: Millis) -> Option<Fired<E>> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= until)
            .min_by_key(|(_, t)| (t.deadline, t.id))
            .map(|(i, _)| i)?;

        let timer = &mut self.timers[index];
        let fired = Fired {
            id: timer.id,
            at: timer.deadline,
            payload: timer.payload.clone(),
        };
        self.now = self.now.max(timer.deadline);

        match timer.schedule {
            Schedule::Every(period) => timer.deadline += period,
            Schedule::Once => {
                self.timers.remove(index);
            }
        }

        Some(fired)
    }

    /// Move `now` forward to `until` once every due timer has been popped
    pub fn settle(&mut self, until: Millis) {
        self.now = self.now.max(until);
    }
}
