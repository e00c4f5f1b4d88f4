// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! One-shot completion signal for camera transitions.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lifecycle of a transition.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TransitionState {
    /// Still interpolating.
    InProgress,
    /// Reached the destination; never reverts.
    Done,
}

type Listener = Box<dyn FnOnce(TransitionState) + Send>;

/// Flag that flips from in-progress to done exactly once and notifies
/// listeners when it does.
///
/// * Each listener runs once, on the thread that completes the signal.
/// * Listeners added after completion run immediately on the subscribing
///   thread, so no subscriber can miss the transition.
/// * Listeners run with the internal lock released; they may subscribe
///   further listeners.
pub struct DoneSignal {
    done: AtomicBool,
    listeners: Mutex<Vec<Listener>>,
}

impl DoneSignal {
    /// Signal in the in-progress state with no listeners.
    pub fn new() -> Self {
        Self {
            done: AtomicBool::new(false),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Returns `true` once the signal has completed.
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }

    /// Current state.
    pub fn state(&self) -> TransitionState {
        if self.is_done() {
            TransitionState::Done
        } else {
            TransitionState::InProgress
        }
    }

    /// Registers `listener` for the completion event.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: FnOnce(TransitionState) + Send + 'static,
    {
        let mut listeners = self.lock();
        // Checked under the lock: `complete` drains after flipping, so a
        // listener is either drained or sees the flag.
        if self.is_done() {
            drop(listeners);
            listener(TransitionState::Done);
        } else {
            listeners.push(Box::new(listener));
        }
    }

    /// Number of listeners still waiting.
    pub fn pending_listeners(&self) -> usize {
        self.lock().len()
    }

    /// Flips to done and runs the pending listeners. Returns `false` if the
    /// signal had already completed.
    pub(crate) fn complete(&self) -> bool {
        if self
            .done
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }
        let listeners = std::mem::take(&mut *self.lock());
        for listener in listeners {
            listener(TransitionState::Done);
        }
        true
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Listener>> {
        // Listeners never run under the lock; a poisoned list is still valid.
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DoneSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DoneSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoneSignal")
            .field("state", &self.state())
            .field("pending_listeners", &self.pending_listeners())
            .finish()
    }
}
