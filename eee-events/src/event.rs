//! Per-invocation event token

use crate::error::InvalidStateError;
use crate::hook::Outcome;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Token handed to exactly one listener invocation.
///
/// While the listener runs the event is *active* and the listener may call
/// [`stop`](Event::stop) to keep every later listener of the same emission
/// from running. Once the listener returns, the event records its
/// [`Outcome`] and becomes read-only.
pub struct Event<V> {
    stopped: AtomicBool,
    active: AtomicBool,
    outcome: Outcome<V>,
}

impl<V> Event<V> {
    pub(crate) fn new() -> Self {
        Self {
            stopped: AtomicBool::new(false),
            active: AtomicBool::new(false),
            outcome: Outcome::Empty,
        }
    }

    /// Stop propagation of the current emission.
    ///
    /// Fails with [`InvalidStateError`] unless the event's listener is
    /// running right now.
    pub fn stop(&self) -> Result<(), InvalidStateError> {
        if !self.active.load(Ordering::Acquire) {
            return Err(InvalidStateError);
        }

        self.stopped.store(true, Ordering::Release);
        Ok(())
    }

    /// Whether the listener stopped propagation
    pub fn stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Whether the listener is currently running
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Value the listener resolved with
    pub fn outcome(&self) -> &Outcome<V> {
        &self.outcome
    }

    pub fn into_outcome(self) -> Outcome<V> {
        self.outcome
    }

    pub(crate) fn activate(&self) {
        self.active.store(true, Ordering::Release);
    }

    /// Ends the invocation and stores what the listener returned.
    pub(crate) fn complete(&mut self, outcome: Outcome<V>) {
        self.active.store(false, Ordering::Release);
        self.outcome = outcome;
    }
}

impl<V: fmt::Debug> fmt::Debug for Event<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("stopped", &self.stopped())
            .field("active", &self.is_active())
            .field("outcome", &self.outcome)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_requires_active() {
        let event: Event<()> = Event::new();
        assert_eq!(event.stop(), Err(InvalidStateError));
        assert!(!event.stopped());
    }

    #[test]
    fn test_stop_while_active() {
        let mut event: Event<u32> = Event::new();
        event.activate();
        assert!(event.is_active());

        event.stop().unwrap();
        // stopping twice during the same invocation is harmless
        event.stop().unwrap();

        event.complete(Outcome::Value(3));
        assert!(event.stopped());
        assert!(!event.is_active());
        assert!(matches!(event.outcome(), Outcome::Value(3)));
    }

    #[test]
    fn test_stop_after_completion_fails() {
        let mut event: Event<u32> = Event::new();
        event.activate();
        event.complete(Outcome::Empty);

        assert_eq!(event.stop(), Err(InvalidStateError));
        assert!(!event.stopped());
    }
}
