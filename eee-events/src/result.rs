//! Aggregate result of one emission

use crate::event::Event;
use crate::hook::Outcome;

/// Events produced by one call to [`Emitter::emit`](crate::Emitter::emit),
/// in invocation order.
#[derive(Debug)]
pub struct EmissionResult<V> {
    events: Vec<Event<V>>,
}

impl<V> EmissionResult<V> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub(crate) fn push(&mut self, event: Event<V>) {
        self.events.push(event);
    }

    /// Events of the listeners that actually ran
    pub fn events(&self) -> &[Event<V>] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether any listener stopped propagation
    pub fn stopped(&self) -> bool {
        self.events.iter().any(Event::stopped)
    }

    /// Plain listener values in invocation order.
    ///
    /// Empty outcomes are skipped and nested results are flattened in
    /// place, recursively.
    pub fn values(&self) -> Vec<&V> {
        let mut values = Vec::new();
        collect_values(self, &mut values);
        values
    }

    /// Owning variant of [`values`](Self::values)
    pub fn into_values(self) -> Vec<V> {
        let mut values = Vec::new();
        drain_values(self, &mut values);
        values
    }
}

impl<V> Default for EmissionResult<V> {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_values<'a, V>(result: &'a EmissionResult<V>, out: &mut Vec<&'a V>) {
    for event in &result.events {
        match event.outcome() {
            Outcome::Empty => {}
            Outcome::Value(value) => out.push(value),
            Outcome::Nested(nested) => collect_values(nested, out),
        }
    }
}

fn drain_values<V>(result: EmissionResult<V>, out: &mut Vec<V>) {
    for event in result.events {
        match event.into_outcome() {
            Outcome::Empty => {}
            Outcome::Value(value) => out.push(value),
            Outcome::Nested(nested) => drain_values(nested, out),
        }
    }
}
