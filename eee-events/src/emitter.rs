//! Emitter implementation

use crate::error::EmitError;
use crate::event::Event;
use crate::hook::{HookRef, same_hook};
use crate::priority::{Priority, PriorityKey, SequenceCounter};
use crate::result::EmissionResult;
use dashmap::DashMap;
use futures::future::BoxFuture;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

/// A single registration. Never mutated once created.
struct Listener<A, V> {
    name: Arc<str>,
    hook: HookRef<A, V>,
    key: PriorityKey,
}

impl<A, V> Clone for Listener<A, V> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            hook: Arc::clone(&self.hook),
            key: self.key,
        }
    }
}

/// Name or names passed to [`Emitter::emit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventNames {
    One(String),
    Many(Vec<String>),
}

impl EventNames {
    pub fn as_slice(&self) -> &[String] {
        match self {
            EventNames::One(name) => std::slice::from_ref(name),
            EventNames::Many(names) => names,
        }
    }
}

impl fmt::Display for EventNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_slice().join(", "))
    }
}

impl From<&str> for EventNames {
    fn from(name: &str) -> Self {
        EventNames::One(name.to_string())
    }
}

impl From<String> for EventNames {
    fn from(name: String) -> Self {
        EventNames::One(name)
    }
}

impl From<Vec<String>> for EventNames {
    fn from(names: Vec<String>) -> Self {
        EventNames::Many(names)
    }
}

impl From<Vec<&str>> for EventNames {
    fn from(names: Vec<&str>) -> Self {
        EventNames::Many(names.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for EventNames {
    fn from(names: &[&str]) -> Self {
        EventNames::Many(names.iter().map(|name| name.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for EventNames {
    fn from(names: [&str; N]) -> Self {
        EventNames::Many(names.iter().map(|name| name.to_string()).collect())
    }
}

/// Emitter configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Log registrations, removals and emissions through `tracing`
    pub enable_logging: bool,

    /// Tier used by [`Emitter::on_default`]
    pub default_priority: Priority,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            enable_logging: true,
            default_priority: Priority::Normal,
        }
    }
}

/// Priority-ordered event emitter.
///
/// Listeners are registered under a name with a [`Priority`]; every
/// emission runs the matching listeners one after another, highest tier
/// first and in registration order within a tier, until one of them
/// stops the event.
///
/// Cloning is cheap and every clone shares the same registry.
pub struct Emitter<A, V> {
    /// Listeners per event name, each list kept sorted by [`PriorityKey`]
    listeners: Arc<DashMap<String, Vec<Listener<A, V>>>>,

    sequence: Arc<SequenceCounter>,

    config: Arc<EmitterConfig>,
}

impl<A, V> Clone for Emitter<A, V> {
    fn clone(&self) -> Self {
        Self {
            listeners: Arc::clone(&self.listeners),
            sequence: Arc::clone(&self.sequence),
            config: Arc::clone(&self.config),
        }
    }
}

impl<A, V> fmt::Debug for Emitter<A, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("events", &self.listeners.len())
            .field("config", &self.config)
            .finish()
    }
}

impl<A, V> Emitter<A, V>
where
    A: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Create an emitter with default config and the global sequence counter
    pub fn new() -> Self {
        Self::with_config(EmitterConfig::default())
    }

    /// Create emitter with custom config
    pub fn with_config(config: EmitterConfig) -> Self {
        Self::with_parts(config, SequenceCounter::global())
    }

    fn with_parts(config: EmitterConfig, sequence: Arc<SequenceCounter>) -> Self {
        Self {
            listeners: Arc::new(DashMap::new()),
            sequence,
            config: Arc::new(config),
        }
    }

    /// Register `hook` under `name`.
    ///
    /// Returns the same handle, which identifies the registration for the
    /// `remove_*` operations. Registering one hook several times creates
    /// several independent entries.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let emitter: Emitter<String, ()> = Emitter::new();
    /// let hook = emitter.on("save", Arc::new(Audit), Priority::High)?;
    /// ```
    pub fn on(
        &self,
        name: &str,
        hook: HookRef<A, V>,
        priority: Priority,
    ) -> Result<HookRef<A, V>, EmitError> {
        validate_name(name)?;

        let key = PriorityKey::new(priority, self.sequence.next());
        {
            let mut listeners = self.listeners.entry(name.to_string()).or_default();
            listeners.push(Listener {
                name: Arc::from(name),
                hook: Arc::clone(&hook),
                key,
            });
            listeners.sort_by_key(|listener| listener.key);
        }

        if self.config.enable_logging {
            debug!(
                "Registered listener #{} for '{}' at {:?}",
                key.sequence, name, priority
            );
        }

        Ok(hook)
    }

    /// Register `hook` under `name` at the configured default priority,
    /// [`Priority::Normal`] unless overridden.
    pub fn on_default(&self, name: &str, hook: HookRef<A, V>) -> Result<HookRef<A, V>, EmitError> {
        self.on(name, hook, self.config.default_priority)
    }

    /// Remove every registration of `hook` under `name`
    pub fn remove_by_name_and_hook(&self, name: &str, hook: &HookRef<A, V>) -> usize {
        let removed = match self.listeners.get_mut(name) {
            Some(mut listeners) => {
                let before = listeners.len();
                listeners.retain(|listener| !same_hook(&listener.hook, hook));
                before - listeners.len()
            }
            None => 0,
        };
        self.listeners.remove_if(name, |_, listeners| listeners.is_empty());

        if self.config.enable_logging {
            debug!("Removed {} listener(s) of a hook from '{}'", removed, name);
        }
        removed
    }

    /// Remove all listeners for `name`
    pub fn remove_by_name(&self, name: &str) -> usize {
        let removed = self
            .listeners
            .remove(name)
            .map(|(_, listeners)| listeners.len())
            .unwrap_or(0);

        if self.config.enable_logging {
            debug!("Removed all {} listener(s) for '{}'", removed, name);
        }
        removed
    }

    /// Remove every registration of `hook`, whatever name it was registered under
    pub fn remove_by_hook(&self, hook: &HookRef<A, V>) -> usize {
        let mut removed = 0;
        self.listeners.retain(|_, listeners| {
            let before = listeners.len();
            listeners.retain(|listener| !same_hook(&listener.hook, hook));
            removed += before - listeners.len();
            !listeners.is_empty()
        });

        if self.config.enable_logging {
            debug!("Removed {} listener(s) of a hook from all events", removed);
        }
        removed
    }

    /// Clear the registry
    pub fn remove_all(&self) -> usize {
        let mut removed = 0;
        self.listeners.retain(|_, listeners| {
            removed += listeners.len();
            false
        });

        if self.config.enable_logging {
            debug!("Cleared all {} listener(s)", removed);
        }
        removed
    }

    /// Fire one or more named events.
    ///
    /// The set of listeners is captured when `emit` is called; registry
    /// changes made afterwards do not affect this emission. The returned
    /// future always yields to the scheduler once before the first listener
    /// runs, even when nothing is registered.
    ///
    /// Every name must pass the same check as [`on`](Self::on); otherwise the
    /// future resolves to [`EmitError::InvalidName`] without running any
    /// listener. A valid name nobody listens to yields an empty result.
    ///
    /// Listeners run one at a time in [`PriorityKey`] order, merged across
    /// all given names. The first listener that stops its event ends the
    /// whole emission. A failing listener aborts the emission with
    /// [`EmitError::ListenerFailed`].
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let result = emitter.emit(["validate", "save"], path).await?;
    /// if result.stopped() {
    ///     println!("vetoed");
    /// }
    /// ```
    pub fn emit(
        &self,
        names: impl Into<EventNames>,
        payload: A,
    ) -> BoxFuture<'static, Result<EmissionResult<V>, EmitError>> {
        let names = names.into();
        if let Err(err) = names.as_slice().iter().try_for_each(|name| validate_name(name)) {
            return Box::pin(async move {
                tokio::task::yield_now().await;
                Err(err)
            });
        }

        let listeners = self.snapshot(&names);
        let logging = self.config.enable_logging;

        if logging {
            if listeners.is_empty() {
                warn!("No listeners registered for event: {}", names);
            } else {
                debug!("Emitting '{}' to {} listener(s)", names, listeners.len());
            }
        }

        Box::pin(async move {
            tokio::task::yield_now().await;
            dispatch(listeners, payload, logging).await
        })
    }

    /// Candidate set of one emission, sorted by [`PriorityKey`]
    fn snapshot(&self, names: &EventNames) -> Vec<Listener<A, V>> {
        match names {
            EventNames::One(name) => self
                .listeners
                .get(name.as_str())
                .map(|listeners| listeners.value().clone())
                .unwrap_or_default(),
            EventNames::Many(names) => {
                let mut merged = Vec::new();
                for name in names {
                    if let Some(listeners) = self.listeners.get(name.as_str()) {
                        merged.extend(listeners.value().iter().cloned());
                    }
                }
                // each list is sorted on its own, the merge is not
                merged.sort_by_key(|listener| listener.key);
                merged
            }
        }
    }

    /// Number of listeners registered for `name`
    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners
            .get(name)
            .map(|listeners| listeners.len())
            .unwrap_or(0)
    }

    pub fn has_listeners(&self, name: &str) -> bool {
        self.listener_count(name) > 0
    }

    /// Names with at least one listener, sorted
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .listeners
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        names
    }

    pub fn total_listeners(&self) -> usize {
        self.listeners.iter().map(|entry| entry.value().len()).sum()
    }
}

impl<A, V> Default for Emitter<A, V>
where
    A: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

async fn dispatch<A, V>(
    listeners: Vec<Listener<A, V>>,
    payload: A,
    logging: bool,
) -> Result<EmissionResult<V>, EmitError>
where
    A: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    let mut result = EmissionResult::new();

    for listener in &listeners {
        let mut event = Event::new();
        event.activate();

        if logging {
            trace!(
                "Invoking listener #{} for '{}'",
                listener.key.sequence, listener.name
            );
        }

        let outcome = match listener.hook.call(&event, &payload).await {
            Ok(outcome) => outcome,
            Err(source) => {
                if logging {
                    error!(
                        "Listener #{} for '{}' failed: {}",
                        listener.key.sequence, listener.name, source
                    );
                }
                return Err(EmitError::ListenerFailed {
                    name: listener.name.to_string(),
                    sequence: listener.key.sequence,
                    source,
                });
            }
        };

        event.complete(outcome);
        let stopped = event.stopped();
        result.push(event);

        if stopped {
            if logging {
                debug!(
                    "Listener #{} for '{}' stopped the emission",
                    listener.key.sequence, listener.name
                );
            }
            break;
        }
    }

    Ok(result)
}

fn validate_name(name: &str) -> Result<(), EmitError> {
    if name.is_empty() || name.trim() != name {
        return Err(EmitError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Emitter builder
pub struct EmitterBuilder {
    config: EmitterConfig,
    sequence: Option<Arc<SequenceCounter>>,
}

impl EmitterBuilder {
    /// Create new emitter builder
    pub fn new() -> Self {
        Self {
            config: EmitterConfig::default(),
            sequence: None,
        }
    }

    /// Start from an existing config
    pub fn config(mut self, config: EmitterConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable/disable logging
    pub fn enable_logging(mut self, enabled: bool) -> Self {
        self.config.enable_logging = enabled;
        self
    }

    /// Order registrations with `counter` instead of the global one
    pub fn sequence_counter(mut self, counter: Arc<SequenceCounter>) -> Self {
        self.sequence = Some(counter);
        self
    }

    /// Build the emitter
    pub fn build<A, V>(self) -> Emitter<A, V>
    where
        A: Send + Sync + 'static,
        V: Send + Sync + 'static,
    {
        let sequence = self.sequence.unwrap_or_else(SequenceCounter::global);
        Emitter::with_parts(self.config, sequence)
    }
}

impl Default for EmitterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
