// eee - priority-ordered asynchronous event emitter
//
// The `Eee` type owns an emitter and exposes its operations unchanged, for
// types that want to be event sources without handing out the engine.

// Re-export the dispatch engine
pub use eee_events::*;

pub use async_trait::async_trait;

use futures::future::BoxFuture;

/// Owner of an [`Emitter`] exposing registration, removal and emission.
pub struct Eee<A, V> {
    emitter: Emitter<A, V>,
}

impl<A, V> Eee<A, V>
where
    A: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::from_emitter(Emitter::new())
    }

    pub fn with_config(config: EmitterConfig) -> Self {
        Self::from_emitter(Emitter::with_config(config))
    }

    pub fn from_emitter(emitter: Emitter<A, V>) -> Self {
        Self { emitter }
    }

    /// The owned emitter
    pub fn emitter(&self) -> &Emitter<A, V> {
        &self.emitter
    }

    pub fn on(
        &self,
        name: &str,
        hook: HookRef<A, V>,
        priority: Priority,
    ) -> Result<HookRef<A, V>, EmitError> {
        self.emitter.on(name, hook, priority)
    }

    /// Register at the emitter's configured default priority
    pub fn on_default(&self, name: &str, hook: HookRef<A, V>) -> Result<HookRef<A, V>, EmitError> {
        self.emitter.on_default(name, hook)
    }

    pub fn remove_by_name_and_hook(&self, name: &str, hook: &HookRef<A, V>) -> usize {
        self.emitter.remove_by_name_and_hook(name, hook)
    }

    pub fn remove_by_name(&self, name: &str) -> usize {
        self.emitter.remove_by_name(name)
    }

    pub fn remove_by_hook(&self, hook: &HookRef<A, V>) -> usize {
        self.emitter.remove_by_hook(hook)
    }

    pub fn remove_all(&self) -> usize {
        self.emitter.remove_all()
    }

    pub fn emit(
        &self,
        names: impl Into<EventNames>,
        payload: A,
    ) -> BoxFuture<'static, Result<EmissionResult<V>, EmitError>> {
        self.emitter.emit(names, payload)
    }
}

impl<A, V> Default for Eee<A, V>
where
    A: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Eee, EmissionResult, EmitError, Emitter, EmitterBuilder, EmitterConfig, Event, Hook,
        HookError, HookRef, Outcome, Priority, async_trait, hook_fn,
    };
}
