//! Listener hooks and what they resolve with

use crate::error::HookError;
use crate::event::Event;
use crate::result::EmissionResult;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::sync::Arc;

/// What a listener produced.
#[derive(Debug)]
pub enum Outcome<V> {
    /// The listener returned nothing
    Empty,

    /// A plain value
    Value(V),

    /// The result of a forwarded emission, flattened by
    /// [`EmissionResult::values`]
    Nested(EmissionResult<V>),
}

impl<V> Outcome<V> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Outcome::Empty)
    }

    /// The plain value, if the listener returned one
    pub fn value(&self) -> Option<&V> {
        match self {
            Outcome::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl<V> Default for Outcome<V> {
    fn default() -> Self {
        Outcome::Empty
    }
}

impl<V> From<EmissionResult<V>> for Outcome<V> {
    fn from(result: EmissionResult<V>) -> Self {
        Outcome::Nested(result)
    }
}

/// Listener hook
///
/// `A` is the payload every listener of an emitter receives, `V` the value
/// type listeners may resolve with. State the hook needs lives on `self`.
///
/// # Examples
///
/// ```rust,ignore
/// struct Audit;
///
/// #[async_trait]
/// impl Hook<String, ()> for Audit {
///     async fn call(&self, event: &Event<()>, path: &String) -> Result<Outcome<()>, HookError> {
///         if path.starts_with("/tmp") {
///             event.stop()?;
///         }
///         Ok(Outcome::Empty)
///     }
/// }
/// ```
#[async_trait]
pub trait Hook<A, V>: Send + Sync {
    /// Handle one emission
    async fn call(&self, event: &Event<V>, payload: &A) -> Result<Outcome<V>, HookError>;
}

/// Shared handle to a registered hook, compared by identity on removal.
pub type HookRef<A, V> = Arc<dyn Hook<A, V>>;

/// Whether two handles point at the same hook.
///
/// Only the data address is compared; the vtable half of the pointer is
/// not stable across codegen units.
pub fn same_hook<A, V>(a: &HookRef<A, V>, b: &HookRef<A, V>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Hook backed by a closure returning a boxed future
pub struct FnHook<F> {
    f: F,
}

#[async_trait]
impl<A, V, F> Hook<A, V> for FnHook<F>
where
    A: Send + Sync + 'static,
    V: Send + Sync + 'static,
    F: for<'a> Fn(&'a Event<V>, &'a A) -> BoxFuture<'a, Result<Outcome<V>, HookError>>
        + Send
        + Sync,
{
    async fn call(&self, event: &Event<V>, payload: &A) -> Result<Outcome<V>, HookError> {
        (self.f)(event, payload).await
    }
}

/// Wrap a closure into a [`HookRef`].
///
/// ```rust,ignore
/// let hook = hook_fn(|event: &Event<u32>, n: &u32| {
///     let n = *n;
///     async move { Ok(Outcome::Value(n * 2)) }.boxed()
/// });
/// ```
pub fn hook_fn<A, V, F>(f: F) -> HookRef<A, V>
where
    A: Send + Sync + 'static,
    V: Send + Sync + 'static,
    F: for<'a> Fn(&'a Event<V>, &'a A) -> BoxFuture<'a, Result<Outcome<V>, HookError>>
        + Send
        + Sync
        + 'static,
{
    Arc::new(FnHook { f })
}
