//! Priority-ordered asynchronous event emission
//!
//! This crate provides an in-process emitter whose listeners run one at a
//! time in priority order and may stop the rest of an emission.
//!
//! ## Features
//!
//! - **Priority tiers** - `Highest` through `Lowest`, registration order breaks ties
//! - **Stoppable** - any listener can end the emission for everything after it
//! - **Multi-name emits** - several names dispatched as one globally ordered run
//! - **Composite results** - per-listener outcomes, nested results flattened
//! - **Async** - hooks are `async`, every emit yields before dispatching
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use eee_events::*;
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct ReadOnlyGuard;
//!
//! #[async_trait]
//! impl Hook<String, String> for ReadOnlyGuard {
//!     async fn call(&self, event: &Event<String>, path: &String) -> Result<Outcome<String>, HookError> {
//!         if path.starts_with("/etc") {
//!             event.stop()?;
//!             return Ok(Outcome::Value(format!("refusing to save {path}")));
//!         }
//!         Ok(Outcome::Empty)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let emitter: Emitter<String, String> = Emitter::new();
//!     let guard = emitter.on("save", Arc::new(ReadOnlyGuard), Priority::Highest)?;
//!
//!     let result = emitter.emit("save", "/etc/passwd".to_string()).await?;
//!     assert!(result.stopped());
//!
//!     emitter.remove_by_hook(&guard);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! ```rust,ignore
//! let emitter: Emitter<String, String> = EmitterBuilder::new()
//!     .enable_logging(false)                              // No tracing output
//!     .sequence_counter(Arc::new(SequenceCounter::new())) // Private registration order
//!     .build();
//! ```

pub mod emitter;
pub mod error;
pub mod event;
pub mod hook;
pub mod priority;
pub mod result;

pub use emitter::{Emitter, EmitterBuilder, EmitterConfig, EventNames};
pub use error::{EmitError, HookError, InvalidStateError};
pub use event::Event;
pub use hook::{FnHook, Hook, HookRef, Outcome, hook_fn, same_hook};
pub use priority::{Priority, PriorityKey, SequenceCounter};
pub use result::EmissionResult;
