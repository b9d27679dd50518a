//! Error types

/// Raised by [`Event::stop`](crate::Event::stop) when the event's listener
/// is not currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("can't stop an event after it has ended")]
pub struct InvalidStateError;

/// Hook error
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("Hook failed: {0}")]
    Failed(String),

    #[error("Event processing error: {0}")]
    Processing(String),

    #[error(transparent)]
    InvalidState(#[from] InvalidStateError),
}

/// Emitter errors
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("Invalid event name: {0:?}")]
    InvalidName(String),

    #[error("Listener #{sequence} for '{name}' failed: {source}")]
    ListenerFailed {
        name: String,
        sequence: u64,
        #[source]
        source: HookError,
    },
}

impl EmitError {
    /// The hook error behind a listener failure, if any
    pub fn hook_error(&self) -> Option<&HookError> {
        match self {
            EmitError::ListenerFailed { source, .. } => Some(source),
            EmitError::InvalidName(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_invalid_state_converts_into_hook_error() {
        let err: HookError = InvalidStateError.into();
        assert!(matches!(err, HookError::InvalidState(_)));
        assert_eq!(err.to_string(), "can't stop an event after it has ended");
    }

    #[test]
    fn test_listener_failure_keeps_source() {
        let err = EmitError::ListenerFailed {
            name: "save".to_string(),
            sequence: 7,
            source: HookError::Failed("disk full".to_string()),
        };

        assert_eq!(
            err.to_string(),
            "Listener #7 for 'save' failed: Hook failed: disk full"
        );
        assert!(err.source().is_some());
        assert!(matches!(err.hook_error(), Some(HookError::Failed(_))));
        assert!(EmitError::InvalidName(String::new()).hook_error().is_none());
    }
}
