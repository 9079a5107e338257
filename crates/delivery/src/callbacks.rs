use std::sync::Arc;

use {
    herald_common::MessageRef,
    once_cell::sync::{Lazy, OnceCell},
    tracing::error,
};

use crate::handle::DeliveryOutcome;

/// Success callback, consumed on invocation.
pub type OnSuccess = Box<dyn FnOnce(MessageRef) + Send>;

/// Failure callback, consumed on invocation. Receives the transport error
/// by value.
pub type OnFailure = Box<dyn FnOnce(anyhow::Error) + Send>;

/// Handles delivery failures nobody registered a callback for.
///
/// Implementations must not panic; they run inside submission tasks where a
/// panic would be swallowed by the runtime.
pub trait FailureHandler: Send + Sync {
    fn handle(&self, error: &anyhow::Error);
}

/// Default fallback: log the failure with structured fields.
pub struct LogFailureHandler;

impl FailureHandler for LogFailureHandler {
    fn handle(&self, error: &anyhow::Error) {
        error!(error = %error, "message delivery failed");
    }
}

static PROCESS_FAILURE_HANDLER: OnceCell<Arc<dyn FailureHandler>> = OnceCell::new();

static DEFAULT_FAILURE_HANDLER: Lazy<Arc<dyn FailureHandler>> =
    Lazy::new(|| Arc::new(LogFailureHandler));

/// Install the process-wide fallback failure handler.
///
/// The first call wins and later calls return the rejected handler, so a
/// host sets this once during startup and libraries cannot displace it.
pub fn set_process_failure_handler(
    handler: Arc<dyn FailureHandler>,
) -> Result<(), Arc<dyn FailureHandler>> {
    PROCESS_FAILURE_HANDLER.set(handler)
}

/// The process-wide fallback, or the logging default if none was installed.
pub fn process_failure_handler() -> Arc<dyn FailureHandler> {
    match PROCESS_FAILURE_HANDLER.get() {
        Some(handler) => Arc::clone(handler),
        None => Arc::clone(&DEFAULT_FAILURE_HANDLER),
    }
}

/// Normalizes the optional per-submission callbacks into handlers that fire
/// exactly once.
///
/// A missing success callback is a no-op; a missing failure callback routes
/// the error to the fallback handler. Consuming `self` on [`Callbacks::settle`]
/// is what makes double invocation unrepresentable.
pub(crate) struct Callbacks {
    on_success: Option<OnSuccess>,
    on_failure: Option<OnFailure>,
    fallback: Arc<dyn FailureHandler>,
}

impl Callbacks {
    pub(crate) fn new(
        on_success: Option<OnSuccess>,
        on_failure: Option<OnFailure>,
        fallback: Arc<dyn FailureHandler>,
    ) -> Self {
        Self {
            on_success,
            on_failure,
            fallback,
        }
    }

    /// Route one delivery result to exactly one side.
    pub(crate) fn settle(self, result: anyhow::Result<MessageRef>) -> DeliveryOutcome {
        match result {
            Ok(message) => {
                if let Some(cb) = self.on_success {
                    cb(message);
                }
                DeliveryOutcome::Delivered(message)
            },
            Err(err) => {
                match self.on_failure {
                    Some(cb) => cb(err),
                    None => self.fallback.handle(&err),
                }
                DeliveryOutcome::Failed
            },
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use herald_common::{ChannelId, MessageId};

    use super::*;

    /// Fallback that records every error message it sees.
    struct CapturingHandler {
        seen: Mutex<Vec<String>>,
    }

    impl CapturingHandler {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl FailureHandler for CapturingHandler {
        fn handle(&self, error: &anyhow::Error) {
            self.seen.lock().unwrap().push(error.to_string());
        }
    }

    fn message() -> MessageRef {
        MessageRef {
            channel: ChannelId(1),
            message: MessageId(9),
        }
    }

    #[test]
    fn success_fires_success_side_only() {
        let successes = Arc::new(AtomicUsize::new(0));
        let failures = Arc::new(AtomicUsize::new(0));
        let s = Arc::clone(&successes);
        let f = Arc::clone(&failures);

        let callbacks = Callbacks::new(
            Some(Box::new(move |_| {
                s.fetch_add(1, Ordering::SeqCst);
            })),
            Some(Box::new(move |_| {
                f.fetch_add(1, Ordering::SeqCst);
            })),
            CapturingHandler::new(),
        );
        let outcome = callbacks.settle(Ok(message()));

        assert_eq!(outcome, DeliveryOutcome::Delivered(message()));
        assert_eq!(successes.load(Ordering::SeqCst), 1);
        assert_eq!(failures.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn failure_fires_failure_side_with_the_error() {
        let seen = Arc::new(Mutex::new(None));
        let capture = Arc::clone(&seen);

        let callbacks = Callbacks::new(
            None,
            Some(Box::new(move |err| {
                *capture.lock().unwrap() = Some(err.to_string());
            })),
            CapturingHandler::new(),
        );
        let outcome = callbacks.settle(Err(anyhow::anyhow!("gateway timeout")));

        assert_eq!(outcome, DeliveryOutcome::Failed);
        assert_eq!(seen.lock().unwrap().as_deref(), Some("gateway timeout"));
    }

    #[test]
    fn missing_failure_callback_routes_to_fallback() {
        let fallback = CapturingHandler::new();

        let callbacks =
            Callbacks::new(None, None, Arc::clone(&fallback) as Arc<dyn FailureHandler>);
        let outcome = callbacks.settle(Err(anyhow::anyhow!("boom")));

        assert_eq!(outcome, DeliveryOutcome::Failed);
        assert_eq!(fallback.seen.lock().unwrap().as_slice(), ["boom"]);
    }

    #[test]
    fn fallback_stays_quiet_on_success() {
        let fallback = CapturingHandler::new();

        let callbacks =
            Callbacks::new(None, None, Arc::clone(&fallback) as Arc<dyn FailureHandler>);
        callbacks.settle(Ok(message()));

        assert!(fallback.seen.lock().unwrap().is_empty());
    }

    // The only test that touches the process-wide handler; everything else
    // injects its fallback to stay independent of global state.
    #[test]
    fn process_handler_installs_once() {
        let first = CapturingHandler::new();
        let second = CapturingHandler::new();

        assert!(set_process_failure_handler(Arc::clone(&first) as Arc<dyn FailureHandler>).is_ok());
        assert!(
            set_process_failure_handler(Arc::clone(&second) as Arc<dyn FailureHandler>).is_err()
        );

        process_failure_handler().handle(&anyhow::anyhow!("dropped"));
        assert_eq!(first.seen.lock().unwrap().as_slice(), ["dropped"]);
        assert!(second.seen.lock().unwrap().is_empty());
    }
}
