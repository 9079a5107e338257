use {
    herald_common::MessageRef,
    tokio::{sync::oneshot, task::AbortHandle},
};

/// Terminal state of one submission.
///
/// Failure details travel the failure callback path exclusively; the handle
/// only reports that the submission failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The transport accepted the message.
    Delivered(MessageRef),
    /// Nothing was sent and nothing will be; a successful no-op.
    Suppressed,
    /// The transport reported an error.
    Failed,
    /// The submission was cancelled before it could resolve.
    Cancelled,
}

/// Awaitable, cancellable view of one submission.
///
/// Suppressed submissions hand out a handle that is already complete, so
/// callers never special-case suppression when awaiting or cancelling.
#[derive(Debug)]
pub struct DeliveryHandle {
    state: HandleState,
}

#[derive(Debug)]
enum HandleState {
    /// Resolved at construction time.
    Ready(DeliveryOutcome),
    /// Waiting on a spawned submission task.
    Pending {
        outcome: oneshot::Receiver<DeliveryOutcome>,
        abort: AbortHandle,
    },
}

impl DeliveryHandle {
    pub(crate) fn ready(outcome: DeliveryOutcome) -> Self {
        Self {
            state: HandleState::Ready(outcome),
        }
    }

    pub(crate) fn pending(
        outcome: oneshot::Receiver<DeliveryOutcome>,
        abort: AbortHandle,
    ) -> Self {
        Self {
            state: HandleState::Pending { outcome, abort },
        }
    }

    /// Wait for the submission to resolve.
    ///
    /// Callbacks have already run by the time this returns. A task that was
    /// cancelled before reporting resolves to [`DeliveryOutcome::Cancelled`].
    pub async fn wait(self) -> DeliveryOutcome {
        match self.state {
            HandleState::Ready(outcome) => outcome,
            HandleState::Pending { outcome, .. } => {
                outcome.await.unwrap_or(DeliveryOutcome::Cancelled)
            },
        }
    }

    /// Cancel the submission.
    ///
    /// A delayed task that has not fired is stopped before it can touch the
    /// transport and neither callback runs. A task already inside the
    /// transport call is aborted at its next suspension point; the fate of
    /// the in-flight request is the transport's concern. Cancelling a
    /// completed or suppressed submission does nothing.
    pub fn cancel(&self) {
        if let HandleState::Pending { abort, .. } = &self.state {
            abort.abort();
        }
    }

    /// Whether the submission has already resolved.
    pub fn is_finished(&self) -> bool {
        match &self.state {
            HandleState::Ready(_) => true,
            HandleState::Pending { abort, .. } => abort.is_finished(),
        }
    }
}
