use std::{sync::Arc, time::Duration};

use {
    herald_channels::{CapabilityProbe, ChannelOutbound},
    herald_common::{ChannelId, MessageRef},
    herald_content::ContentProducer,
    once_cell::sync::OnceCell,
    thiserror::Error,
    tokio::sync::oneshot,
    tracing::{debug, trace},
    uuid::Uuid,
};

use crate::{
    callbacks::{Callbacks, FailureHandler, OnFailure, OnSuccess, process_failure_handler},
    capability::CapabilityTier,
    handle::{DeliveryHandle, DeliveryOutcome},
    scheduler::Scheduler,
    task::{SubmissionTask, TaskPayload},
};

/// Synchronous submission failures.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The dispatcher was built without a destination channel.
    #[error("no destination channel defined for this dispatcher")]
    ChannelUndefined,
}

/// Per-submission options. Every field is independently optional.
#[derive(Default)]
pub struct SubmitOptions {
    delay: Duration,
    scheduler: Option<Scheduler>,
    on_success: Option<OnSuccess>,
    on_failure: Option<OnFailure>,
}

impl SubmitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defer the transport call by `delay`. Zero means no deferral at all.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Run this submission on a specific scheduler instead of the
    /// dispatcher's default.
    pub fn scheduler(mut self, scheduler: Scheduler) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Invoke with the accepted message's reference once delivery succeeds.
    pub fn on_success(mut self, f: impl FnOnce(MessageRef) + Send + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    /// Invoke with the transport error if delivery fails.
    pub fn on_failure(mut self, f: impl FnOnce(anyhow::Error) + Send + 'static) -> Self {
        self.on_failure = Some(Box::new(f));
        self
    }
}

/// Orchestrates outbound messages for one destination: resolves what the
/// channel permits, renders the matching content, and hands exactly one
/// submission task per call to the scheduler.
///
/// The capability tier is resolved on the first submission and cached for
/// the dispatcher's whole lifetime; a host-side permission change is picked
/// up by the next dispatcher, never by this one. One instance may submit
/// any number of times.
pub struct Dispatcher {
    channel: Option<ChannelId>,
    producer: Arc<dyn ContentProducer>,
    probe: Arc<dyn CapabilityProbe>,
    outbound: Arc<dyn ChannelOutbound>,
    scheduler: Scheduler,
    fallback: Arc<dyn FailureHandler>,
    tier: OnceCell<CapabilityTier>,
}

impl Dispatcher {
    pub fn new(
        channel: Option<ChannelId>,
        producer: Arc<dyn ContentProducer>,
        probe: Arc<dyn CapabilityProbe>,
        outbound: Arc<dyn ChannelOutbound>,
    ) -> Self {
        Self {
            channel,
            producer,
            probe,
            outbound,
            scheduler: Scheduler::shared(),
            fallback: process_failure_handler(),
            tier: OnceCell::new(),
        }
    }

    /// Default scheduler for submissions from this dispatcher.
    pub fn with_scheduler(mut self, scheduler: Scheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Fallback handler for submissions that carry no failure callback.
    pub fn with_fallback(mut self, fallback: Arc<dyn FailureHandler>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Resolve (once) what the destination channel permits.
    fn tier(&self, channel: ChannelId) -> CapabilityTier {
        *self
            .tier
            .get_or_init(|| CapabilityTier::resolve(self.probe.as_ref(), channel))
    }

    /// Submit this dispatcher's content for delivery.
    ///
    /// Fails only when no destination channel is defined, and fails before
    /// any task is built. Every transport problem past this point reaches
    /// the caller through the failure callback path, never as a return
    /// value here. Suppressed submissions resolve immediately: the returned
    /// handle is already complete and no callback runs.
    pub fn submit(&self, options: SubmitOptions) -> Result<DeliveryHandle, DispatchError> {
        let channel = self.channel.ok_or(DispatchError::ChannelUndefined)?;
        let delivery_id = Uuid::new_v4();
        let tier = self.tier(channel);

        let task = match tier {
            CapabilityTier::Rich => SubmissionTask {
                channel,
                payload: TaskPayload::Rich(self.producer.build_rich()),
            },
            CapabilityTier::PlainText => {
                let text = self.producer.render_plain();
                if text.trim().is_empty() {
                    debug!(%delivery_id, %channel, "plain rendering empty, suppressing delivery");
                    return Ok(DeliveryHandle::ready(DeliveryOutcome::Suppressed));
                }
                SubmissionTask {
                    channel,
                    payload: TaskPayload::Plain(text),
                }
            },
            CapabilityTier::Suppressed => {
                debug!(%delivery_id, %channel, "channel permits nothing, suppressing delivery");
                return Ok(DeliveryHandle::ready(DeliveryOutcome::Suppressed));
            },
        };

        let SubmitOptions {
            delay,
            scheduler,
            on_success,
            on_failure,
        } = options;
        let callbacks = Callbacks::new(on_success, on_failure, Arc::clone(&self.fallback));
        let scheduler = scheduler.unwrap_or_else(|| self.scheduler.clone());
        let outbound = Arc::clone(&self.outbound);
        let (tx, rx) = oneshot::channel();

        trace!(
            %delivery_id,
            %channel,
            mode = task.mode(),
            delay_ms = delay.as_millis() as u64,
            "scheduling submission"
        );
        let join = scheduler.run_after(delay, async move {
            let result = task.deliver(outbound.as_ref()).await;
            let outcome = callbacks.settle(result);
            debug!(%delivery_id, ?outcome, "submission resolved");
            // The caller may have dropped the handle; that's fine.
            let _ = tx.send(outcome);
        });

        Ok(DeliveryHandle::pending(rx, join.abort_handle()))
    }

    /// [`Dispatcher::submit`] with the delay preset; the `delay` argument
    /// replaces whatever the options carry. Zero behaves exactly like an
    /// immediate submission.
    pub fn submit_after(
        &self,
        delay: Duration,
        options: SubmitOptions,
    ) -> Result<DeliveryHandle, DispatchError> {
        self.submit(options.delay(delay))
    }
}
