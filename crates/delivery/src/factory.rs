use std::sync::Arc;

use {
    herald_channels::{CapabilityProbe, ChannelOutbound},
    herald_common::ChannelId,
    herald_content::{ContentProducer, MessageComposer, MessageTone},
};

use crate::{
    callbacks::{FailureHandler, process_failure_handler},
    dispatcher::{DispatchError, Dispatcher, SubmitOptions},
    handle::DeliveryHandle,
    scheduler::Scheduler,
};

/// Builds dispatchers around a host's channel surface.
///
/// Holds the capability probe, the outbound transport, and the defaults
/// (scheduler, fallback failure handler) every dispatcher built here
/// starts from.
pub struct MessageFactory {
    probe: Arc<dyn CapabilityProbe>,
    outbound: Arc<dyn ChannelOutbound>,
    scheduler: Scheduler,
    fallback: Arc<dyn FailureHandler>,
}

impl MessageFactory {
    pub fn new(probe: Arc<dyn CapabilityProbe>, outbound: Arc<dyn ChannelOutbound>) -> Self {
        Self {
            probe,
            outbound,
            scheduler: Scheduler::shared(),
            fallback: process_failure_handler(),
        }
    }

    /// Default scheduler for dispatchers built by this factory.
    pub fn with_scheduler(mut self, scheduler: Scheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Fallback failure handler for dispatchers built by this factory.
    pub fn with_fallback(mut self, fallback: Arc<dyn FailureHandler>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Wire an arbitrary producer to a destination channel.
    pub fn compose(
        &self,
        channel: Option<ChannelId>,
        producer: Arc<dyn ContentProducer>,
    ) -> Dispatcher {
        Dispatcher::new(
            channel,
            producer,
            Arc::clone(&self.probe),
            Arc::clone(&self.outbound),
        )
        .with_scheduler(self.scheduler.clone())
        .with_fallback(Arc::clone(&self.fallback))
    }

    /// Start a success-toned draft.
    pub fn success(&self, channel: ChannelId, body: impl Into<String>) -> Draft<'_> {
        self.draft(channel, body, MessageTone::Success)
    }

    /// Start a warning-toned draft.
    pub fn warning(&self, channel: ChannelId, body: impl Into<String>) -> Draft<'_> {
        self.draft(channel, body, MessageTone::Warning)
    }

    /// Start an error-toned draft.
    pub fn error(&self, channel: ChannelId, body: impl Into<String>) -> Draft<'_> {
        self.draft(channel, body, MessageTone::Error)
    }

    /// Start an info-toned draft.
    pub fn info(&self, channel: ChannelId, body: impl Into<String>) -> Draft<'_> {
        self.draft(channel, body, MessageTone::Info)
    }

    fn draft(&self, channel: ChannelId, body: impl Into<String>, tone: MessageTone) -> Draft<'_> {
        Draft {
            factory: self,
            channel,
            composer: MessageComposer::new(body).tone(tone),
        }
    }
}

/// A toned, templated message under construction.
pub struct Draft<'a> {
    factory: &'a MessageFactory,
    channel: ChannelId,
    composer: MessageComposer,
}

impl Draft<'_> {
    /// Bind the `:key` placeholder in the body to `value`.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.composer = self.composer.set(key, value);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.composer = self.composer.title(title);
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.composer = self.composer.footer(footer);
        self
    }

    /// Append a name/value block to the rich rendering.
    pub fn field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.composer = self.composer.field(name, value, inline);
        self
    }

    /// Finish the draft into a reusable dispatcher.
    pub fn dispatcher(self) -> Dispatcher {
        self.factory
            .compose(Some(self.channel), Arc::new(self.composer))
    }

    /// One-shot sugar: finish the draft and submit it right away.
    pub fn submit(self, options: SubmitOptions) -> Result<DeliveryHandle, DispatchError> {
        self.dispatcher().submit(options)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    };

    use {
        async_trait::async_trait,
        herald_common::{MessageId, MessageRef},
        herald_content::RichContent,
    };

    use {super::*, crate::handle::DeliveryOutcome};

    /// Transport stub recording the last payload per mode.
    struct RecordingChannel {
        rich: bool,
        plain: bool,
        fail_sends: AtomicBool,
        last_rich: Mutex<Option<RichContent>>,
        last_plain: Mutex<Option<String>>,
    }

    impl RecordingChannel {
        fn new(rich: bool, plain: bool) -> Arc<Self> {
            Arc::new(Self {
                rich,
                plain,
                fail_sends: AtomicBool::new(false),
                last_rich: Mutex::new(None),
                last_plain: Mutex::new(None),
            })
        }
    }

    impl CapabilityProbe for RecordingChannel {
        fn can_send_rich(&self, _channel: ChannelId) -> bool {
            self.rich
        }

        fn can_send_plain(&self, _channel: ChannelId) -> bool {
            self.plain
        }
    }

    #[async_trait]
    impl ChannelOutbound for RecordingChannel {
        async fn send_rich(
            &self,
            channel: ChannelId,
            content: &RichContent,
        ) -> anyhow::Result<MessageRef> {
            if self.fail_sends.load(Ordering::SeqCst) {
                anyhow::bail!("gateway down");
            }
            *self.last_rich.lock().unwrap() = Some(content.clone());
            Ok(MessageRef {
                channel,
                message: MessageId(1),
            })
        }

        async fn send_plain(&self, channel: ChannelId, text: &str) -> anyhow::Result<MessageRef> {
            if self.fail_sends.load(Ordering::SeqCst) {
                anyhow::bail!("gateway down");
            }
            *self.last_plain.lock().unwrap() = Some(text.to_string());
            Ok(MessageRef {
                channel,
                message: MessageId(2),
            })
        }
    }

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

    fn factory(channel: &Arc<RecordingChannel>) -> MessageFactory {
        MessageFactory::new(
            Arc::clone(channel) as Arc<dyn CapabilityProbe>,
            Arc::clone(channel) as Arc<dyn ChannelOutbound>,
        )
    }

    #[tokio::test]
    async fn success_draft_delivers_toned_rich_content() {
        let channel = RecordingChannel::new(true, true);
        let outcome = factory(&channel)
            .success(ChannelId(3), "deployed :version")
            .set("version", "1.2.0")
            .title("Deploy")
            .submit(SubmitOptions::new())
            .unwrap()
            .wait()
            .await;

        assert!(matches!(outcome, DeliveryOutcome::Delivered(_)));
        let rich = channel.last_rich.lock().unwrap().clone().unwrap();
        assert_eq!(rich.description, "deployed 1.2.0");
        assert_eq!(rich.title.as_deref(), Some("Deploy"));
        assert_eq!(rich.color, Some(MessageTone::Success.color()));
    }

    #[tokio::test]
    async fn draft_dispatcher_is_reusable() {
        let channel = RecordingChannel::new(false, true);
        let d = factory(&channel)
            .warning(ChannelId(3), "disk at :pct%")
            .set("pct", "91")
            .dispatcher();

        d.submit(SubmitOptions::new()).unwrap().wait().await;
        d.submit(SubmitOptions::new()).unwrap().wait().await;

        assert_eq!(
            channel.last_plain.lock().unwrap().as_deref(),
            Some("disk at 91%")
        );
    }

    #[tokio::test]
    async fn compose_accepts_any_producer() {
        struct StatusProducer;

        impl ContentProducer for StatusProducer {
            fn build_rich(&self) -> RichContent {
                RichContent::new("all systems nominal")
            }

            fn render_plain(&self) -> String {
                "all systems nominal".into()
            }
        }

        let channel = RecordingChannel::new(false, true);
        let d = factory(&channel).compose(Some(ChannelId(9)), Arc::new(StatusProducer));

        let outcome = d.submit(SubmitOptions::new()).unwrap().wait().await;

        assert!(matches!(outcome, DeliveryOutcome::Delivered(_)));
        assert_eq!(
            channel.last_plain.lock().unwrap().as_deref(),
            Some("all systems nominal")
        );
    }

    #[tokio::test]
    async fn factory_fallback_reaches_dispatchers() {
        let channel = RecordingChannel::new(true, true);
        channel.fail_sends.store(true, Ordering::SeqCst);
        let fallback = CapturingHandler::new();

        let outcome = factory(&channel)
            .with_fallback(Arc::clone(&fallback) as Arc<dyn FailureHandler>)
            .error(ChannelId(3), "cannot reach :service")
            .set("service", "db")
            .submit(SubmitOptions::new())
            .unwrap()
            .wait()
            .await;

        assert_eq!(outcome, DeliveryOutcome::Failed);
        assert_eq!(fallback.seen.lock().unwrap().as_slice(), ["gateway down"]);
    }
}
