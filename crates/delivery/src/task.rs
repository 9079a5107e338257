use {
    herald_channels::ChannelOutbound,
    herald_common::{ChannelId, MessageRef},
    herald_content::RichContent,
};

/// One unit of deliverable work: rendered content bound to a destination.
///
/// Built at most once per submission, handed straight to the scheduler,
/// never stored and never retried.
#[derive(Debug, Clone)]
pub(crate) struct SubmissionTask {
    pub channel: ChannelId,
    pub payload: TaskPayload,
}

/// Rendered payload, one variant per delivery mode.
#[derive(Debug, Clone)]
pub(crate) enum TaskPayload {
    Rich(RichContent),
    Plain(String),
}

impl SubmissionTask {
    pub(crate) fn mode(&self) -> &'static str {
        match self.payload {
            TaskPayload::Rich(_) => "rich",
            TaskPayload::Plain(_) => "plain",
        }
    }

    /// The single external transport call for this submission.
    pub(crate) async fn deliver(
        self,
        outbound: &dyn ChannelOutbound,
    ) -> anyhow::Result<MessageRef> {
        match self.payload {
            TaskPayload::Rich(content) => outbound.send_rich(self.channel, &content).await,
            TaskPayload::Plain(text) => outbound.send_plain(self.channel, &text).await,
        }
    }
}
