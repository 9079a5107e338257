use {
    anyhow::Result,
    async_trait::async_trait,
    herald_common::{ChannelId, MessageRef},
    herald_content::RichContent,
};

/// Host-side capability introspection. Answers what a destination channel
/// currently permits, not what the host would like to send.
pub trait CapabilityProbe: Send + Sync {
    /// Whether rich formatted content can be sent to `channel` right now.
    fn can_send_rich(&self, channel: ChannelId) -> bool;

    /// Whether plain unformatted text can be sent to `channel` right now.
    fn can_send_plain(&self, channel: ChannelId) -> bool;
}

/// Send messages to a channel. Implemented by the host's transport.
///
/// Callers invoke at most one of these per outbound message; retries and
/// rate limiting are the transport's own business.
#[async_trait]
pub trait ChannelOutbound: Send + Sync {
    async fn send_rich(&self, channel: ChannelId, content: &RichContent) -> Result<MessageRef>;
    async fn send_plain(&self, channel: ChannelId, text: &str) -> Result<MessageRef>;
}
