use {herald_channels::CapabilityProbe, herald_common::ChannelId, tracing::trace};

/// What a destination channel currently permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityTier {
    /// Rich formatted content is allowed.
    Rich,
    /// Only plain unformatted text is allowed.
    PlainText,
    /// Nothing can be sent; deliveries become silent no-ops.
    Suppressed,
}

impl CapabilityTier {
    /// Classify `channel` against the host's current permission state.
    ///
    /// Rich wins over plain; a channel that permits neither is suppressed.
    /// Idempotent as long as the channel's permissions don't change, which
    /// is why dispatchers cache the first answer.
    pub fn resolve(probe: &dyn CapabilityProbe, channel: ChannelId) -> Self {
        let tier = if probe.can_send_rich(channel) {
            Self::Rich
        } else if probe.can_send_plain(channel) {
            Self::PlainText
        } else {
            Self::Suppressed
        };
        trace!(%channel, ?tier, "resolved capability tier");
        tier
    }
}
