use std::sync::Arc;

use {
    herald_common::ChannelId,
    herald_config::{ChannelsConfig, DeliveryPolicy},
    tracing::trace,
};

use crate::plugin::CapabilityProbe;

/// Applies configured per-channel delivery policy on top of a host probe.
///
/// Policy narrows, never widens: a muted channel reports no capabilities
/// regardless of what the host allows, and `plain` hides rich support while
/// leaving plain-text support to the host's answer.
pub struct GatedProbe {
    inner: Arc<dyn CapabilityProbe>,
    channels: ChannelsConfig,
}

impl GatedProbe {
    pub fn new(inner: Arc<dyn CapabilityProbe>, channels: ChannelsConfig) -> Self {
        Self { inner, channels }
    }
}

impl CapabilityProbe for GatedProbe {
    fn can_send_rich(&self, channel: ChannelId) -> bool {
        match self.channels.policy_for(channel) {
            DeliveryPolicy::Full => self.inner.can_send_rich(channel),
            DeliveryPolicy::Plain | DeliveryPolicy::Mute => {
                trace!(%channel, "rich delivery gated by policy");
                false
            },
        }
    }

    fn can_send_plain(&self, channel: ChannelId) -> bool {
        match self.channels.policy_for(channel) {
            DeliveryPolicy::Full | DeliveryPolicy::Plain => self.inner.can_send_plain(channel),
            DeliveryPolicy::Mute => {
                trace!(%channel, "all delivery gated by policy");
                false
            },
        }
    }
}
