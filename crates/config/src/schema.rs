//! Config schema types (logging, per-channel delivery policy).

use std::collections::HashMap;

use {
    herald_common::ChannelId,
    serde::{Deserialize, Serialize},
};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeraldConfig {
    pub logging: LoggingConfig,
    pub channels: ChannelsConfig,
}

/// Log output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
        }
    }
}

/// Per-channel delivery configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelsConfig {
    /// Channel-specific overrides keyed by channel id.
    pub overrides: HashMap<String, ChannelOverride>,
}

/// Overrides for a single channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelOverride {
    pub policy: DeliveryPolicy,
}

/// What a channel is allowed to receive, applied before asking the host
/// what it can technically do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryPolicy {
    /// No restriction; host capabilities decide.
    #[default]
    Full,
    /// Only plain text may go out; formatting is stripped.
    Plain,
    /// Nothing goes out at all.
    Mute,
}

impl ChannelsConfig {
    /// Configured policy for `channel`. Channels without an override are
    /// unrestricted.
    pub fn policy_for(&self, channel: ChannelId) -> DeliveryPolicy {
        self.overrides
            .get(&channel.to_string())
            .map(|o| o.policy)
            .unwrap_or_default()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_defaults_to_full() {
        let channels = ChannelsConfig::default();
        assert_eq!(channels.policy_for(ChannelId(9)), DeliveryPolicy::Full);
    }

    #[test]
    fn override_parses_from_toml() {
        let cfg: HeraldConfig = toml::from_str(
            r#"
            [channels.overrides.42]
            policy = "mute"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.channels.policy_for(ChannelId(42)), DeliveryPolicy::Mute);
        assert_eq!(cfg.channels.policy_for(ChannelId(43)), DeliveryPolicy::Full);
    }
}
