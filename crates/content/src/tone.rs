use serde::{Deserialize, Serialize};

/// Visual register of an outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageTone {
    Success,
    Warning,
    Error,
    Info,
}

impl MessageTone {
    /// Accent color conventionally attached to this tone.
    pub fn color(self) -> u32 {
        match self {
            Self::Success => 0x43B581,
            Self::Warning => 0xFAA61A,
            Self::Error => 0xEF5350,
            Self::Info => 0x3A71C1,
        }
    }
}
