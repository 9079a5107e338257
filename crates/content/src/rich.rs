use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

/// Platform-neutral rich message payload.
///
/// Rich-capable channels render all of it; how a given platform maps
/// colors, fields, or footers onto its own formatting is the transport's
/// concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RichContent {
    pub title: Option<String>,
    pub description: String,
    /// 24-bit RGB accent color.
    pub color: Option<u32>,
    pub fields: Vec<ContentField>,
    pub footer: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// One name/value block inside rich content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

impl RichContent {
    /// Content carrying just a description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }
}
