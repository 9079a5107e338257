use chrono::{DateTime, Utc};

use crate::{
    producer::ContentProducer,
    rich::{ContentField, RichContent},
    tone::MessageTone,
};

/// Fluent builder for placeholder-based messages.
///
/// The body may contain `:key` placeholders bound via [`MessageComposer::set`].
/// Bindings apply in insertion order at render time, so when one key is a
/// prefix of another (`:total` / `:totals`), bind the longer one first.
#[derive(Debug, Clone, Default)]
pub struct MessageComposer {
    body: String,
    tone: Option<MessageTone>,
    title: Option<String>,
    footer: Option<String>,
    timestamp: Option<DateTime<Utc>>,
    fields: Vec<ContentField>,
    placeholders: Vec<(String, String)>,
}

impl MessageComposer {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    /// Visual register; becomes the rich accent color.
    pub fn tone(mut self, tone: MessageTone) -> Self {
        self.tone = Some(tone);
        self
    }

    /// Bind the `:key` placeholder to `value`.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.placeholders.push((key.into(), value.into()));
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub fn timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = Some(at);
        self
    }

    /// Stamp with the current time.
    pub fn timestamp_now(self) -> Self {
        self.timestamp(Utc::now())
    }

    /// Append a name/value block to the rich rendering.
    pub fn field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(ContentField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Body with all placeholder bindings applied, in insertion order.
    fn substituted_body(&self) -> String {
        let mut text = self.body.clone();
        for (key, value) in &self.placeholders {
            text = text.replace(&format!(":{key}"), value);
        }
        text
    }
}

impl ContentProducer for MessageComposer {
    fn build_rich(&self) -> RichContent {
        RichContent {
            title: self.title.clone(),
            description: self.substituted_body(),
            color: self.tone.map(MessageTone::color),
            fields: self.fields.clone(),
            footer: self.footer.clone(),
            timestamp: self.timestamp,
        }
    }

    fn render_plain(&self) -> String {
        self.substituted_body()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_placeholders_by_key() {
        let composer = MessageComposer::new("hello :user, you have :count new messages")
            .set("user", "amy")
            .set("count", "3");

        assert_eq!(
            composer.render_plain(),
            "hello amy, you have 3 new messages"
        );
    }

    #[test]
    fn bindings_apply_in_insertion_order() {
        // ":totals" contains ":total", so binding the longer key first is
        // what keeps both substitutions intact.
        let composer = MessageComposer::new(":total/:totals")
            .set("totals", "10")
            .set("total", "3");

        assert_eq!(composer.render_plain(), "3/10");
    }

    #[test]
    fn tone_sets_rich_accent_color() {
        let rich = MessageComposer::new("careful")
            .tone(MessageTone::Warning)
            .build_rich();

        assert_eq!(rich.color, Some(0xFAA61A));
        assert_eq!(rich.description, "careful");
    }

    #[test]
    fn rich_carries_title_fields_and_footer() {
        let rich = MessageComposer::new("body")
            .title("Heads up")
            .field("Region", "eu-west", true)
            .footer("sent by herald")
            .build_rich();

        assert_eq!(rich.title.as_deref(), Some("Heads up"));
        assert_eq!(rich.fields.len(), 1);
        assert_eq!(rich.fields[0].name, "Region");
        assert!(rich.fields[0].inline);
        assert_eq!(rich.footer.as_deref(), Some("sent by herald"));
    }

    #[test]
    fn empty_body_renders_empty_plain() {
        assert_eq!(MessageComposer::new("").render_plain(), "");
    }

    #[test]
    fn placeholders_apply_to_both_renderings() {
        let composer = MessageComposer::new("role :role created").set("role", "admin");

        assert_eq!(composer.render_plain(), "role admin created");
        assert_eq!(composer.build_rich().description, "role admin created");
    }
}
