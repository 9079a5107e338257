use crate::rich::RichContent;

/// Content contract implemented by anything that wants to be delivered.
///
/// Rich content must always be producible. The plain rendering is the
/// fallback for destinations that cannot take formatting; an empty or
/// all-whitespace rendering means the message has no plain form, and a
/// plain-only destination will deliver nothing at all.
pub trait ContentProducer: Send + Sync {
    /// Full-fidelity content for rich-capable destinations.
    fn build_rich(&self) -> RichContent;

    /// Unformatted fallback. May be empty.
    fn render_plain(&self) -> String;
}
