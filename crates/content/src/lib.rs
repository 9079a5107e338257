//! Message content: the rich payload model, the producer contract, and the
//! placeholder composer.
//!
//! Anything that wants to be delivered implements [`ContentProducer`]; the
//! in-tree [`MessageComposer`] covers the common case of a toned, templated
//! message body.

pub mod composer;
pub mod producer;
pub mod rich;
pub mod tone;

pub use {
    composer::MessageComposer,
    producer::ContentProducer,
    rich::{ContentField, RichContent},
    tone::MessageTone,
};
