//! Channel capability and outbound seams.
//!
//! The host platform implements CapabilityProbe (what a destination channel
//! currently permits) and ChannelOutbound (the actual transport call).
//! Gating layers configured per-channel policy on top of the probe.

pub mod gating;
pub mod plugin;

pub use {
    gating::GatedProbe,
    plugin::{CapabilityProbe, ChannelOutbound},
};
