//! Permission-aware outbound message delivery.
//!
//! The dispatcher decides per destination channel which delivery mode is
//! possible (rich, plain text, or nothing), renders the matching content,
//! schedules the send now or after a delay, and routes every outcome to
//! exactly one success-or-failure callback. Transport errors never escape
//! into caller code; destinations that permit nothing become silent,
//! successful no-ops.

pub mod callbacks;
pub mod capability;
pub mod dispatcher;
pub mod factory;
pub mod handle;
pub mod scheduler;

mod task;

pub use {
    callbacks::{FailureHandler, LogFailureHandler, set_process_failure_handler},
    capability::CapabilityTier,
    dispatcher::{DispatchError, Dispatcher, SubmitOptions},
    factory::{Draft, MessageFactory},
    handle::{DeliveryHandle, DeliveryOutcome},
    scheduler::Scheduler,
};
