use std::{future::Future, time::Duration};

use tokio::task::JoinHandle;

/// Where and when submission tasks run.
///
/// The default facility is the ambient tokio runtime, shared by every
/// dispatcher in the process. [`Scheduler::on_runtime`] targets a
/// caller-owned runtime instead; that runtime's startup and shutdown stay
/// the caller's responsibility, this type never closes anything.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    runtime: Option<tokio::runtime::Handle>,
}

impl Scheduler {
    /// The process-wide shared facility (the ambient tokio runtime).
    pub fn shared() -> Self {
        Self { runtime: None }
    }

    /// Schedule onto a caller-supplied runtime.
    pub fn on_runtime(handle: tokio::runtime::Handle) -> Self {
        Self {
            runtime: Some(handle),
        }
    }

    /// Run `work` as soon as the executor picks it up.
    pub fn run_now<F>(&self, work: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.run_after(Duration::ZERO, work)
    }

    /// Run `work` after `delay`.
    ///
    /// A zero delay skips the timer entirely and behaves exactly like
    /// [`Scheduler::run_now`].
    pub fn run_after<F>(&self, delay: Duration, work: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let fut = async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            work.await
        };
        match &self.runtime {
            Some(handle) => handle.spawn(fut),
            None => tokio::spawn(fut),
        }
    }
}
