//! Deferred one-shot tasks.
//!
//! UI side effects that happen "a few seconds later" (the checkout auto-clear,
//! the wishlist "added" badge) run as spawned tokio tasks. Dropping a
//! [`ScheduledTask`] detaches it: the task still fires. Only an explicit
//! [`cancel`](ScheduledTask::cancel) stops it.

use std::time::Duration;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

/// A task could not be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// Called outside a tokio runtime.
    #[error("no tokio runtime is running")]
    NoRuntime,
}

/// Handle of the runtime the caller is running on.
///
/// Callers that mutate state before scheduling grab this first, so a missing
/// runtime is reported before anything changes.
///
/// # Errors
///
/// Returns `SchedulerError::NoRuntime` outside a tokio runtime.
pub fn current_runtime() -> Result<Handle, SchedulerError> {
    Handle::try_current().map_err(|_| SchedulerError::NoRuntime)
}

/// Handle to a task that runs once after a fixed delay.
#[derive(Debug)]
pub struct ScheduledTask {
    name: &'static str,
    delay: Duration,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Run `action` once after `delay` on the current runtime.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::NoRuntime` outside a tokio runtime.
    pub fn spawn<F>(name: &'static str, delay: Duration, action: F) -> Result<Self, SchedulerError>
    where
        F: FnOnce() + Send + 'static,
    {
        let runtime = current_runtime()?;
        Ok(Self::spawn_on(&runtime, name, delay, action))
    }

    /// Run `action` once after `delay` on `runtime`.
    #[instrument(skip(runtime, action))]
    pub fn spawn_on<F>(runtime: &Handle, name: &'static str, delay: Duration, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            debug!(task = name, "Scheduled task firing");
            action();
        });
        Self {
            name,
            delay,
            handle,
        }
    }

    /// Task name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Delay the task was scheduled with.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether the task has fired or been cancelled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the task if it has not fired yet.
    ///
    /// Has no effect on a task that already ran.
    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            debug!(task = self.name, "Cancelling scheduled task");
        }
        self.handle.abort();
    }

    /// Wait for the task to finish.
    ///
    /// Returns `true` if the action ran, `false` if the task was cancelled.
    pub async fn join(self) -> bool {
        self.handle.await.is_ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        let task = ScheduledTask::spawn("test", Duration::from_secs(3), move || {
            flag.store(true, Ordering::SeqCst);
        })
        .unwrap();

        tokio::time::sleep(Duration::from_millis(2_999)).await;
        assert!(!fired.load(Ordering::SeqCst));

        assert!(task.join().await);
        assert!(fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_does_not_cancel() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        drop(ScheduledTask::spawn("detached", Duration::from_secs(1), move || {
            flag.store(true, Ordering::SeqCst);
        })
        .unwrap());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_action() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        let task = ScheduledTask::spawn("cancelled", Duration::from_secs(1), move || {
            flag.store(true, Ordering::SeqCst);
        })
        .unwrap();

        task.cancel();
        assert!(!task.join().await);
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[test]
    fn test_spawn_outside_runtime_is_an_error() {
        let fired = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&fired);
        let result = ScheduledTask::spawn("orphan", Duration::ZERO, move || {
            flag.store(true, Ordering::SeqCst);
        });

        assert_eq!(result.unwrap_err(), SchedulerError::NoRuntime);
        assert!(!fired.load(Ordering::SeqCst));
    }
}
