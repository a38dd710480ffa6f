//! Trailing-edge debouncer
//!
//! Collapses a burst of [`Debouncer::trigger`] calls into a single
//! invocation of the action, fired `delay` after the last call with that
//! call's arguments. The debouncer owns its pending timer: triggering again
//! replaces it, [`Debouncer::cancel`] discards it, and dropping the debouncer
//! cancels it so nothing fires after teardown.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Errors raised when constructing a debouncer
#[derive(Debug, Error)]
pub enum DebounceError {
    /// No tokio runtime is available to drive the timer
    #[error("Debouncer requires a running tokio runtime")]
    NoRuntime,
}

type Action<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Delays an action until calls stop arriving for `delay`
pub struct Debouncer<T> {
    delay: Duration,
    action: Action<T>,
    runtime: Handle,
    pending: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer bound to the current tokio runtime
    ///
    /// # Errors
    ///
    /// Returns `DebounceError::NoRuntime` when called outside a runtime context.
    pub fn new<F>(delay: Duration, action: F) -> Result<Self, DebounceError>
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| DebounceError::NoRuntime)?;
        Ok(Self::with_handle(runtime, delay, action))
    }

    /// Create a debouncer that schedules its timer on the given runtime
    #[must_use]
    pub fn with_handle<F>(runtime: Handle, delay: Duration, action: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            delay,
            action: Arc::new(action),
            runtime,
            pending: None,
        }
    }

    /// Schedule the action with `args`, replacing any pending invocation
    ///
    /// A zero delay runs the action right away.
    pub fn trigger(&mut self, args: T) {
        self.cancel();

        if self.delay.is_zero() {
            (self.action)(args);
            return;
        }

        let action = Arc::clone(&self.action);
        let delay = self.delay;
        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            action(args);
        }));
    }

    /// Drop the pending invocation, if any
    ///
    /// Returns `true` if an invocation was still waiting on its timer.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }

    /// Whether an invocation is scheduled but has not fired yet
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> std::fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::time::sleep;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(String) + Send + Sync + 'static) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        (calls, move |value: String| sink.lock().unwrap().push(value))
    }

    #[test]
    fn test_new_outside_runtime_fails() {
        let result = Debouncer::new(Duration::from_millis(10), |_: ()| {});
        assert!(matches!(result, Err(DebounceError::NoRuntime)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_last_call() {
        let (calls, action) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(250), action).unwrap();

        for value in ["a", "ap", "app", "appl"] {
            debouncer.trigger(value.to_string());
            sleep(Duration::from_millis(100)).await;
        }
        assert!(calls.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        sleep(Duration::from_millis(200)).await;
        assert_eq!(*calls.lock().unwrap(), vec!["appl".to_string()]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_fire_separately() {
        let (calls, action) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(50), action).unwrap();

        debouncer.trigger("first".to_string());
        sleep(Duration::from_millis(60)).await;
        debouncer.trigger("second".to_string());
        sleep(Duration::from_millis(60)).await;

        assert_eq!(
            *calls.lock().unwrap(),
            vec!["first".to_string(), "second".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_call() {
        let (calls, action) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(50), action).unwrap();

        debouncer.trigger("never".to_string());
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        sleep(Duration::from_millis(100)).await;
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_call() {
        let (calls, action) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(50), action).unwrap();

        debouncer.trigger("torn down".to_string());
        drop(debouncer);

        sleep(Duration::from_millis(100)).await;
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_fires_immediately() {
        let (calls, action) = recorder();
        let mut debouncer = Debouncer::new(Duration::ZERO, action).unwrap();

        debouncer.trigger("now".to_string());
        assert_eq!(*calls.lock().unwrap(), vec!["now".to_string()]);
        assert!(!debouncer.is_pending());
    }
}
