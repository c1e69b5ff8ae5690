//! Debounced invocation of a search callback.
//!
//! Each [`Debouncer::call`] supersedes the previous pending one; the callback
//! runs only once input has been quiet for the whole window, with the last
//! input received.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

/// Default quiescence window for search input.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Delays a callback until input stops arriving for `window`.
///
/// Must be used from within a Tokio runtime.
pub struct Debouncer<T> {
    window: Duration,
    callback: Callback<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer that runs `callback` after `window` of quiet.
    pub fn new<F>(window: Duration, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            window,
            callback: Arc::new(callback),
            pending: Mutex::new(None),
        }
    }

    /// The quiescence window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Schedule `input`, cancelling any pending invocation.
    pub fn call(&self, input: T) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = pending.take() {
            handle.abort();
            trace!("Superseded pending debounced call");
        }

        let callback = Arc::clone(&self.callback);
        let window = self.window;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            callback(input);
        }));
    }

    /// Drop the pending invocation, if any.
    pub fn cancel(&self) {
        if let Some(handle) = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }

    /// Whether an invocation is scheduled and has not run yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(String) + Send + Sync + 'static) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        (calls, move |input| sink.lock().unwrap().push(input))
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_fires_once_with_last_input() {
        let (calls, callback) = recorder();
        let debouncer = Debouncer::new(DEFAULT_DEBOUNCE, callback);

        debouncer.call("r".to_string());
        sleep(Duration::from_millis(100)).await;
        debouncer.call("re".to_string());
        sleep(Duration::from_millis(100)).await;
        debouncer.call("red".to_string());

        sleep(Duration::from_millis(299)).await;
        assert!(calls.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(*calls.lock().unwrap(), ["red"]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_quiet_gaps_fire_each_time() {
        let (calls, callback) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(50), callback);

        debouncer.call("a".to_string());
        sleep(Duration::from_millis(60)).await;
        debouncer.call("b".to_string());
        sleep(Duration::from_millis(60)).await;

        assert_eq!(*calls.lock().unwrap(), ["a", "b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending() {
        let (calls, callback) = recorder();
        let debouncer = Debouncer::new(DEFAULT_DEBOUNCE, callback);

        debouncer.call("hat".to_string());
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        sleep(Duration::from_millis(400)).await;
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending() {
        let (calls, callback) = recorder();
        {
            let debouncer = Debouncer::new(DEFAULT_DEBOUNCE, callback);
            debouncer.call("shoe".to_string());
        }
        sleep(Duration::from_millis(400)).await;
        assert!(calls.lock().unwrap().is_empty());
    }
}
