//! Trailing-edge debouncer.
//!
//! Values pushed in quick succession coalesce: only the latest one reaches
//! the sink, once the input has been quiet for the configured period. After
//! `shutdown()` (or drop) no sink call starts, and any pending value is
//! discarded.
//!
//! `shutdown()` waits for a sink call that is already running, so a write it
//! started has landed before the caller goes on. Drop aborts it instead; a
//! sink that already handed its request to a database may still commit.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct Debouncer<T> {
    tx: Option<mpsc::UnboundedSender<T>>,
    enabled: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawns the debounce task on the current tokio runtime.
    pub fn spawn<F, Fut>(quiet: Duration, sink: F) -> Self
    where
        F: Fn(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();
        let enabled = Arc::new(AtomicBool::new(true));
        let task_enabled = Arc::clone(&enabled);

        let task = tokio::spawn(async move {
            let mut pending: Option<T> = None;
            loop {
                match pending.take() {
                    None => match rx.recv().await {
                        Some(value) => pending = Some(value),
                        None => break,
                    },
                    Some(value) => {
                        tokio::select! {
                            next = rx.recv() => match next {
                                // A newer value restarts the quiet period.
                                Some(newer) => pending = Some(newer),
                                None => break,
                            },
                            _ = tokio::time::sleep(quiet) => {
                                if !task_enabled.load(Ordering::SeqCst) {
                                    break;
                                }
                                sink(value).await;
                            }
                        }
                    }
                }
            }
        });

        Debouncer {
            tx: Some(tx),
            enabled,
            task: Some(task),
        }
    }

    /// Queues `value`, replacing any pending one. Returns `false` once disabled.
    pub fn push(&self, value: T) -> bool {
        if !self.is_enabled() {
            return false;
        }
        self.tx.as_ref().is_some_and(|tx| tx.send(value).is_ok())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Stops the debouncer. A pending value is dropped without reaching the
    /// sink; a sink call already in progress runs to completion first.
    pub async fn shutdown(mut self) {
        self.enabled.store(false, Ordering::SeqCst);
        // Closing the channel ends the task at its next receive.
        self.tx.take();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.enabled.store(false, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
