use std::future::Future;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

/// Capture the ambient Tokio runtime, if any.
///
/// Managers built outside a runtime still work, but only in memory.
pub fn current_runtime() -> Option<Handle> {
    match Handle::try_current() {
        Ok(handle) => Some(handle),
        Err(_) => {
            warn!("no Tokio runtime available; preferences will not be persisted");
            None
        }
    }
}

/// Handle to a background preference task (load or write).
///
/// Dropping it detaches the task; awaiting [`Pending::settled`] waits for it.
/// The task itself never fails from the caller's point of view: store errors
/// are logged inside it.
#[derive(Debug, Default)]
pub struct Pending {
    handle: Option<JoinHandle<()>>,
}

impl Pending {
    /// A handle with nothing outstanding.
    pub fn ready() -> Self {
        Self { handle: None }
    }

    /// Spawn `task` on `runtime`. Without a runtime the task is dropped.
    pub fn spawn<F>(runtime: Option<&Handle>, task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match runtime {
            Some(rt) => Self {
                handle: Some(rt.spawn(task)),
            },
            None => Self::ready(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the task to finish.
    pub async fn settled(self) {
        if let Some(handle) = self.handle {
            if let Err(e) = handle.await {
                warn!("preference task did not complete: {}", e);
            }
        }
    }
}

/// Spawner for a manager's background tasks that counts what is still
/// running, so shutdown can wait for outstanding writes.
#[derive(Clone, Debug)]
pub struct Background {
    runtime: Option<Handle>,
    in_flight: Arc<watch::Sender<usize>>,
}

struct InFlight(Arc<watch::Sender<usize>>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.send_modify(|n| *n = n.saturating_sub(1));
    }
}

impl Background {
    /// Spawn onto the ambient runtime, if there is one.
    pub fn new() -> Self {
        Self::with_runtime(current_runtime())
    }

    pub fn with_runtime(runtime: Option<Handle>) -> Self {
        let (in_flight, _) = watch::channel(0);
        Self {
            runtime,
            in_flight: Arc::new(in_flight),
        }
    }

    pub fn runtime(&self) -> Option<&Handle> {
        self.runtime.as_ref()
    }

    pub fn spawn<F>(&self, task: F) -> Pending
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.in_flight.send_modify(|n| *n += 1);
        let guard = InFlight(Arc::clone(&self.in_flight));
        // Without a runtime the task is dropped here, and the guard with it.
        Pending::spawn(self.runtime.as_ref(), async move {
            let _guard = guard;
            task.await;
        })
    }

    pub fn in_flight(&self) -> usize {
        *self.in_flight.borrow()
    }

    /// Wait until every task spawned so far, and any spawned meanwhile, has
    /// finished.
    pub async fn idle(&self) {
        let mut rx = self.in_flight.subscribe();
        // The sender lives in `self`, so this cannot observe a closed channel.
        let _ = rx.wait_for(|n| *n == 0).await;
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn idle_waits_for_all_tasks() {
        let bg = Background::new();
        let done = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        for ms in [30u64, 10, 20] {
            let done = Arc::clone(&done);
            bg.spawn(async move {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                done.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            });
        }
        assert_eq!(bg.in_flight(), 3);

        bg.idle().await;

        assert_eq!(bg.in_flight(), 0);
        assert_eq!(done.load(std::sync::atomic::Ordering::SeqCst), 3);
    }

    #[test]
    fn without_runtime_nothing_stays_in_flight() {
        let bg = Background::with_runtime(None);
        let pending = bg.spawn(async {});
        assert!(pending.is_finished());
        assert_eq!(bg.in_flight(), 0);
    }
}
