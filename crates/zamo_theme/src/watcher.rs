//! System color scheme watcher
//!
//! Polls the OS on an interval and pushes changes into a
//! [`SystemAppearance`] feed. Hosts with a native appearance callback
//! should call [`SystemAppearance::set`] from it instead.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::appearance::{detect_system_color_scheme, SystemAppearance};
use crate::scheme::ColorScheme;

/// Configuration for the system scheme watcher
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WatcherConfig {
    /// How often to poll for system scheme changes
    pub poll_interval: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
        }
    }
}

/// Background task feeding OS scheme changes into a [`SystemAppearance`].
///
/// Stops when dropped.
#[derive(Debug)]
pub struct SystemSchemeWatcher {
    task: JoinHandle<()>,
}

impl SystemSchemeWatcher {
    /// Start polling with the OS detector. Must be called inside a Tokio
    /// runtime.
    pub fn start(feed: SystemAppearance, config: WatcherConfig) -> Self {
        Self::start_with(feed, config, detect_system_color_scheme)
    }

    /// Start polling with a custom detector.
    pub fn start_with<F>(feed: SystemAppearance, config: WatcherConfig, detect: F) -> Self
    where
        F: Fn() -> ColorScheme + Send + 'static,
    {
        let period = config.poll_interval.max(Duration::from_millis(10));
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            debug!("SystemSchemeWatcher: polling every {:?}", period);
            loop {
                ticker.tick().await;
                feed.set(detect());
            }
        });
        Self { task }
    }

    /// Stop polling.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for SystemSchemeWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn polls_into_feed_until_dropped() {
        let dark = Arc::new(AtomicBool::new(false));
        let feed = SystemAppearance::new(ColorScheme::Light);
        let detector = Arc::clone(&dark);
        let watcher = SystemSchemeWatcher::start_with(
            feed.clone(),
            WatcherConfig {
                poll_interval: Duration::from_millis(100),
            },
            move || {
                if detector.load(Ordering::SeqCst) {
                    ColorScheme::Dark
                } else {
                    ColorScheme::Light
                }
            },
        );

        dark.store(true, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(feed.current(), ColorScheme::Dark);

        watcher.stop();
        dark.store(false, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(feed.current(), ColorScheme::Dark);
    }
}
