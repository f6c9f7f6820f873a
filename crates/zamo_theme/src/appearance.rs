//! Host appearance feed
//!
//! The host (OS shell, embedding app, or a test) owns a [`SystemAppearance`]
//! and pushes scheme changes into it. Theme state subscribes to the feed
//! instead of polling.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::scheme::ColorScheme;

/// Shared, observable host color scheme. Cloning shares the feed.
#[derive(Clone, Debug)]
pub struct SystemAppearance {
    tx: Arc<watch::Sender<ColorScheme>>,
}

impl SystemAppearance {
    pub fn new(initial: ColorScheme) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Seed the feed from the OS.
    pub fn detect() -> Self {
        Self::new(detect_system_color_scheme())
    }

    /// Report the host scheme. Subscribers are only woken on a real change.
    pub fn set(&self, scheme: ColorScheme) {
        self.tx.send_if_modified(|current| {
            if *current == scheme {
                return false;
            }
            debug!("SystemAppearance: {} -> {}", current, scheme);
            *current = scheme;
            true
        });
    }

    pub fn current(&self) -> ColorScheme {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ColorScheme> {
        self.tx.subscribe()
    }
}

impl Default for SystemAppearance {
    fn default() -> Self {
        Self::new(ColorScheme::Light)
    }
}

/// Ask the OS for its current scheme. Anything it cannot answer is light.
pub fn detect_system_color_scheme() -> ColorScheme {
    match dark_light::detect() {
        Ok(dark_light::Mode::Dark) => ColorScheme::Dark,
        Ok(_) => ColorScheme::Light,
        Err(e) => {
            debug!("system color scheme unavailable, assuming light: {}", e);
            ColorScheme::Light
        }
    }
}
