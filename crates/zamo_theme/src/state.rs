//! Theme state manager

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex, PoisonError, Weak};

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};
use zamo_prefs::{keys, Background, Pending, SharedStore};

use crate::appearance::SystemAppearance;
use crate::palette::{palette_for, tokens_for, Palette};
use crate::scheme::{resolve_scheme, ColorScheme, ThemeMode};
use crate::tokens::{Color, ColorToken};

/// What theme consumers currently see.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeSnapshot {
    pub mode: ThemeMode,
    /// Last scheme reported by the host
    pub system: ColorScheme,
    /// `mode` resolved against `system`
    pub resolved: ColorScheme,
    /// Whether the persisted mode has been resolved yet.
    pub loaded: bool,
}

struct Shared {
    store: SharedStore,

    /// Bumped by every explicit `set_theme_mode`.
    generation: AtomicU64,
    write_lock: Mutex<()>,

    published: watch::Sender<ThemeSnapshot>,
    background: Background,
    /// Subscription to the host appearance feed, if attached.
    appearance_task: StdMutex<Option<JoinHandle<()>>>,
}

/// Owns the theme mode, its persistence, and the resolved palette.
///
/// Cloning is cheap; every clone drives the same state.
#[derive(Clone)]
pub struct ThemeState {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState")
            .field("snapshot", &self.snapshot())
            .finish_non_exhaustive()
    }
}

impl ThemeState {
    /// Build the manager in `System` mode with the host currently at
    /// `system`.
    pub fn new(store: SharedStore, system: ColorScheme) -> Self {
        let (published, _) = watch::channel(ThemeSnapshot {
            mode: ThemeMode::System,
            system,
            resolved: system,
            loaded: false,
        });

        Self {
            shared: Arc::new(Shared {
                store,
                generation: AtomicU64::new(0),
                write_lock: Mutex::new(()),
                published,
                background: Background::new(),
                appearance_task: StdMutex::new(None),
            }),
        }
    }

    /// Build the manager seeded from `appearance` and follow it.
    pub fn with_appearance(store: SharedStore, appearance: &SystemAppearance) -> Self {
        let state = Self::new(store, appearance.current());
        state.attach(appearance);
        state
    }

    /// Load the persisted mode in the background.
    ///
    /// A valid stored mode is adopted. A missing or unrecognized one leaves
    /// the mode at `System`; nothing is written back.
    pub fn initialize(&self) -> Pending {
        let shared = Arc::clone(&self.shared);
        self.shared.background.spawn(async move {
            shared.load(0).await;
        })
    }

    /// Follow host appearance changes. Replaces any previous feed.
    ///
    /// Without a runtime only the feed's current value is taken.
    pub fn attach(&self, appearance: &SystemAppearance) {
        let mut rx = appearance.subscribe();
        self.shared.set_system(*rx.borrow_and_update());

        let Some(runtime) = self.shared.background.runtime() else {
            return;
        };

        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        let task = runtime.spawn(async move {
            while rx.changed().await.is_ok() {
                let scheme = *rx.borrow_and_update();
                match weak.upgrade() {
                    Some(shared) => shared.set_system(scheme),
                    None => break,
                }
            }
            debug!("ThemeState: appearance feed closed");
        });

        let previous = self
            .shared
            .appearance_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Stop following the host appearance.
    pub fn detach(&self) {
        let task = self
            .shared
            .appearance_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            task.abort();
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.snapshot().mode
    }

    /// Resolved scheme.
    pub fn scheme(&self) -> ColorScheme {
        self.snapshot().resolved
    }

    pub fn system_scheme(&self) -> ColorScheme {
        self.snapshot().system
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        *self.shared.published.borrow()
    }

    /// Change notifications for mode and host scheme changes.
    pub fn subscribe(&self) -> watch::Receiver<ThemeSnapshot> {
        self.shared.published.subscribe()
    }

    /// Wait for every outstanding load and write of this manager.
    pub async fn settle(&self) {
        self.shared.background.idle().await;
    }

    /// Change the theme mode. Reads right after this call already see it;
    /// the store write happens in the returned task.
    pub fn set_theme_mode(&self, mode: ThemeMode) -> Pending {
        let mut generation = 0;
        self.shared.published.send_if_modified(|s| {
            generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
            debug!("ThemeState::set_theme_mode: {} -> {}", s.mode, mode);
            let before = *s;
            s.mode = mode;
            s.resolved = resolve_scheme(mode, s.system);
            *s != before
        });

        let shared = Arc::clone(&self.shared);
        self.shared.background.spawn(async move {
            shared.persist(generation, mode).await;
        })
    }

    /// [`ThemeState::set_theme_mode`] for an untyped value. Unknown values
    /// are logged and ignored.
    pub fn set_theme_mode_str(&self, mode: &str) -> Pending {
        match mode.parse::<ThemeMode>() {
            Ok(mode) => self.set_theme_mode(mode),
            Err(e) => {
                error!("ThemeState::set_theme_mode_str: {}", e);
                Pending::ready()
            }
        }
    }

    /// Switch to the explicit opposite of what is shown now.
    pub fn toggle(&self) -> Pending {
        self.set_theme_mode(self.scheme().toggle().into())
    }

    /// Flat role → CSS color map for the resolved scheme.
    pub fn palette(&self) -> Palette {
        palette_for(self.scheme())
    }

    pub fn color(&self, token: ColorToken) -> Color {
        tokens_for(self.scheme()).get(token)
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        let task = self
            .appearance_task
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            task.abort();
        }
    }
}

impl Shared {
    fn set_system(&self, system: ColorScheme) {
        self.published.send_if_modified(|s| {
            if s.system == system {
                return false;
            }
            s.system = system;
            s.resolved = resolve_scheme(s.mode, system);
            debug!("ThemeState: host scheme {} (showing {})", system, s.resolved);
            true
        });
    }

    fn mark_loaded(&self) {
        self.published
            .send_if_modified(|s| !std::mem::replace(&mut s.loaded, true));
    }

    fn adopt(&self, started_at: u64, mode: ThemeMode) {
        self.published.send_if_modified(|s| {
            if self.generation.load(Ordering::SeqCst) != started_at {
                debug!("discarding stale persisted theme mode {}", mode);
                return false;
            }
            if s.mode == mode {
                return false;
            }
            debug!("ThemeState: adopting persisted mode {} (was {})", mode, s.mode);
            s.mode = mode;
            s.resolved = resolve_scheme(mode, s.system);
            true
        });
    }

    async fn persist(&self, generation: u64, mode: ThemeMode) {
        let _guard = self.write_lock.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("skipping superseded theme mode write ({})", mode);
            return;
        }
        if let Err(e) = self.store.set(keys::THEME_MODE, mode.as_str()).await {
            warn!("failed to persist theme mode {}: {}", mode, e);
        }
    }

    async fn load(&self, started_at: u64) {
        let stored = {
            let _guard = self.write_lock.lock().await;
            self.store.get(keys::THEME_MODE).await
        };

        match stored {
            Ok(Some(raw)) => match raw.parse::<ThemeMode>() {
                Ok(mode) => self.adopt(started_at, mode),
                Err(e) => warn!("{} in preferences, keeping system", e),
            },
            Ok(None) => debug!("no persisted theme mode"),
            Err(e) => warn!("failed to read persisted theme mode: {}", e),
        }

        self.mark_loaded();
    }
}
