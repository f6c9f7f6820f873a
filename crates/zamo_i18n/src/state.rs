use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, error, warn};
use zamo_prefs::{keys, Background, Pending, SharedStore};

use crate::bundle::CatalogSet;
use crate::label::{Args, Label};
use crate::locale::Locale;

/// What language consumers currently see.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LanguageSnapshot {
    pub locale: Locale,
    /// Bumped by every forced refresh; consumers that memoize translated
    /// strings re-read them when it changes.
    pub revision: u64,
    /// Whether the persisted preference has been resolved yet.
    pub loaded: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoadMode {
    /// First load at startup: bad or missing values are replaced by the default.
    Startup,
    /// Foreground re-check: only a valid, different value is adopted.
    Reconcile,
}

struct Shared {
    store: SharedStore,
    catalogs: Arc<CatalogSet>,
    default_locale: Locale,

    /// Incremented by every explicit `set_locale`, inside the publish
    /// closure so the check-and-set in `adopt` is atomic with it.
    generation: AtomicU64,
    /// Serializes store writes (and reconcile reads) for this key.
    write_lock: Mutex<()>,

    /// Single source of truth for the active lookup locale.
    published: watch::Sender<LanguageSnapshot>,
    background: Background,
}

/// Owns the active locale, its persistence, and translation lookup.
///
/// Cloning is cheap; every clone drives the same state.
#[derive(Clone)]
pub struct LanguageState {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for LanguageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageState")
            .field("snapshot", &self.snapshot())
            .field("default_locale", &self.shared.default_locale)
            .finish_non_exhaustive()
    }
}

impl LanguageState {
    /// Build the manager. Consumers see `default_locale` until
    /// [`LanguageState::initialize`] has loaded the stored preference.
    pub fn new(store: SharedStore, catalogs: Arc<CatalogSet>, default_locale: Locale) -> Self {
        let (published, _) = watch::channel(LanguageSnapshot {
            locale: default_locale,
            revision: 0,
            loaded: false,
        });

        Self {
            shared: Arc::new(Shared {
                store,
                catalogs,
                default_locale,
                generation: AtomicU64::new(0),
                write_lock: Mutex::new(()),
                published,
                background: Background::new(),
            }),
        }
    }

    /// Load the persisted locale in the background.
    ///
    /// A valid stored code is adopted. A missing or unsupported one is
    /// replaced by the default, which is then written back. If the user
    /// picks a locale before the load lands, the loaded value is discarded.
    pub fn initialize(&self) -> Pending {
        let shared = Arc::clone(&self.shared);
        self.shared.background.spawn(async move {
            shared.load(0, LoadMode::Startup).await;
        })
    }

    /// Re-read the stored locale, e.g. when the app returns to the
    /// foreground after another surface may have changed it.
    ///
    /// Skipped while a load or write of this manager is still running. A
    /// write that already failed does not block it.
    pub fn reconcile(&self) -> Pending {
        let in_flight = self.shared.background.in_flight();
        if in_flight > 0 {
            debug!(
                "LanguageState::reconcile: {} task(s) still running, skipping",
                in_flight
            );
            return Pending::ready();
        }
        let started_at = self.shared.generation.load(Ordering::SeqCst);

        let shared = Arc::clone(&self.shared);
        self.shared.background.spawn(async move {
            shared.load(started_at, LoadMode::Reconcile).await;
        })
    }

    pub fn locale(&self) -> Locale {
        self.shared.current()
    }

    pub fn default_locale(&self) -> Locale {
        self.shared.default_locale
    }

    pub fn supported_locales(&self) -> &'static [Locale] {
        &Locale::ALL
    }

    pub fn catalogs(&self) -> &CatalogSet {
        &self.shared.catalogs
    }

    pub fn snapshot(&self) -> LanguageSnapshot {
        *self.shared.published.borrow()
    }

    /// Change notifications for locale switches and forced refreshes.
    pub fn subscribe(&self) -> watch::Receiver<LanguageSnapshot> {
        self.shared.published.subscribe()
    }

    /// Wait for every outstanding load and write of this manager.
    pub async fn settle(&self) {
        self.shared.background.idle().await;
    }

    /// Switch language.
    ///
    /// Lookups made right after this call already use `locale`. The store
    /// write and the follow-up refresh happen in the returned task. Setting
    /// the active locale again still rewrites it.
    pub fn set_locale(&self, locale: Locale) -> Pending {
        let mut generation = 0;
        self.shared.published.send_if_modified(|s| {
            generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
            debug!("LanguageState::set_locale: {} -> {}", s.locale, locale);
            let changed = s.locale != locale;
            s.locale = locale;
            changed
        });

        let shared = Arc::clone(&self.shared);
        self.shared.background.spawn(async move {
            shared.persist(generation, locale).await;
            shared.force_refresh();
        })
    }

    /// [`LanguageState::set_locale`] for an untyped code. Unsupported codes
    /// are logged and ignored.
    pub fn set_locale_code(&self, code: &str) -> Pending {
        match code.parse::<Locale>() {
            Ok(locale) => self.set_locale(locale),
            Err(e) => {
                error!("LanguageState::set_locale_code: {}", e);
                Pending::ready()
            }
        }
    }

    /// Signal consumers to re-read their translated strings.
    pub fn force_refresh(&self) {
        self.shared.force_refresh();
    }

    /// Translate a dotted key (`auth.login`) in the active locale.
    ///
    /// Falls back to the default locale, then to the key itself.
    pub fn translate(&self, key: &str) -> String {
        self.translate_with(key, &Args::new())
    }

    /// Translate and fill `{{name}}` placeholders from `args`.
    pub fn translate_with(&self, key: &str, args: &Args) -> String {
        self.shared
            .catalogs
            .translate(self.locale(), self.shared.default_locale, key, args)
    }

    pub fn translate_label(&self, label: &Label) -> String {
        match label {
            Label::Raw(s) => s.clone(),
            Label::Msg(m) => self.translate_with(&m.key, &m.args),
        }
    }
}

impl Shared {
    fn current(&self) -> Locale {
        self.published.borrow().locale
    }

    fn mark_loaded(&self) {
        self.published.send_if_modified(|s| !std::mem::replace(&mut s.loaded, true));
    }

    fn force_refresh(&self) {
        self.published.send_modify(|s| s.revision = s.revision.wrapping_add(1));
    }

    /// Make `locale` active unless an explicit set happened after
    /// `started_at`. Returns whether it was adopted.
    fn adopt(&self, started_at: u64, locale: Locale) -> bool {
        let mut adopted = false;
        self.published.send_if_modified(|s| {
            if self.generation.load(Ordering::SeqCst) != started_at {
                debug!("discarding stale persisted locale {}", locale);
                return false;
            }
            adopted = true;
            if s.locale == locale {
                return false;
            }
            debug!("LanguageState: adopting persisted locale {} (was {})", locale, s.locale);
            s.locale = locale;
            true
        });
        adopted
    }

    async fn persist(&self, generation: u64, locale: Locale) {
        let _guard = self.write_lock.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("skipping superseded locale write ({})", locale);
            return;
        }
        if let Err(e) = self.store.set(keys::LANGUAGE, locale.code()).await {
            warn!("failed to persist locale {}: {}", locale, e);
        }
    }

    async fn load(&self, started_at: u64, mode: LoadMode) {
        let stored = {
            let _guard = self.write_lock.lock().await;
            self.store.get(keys::LANGUAGE).await
        };

        let stored = match stored {
            Ok(v) => v,
            Err(e) => {
                warn!(
                    "failed to read persisted locale, keeping {}: {}",
                    self.current(),
                    e
                );
                self.mark_loaded();
                return;
            }
        };

        match (stored.as_deref().map(str::parse::<Locale>), mode) {
            (Some(Ok(locale)), _) => {
                self.adopt(started_at, locale);
            }
            (Some(Err(e)), LoadMode::Startup) => {
                warn!("{} in preferences, resetting to {}", e, self.default_locale);
                self.reset_to_default(started_at).await;
            }
            (None, LoadMode::Startup) => {
                debug!("no persisted locale, storing {}", self.default_locale);
                self.reset_to_default(started_at).await;
            }
            (Some(Err(e)), LoadMode::Reconcile) => {
                warn!("{} in preferences, ignoring", e);
            }
            (None, LoadMode::Reconcile) => {}
        }

        self.mark_loaded();
    }

    async fn reset_to_default(&self, started_at: u64) {
        if self.adopt(started_at, self.default_locale) {
            self.persist(started_at, self.default_locale).await;
        }
    }
}
