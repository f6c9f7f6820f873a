use std::sync::Arc;

use tracing::{debug, info, warn};
use zamo_i18n::{CatalogSet, LanguageState, Locale};
use zamo_prefs::{Pending, SharedStore};
use zamo_theme::{SystemAppearance, ThemeState};

use crate::error::Result;
use crate::lifecycle::LifecycleEvent;

/// Startup options for [`AppPreferences`]
#[derive(Clone, Debug)]
pub struct AppOptions {
    /// Locale shown before the stored one loads, and used for missing keys
    pub default_locale: Locale,
    /// Re-resolve `system` theme mode when the host appearance changes
    pub follow_system: bool,
    /// Catalogs to use instead of the bundled ones
    pub catalogs: Option<Arc<CatalogSet>>,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            default_locale: Locale::default(),
            follow_system: true,
            catalogs: None,
        }
    }
}

/// The app's preference layer: one language manager and one theme manager
/// over a shared store.
#[derive(Debug)]
pub struct AppPreferences {
    language: LanguageState,
    theme: ThemeState,
    appearance: SystemAppearance,
}

impl AppPreferences {
    /// Build both managers and start loading their stored values.
    ///
    /// Returns as soon as defaults are published; use
    /// [`AppPreferences::ready`] to wait for the loads.
    pub fn start(
        store: SharedStore,
        appearance: SystemAppearance,
        options: AppOptions,
    ) -> Result<Self> {
        let catalogs = match options.catalogs {
            Some(catalogs) => catalogs,
            None => Arc::new(CatalogSet::bundled()?),
        };

        for (locale, keys) in catalogs.missing_keys(options.default_locale) {
            warn!(
                "catalog {} is missing {} key(s) present in {}, e.g. {}",
                locale,
                keys.len(),
                options.default_locale,
                keys.first().map(String::as_str).unwrap_or("?")
            );
        }

        let language = LanguageState::new(Arc::clone(&store), catalogs, options.default_locale);
        let theme = if options.follow_system {
            ThemeState::with_appearance(store, &appearance)
        } else {
            ThemeState::new(store, appearance.current())
        };

        language.initialize();
        theme.initialize();

        info!(
            "preferences started (default locale {}, host scheme {})",
            options.default_locale,
            appearance.current()
        );

        Ok(Self {
            language,
            theme,
            appearance,
        })
    }

    /// Wait until the stored preferences have been loaded.
    pub async fn ready(&self) {
        self.language.settle().await;
        self.theme.settle().await;
    }

    pub fn language(&self) -> &LanguageState {
        &self.language
    }

    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    pub fn appearance(&self) -> &SystemAppearance {
        &self.appearance
    }

    /// Forward a host lifecycle event.
    ///
    /// On resume the stored locale is re-read, since another surface may
    /// have changed it while the app was in the background.
    pub fn handle_lifecycle(&self, event: LifecycleEvent) -> Pending {
        match event {
            LifecycleEvent::Resumed => {
                debug!("AppPreferences: resumed, reconciling language");
                self.language.reconcile()
            }
            LifecycleEvent::Suspended => Pending::ready(),
        }
    }

    /// Stop following the host appearance and wait for pending writes.
    pub async fn shutdown(self) {
        self.theme.detach();
        self.language.settle().await;
        self.theme.settle().await;
        debug!("AppPreferences: shut down");
    }
}
