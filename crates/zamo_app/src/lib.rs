//! Zamo application preferences
//!
//! Composition root for the preference layer. Builds the
//! [`LanguageState`](zamo_i18n::LanguageState) and
//! [`ThemeState`](zamo_theme::ThemeState) over one store, forwards host
//! lifecycle events, and tears both down.
//!
//! ```ignore
//! let prefs = AppPreferences::start(store, SystemAppearance::detect(), AppOptions::default())?;
//! prefs.ready().await;
//! let title = prefs.language().translate("home.balance");
//! ```

mod error;
mod lifecycle;
mod preferences;

pub use error::{AppError, Result};
pub use lifecycle::LifecycleEvent;
pub use preferences::{AppOptions, AppPreferences};

pub use zamo_i18n as i18n;
pub use zamo_prefs as prefs;
pub use zamo_theme as theme;
