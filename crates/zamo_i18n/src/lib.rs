//! Zamo internationalization (i18n)
//!
//! - [`Locale`]: the closed set of supported languages (`en`, `fr`,
//!   `pidgin`, `camfran`)
//! - [`CatalogSet`]: bundled YAML catalogs flattened to dotted keys
//! - [`LanguageState`]: the active locale, persisted through a
//!   [`zamo_prefs::PreferenceStore`], with lookup and change notification
//!
//! Lookups never fail: a key missing from the active locale comes from the
//! default locale, and a key missing everywhere is returned as-is.

mod bundle;
pub mod catalog;
mod error;
mod label;
mod locale;
mod state;
mod text;

pub use bundle::CatalogSet;
pub use catalog::{interpolate, Catalog, CatalogParseError};
pub use error::I18nError;
pub use label::{ArgValue, Args, Label, Message};
pub use locale::{locale_fallback_chain, normalize_locale, Locale};
pub use state::{LanguageSnapshot, LanguageState};
pub use text::LocalizedText;

/// Build a deferred [`Label`] from a key and optional arguments.
///
/// Examples:
/// - `t!("home.balance")`
/// - `t!("send.confirmSend", { amount: 5000, currency: "XAF", name: "Awa" })`
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::Label::msg($crate::Message::new($key))
    };
    ($key:literal, { $($name:ident : $value:expr),* $(,)? }) => {{
        let mut m = $crate::Message::new($key);
        $(
            m = m.arg(stringify!($name), $value);
        )*
        $crate::Label::msg(m)
    }};
}

/// Translate immediately against a [`LanguageState`].
///
/// `tr!(lang, "auth.createPinDescription", { count: 4 })`
#[macro_export]
macro_rules! tr {
    ($state:expr, $key:expr) => {
        $state.translate($key)
    };
    ($state:expr, $key:expr, { $($name:ident : $value:expr),* $(,)? }) => {{
        let args = $crate::Args::new()$(.arg(stringify!($name), $value))*;
        $state.translate_with($key, &args)
    }};
}
