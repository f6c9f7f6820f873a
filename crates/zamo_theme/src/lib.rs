//! Zamo theming
//!
//! - [`ThemeMode`]: what the user picked (`light`, `dark`, `system`)
//! - [`ColorScheme`]: what is rendered (`light` or `dark`)
//! - [`SystemAppearance`]: the host's scheme as an observable feed
//! - [`ThemeState`]: the persisted mode, resolved against the host, with the
//!   flat [`Palette`] screens read colors from
//!
//! ```rust,ignore
//! let appearance = SystemAppearance::detect();
//! let theme = ThemeState::with_appearance(store, &appearance);
//! theme.initialize();
//!
//! let bg = theme.palette().color(ColorToken::Background).to_owned();
//! ```

mod appearance;
mod error;
pub mod palette;
mod scheme;
mod state;
pub mod tokens;

#[cfg(feature = "watcher")]
pub mod watcher;

pub use appearance::{detect_system_color_scheme, SystemAppearance};
pub use error::ThemeError;
pub use palette::{palette_for, Palette};
pub use scheme::{resolve_scheme, ColorScheme, ThemeMode};
pub use state::{ThemeSnapshot, ThemeState};
pub use tokens::{Color, ColorToken, ColorTokens};
