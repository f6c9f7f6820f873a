//! Well-known preference keys.
//!
//! Each manager owns exactly one key, so the two never contend.

/// Active locale code (`en`, `fr`, ...)
pub const LANGUAGE: &str = "zamo.language";

/// Theme mode (`light`, `dark` or `system`)
pub const THEME_MODE: &str = "zamo.theme_mode";
