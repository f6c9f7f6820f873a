//! Design tokens for theming
//!
//! Only colors vary with the theme in this app; spacing and typography are
//! owned by the screens.

mod color;

pub use color::*;
