use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::I18nError;

/// Supported display languages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Locale {
    /// English (default and fallback)
    #[default]
    En,
    /// French
    Fr,
    /// Cameroonian Pidgin English
    Pidgin,
    /// Camfranglais
    Camfran,
}

impl Locale {
    /// Every supported locale, default first.
    pub const ALL: [Locale; 4] = [Locale::En, Locale::Fr, Locale::Pidgin, Locale::Camfran];

    /// Stable code used for persistence and catalog file names.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
            Self::Pidgin => "pidgin",
            Self::Camfran => "camfran",
        }
    }

    /// Name of the language in that language, for pickers.
    pub fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Fr => "Français",
            Self::Pidgin => "Pidgin",
            Self::Camfran => "Camfranglais",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    /// Accepts exact codes and regional variants of them (`fr-CM`, `en_US`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        locale_fallback_chain(s)
            .iter()
            .find_map(|candidate| Locale::from_code(candidate))
            .ok_or_else(|| I18nError::UnsupportedLocale(s.to_string()))
    }
}

/// Normalize locale identifiers to a canonical-ish form for lookup.
///
/// - Converts `_` to `-` (Android often reports `en_US`).
/// - Trims whitespace and lowercases.
pub fn normalize_locale(s: &str) -> String {
    s.trim().replace('_', "-").to_ascii_lowercase()
}

/// Candidate codes for a requested locale, most specific first.
///
/// Example:
/// - `fr-CM` -> `["fr-cm", "fr"]`
/// - `pidgin` -> `["pidgin"]`
///
/// No default is appended here: an unknown language must be rejected, not
/// silently mapped to English.
pub fn locale_fallback_chain(locale: &str) -> Vec<String> {
    let l = normalize_locale(locale);
    let mut chain = Vec::new();
    if l.is_empty() {
        return chain;
    }

    chain.push(l.clone());
    if let Some(lang) = l.split('-').next() {
        if !lang.is_empty() && lang != l {
            chain.push(lang.to_string());
        }
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_codes_and_variants() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!(" FR ".parse::<Locale>().unwrap(), Locale::Fr);
        assert_eq!("fr_CM".parse::<Locale>().unwrap(), Locale::Fr);
        assert_eq!("en-US".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("pidgin".parse::<Locale>().unwrap(), Locale::Pidgin);
        assert_eq!("camfran".parse::<Locale>().unwrap(), Locale::Camfran);
    }

    #[test]
    fn rejects_unknown() {
        for bad in ["", "de", "klingon", "xx-fr", "-"] {
            assert!(
                matches!(bad.parse::<Locale>(), Err(I18nError::UnsupportedLocale(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn codes_round_trip() {
        for l in Locale::ALL {
            assert_eq!(l.code().parse::<Locale>().unwrap(), l);
            assert_eq!(l.to_string(), l.code());
        }
    }

    #[test]
    fn fallback_chain() {
        assert_eq!(locale_fallback_chain("fr-CM"), vec!["fr-cm", "fr"]);
        assert_eq!(locale_fallback_chain("pidgin"), vec!["pidgin"]);
        assert!(locale_fallback_chain("  ").is_empty());
    }
}
