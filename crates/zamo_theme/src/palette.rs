//! Zamo color tables and the flat palette handed to screens

use indexmap::IndexMap;

use crate::scheme::ColorScheme;
use crate::tokens::{BrandColors, Color, ColorToken, ColorTokens, SchemeColors};

/// Brand colors, identical in light and dark.
pub fn brand() -> BrandColors {
    BrandColors {
        // Zamo green
        primary: Color::from_hex(0x00A86B),
        primary_dark: Color::from_hex(0x007A4D),
        // Gold
        secondary: Color::from_hex(0xF5A623),
        accent: Color::from_hex(0x2D9CDB),
        success: Color::from_hex(0x27AE60),
        warning: Color::from_hex(0xF2C94C),
        error: Color::from_hex(0xEB5757),
        info: Color::from_hex(0x2F80ED),
    }
}

pub fn light() -> SchemeColors {
    let brand = brand();
    SchemeColors {
        background: Color::from_hex(0xF7F8FA),
        card_background: Color::WHITE,
        surface_elevated: Color::WHITE,
        tab_bar: Color::WHITE,
        overlay: Color::BLACK.with_alpha(0.4),
        text_primary: Color::from_hex(0x111827),
        text_secondary: Color::from_hex(0x4B5563),
        text_tertiary: Color::from_hex(0x9CA3AF),
        text_inverse: Color::WHITE,
        border: Color::from_hex(0xE5E7EB),
        divider: Color::from_hex(0xF0F1F3),
        input_background: Color::from_hex(0xF3F4F6),
        icon: Color::from_hex(0x374151),
        success_bg: brand.success.with_alpha(0.1),
        error_bg: brand.error.with_alpha(0.1),
    }
}

pub fn dark() -> SchemeColors {
    let brand = brand();
    SchemeColors {
        background: Color::from_hex(0x0F1115),
        card_background: Color::from_hex(0x1A1D23),
        surface_elevated: Color::from_hex(0x22262E),
        tab_bar: Color::from_hex(0x15181D),
        overlay: Color::BLACK.with_alpha(0.6),
        text_primary: Color::from_hex(0xF3F4F6),
        text_secondary: Color::from_hex(0x9CA3AF),
        text_tertiary: Color::from_hex(0x6B7280),
        text_inverse: Color::from_hex(0x111827),
        border: Color::from_hex(0x2D323B),
        divider: Color::from_hex(0x23272F),
        input_background: Color::from_hex(0x1F232A),
        icon: Color::from_hex(0xD1D5DB),
        success_bg: brand.success.with_alpha(0.2),
        error_bg: brand.error.with_alpha(0.2),
    }
}

pub fn tokens_for(scheme: ColorScheme) -> ColorTokens {
    let variant = match scheme {
        ColorScheme::Light => light(),
        ColorScheme::Dark => dark(),
    };
    ColorTokens::new(brand(), variant)
}

/// Read-only map from role name to CSS color string, in [`ColorToken::ALL`]
/// order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    scheme: ColorScheme,
    entries: IndexMap<&'static str, String>,
}

impl Palette {
    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn get(&self, role: &str) -> Option<&str> {
        self.entries.get(role).map(String::as_str)
    }

    /// Infallible access for a typed role.
    pub fn color(&self, token: ColorToken) -> &str {
        self.get(token.name()).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `--role: value;` lines, one per entry.
    pub fn to_css_variables(&self) -> String {
        let mut out = String::new();
        for (role, value) in self.iter() {
            out.push_str("--");
            out.push_str(role);
            out.push_str(": ");
            out.push_str(value);
            out.push_str(";\n");
        }
        out
    }
}

/// Flatten the tables for `scheme`. Pure; call it on every read.
pub fn palette_for(scheme: ColorScheme) -> Palette {
    let tokens = tokens_for(scheme);
    let entries = ColorToken::ALL
        .into_iter()
        .map(|t| (t.name(), tokens.get(t).to_css()))
        .collect();
    Palette { scheme, entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_role_present() {
        for scheme in [ColorScheme::Light, ColorScheme::Dark] {
            let p = palette_for(scheme);
            assert_eq!(p.len(), ColorToken::ALL.len());
            for t in ColorToken::ALL {
                assert!(!p.color(t).is_empty(), "{} missing in {}", t.name(), scheme);
            }
        }
    }

    #[test]
    fn brand_is_scheme_invariant() {
        let light = palette_for(ColorScheme::Light);
        let dark = palette_for(ColorScheme::Dark);
        for t in ColorToken::ALL {
            if t.is_brand() {
                assert_eq!(light.color(t), dark.color(t), "{}", t.name());
            }
        }
        assert_ne!(
            light.color(ColorToken::Background),
            dark.color(ColorToken::Background)
        );
    }

    #[test]
    fn css_values() {
        let light = palette_for(ColorScheme::Light);
        assert_eq!(light.get("primary"), Some("#00a86b"));
        assert_eq!(light.get("card-background"), Some("#ffffff"));
        assert_eq!(light.get("overlay"), Some("rgba(0,0,0,0.4)"));
        assert_eq!(light.get("nope"), None);
        assert!(light
            .to_css_variables()
            .starts_with("--primary: #00a86b;\n--primary-dark: #007a4d;\n"));
    }
}
