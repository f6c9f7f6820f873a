//! Color tokens for theming

use std::fmt::{Display, Formatter};

/// An sRGB color with 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// 255 is opaque
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::from_hex(0xFFFFFF);
    pub const BLACK: Color = Color::from_hex(0x000000);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `0xRRGGBB`, opaque.
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub const fn with_alpha8(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Same color with `alpha` in `0.0..=1.0`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        self.with_alpha8((alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    pub fn alpha(self) -> f32 {
        self.a as f32 / 255.0
    }

    /// CSS notation: `#rrggbb` when opaque, `rgba(r,g,b,a)` otherwise.
    pub fn to_css(self) -> String {
        self.to_string()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            // Three decimals keep every 8-bit step distinct.
            let mut alpha = format!("{:.3}", self.alpha());
            while alpha.ends_with('0') {
                alpha.pop();
            }
            if alpha.ends_with('.') {
                alpha.pop();
            }
            write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, alpha)
        }
    }
}

/// Semantic color roles, as read by screens.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ColorToken {
    // Brand colors (identical in light and dark)
    Primary,
    PrimaryDark,
    Secondary,
    Accent,
    Success,
    Warning,
    Error,
    Info,
    White,
    Black,

    // Surfaces
    Background,
    CardBackground,
    SurfaceElevated,
    TabBar,
    Overlay,

    // Text
    TextPrimary,
    TextSecondary,
    TextTertiary,
    TextInverse,

    // Lines and inputs
    Border,
    Divider,
    InputBackground,
    Icon,

    // Status backgrounds
    SuccessBg,
    ErrorBg,
}

impl ColorToken {
    pub const ALL: [ColorToken; 25] = [
        ColorToken::Primary,
        ColorToken::PrimaryDark,
        ColorToken::Secondary,
        ColorToken::Accent,
        ColorToken::Success,
        ColorToken::Warning,
        ColorToken::Error,
        ColorToken::Info,
        ColorToken::White,
        ColorToken::Black,
        ColorToken::Background,
        ColorToken::CardBackground,
        ColorToken::SurfaceElevated,
        ColorToken::TabBar,
        ColorToken::Overlay,
        ColorToken::TextPrimary,
        ColorToken::TextSecondary,
        ColorToken::TextTertiary,
        ColorToken::TextInverse,
        ColorToken::Border,
        ColorToken::Divider,
        ColorToken::InputBackground,
        ColorToken::Icon,
        ColorToken::SuccessBg,
        ColorToken::ErrorBg,
    ];

    /// Role name used as the palette key (CSS variable name without `--`).
    pub fn name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::PrimaryDark => "primary-dark",
            Self::Secondary => "secondary",
            Self::Accent => "accent",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
            Self::White => "white",
            Self::Black => "black",
            Self::Background => "background",
            Self::CardBackground => "card-background",
            Self::SurfaceElevated => "surface-elevated",
            Self::TabBar => "tab-bar",
            Self::Overlay => "overlay",
            Self::TextPrimary => "text-primary",
            Self::TextSecondary => "text-secondary",
            Self::TextTertiary => "text-tertiary",
            Self::TextInverse => "text-inverse",
            Self::Border => "border",
            Self::Divider => "divider",
            Self::InputBackground => "input-background",
            Self::Icon => "icon",
            Self::SuccessBg => "success-bg",
            Self::ErrorBg => "error-bg",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Whether the role has the same value in every scheme.
    pub fn is_brand(self) -> bool {
        matches!(
            self,
            Self::Primary
                | Self::PrimaryDark
                | Self::Secondary
                | Self::Accent
                | Self::Success
                | Self::Warning
                | Self::Error
                | Self::Info
                | Self::White
                | Self::Black
        )
    }
}

/// Colors shared by both schemes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrandColors {
    pub primary: Color,
    pub primary_dark: Color,
    pub secondary: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
}

/// Colors that differ between light and dark.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchemeColors {
    pub background: Color,
    pub card_background: Color,
    pub surface_elevated: Color,
    pub tab_bar: Color,
    pub overlay: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_tertiary: Color,
    pub text_inverse: Color,
    pub border: Color,
    pub divider: Color,
    pub input_background: Color,
    pub icon: Color,
    pub success_bg: Color,
    pub error_bg: Color,
}

/// Complete set of semantic color tokens for one scheme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorTokens {
    pub brand: BrandColors,
    pub scheme: SchemeColors,
}

impl ColorTokens {
    pub const fn new(brand: BrandColors, scheme: SchemeColors) -> Self {
        Self { brand, scheme }
    }

    /// Get a color by token key
    pub fn get(&self, token: ColorToken) -> Color {
        let b = &self.brand;
        let s = &self.scheme;
        match token {
            ColorToken::Primary => b.primary,
            ColorToken::PrimaryDark => b.primary_dark,
            ColorToken::Secondary => b.secondary,
            ColorToken::Accent => b.accent,
            ColorToken::Success => b.success,
            ColorToken::Warning => b.warning,
            ColorToken::Error => b.error,
            ColorToken::Info => b.info,
            ColorToken::White => Color::WHITE,
            ColorToken::Black => Color::BLACK,
            ColorToken::Background => s.background,
            ColorToken::CardBackground => s.card_background,
            ColorToken::SurfaceElevated => s.surface_elevated,
            ColorToken::TabBar => s.tab_bar,
            ColorToken::Overlay => s.overlay,
            ColorToken::TextPrimary => s.text_primary,
            ColorToken::TextSecondary => s.text_secondary,
            ColorToken::TextTertiary => s.text_tertiary,
            ColorToken::TextInverse => s.text_inverse,
            ColorToken::Border => s.border,
            ColorToken::Divider => s.divider,
            ColorToken::InputBackground => s.input_background,
            ColorToken::Icon => s.icon,
            ColorToken::SuccessBg => s.success_bg,
            ColorToken::ErrorBg => s.error_bg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_notation() {
        assert_eq!(Color::from_hex(0x00A86B).to_css(), "#00a86b");
        assert_eq!(Color::BLACK.with_alpha(0.4).to_css(), "rgba(0,0,0,0.4)");
        assert_eq!(Color::WHITE.with_alpha(0.0).to_css(), "rgba(255,255,255,0)");
        assert_eq!(Color::WHITE.with_alpha(1.0).to_css(), "#ffffff");
        assert_eq!(Color::BLACK.with_alpha8(1).to_css(), "rgba(0,0,0,0.004)");
        assert_ne!(
            Color::BLACK.with_alpha8(128).to_css(),
            Color::BLACK.with_alpha8(129).to_css()
        );
    }

    #[test]
    fn token_names_are_unique_and_reversible() {
        let mut names: Vec<&str> = ColorToken::ALL.iter().map(|t| t.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ColorToken::ALL.len());

        for t in ColorToken::ALL {
            assert_eq!(ColorToken::from_name(t.name()), Some(t));
        }
        assert_eq!(ColorToken::from_name("chartreuse"), None);
    }
}
