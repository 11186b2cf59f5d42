//! Console palette: the nine theme roles as terminal colors, plus derived
//! chrome (placeholder, disabled text, scrollbar, connecting dot).

use dmud_constant::theme::CONNECTING;
use dmud_core::{ThemeRole, ThemeRoot};

use super::{Appearance, Rgb};

#[derive(Clone, Debug, PartialEq)]
pub struct ConsolePalette {
    pub appearance: Appearance,

    // --- Theme roles
    pub background: Rgb,
    pub surface: Rgb,
    pub border: Rgb,
    pub text: Rgb,
    pub text_muted: Rgb,
    pub accent: Rgb,
    pub accent_text: Rgb,
    pub success: Rgb,
    pub danger: Rgb,

    // --- Derived
    pub warning: Rgb,
    pub border_focused: Rgb,
    pub text_placeholder: Rgb,
    pub text_disabled: Rgb,
    pub scrollbar_track: Rgb,
    pub scrollbar_thumb: Rgb,
}

impl Default for ConsolePalette {
    fn default() -> Self {
        Self::from_root(&ThemeRoot::new())
    }
}

impl ConsolePalette {
    /// Resolve every role from `root`. Values the terminal cannot show
    /// (named colors, `var(...)`) fall back to the role default.
    pub fn from_root(root: &ThemeRoot) -> Self {
        let color = |role: ThemeRole| {
            Rgb::parse_css(root.role(role))
                .or_else(|| Rgb::parse_css(role.default_value()))
                .unwrap_or(Rgb(0, 0, 0))
        };
        let background = color(ThemeRole::Background);
        let surface = color(ThemeRole::Surface);
        let border = color(ThemeRole::Border);
        let text = color(ThemeRole::Text);
        let text_muted = color(ThemeRole::SubtleText);
        let accent = color(ThemeRole::Accent);
        let appearance = Appearance::resolve(root.color_scheme, background);
        let (r, g, b) = CONNECTING;
        Self {
            appearance,
            background,
            surface,
            border,
            text,
            text_muted,
            accent,
            accent_text: color(ThemeRole::AccentText),
            success: color(ThemeRole::Success),
            danger: color(ThemeRole::Error),
            warning: Rgb::new(r, g, b),
            border_focused: border.mix(accent, 0.6),
            text_placeholder: text_muted.mix(background, 0.35),
            text_disabled: text_muted.mix(background, 0.55),
            scrollbar_track: surface,
            scrollbar_thumb: border.mix(text_muted, 0.5),
        }
    }
}
