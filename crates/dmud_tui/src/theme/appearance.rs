//! Theme appearance: light or dark.

use dmud_core::ColorScheme;

use super::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Appearance {
    #[default]
    Dark,
    Light,
}

impl Appearance {
    pub fn is_dark(self) -> bool {
        matches!(self, Appearance::Dark)
    }

    /// Explicit scheme wins; otherwise judge by the background brightness.
    pub fn resolve(scheme: Option<ColorScheme>, background: Rgb) -> Self {
        match scheme {
            Some(ColorScheme::Dark) => Appearance::Dark,
            Some(ColorScheme::Light) => Appearance::Light,
            None if background.luminance() > 0.5 => Appearance::Light,
            None => Appearance::Dark,
        }
    }
}
