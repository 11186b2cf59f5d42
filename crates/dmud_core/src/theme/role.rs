//! The nine palette roles and their lookup names.

use dmud_constant::theme as defaults;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ThemeRole {
    Background,
    Surface,
    Border,
    Text,
    SubtleText,
    Accent,
    AccentText,
    Success,
    Error,
}

impl ThemeRole {
    pub const ALL: [ThemeRole; 9] = [
        ThemeRole::Background,
        ThemeRole::Surface,
        ThemeRole::Border,
        ThemeRole::Text,
        ThemeRole::SubtleText,
        ThemeRole::Accent,
        ThemeRole::AccentText,
        ThemeRole::Success,
        ThemeRole::Error,
    ];

    /// CSS custom property holding this role.
    pub fn css_var(self) -> &'static str {
        match self {
            ThemeRole::Background => "--mud-bg",
            ThemeRole::Surface => "--mud-surface",
            ThemeRole::Border => "--mud-border",
            ThemeRole::Text => "--mud-text",
            ThemeRole::SubtleText => "--mud-subtle-text",
            ThemeRole::Accent => "--mud-accent",
            ThemeRole::AccentText => "--mud-accent-text",
            ThemeRole::Success => "--mud-success",
            ThemeRole::Error => "--mud-error",
        }
    }

    pub fn from_css_var(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.css_var() == name)
    }

    pub fn default_value(self) -> &'static str {
        match self {
            ThemeRole::Background => defaults::BACKGROUND,
            ThemeRole::Surface => defaults::SURFACE,
            ThemeRole::Border => defaults::BORDER,
            ThemeRole::Text => defaults::TEXT,
            ThemeRole::SubtleText => defaults::SUBTLE_TEXT,
            ThemeRole::Accent => defaults::ACCENT,
            ThemeRole::AccentText => defaults::ACCENT_TEXT,
            ThemeRole::Success => defaults::SUCCESS,
            ThemeRole::Error => defaults::ERROR,
        }
    }

    /// Computed-style properties tried in order; the first non-empty wins.
    pub fn computed_candidates(self) -> &'static [&'static str] {
        match self {
            ThemeRole::Background => &["--mud-bg", "--bg", "--background", "--color-bg", "--surface-base"],
            ThemeRole::Surface => &["--mud-surface", "--surface", "--panel", "--surface-100", "--muted"],
            ThemeRole::Border => &["--mud-border", "--border", "--border-color", "--surface-200"],
            ThemeRole::Text => &["--mud-text", "--text", "--foreground", "--color-text"],
            ThemeRole::SubtleText => &[
                "--mud-subtle-text",
                "--muted-foreground",
                "--muted-text",
                "--text-muted",
                "--color-muted",
            ],
            ThemeRole::Accent => &["--mud-accent", "--accent", "--primary", "--color-accent", "--brand"],
            ThemeRole::AccentText => &[
                "--mud-accent-text",
                "--accent-foreground",
                "--on-accent",
                "--color-on-accent",
            ],
            ThemeRole::Success => &["--mud-success", "--success", "--color-success", "--green"],
            ThemeRole::Error => &["--mud-error", "--danger", "--color-danger", "--red"],
        }
    }

    /// Launch parameter names; the first present one wins.
    pub fn param_aliases(self) -> &'static [&'static str] {
        match self {
            ThemeRole::Background => &["bg", "background"],
            ThemeRole::Surface => &["surface", "panel", "card"],
            ThemeRole::Border => &["border", "outline"],
            ThemeRole::Text => &["text", "fg", "foreground"],
            ThemeRole::SubtleText => &["muted", "subtle", "fgMuted"],
            ThemeRole::Accent => &["accent", "primary", "highlight"],
            ThemeRole::AccentText => &["accentText", "onAccent", "accent-foreground"],
            ThemeRole::Success => &["success"],
            ThemeRole::Error => &["error", "danger"],
        }
    }
}

/// Semantic keys accepted in theme message payloads.
pub const MESSAGE_ALIASES: &[(&str, ThemeRole)] = &[
    ("bg", ThemeRole::Background),
    ("background", ThemeRole::Background),
    ("surface", ThemeRole::Surface),
    ("panel", ThemeRole::Surface),
    ("card", ThemeRole::Surface),
    ("border", ThemeRole::Border),
    ("outline", ThemeRole::Border),
    ("text", ThemeRole::Text),
    ("foreground", ThemeRole::Text),
    ("fg", ThemeRole::Text),
    ("muted", ThemeRole::SubtleText),
    ("subtle", ThemeRole::SubtleText),
    ("accent", ThemeRole::Accent),
    ("primary", ThemeRole::Accent),
    ("highlight", ThemeRole::Accent),
    ("accentText", ThemeRole::AccentText),
    ("onAccent", ThemeRole::AccentText),
    ("success", ThemeRole::Success),
    ("error", ThemeRole::Error),
    ("danger", ThemeRole::Error),
];
