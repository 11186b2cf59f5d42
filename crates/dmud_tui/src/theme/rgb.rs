//! RGB color for the terminal palette, parsed from CSS color values.

/// RGB triplet. Alpha from CSS values is dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb(r, g, b)
    }

    /// Tuple for ratatui/crossterm: `(r, g, b)`.
    pub fn tuple(self) -> (u8, u8, u8) {
        (self.0, self.1, self.2)
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` or
    /// `rgba(r, g, b, a)`. Anything else (named colors, `var(...)`) is `None`.
    pub fn parse_css(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        let lower = value.to_ascii_lowercase();
        let args = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))?
            .strip_suffix(')')?;
        let channels: Vec<&str> = args
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();
        if channels.len() < 3 {
            return None;
        }
        Some(Rgb(
            parse_channel(channels[0])?,
            parse_channel(channels[1])?,
            parse_channel(channels[2])?,
        ))
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            3 | 4 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|d| d * 17);
                Some(Rgb(digit(0)?, digit(1)?, digit(2)?))
            }
            6 | 8 => {
                let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                Some(Rgb(pair(0)?, pair(2)?, pair(4)?))
            }
            _ => None,
        }
    }

    /// Linear mix towards `other`; `amount` 0.0 keeps `self`, 1.0 yields `other`.
    pub fn mix(self, other: Rgb, amount: f32) -> Rgb {
        let t = amount.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(lerp(self.0, other.0), lerp(self.1, other.1), lerp(self.2, other.2))
    }

    /// Relative luminance in 0.0..=1.0 (sRGB weights, no gamma).
    pub fn luminance(self) -> f32 {
        (0.2126 * self.0 as f32 + 0.7152 * self.1 as f32 + 0.0722 * self.2 as f32) / 255.0
    }
}

impl From<Rgb> for (u8, u8, u8) {
    fn from(c: Rgb) -> Self {
        c.tuple()
    }
}

fn parse_channel(raw: &str) -> Option<u8> {
    if let Some(pct) = raw.strip_suffix('%') {
        let p: f32 = pct.parse().ok()?;
        return Some((p.clamp(0.0, 100.0) * 2.55).round() as u8);
    }
    let v: f32 = raw.parse().ok()?;
    Some(v.clamp(0.0, 255.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Rgb::parse_css("#ff0000"), Some(Rgb(255, 0, 0)));
        assert_eq!(Rgb::parse_css("#0f0"), Some(Rgb(0, 255, 0)));
        assert_eq!(Rgb::parse_css(" #0f0f10 "), Some(Rgb(15, 15, 16)));
        assert_eq!(Rgb::parse_css("#11223380"), Some(Rgb(0x11, 0x22, 0x33)));
    }

    #[test]
    fn parses_rgb_functions() {
        assert_eq!(Rgb::parse_css("rgb(1, 2, 3)"), Some(Rgb(1, 2, 3)));
        assert_eq!(Rgb::parse_css("RGBA(10,20,30,0.5)"), Some(Rgb(10, 20, 30)));
        assert_eq!(Rgb::parse_css("rgb(100% 0% 0% / 0.2)"), Some(Rgb(255, 0, 0)));
    }

    #[test]
    fn rejects_unsupported_values() {
        assert_eq!(Rgb::parse_css("red"), None);
        assert_eq!(Rgb::parse_css("var(--accent)"), None);
        assert_eq!(Rgb::parse_css("#12345"), None);
        assert_eq!(Rgb::parse_css("#ggg"), None);
        assert_eq!(Rgb::parse_css("rgb(1, 2)"), None);
    }

    #[test]
    fn mix_endpoints() {
        let a = Rgb(0, 0, 0);
        let b = Rgb(200, 100, 50);
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
        assert_eq!(a.mix(b, 0.5), Rgb(100, 50, 25));
    }

    #[test]
    fn luminance_orders_dark_and_light() {
        assert!(Rgb(15, 15, 16).luminance() < 0.5);
        assert!(Rgb(245, 246, 247).luminance() > 0.5);
    }
}
