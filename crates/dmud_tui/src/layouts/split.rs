//! Split the terminal area into header, body, and footer regions.

use ratatui::layout::Rect;

use crate::utils::horizontal_padding;

/// Fixed height for the header (two lines: title + border).
pub const HEADER_HEIGHT: u16 = 2;

/// Fixed height for the footer: input block (border + content + border) + shortcut line.
pub const FOOTER_HEIGHT: u16 = 4;

/// Regions for the console: header, scrollable body, footer.
#[derive(Debug, Clone)]
pub struct MainSplits {
    pub header: Rect,
    /// Scrollback area. May have zero height if the terminal is too small.
    pub body: Rect,
    pub footer: Rect,
}

/// Split `area` into header (fixed top), body (scrollable middle), footer (fixed bottom).
pub fn main_splits(area: Rect) -> MainSplits {
    let height = area.height;
    let (header_h, footer_h) = (HEADER_HEIGHT.min(height), FOOTER_HEIGHT);
    let body_h = height.saturating_sub(header_h + footer_h);
    let footer_h = footer_h.min(height.saturating_sub(header_h));

    let header = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: header_h,
    };
    let body = Rect {
        x: area.x,
        y: area.y.saturating_add(header_h),
        width: area.width,
        height: body_h,
    };
    let footer = Rect {
        x: area.x,
        y: area.y.saturating_add(header_h + body_h),
        width: area.width,
        height: footer_h,
    };

    MainSplits { header, body, footer }
}

/// Same as [main_splits] but body is the padded inner area (horizontal padding only).
pub fn main_splits_with_padding(area: Rect) -> MainSplits {
    let raw = main_splits(area);
    MainSplits {
        header: raw.header,
        body: horizontal_padding(raw.body),
        footer: raw.footer,
    }
}

/// Split a vertical strip into top and bottom with a given top height.
pub fn vertical_split(area: Rect, top_height: u16) -> (Rect, Rect) {
    let top_h = top_height.min(area.height);
    let bottom_h = area.height.saturating_sub(top_h);
    let top = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: top_h,
    };
    let bottom = Rect {
        x: area.x,
        y: area.y.saturating_add(top_h),
        width: area.width,
        height: bottom_h,
    };
    (top, bottom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_splits_assigns_regions() {
        let area = Rect::new(0, 0, 80, 24);
        let s = main_splits(area);
        assert_eq!(s.header.height, 2);
        assert_eq!(s.footer.height, 4);
        assert_eq!(s.body.height, 18);
        assert_eq!(s.body.y, 2);
        assert_eq!(s.footer.y, 20);
    }

    #[test]
    fn padded_body_keeps_height() {
        let s = main_splits_with_padding(Rect::new(0, 0, 80, 24));
        assert_eq!(s.body.x, 2);
        assert_eq!(s.body.width, 76);
        assert_eq!(s.body.height, 18);
    }

    #[test]
    fn main_splits_tiny_terminal_stays_inside_area() {
        let area = Rect::new(0, 0, 80, 3);
        let s = main_splits(area);
        assert_eq!(s.body.height, 0);
        assert_eq!(s.header.height, HEADER_HEIGHT);
        assert!(s.footer.y + s.footer.height <= area.height);
    }

    #[test]
    fn main_splits_exact_minimum() {
        let area = Rect::new(0, 0, 80, HEADER_HEIGHT + FOOTER_HEIGHT);
        let s = main_splits(area);
        assert_eq!(s.body.height, 0);
        assert_eq!(s.footer.height, FOOTER_HEIGHT);
    }

    #[test]
    fn vertical_split_divides_height() {
        let area = Rect::new(0, 0, 80, 10);
        let (top, bottom) = vertical_split(area, 3);
        assert_eq!(top.height, 3);
        assert_eq!(bottom.height, 7);
        assert_eq!(bottom.y, 3);
    }

    #[test]
    fn vertical_split_larger_than_area() {
        let area = Rect::new(0, 0, 80, 5);
        let (top, bottom) = vertical_split(area, 10);
        assert_eq!(top.height, 5);
        assert_eq!(bottom.height, 0);
    }
}
