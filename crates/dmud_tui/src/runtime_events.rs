//! Map [dmud_core::ConsoleEvent] to [ConsoleState] updates.

use dmud_core::ConsoleEvent;

use crate::state::ConsoleState;

/// Apply a runtime event to the console state.
pub fn apply_console_event(state: &mut ConsoleState, event: ConsoleEvent) {
    state.needs_redraw = true;
    match event {
        ConsoleEvent::Endpoint(url) => state.set_endpoint(url),
        ConsoleEvent::Status(status) => state.set_status(status),
        ConsoleEvent::InputEnabled(enabled) => state.set_input_enabled(enabled),
        ConsoleEvent::Output(text) => state.append_output(&text),
        ConsoleEvent::Notice(text) => state.append_notice(&text),
        ConsoleEvent::Theme(root) => state.apply_theme(&root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmud_core::{ConnectionState, LineKind, ThemeRoot};

    #[test]
    fn connection_events_update_badge_and_input() {
        let mut s = ConsoleState::new();
        apply_console_event(&mut s, ConsoleEvent::Endpoint("ws://localhost:4000/ws".into()));
        apply_console_event(&mut s, ConsoleEvent::Status(ConnectionState::Connected));
        apply_console_event(&mut s, ConsoleEvent::InputEnabled(true));
        assert_eq!(s.endpoint, "ws://localhost:4000/ws");
        assert_eq!(s.status, ConnectionState::Connected);
        assert!(s.input_enabled);
    }

    #[test]
    fn output_and_notices_land_in_scrollback() {
        let mut s = ConsoleState::new();
        apply_console_event(&mut s, ConsoleEvent::Output("\r\nWelcome!\r\n> ".into()));
        apply_console_event(&mut s, ConsoleEvent::notice("Reconnected to the server."));
        let kinds: Vec<LineKind> = s.lines.iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![LineKind::Content, LineKind::Content, LineKind::System]);
        assert_eq!(s.lines.iter().nth(1).unwrap().text, "> ");
    }

    #[test]
    fn theme_event_rebuilds_palette() {
        let mut s = ConsoleState::new();
        let mut root = ThemeRoot::new();
        root.set_property("--mud-bg", "#ffffff");
        root.apply_color_scheme("light");
        apply_console_event(&mut s, ConsoleEvent::Theme(root));
        assert!(!s.palette.appearance.is_dark());
    }
}
