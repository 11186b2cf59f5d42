//! TUI run loop: terminal setup, event handling, draw.
//!
//! Key events are read in a dedicated thread so the loop never blocks on
//! terminal input; runtime events and log lines are drained each tick.

use std::collections::VecDeque;
use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use dmud_core::{ConsoleCommand, ConsoleEvent, Direction};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc as tokio_mpsc;
use tokio::sync::mpsc::error::{TryRecvError, TrySendError};

use crate::runtime_events::apply_console_event;
use crate::state::{ConsoleState, Screen};
use crate::utils::WHEEL_SCROLL_LINES;
use crate::view;

/// What the loop should do after handling one terminal event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    /// Forward to the runtime.
    Command(ConsoleCommand),
    /// Tear down and leave the TUI.
    Quit,
}

/// How long quitting keeps retrying to hand pending commands and the final
/// shutdown to a busy runtime.
const QUIT_FLUSH_TIMEOUT: Duration = Duration::from_secs(1);

/// Commands waiting for room in the runtime's channel, oldest first.
#[derive(Debug, Default)]
pub struct Outbox {
    pending: VecDeque<ConsoleCommand>,
}

/// Result of one [Outbox::flush].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flush {
    /// Everything was handed over.
    Done,
    /// The channel is full; the rest stays queued.
    Busy,
    /// The runtime is gone; queued commands can never be delivered.
    Closed,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: ConsoleCommand) {
        self.pending.push_back(command);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Send queued commands in order until the channel refuses one.
    pub fn flush(&mut self, command_tx: &tokio_mpsc::Sender<ConsoleCommand>) -> Flush {
        while let Some(command) = self.pending.pop_front() {
            match command_tx.try_send(command) {
                Ok(()) => {}
                Err(TrySendError::Full(command)) => {
                    self.pending.push_front(command);
                    return Flush::Busy;
                }
                Err(TrySendError::Closed(command)) => {
                    self.pending.push_front(command);
                    return Flush::Closed;
                }
            }
        }
        Flush::Done
    }
}

/// Run the console: alternate screen, raw mode, event loop.
///
/// Runtime events arrive on `event_rx`; submitted lines and other user
/// actions go out on `command_tx`. If `log_rx` is provided, runtime log
/// lines (tracing) are shown on the debug screen (Ctrl+D). Returns when the
/// user quits or the runtime drops its event sender.
pub fn run_console(
    mut event_rx: tokio_mpsc::Receiver<ConsoleEvent>,
    command_tx: tokio_mpsc::Sender<ConsoleCommand>,
    log_rx: Option<tokio_mpsc::Receiver<String>>,
) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = ConsoleState::new();
    state.push_trace_line("[log] Console started. Runtime logs (Ctrl+D) show tracing output.".to_string());
    let result = run_loop(&mut terminal, &mut state, &mut event_rx, &command_tx, log_rx);

    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    disable_raw_mode()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut ConsoleState,
    event_rx: &mut tokio_mpsc::Receiver<ConsoleEvent>,
    command_tx: &tokio_mpsc::Sender<ConsoleCommand>,
    mut log_rx: Option<tokio_mpsc::Receiver<String>>,
) -> anyhow::Result<()> {
    let (key_tx, key_rx) = mpsc::channel();
    let _reader = std::thread::spawn(move || {
        loop {
            if event::poll(Duration::from_millis(50)).unwrap_or(false)
                && let Ok(ev) = event::read()
                && key_tx.send(ev).is_err()
            {
                break;
            }
        }
    });

    let mut outbox = Outbox::new();

    loop {
        // Runtime log lines (multi-line logs split into separate lines)
        if let Some(ref mut rx) = log_rx {
            while let Ok(line) = rx.try_recv() {
                for l in line.split('\n') {
                    state.push_trace_line(l.to_string());
                }
            }
        }
        loop {
            match event_rx.try_recv() {
                Ok(event) => apply_console_event(state, event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }
        if !outbox.is_empty() {
            deliver(state, &mut outbox, command_tx);
        }
        state.expire_note(Instant::now());

        if state.needs_redraw {
            terminal.draw(|f| view::draw(f, state, f.area()))?;
            state.needs_redraw = false;
        }

        match key_rx.try_recv() {
            Ok(ev) => match handle_event(state, ev) {
                Action::None => {}
                Action::Command(command) => {
                    outbox.push(command);
                    deliver(state, &mut outbox, command_tx);
                }
                Action::Quit => {
                    outbox.push(ConsoleCommand::Shutdown);
                    let deadline = Instant::now() + QUIT_FLUSH_TIMEOUT;
                    while outbox.flush(command_tx) == Flush::Busy && Instant::now() < deadline {
                        std::thread::sleep(Duration::from_millis(10));
                    }
                    break;
                }
            },
            Err(_) => std::thread::sleep(Duration::from_millis(50)),
        }
    }
    Ok(())
}

fn deliver(state: &mut ConsoleState, outbox: &mut Outbox, command_tx: &tokio_mpsc::Sender<ConsoleCommand>) {
    let flush = outbox.flush(command_tx);
    report_flush(state, outbox, flush);
    if flush == Flush::Closed {
        *outbox = Outbox::new();
    }
}

fn report_flush(state: &mut ConsoleState, outbox: &Outbox, flush: Flush) {
    match flush {
        Flush::Done => {}
        Flush::Busy => {
            if state.note.is_empty() {
                state.set_note("Runtime busy; commands will be sent shortly");
            }
        }
        Flush::Closed => {
            state.push_trace_line(format!("[warn] runtime stopped with {} command(s) unsent", outbox.len()));
            state.set_note("Runtime stopped; commands not sent");
        }
    }
}

/// Apply one terminal event to the state and say what the loop should do.
pub fn handle_event(state: &mut ConsoleState, ev: Event) -> Action {
    match ev {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(state, key),
        Event::Resize(_, _) => {
            state.cache_dirty = true;
            state.needs_redraw = true;
            Action::None
        }
        Event::Mouse(me) => {
            match (me.kind, state.screen) {
                (MouseEventKind::ScrollUp, Screen::DebugTraces) => state.trace_scroll_up(WHEEL_SCROLL_LINES),
                (MouseEventKind::ScrollDown, Screen::DebugTraces) => state.trace_scroll_down(WHEEL_SCROLL_LINES),
                (MouseEventKind::ScrollUp, Screen::Main) => state.scroll_up(WHEEL_SCROLL_LINES),
                (MouseEventKind::ScrollDown, Screen::Main) => state.scroll_down(WHEEL_SCROLL_LINES),
                _ => {}
            }
            Action::None
        }
        _ => Action::None,
    }
}

fn handle_key(state: &mut ConsoleState, key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return Action::Quit,
        KeyCode::Char('d') if ctrl => state.toggle_screen(),
        _ if state.screen == Screen::DebugTraces => match key.code {
            KeyCode::Esc => state.toggle_screen(),
            KeyCode::Up => state.trace_scroll_up(1),
            KeyCode::Down => state.trace_scroll_down(1),
            KeyCode::PageUp => state.trace_scroll_up(10),
            KeyCode::PageDown => state.trace_scroll_down(10),
            _ => {}
        },
        KeyCode::Char('r') if ctrl => {
            state.set_note("Reconnecting…");
            return Action::Command(ConsoleCommand::Reconnect);
        }
        KeyCode::Char('t') if ctrl => {
            state.set_note("Refreshing theme…");
            return Action::Command(ConsoleCommand::RefreshTheme);
        }
        KeyCode::Char('l') if ctrl => state.clear_output(),
        KeyCode::Char('u') if ctrl => state.input_clear_line(),
        KeyCode::Char('k') if ctrl => state.input_kill_to_end(),
        KeyCode::Enter => {
            if let Some(command) = state.submit() {
                return Action::Command(command);
            }
        }
        KeyCode::Up if key.modifiers.contains(KeyModifiers::SHIFT) => state.scroll_up(1),
        KeyCode::Down if key.modifiers.contains(KeyModifiers::SHIFT) => state.scroll_down(1),
        KeyCode::Up => state.navigate_history(Direction::Back),
        KeyCode::Down => state.navigate_history(Direction::Forward),
        KeyCode::PageUp => state.page_up(),
        KeyCode::PageDown => state.page_down(),
        KeyCode::Esc => state.input_clear_line(),
        KeyCode::Backspace => state.input_backspace(),
        KeyCode::Delete => state.input_delete(),
        KeyCode::Left => state.input_cursor_left(),
        KeyCode::Right => state.input_cursor_right(),
        KeyCode::Home => state.input_cursor_home(),
        KeyCode::End => state.input_cursor_end(),
        KeyCode::Char(c) if !ctrl => state.input_insert(c),
        _ => {}
    }
    Action::None
}
