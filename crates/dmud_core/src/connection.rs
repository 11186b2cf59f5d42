//! Connection manager: one logical connection, a fixed-delay reconnect timer,
//! and an outbound queue for commands submitted while disconnected.
//!
//! The manager never performs IO. Each handler takes the current state plus
//! one event and returns the [Effect]s the driver must execute, in order.
//! Failures of every kind (construction, send, unclean close) are transient
//! and funnel into [ConnectionManager::schedule_reconnect]. The delay is
//! fixed: no backoff, no jitter, no retry cap.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// Delay between a failure and the next connection attempt.
pub const RECONNECT_DELAY: Duration = Duration::from_millis(4000);

/// Close code sent on teardown (normal closure).
pub const NORMAL_CLOSURE: u16 = 1000;

/// Close reason sent on teardown.
pub const TEARDOWN_REASON: &str = "Client exiting";

pub const NOTICE_CONNECT_FAILED: &str = "Failed to create WebSocket connection.";
pub const NOTICE_RECONNECTED: &str = "Reconnected to the server.";
pub const NOTICE_QUEUED: &str = "Not connected. Queuing command.";
pub const NOTICE_SEND_FAILED: &str = "Failed to send command. Retrying soon.";

/// User-visible connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Connecting,
    Connected,
    Disconnected,
    Error,
}

impl ConnectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Error => "error",
        }
    }

    /// Badge text shown in the header.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Connecting => "Connecting…",
            ConnectionState::Connected => "Connected",
            ConnectionState::Error => "Connection issue",
            ConnectionState::Disconnected => "Disconnected",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ready state of the current transport, mirroring the WebSocket states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Connecting,
    Open,
    Closing,
    Closed,
}

/// Identifies one connection attempt. Events carry the attempt they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttemptId(pub u64);

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Inbound payload from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Binary(Vec<u8>),
}

/// Side effect requested by the manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Open a new transport for `attempt`.
    Open { attempt: AttemptId, url: String },
    /// Send one text frame on the transport of `attempt`.
    Send { attempt: AttemptId, text: String },
    /// Close the transport of `attempt`.
    Close {
        attempt: AttemptId,
        code: u16,
        reason: String,
    },
    /// Arm the single reconnect timer.
    ArmTimer { delay: Duration },
    /// Cancel the pending reconnect timer.
    CancelTimer,
    Status(ConnectionState),
    InputEnabled(bool),
    /// Client-generated informational line.
    Notice(String),
    /// Server text to hand to the line renderer.
    Deliver(String),
}

#[derive(Debug, Clone, Copy)]
struct Attempt {
    id: AttemptId,
    is_reconnect: bool,
    ready: ReadyState,
}

/// Owns the connection lifecycle, the command queue, and the timer guard.
#[derive(Debug)]
pub struct ConnectionManager {
    url: String,
    reconnect_delay: Duration,
    state: ConnectionState,
    current: Option<Attempt>,
    next_attempt: u64,
    queue: VecDeque<String>,
    timer_pending: bool,
    manually_closed: bool,
}

impl ConnectionManager {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reconnect_delay: RECONNECT_DELAY,
            state: ConnectionState::Connecting,
            current: None,
            next_attempt: 0,
            queue: VecDeque::new(),
            timer_pending: false,
            manually_closed: false,
        }
    }

    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Ready state of the current transport; `Closed` before the first attempt.
    pub fn ready_state(&self) -> ReadyState {
        self.current.map_or(ReadyState::Closed, |a| a.ready)
    }

    pub fn current_attempt(&self) -> Option<AttemptId> {
        self.current.map(|a| a.id)
    }

    pub fn queued(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn timer_pending(&self) -> bool {
        self.timer_pending
    }

    pub fn is_manually_closed(&self) -> bool {
        self.manually_closed
    }

    /// Start a new transport. Submission stays disabled until it opens.
    pub fn connect(&mut self, is_reconnect: bool) -> Vec<Effect> {
        let id = AttemptId(self.next_attempt);
        self.next_attempt += 1;
        self.current = Some(Attempt {
            id,
            is_reconnect,
            ready: ReadyState::Connecting,
        });
        self.state = ConnectionState::Connecting;
        tracing::debug!(attempt = %id, url = %self.url, is_reconnect, "connecting");
        vec![
            Effect::Status(ConnectionState::Connecting),
            Effect::InputEnabled(false),
            Effect::Open {
                attempt: id,
                url: self.url.clone(),
            },
        ]
    }

    /// The transport for `attempt` could not be constructed.
    pub fn on_connect_failed(&mut self, attempt: AttemptId) -> Vec<Effect> {
        let Some(current) = self.current_mut(attempt) else {
            return Vec::new();
        };
        current.ready = ReadyState::Closed;
        tracing::warn!(attempt = %attempt, "transport construction failed");
        let mut effects = vec![Effect::Notice(NOTICE_CONNECT_FAILED.to_string())];
        effects.extend(self.schedule_reconnect());
        effects
    }

    pub fn on_open(&mut self, attempt: AttemptId) -> Vec<Effect> {
        let Some(current) = self.current_mut(attempt) else {
            return Vec::new();
        };
        current.ready = ReadyState::Open;
        let is_reconnect = current.is_reconnect;
        self.state = ConnectionState::Connected;
        tracing::info!(attempt = %attempt, queued = self.queue.len(), "connected");

        let mut effects = vec![
            Effect::Status(ConnectionState::Connected),
            Effect::InputEnabled(true),
        ];
        effects.extend(
            self.queue
                .drain(..)
                .map(|text| Effect::Send { attempt, text }),
        );
        if is_reconnect {
            effects.push(Effect::Notice(NOTICE_RECONNECTED.to_string()));
        }
        effects
    }

    pub fn on_close(&mut self, attempt: AttemptId, clean: bool) -> Vec<Effect> {
        let Some(current) = self.current_mut(attempt) else {
            return Vec::new();
        };
        current.ready = ReadyState::Closed;
        self.state = if clean {
            ConnectionState::Disconnected
        } else {
            ConnectionState::Error
        };
        tracing::info!(attempt = %attempt, clean, "connection closed");

        let mut effects = vec![Effect::InputEnabled(false), Effect::Status(self.state)];
        if !self.manually_closed {
            effects.extend(self.schedule_reconnect());
        }
        effects
    }

    /// Reconnect scheduling is left to the close that follows an error.
    pub fn on_error(&mut self, attempt: AttemptId) -> Vec<Effect> {
        if self.current_mut(attempt).is_none() {
            return Vec::new();
        }
        self.state = ConnectionState::Error;
        vec![Effect::Status(ConnectionState::Error)]
    }

    /// Text is forwarded to the renderer; anything else is dropped.
    pub fn on_message(&mut self, attempt: AttemptId, payload: Payload) -> Vec<Effect> {
        if self.current_mut(attempt).is_none() {
            return Vec::new();
        }
        match payload {
            Payload::Text(text) => vec![Effect::Deliver(text)],
            Payload::Binary(bytes) => {
                tracing::trace!(attempt = %attempt, len = bytes.len(), "dropping binary payload");
                Vec::new()
            }
        }
    }

    /// Send now when open, otherwise queue and schedule a reconnect.
    pub fn send_command(&mut self, text: impl Into<String>) -> Vec<Effect> {
        let text = text.into();
        match self.current {
            Some(Attempt {
                id,
                ready: ReadyState::Open,
                ..
            }) => vec![Effect::Send { attempt: id, text }],
            _ => {
                self.queue.push_back(text);
                let mut effects = vec![Effect::Notice(NOTICE_QUEUED.to_string())];
                effects.extend(self.schedule_reconnect());
                effects
            }
        }
    }

    /// A `Send` effect failed on the transport; keep the command for later.
    pub fn on_send_failed(&mut self, attempt: AttemptId, text: impl Into<String>) -> Vec<Effect> {
        self.queue.push_back(text.into());
        let mut effects = vec![Effect::Notice(NOTICE_SEND_FAILED.to_string())];
        let still_connecting = self
            .current
            .is_some_and(|a| a.id == attempt && a.ready == ReadyState::Connecting);
        if !still_connecting {
            effects.extend(self.schedule_reconnect());
        }
        effects
    }

    /// Arm the reconnect timer unless one is already pending.
    pub fn schedule_reconnect(&mut self) -> Vec<Effect> {
        if self.timer_pending {
            return Vec::new();
        }
        self.timer_pending = true;
        tracing::debug!(delay_ms = self.reconnect_delay.as_millis() as u64, "reconnect scheduled");
        vec![Effect::ArmTimer {
            delay: self.reconnect_delay,
        }]
    }

    pub fn on_timer_fired(&mut self) -> Vec<Effect> {
        self.timer_pending = false;
        if self.manually_closed {
            return Vec::new();
        }
        self.connect(true)
    }

    /// User-triggered reconnect: drop the timer and start a fresh attempt now.
    /// An attempt still in flight is superseded, not aborted.
    pub fn manual_reconnect(&mut self) -> Vec<Effect> {
        self.manually_closed = false;
        let mut effects = self.cancel_timer();
        effects.extend(self.connect(true));
        effects
    }

    /// Process exit: stop retrying and close an open transport normally.
    pub fn teardown(&mut self) -> Vec<Effect> {
        self.manually_closed = true;
        let mut effects = self.cancel_timer();
        if let Some(current) = self.current.as_mut()
            && current.ready == ReadyState::Open
        {
            current.ready = ReadyState::Closing;
            effects.push(Effect::Close {
                attempt: current.id,
                code: NORMAL_CLOSURE,
                reason: TEARDOWN_REASON.to_string(),
            });
        }
        effects
    }

    fn cancel_timer(&mut self) -> Vec<Effect> {
        if self.timer_pending {
            self.timer_pending = false;
            vec![Effect::CancelTimer]
        } else {
            Vec::new()
        }
    }

    fn current_mut(&mut self, attempt: AttemptId) -> Option<&mut Attempt> {
        match self.current.as_mut() {
            Some(a) if a.id == attempt => Some(a),
            _ => {
                tracing::trace!(attempt = %attempt, "ignoring event from superseded attempt");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "ws://localhost:4000/ws";

    fn sends(effects: &[Effect]) -> Vec<&str> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Send { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn notices(effects: &[Effect]) -> Vec<&str> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Notice(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn armed(effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|e| matches!(e, Effect::ArmTimer { .. }))
            .count()
    }

    fn open_manager() -> (ConnectionManager, AttemptId) {
        let mut m = ConnectionManager::new(URL);
        m.connect(false);
        let id = m.current_attempt().unwrap();
        m.on_open(id);
        (m, id)
    }

    #[test]
    fn connect_disables_input_and_opens() {
        let mut m = ConnectionManager::new(URL);
        let effects = m.connect(false);
        assert_eq!(
            effects,
            vec![
                Effect::Status(ConnectionState::Connecting),
                Effect::InputEnabled(false),
                Effect::Open {
                    attempt: AttemptId(0),
                    url: URL.to_string()
                },
            ]
        );
        assert_eq!(m.ready_state(), ReadyState::Connecting);
    }

    #[test]
    fn first_open_has_no_reconnect_notice() {
        let mut m = ConnectionManager::new(URL);
        m.connect(false);
        let effects = m.on_open(AttemptId(0));
        assert!(notices(&effects).is_empty());
        assert!(effects.contains(&Effect::InputEnabled(true)));
        assert_eq!(m.state(), ConnectionState::Connected);
    }

    #[test]
    fn open_after_reconnect_emits_one_notice() {
        let mut m = ConnectionManager::new(URL);
        m.connect(true);
        let effects = m.on_open(AttemptId(0));
        assert_eq!(notices(&effects), vec![NOTICE_RECONNECTED]);
    }

    #[test]
    fn send_when_open_goes_straight_out() {
        let (mut m, id) = open_manager();
        let effects = m.send_command("look");
        assert_eq!(
            effects,
            vec![Effect::Send {
                attempt: id,
                text: "look".to_string()
            }]
        );
        assert_eq!(m.queue_len(), 0);
    }

    #[test]
    fn send_while_connecting_queues_and_schedules() {
        let mut m = ConnectionManager::new(URL);
        m.connect(false);
        let effects = m.send_command("north");
        assert_eq!(notices(&effects), vec![NOTICE_QUEUED]);
        assert_eq!(armed(&effects), 1);
        assert_eq!(m.queued().collect::<Vec<_>>(), vec!["north"]);
    }

    #[test]
    fn queued_commands_drain_once_in_order() {
        let mut m = ConnectionManager::new(URL);
        m.connect(false);
        m.on_close(AttemptId(0), false);
        m.send_command("one");
        m.send_command("two");
        m.send_command("three");

        let mut effects = m.on_timer_fired();
        let id = m.current_attempt().unwrap();
        effects.extend(m.on_open(id));
        assert_eq!(sends(&effects), vec!["one", "two", "three"]);
        assert_eq!(m.queue_len(), 0);

        // A later close/open cycle must not resend.
        m.on_close(id, true);
        let effects = m.on_timer_fired();
        let id = m.current_attempt().unwrap();
        let mut all = effects;
        all.extend(m.on_open(id));
        assert!(sends(&all).is_empty());
    }

    #[test]
    fn clean_close_is_disconnected_unclean_is_error() {
        let (mut m, id) = open_manager();
        let effects = m.on_close(id, true);
        assert!(effects.contains(&Effect::Status(ConnectionState::Disconnected)));
        assert!(effects.contains(&Effect::InputEnabled(false)));

        let mut m2 = ConnectionManager::new(URL);
        m2.connect(false);
        m2.on_open(AttemptId(0));
        let effects = m2.on_close(AttemptId(0), false);
        assert!(effects.contains(&Effect::Status(ConnectionState::Error)));
    }

    #[test]
    fn error_sets_state_without_scheduling() {
        let mut m = ConnectionManager::new(URL);
        m.connect(false);
        let effects = m.on_error(AttemptId(0));
        assert_eq!(effects, vec![Effect::Status(ConnectionState::Error)]);
        assert!(!m.timer_pending());
    }

    #[test]
    fn error_then_close_arms_single_timer() {
        let mut m = ConnectionManager::new(URL);
        m.connect(false);
        let mut effects = m.on_error(AttemptId(0));
        effects.extend(m.on_close(AttemptId(0), false));
        assert_eq!(armed(&effects), 1);
    }

    #[test]
    fn schedule_reconnect_is_idempotent() {
        let mut m = ConnectionManager::new(URL);
        assert_eq!(armed(&m.schedule_reconnect()), 1);
        assert!(m.schedule_reconnect().is_empty());
        assert!(m.schedule_reconnect().is_empty());
        assert!(m.timer_pending());
    }

    #[test]
    fn at_most_one_timer_pending_over_mixed_sequence() {
        let mut m = ConnectionManager::new(URL);
        let mut pending: i32 = 0;
        let mut max_pending = 0;
        let track = |effects: &[Effect], pending: &mut i32| {
            for e in effects {
                match e {
                    Effect::ArmTimer { .. } => *pending += 1,
                    Effect::CancelTimer => *pending -= 1,
                    _ => {}
                }
            }
        };

        let e = m.connect(false);
        track(&e, &mut pending);
        for round in 0..20u64 {
            let id = m.current_attempt().unwrap();
            let e = if round % 3 == 0 {
                m.on_open(id)
            } else {
                m.on_error(id)
            };
            track(&e, &mut pending);
            let e = m.send_command(format!("cmd {round}"));
            track(&e, &mut pending);
            let e = m.on_close(id, round % 2 == 0);
            track(&e, &mut pending);
            let e = m.send_command("again");
            track(&e, &mut pending);
            max_pending = max_pending.max(pending);
            if round % 4 == 0 {
                let e = m.manual_reconnect();
                track(&e, &mut pending);
            } else {
                // Timer fires: the driver consumed it.
                pending -= 1;
                let e = m.on_timer_fired();
                track(&e, &mut pending);
            }
            max_pending = max_pending.max(pending);
            assert!((0..=1).contains(&pending), "pending timers: {pending}");
        }
        assert_eq!(max_pending, 1);
    }

    #[test]
    fn close_after_teardown_does_not_schedule() {
        let (mut m, id) = open_manager();
        let effects = m.teardown();
        assert_eq!(
            effects,
            vec![Effect::Close {
                attempt: id,
                code: NORMAL_CLOSURE,
                reason: TEARDOWN_REASON.to_string()
            }]
        );
        let effects = m.on_close(id, true);
        assert_eq!(armed(&effects), 0);
    }

    #[test]
    fn teardown_cancels_pending_timer() {
        let mut m = ConnectionManager::new(URL);
        m.connect(false);
        m.on_close(AttemptId(0), false);
        assert!(m.timer_pending());
        let effects = m.teardown();
        assert_eq!(effects, vec![Effect::CancelTimer]);
        assert!(!m.timer_pending());
    }

    #[test]
    fn timer_after_teardown_does_not_connect() {
        let mut m = ConnectionManager::new(URL);
        m.connect(false);
        m.on_close(AttemptId(0), false);
        m.teardown();
        assert!(m.on_timer_fired().is_empty());
    }

    #[test]
    fn manual_reconnect_cancels_timer_and_clears_flag() {
        let mut m = ConnectionManager::new(URL);
        m.connect(false);
        m.teardown();
        m.schedule_reconnect();
        let effects = m.manual_reconnect();
        assert_eq!(effects[0], Effect::CancelTimer);
        assert!(matches!(effects.last(), Some(Effect::Open { attempt: AttemptId(1), .. })));
        assert!(!m.is_manually_closed());
        assert!(!m.timer_pending());
    }

    #[test]
    fn manual_reconnect_supersedes_in_flight_attempt() {
        let mut m = ConnectionManager::new(URL);
        m.connect(false);
        m.manual_reconnect();
        assert!(m.on_open(AttemptId(0)).is_empty());
        assert!(m.on_close(AttemptId(0), false).is_empty());
        assert_eq!(m.state(), ConnectionState::Connecting);
        let effects = m.on_open(AttemptId(1));
        assert_eq!(notices(&effects), vec![NOTICE_RECONNECTED]);
    }

    #[test]
    fn connect_failure_notices_and_schedules() {
        let mut m = ConnectionManager::new("not a url");
        m.connect(false);
        let effects = m.on_connect_failed(AttemptId(0));
        assert_eq!(notices(&effects), vec![NOTICE_CONNECT_FAILED]);
        assert_eq!(armed(&effects), 1);
        assert_eq!(m.ready_state(), ReadyState::Closed);
    }

    #[test]
    fn send_failure_requeues_and_schedules() {
        let (mut m, id) = open_manager();
        m.on_close(id, false);
        m.on_timer_fired();
        let new_id = m.current_attempt().unwrap();
        m.on_open(new_id);
        let effects = m.on_send_failed(new_id, "say hi");
        assert_eq!(notices(&effects), vec![NOTICE_SEND_FAILED]);
        assert_eq!(armed(&effects), 1);
        assert_eq!(m.queued().collect::<Vec<_>>(), vec!["say hi"]);
    }

    #[test]
    fn send_failure_while_connecting_does_not_schedule() {
        let mut m = ConnectionManager::new(URL);
        m.connect(false);
        let effects = m.on_send_failed(AttemptId(0), "x");
        assert_eq!(armed(&effects), 0);
        assert_eq!(m.queue_len(), 1);
    }

    #[test]
    fn text_messages_delivered_binary_dropped() {
        let (mut m, id) = open_manager();
        assert_eq!(
            m.on_message(id, Payload::Text("You see a door.".into())),
            vec![Effect::Deliver("You see a door.".into())]
        );
        assert!(m.on_message(id, Payload::Binary(vec![1, 2, 3])).is_empty());
    }

    #[test]
    fn custom_reconnect_delay_is_used() {
        let mut m = ConnectionManager::new(URL).with_reconnect_delay(Duration::from_millis(10));
        assert_eq!(
            m.schedule_reconnect(),
            vec![Effect::ArmTimer {
                delay: Duration::from_millis(10)
            }]
        );
    }

    #[test]
    fn state_labels() {
        assert_eq!(ConnectionState::Connecting.label(), "Connecting…");
        assert_eq!(ConnectionState::Error.label(), "Connection issue");
        assert_eq!(ConnectionState::Disconnected.to_string(), "disconnected");
    }
}
