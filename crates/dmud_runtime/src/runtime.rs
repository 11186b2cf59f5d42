//! The console runtime: a single select loop that owns the connection
//! manager and theme sync, executes their effects, and reports to the UI.
//!
//! A new attempt never waits for the previous one. The previous transport is
//! sent a normal close (1000, `Superseded`) so its socket does not linger,
//! and anything it still reports is ignored by the manager.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use dmud_core::connection::NORMAL_CLOSURE;
use dmud_core::theme::{MessageOutcome, ThemeSyncOptions, REQUEST_RETRY_DELAY};
use dmud_core::{
    AttemptId, ConnectionManager, ConsoleCommand, ConsoleEvent, Effect, LaunchParams, StyleSheet,
    ThemeRoot, ThemeSync,
};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::feed::spawn_feed_reader;
use crate::parent::FeedParent;
use crate::timer::ReconnectTimer;
use crate::transport::{Transport, TransportEvent};

/// How long shutdown waits for the server to answer the close frame.
const CLOSE_GRACE: Duration = Duration::from_secs(1);

const SUPERSEDED_REASON: &str = "Superseded";

/// Channels the spawned tasks report back on.
struct Wiring {
    transport_tx: mpsc::Sender<(AttemptId, TransportEvent)>,
    timer_tx: mpsc::Sender<u64>,
}

pub struct ConsoleRuntime {
    config: RuntimeConfig,
    manager: ConnectionManager,
    theme: ThemeSync<FeedParent>,
    style: StyleSheet,
    transport: Option<Transport>,
    timer: ReconnectTimer,
    event_tx: mpsc::Sender<ConsoleEvent>,
}

impl ConsoleRuntime {
    /// Build a runtime for an already resolved endpoint. Fails only when a
    /// configured style file cannot be loaded.
    pub fn new(
        config: RuntimeConfig,
        url: impl Into<String>,
        params: LaunchParams,
        event_tx: mpsc::Sender<ConsoleEvent>,
    ) -> Result<Self> {
        let style = match &config.style_file {
            Some(path) => StyleSheet::load(path)?,
            None => StyleSheet::new(),
        };
        let parent = FeedParent::new(config.theme_request.clone());
        let theme = ThemeSync::new(
            params,
            parent,
            ThemeSyncOptions {
                request_parent: config.request_parent,
            },
        );
        let manager = ConnectionManager::new(url).with_reconnect_delay(config.reconnect_delay);
        Ok(Self {
            config,
            manager,
            theme,
            style,
            transport: None,
            timer: ReconnectTimer::new(),
            event_tx,
        })
    }

    pub fn manager(&self) -> &ConnectionManager {
        &self.manager
    }

    pub fn theme(&self) -> &ThemeRoot {
        self.theme.root()
    }

    /// Run until [ConsoleCommand::Shutdown] arrives or the command channel closes.
    pub async fn run(mut self, mut commands: mpsc::Receiver<ConsoleCommand>) -> Result<()> {
        let (transport_tx, mut transport_rx) = mpsc::channel(64);
        let (timer_tx, mut timer_rx) = mpsc::channel(4);
        let (feed_tx, mut feed_rx) = mpsc::channel::<String>(32);
        let (retry_tx, mut retry_rx) = mpsc::channel::<()>(1);
        let wiring = Wiring {
            transport_tx,
            timer_tx,
        };

        info!(url = %self.manager.url(), "console runtime starting");
        self.emit(ConsoleEvent::Endpoint(self.manager.url().to_string())).await?;

        if self.theme.init(&self.style) {
            tokio::spawn(async move {
                tokio::time::sleep(REQUEST_RETRY_DELAY).await;
                let _ = retry_tx.send(()).await;
            });
        }
        self.emit_theme().await?;

        let feed = self
            .config
            .theme_feed
            .clone()
            .map(|path| spawn_feed_reader(path, feed_tx));

        let effects = self.manager.connect(false);
        self.apply(effects, &wiring).await?;

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(ConsoleCommand::Submit(text)) => {
                        let effects = self.manager.send_command(text);
                        self.apply(effects, &wiring).await?;
                    }
                    Some(ConsoleCommand::Reconnect) => {
                        info!("manual reconnect");
                        let effects = self.manager.manual_reconnect();
                        self.apply(effects, &wiring).await?;
                    }
                    Some(ConsoleCommand::RefreshTheme) => {
                        self.theme.refresh_from_computed(&self.style);
                        self.emit_theme().await?;
                    }
                    Some(ConsoleCommand::Shutdown) | None => break,
                },
                Some((attempt, event)) = transport_rx.recv() => {
                    let effects = self.on_transport(attempt, event);
                    self.apply(effects, &wiring).await?;
                }
                Some(generation) = timer_rx.recv() => {
                    if self.timer.take_fired(generation) {
                        let effects = self.manager.on_timer_fired();
                        self.apply(effects, &wiring).await?;
                    }
                }
                Some(line) = feed_rx.recv() => {
                    match self.theme.handle_message_text(&line) {
                        MessageOutcome::Applied => self.emit_theme().await?,
                        MessageOutcome::ThemeRequested => {
                            self.theme.request_theme();
                        }
                        MessageOutcome::Ignored => {}
                    }
                }
                Some(()) = retry_rx.recv() => {
                    self.theme.request_theme();
                }
            }
        }

        if let Some(feed) = feed {
            feed.abort();
        }
        self.shutdown(&wiring, &mut transport_rx).await;
        Ok(())
    }

    fn on_transport(&mut self, attempt: AttemptId, event: TransportEvent) -> Vec<Effect> {
        match event {
            TransportEvent::ConnectFailed(reason) => {
                debug!(%attempt, %reason, "connect failed");
                self.manager.on_connect_failed(attempt)
            }
            TransportEvent::Opened => self.manager.on_open(attempt),
            TransportEvent::Message(payload) => self.manager.on_message(attempt, payload),
            TransportEvent::Error(reason) => {
                debug!(%attempt, %reason, "transport error");
                self.manager.on_error(attempt)
            }
            TransportEvent::Closed { clean } => self.manager.on_close(attempt, clean),
            TransportEvent::SendFailed(text) => self.manager.on_send_failed(attempt, text),
        }
    }

    async fn apply(&mut self, effects: Vec<Effect>, wiring: &Wiring) -> Result<()> {
        let mut pending: VecDeque<Effect> = effects.into();
        while let Some(effect) = pending.pop_front() {
            match effect {
                Effect::Open { attempt, url } => {
                    if let Some(old) = self.transport.take() {
                        old.close(NORMAL_CLOSURE, SUPERSEDED_REASON);
                    }
                    self.transport = Some(Transport::spawn(attempt, url, wiring.transport_tx.clone()));
                }
                Effect::Send { attempt, text } => {
                    let result = match &self.transport {
                        Some(transport) if transport.attempt() == attempt => transport.send(text),
                        _ => Err(text),
                    };
                    if let Err(text) = result {
                        warn!(%attempt, "transport gone, requeueing command");
                        pending.extend(self.manager.on_send_failed(attempt, text));
                    }
                }
                Effect::Close {
                    attempt,
                    code,
                    reason,
                } => {
                    if let Some(transport) = &self.transport
                        && transport.attempt() == attempt
                    {
                        transport.close(code, reason);
                    }
                }
                Effect::ArmTimer { delay } => {
                    self.timer.arm(delay, wiring.timer_tx.clone());
                }
                Effect::CancelTimer => self.timer.cancel(),
                Effect::Status(state) => self.emit(ConsoleEvent::Status(state)).await?,
                Effect::InputEnabled(enabled) => self.emit(ConsoleEvent::InputEnabled(enabled)).await?,
                Effect::Notice(text) => self.emit(ConsoleEvent::Notice(text)).await?,
                Effect::Deliver(text) => self.emit(ConsoleEvent::Output(text)).await?,
            }
        }
        Ok(())
    }

    /// Tear down and give an open connection a moment to finish its close
    /// handshake. The UI may already be gone, so nothing is reported.
    async fn shutdown(
        &mut self,
        wiring: &Wiring,
        transport_rx: &mut mpsc::Receiver<(AttemptId, TransportEvent)>,
    ) {
        let effects = self.manager.teardown();
        let closing = effects.iter().any(|e| matches!(e, Effect::Close { .. }));
        if let Err(err) = self.apply(effects, wiring).await {
            debug!(error = %err, "teardown effects not delivered");
        }
        if let Some(transport) = self.transport.take() {
            if closing {
                let attempt = transport.attempt();
                let wait = async {
                    while let Some((from, event)) = transport_rx.recv().await {
                        if from == attempt && matches!(event, TransportEvent::Closed { .. }) {
                            return;
                        }
                    }
                };
                if tokio::time::timeout(CLOSE_GRACE, wait).await.is_err() {
                    debug!(%attempt, "close handshake timed out");
                }
            }
            transport.abort();
        }
        info!("console runtime stopped");
    }

    async fn emit_theme(&self) -> Result<()> {
        self.emit(ConsoleEvent::Theme(self.theme.root().clone())).await
    }

    async fn emit(&self, event: ConsoleEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .await
            .map_err(|_| RuntimeError::ChannelClosed)
    }
}
