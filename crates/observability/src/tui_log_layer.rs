//! Layer that turns each tracing event into one line for a [LogSink].

use std::fmt::Write;

use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer};

use crate::config::LogSink;

/// Longest line handed to the sink, in characters.
const MAX_LINE_CHARS: usize = 4_000;

/// Collects `message` first-come and other fields as `key=value`.
#[derive(Default)]
struct LineVisitor {
    buf: String,
}

impl LineVisitor {
    fn separate(&mut self) {
        if !self.buf.is_empty() {
            self.buf.push(' ');
        }
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.separate();
        if field.name() == "message" {
            self.buf.push_str(value);
        } else {
            let _ = write!(self.buf, "{}={value:?}", field.name());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.separate();
        if field.name() == "message" {
            let _ = write!(self.buf, "{value:?}");
        } else {
            let _ = write!(self.buf, "{}={value:?}", field.name());
        }
    }
}

/// `[LEVEL] target: message key=value`, truncated to [MAX_LINE_CHARS].
fn format_line(level: &tracing::Level, target: &str, fields: &str) -> String {
    let line = if fields.is_empty() {
        format!("[{level}] {target}")
    } else {
        format!("[{level}] {target}: {fields}")
    };
    if line.chars().count() <= MAX_LINE_CHARS {
        return line;
    }
    let kept: String = line.chars().take(MAX_LINE_CHARS).collect();
    format!("{kept}… ({} chars)", line.chars().count())
}

#[derive(Clone)]
pub struct TuiLogLayer {
    sink: Option<LogSink>,
}

impl TuiLogLayer {
    pub fn new(sink: Option<LogSink>) -> Self {
        Self { sink }
    }
}

impl<S> Layer<S> for TuiLogLayer
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let Some(sink) = &self.sink else {
            return;
        };
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        let meta = event.metadata();
        sink(format_line(meta.level(), meta.target(), &visitor.buf));
    }
}
