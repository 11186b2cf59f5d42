//! Span helpers for the console runtime.

/// Span covering one connection attempt.
///
/// ```rust
/// use dmud_observability::connection_span;
///
/// let span = connection_span!(3u64, "ws://localhost:4000/ws");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! connection_span {
    ($attempt:expr, $url:expr) => {
        tracing::info_span!(
            "dmud.connection",
            connection.attempt = $attempt,
            connection.url = %$url,
            connection.clean = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Log an error and mark the current span as failed.
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = ::tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    ::tracing::error!(error = %error, "operation failed");
}
