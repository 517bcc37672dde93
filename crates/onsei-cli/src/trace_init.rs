use std::path::Path;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "onsei_core=info";

/// Keeps the background log writer alive; drop it last so buffered lines
/// are flushed.
#[must_use]
pub struct TraceGuard {
    #[cfg(feature = "trace")]
    _worker: Option<tracing_appender::non_blocking::WorkerGuard>,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn init_stderr() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(env_filter())
        .init();
}

/// Human-readable logs on stderr, or JSON lines in `log_dir` when given.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: Option<&Path>) -> TraceGuard {
    let Some(log_dir) = log_dir else {
        init_stderr();
        return TraceGuard { _worker: None };
    };

    let file_appender = tracing_appender::rolling::never(log_dir, "onsei-trace.jsonl");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .json()
        .with_writer(non_blocking)
        .with_target(true)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .with_env_filter(env_filter())
        .init();
    TraceGuard {
        _worker: Some(guard),
    }
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(log_dir: Option<&Path>) -> TraceGuard {
    if log_dir.is_some() {
        eprintln!("Warning: --log-dir requires the `trace` feature; logging to stderr");
    }
    init_stderr();
    TraceGuard {}
}
