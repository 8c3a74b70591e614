//! Tracing subscriber setup: console formatter and initialisation.
use std::fmt::Write as _;
use std::io::IsTerminal as _;

/// Target used for stage headers.
pub(super) const STAGE_TARGET: &str = "perms_migrate::stage";

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message.clear();
            write!(self.message, "{value:?}").ok();
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits converter-style
/// console output.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleFormatter {
    ansi: bool,
}

impl ConsoleFormatter {
    /// Create a formatter; `ansi` enables colour codes.
    #[must_use]
    pub const fn new(ansi: bool) -> Self {
        Self { ansi }
    }

    fn paint<'a>(&self, code: &'a str) -> &'a str {
        if self.ansi { code } else { "" }
    }
}

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let level = *metadata.level();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = &extractor.message;
        let reset = self.paint("\x1b[0m");

        match level {
            tracing::Level::ERROR => {
                writeln!(writer, "{}ERROR{reset} {msg}", self.paint("\x1b[31m"))
            }
            tracing::Level::WARN => {
                writeln!(writer, "{}WARN{reset}  {msg}", self.paint("\x1b[33m"))
            }
            tracing::Level::INFO if metadata.target() == STAGE_TARGET => writeln!(
                writer,
                "{}==>{reset} {}{msg}{reset}",
                self.paint("\x1b[1;34m"),
                self.paint("\x1b[1m")
            ),
            tracing::Level::INFO => writeln!(writer, "  {msg}"),
            _ => writeln!(writer, "  {}{msg}{reset}", self.paint("\x1b[2m")),
        }
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// All diagnostics go to stderr; `verbose` lowers the level to `DEBUG`.
/// A valid `RUST_LOG` takes precedence over both.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool) {
    use tracing_subscriber::{
        EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter::new(std::io::stderr().is_terminal()))
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}

/// Filter directive used when `RUST_LOG` is unset or invalid.
const fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}
