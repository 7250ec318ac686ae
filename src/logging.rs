//! Log output in the format NZBGet reads from script stdout
//!
//! NZBGet assigns a message kind from a bracketed prefix at the start of
//! each line: `[ERROR]`, `[WARNING]`, `[INFO]` or `[DETAIL]`. Events are
//! rendered as `[PREFIX] message key=value ...`, one per line, no colors.

use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::registry::LookupSpan;

/// Default verbosity; DEBUG events become `[DETAIL]` lines
pub const DEFAULT_FILTER: &str = "debug";

/// Event formatter producing NZBGet log lines
#[derive(Clone, Copy, Debug, Default)]
pub struct HostLogFormat;

impl HostLogFormat {
    /// Host prefix for a tracing level
    pub fn prefix(level: &Level) -> &'static str {
        match *level {
            Level::ERROR => "ERROR",
            Level::WARN => "WARNING",
            Level::INFO => "INFO",
            Level::DEBUG | Level::TRACE => "DETAIL",
        }
    }
}

impl<S, N> FormatEvent<S, N> for HostLogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "[{}] ", Self::prefix(event.metadata().level()))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Build a subscriber writing host-formatted lines to `make_writer`
pub fn subscriber<W>(filter: EnvFilter, make_writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(make_writer)
        .event_format(HostLogFormat)
        .finish()
}

/// Install the stdout subscriber as the global default
///
/// `RUST_LOG` overrides [`DEFAULT_FILTER`].
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    if let Err(e) = tracing::subscriber::set_global_default(subscriber(filter, std::io::stdout)) {
        eprintln!("failed to install logger: {e}");
    }
}
