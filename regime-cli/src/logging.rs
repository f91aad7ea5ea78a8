use anyhow::{Context, Result};
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal},
    path::Path,
    sync::Mutex,
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

const DEFAULT_FILTER: &str = "info";

/// `HH:MM:SS.mmm LEVEL target: fields`, in local time.
///
/// The target is the emitting module path (`regime_core::calculations::regime`),
/// which names the crate as well as the step.
struct CliFormat;

fn level_style(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for CliFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let time = Local::now().format("%H:%M:%S%.3f");
        let level = *meta.level();

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{time}\x1b[0m {}{level:>5}\x1b[0m \x1b[36m{}\x1b[0m: ",
                level_style(level),
                meta.target()
            )?;
        } else {
            write!(writer, "{time} {level:>5} {}: ", meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Builds the level filter.
///
/// An explicit `level` wins over `RUST_LOG`; with neither, `info` is used.
/// Accepts a bare level ("warn", "debug") or any full EnvFilter directive.
pub fn make_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(level) => {
            EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))
        }
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Initializes logging. Call once at startup.
///
/// - Stderr: colored when attached to a terminal, plain when piped. Stdout
///   is left for results.
/// - File: appended to in plain text when `log_file` is given. The
///   directory must already exist.
pub fn init_logging(
    level: Option<&str>,
    log_file: Option<&Path>,
) -> Result<()> {
    let filter = make_filter(level)?;

    let file_layer = match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .event_format(CliFormat)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(CliFormat)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_log_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{name}-{}.log", std::process::id()))
    }

    #[test]
    fn explicit_level_is_accepted() {
        let filter = make_filter(Some("debug")).expect("debug is a valid level");

        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn full_directive_is_accepted() {
        assert!(make_filter(Some("warn,regime_core=trace")).is_ok());
    }

    #[test]
    fn malformed_directive_is_rejected() {
        assert!(make_filter(Some("regime_core=loud")).is_err());
    }

    #[test]
    fn unopenable_log_file_is_reported() {
        let path = Path::new("/nonexistent-dir/regime-compare.log");

        let err = init_logging(Some("info"), Some(path)).expect_err("directory does not exist");

        assert!(
            err.to_string().contains("cannot open log file"),
            "unexpected message: {err}"
        );
    }

    // The only test in this binary that installs the global subscriber.
    #[test]
    fn log_file_receives_plain_formatted_events() {
        let path = temp_log_path("regime-compare-file-layer");
        let _ = fs::remove_file(&path);

        init_logging(Some("info"), Some(&path)).expect("logging initializes");
        tracing::info!(scenario = "file-layer", "written to the log file");
        tracing::debug!("filtered out at info");

        let contents = fs::read_to_string(&path).expect("log file exists");
        let _ = fs::remove_file(&path);
        let line = contents
            .lines()
            .find(|line| line.contains("written to the log file"))
            .unwrap_or_else(|| panic!("event missing from log file: {contents:?}"));
        assert!(line.contains(" INFO regime_cli::logging::tests: "), "{line}");
        assert!(line.contains("scenario=\"file-layer\""), "{line}");
        assert!(!line.contains('\x1b'), "file output must be plain: {line}");
        assert!(!contents.contains("filtered out at info"));
    }
}
