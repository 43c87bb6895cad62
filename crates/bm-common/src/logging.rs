use std::any::Any;
use std::panic;
use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

pub const LOG_DIR_VAR: &str = "BM_LOG_DIR";
pub const LOG_BACKTRACE_VAR: &str = "BM_LOG_INCLUDE_BACKTRACE";
const DEFAULT_FILTER: &str = "info";

/// Logging options read from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// When set, logs go to `<directory>/<app>.log` with daily rotation instead of stdout.
    pub directory: Option<PathBuf>,
    /// Forward panics to the default hook as well, which prints a backtrace when enabled.
    pub include_backtrace: bool,
    /// Filter used when `RUST_LOG` is absent or invalid.
    pub default_filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            directory: None,
            include_backtrace: false,
            default_filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let directory = lookup(LOG_DIR_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let include_backtrace = lookup(LOG_BACKTRACE_VAR)
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            directory,
            include_backtrace,
            ..Self::default()
        }
    }
}

/// Route panics through `tracing::error!` so they land in the same sink as other logs.
///
/// The hook is installed once per process; later calls are ignored. With
/// `include_backtrace` the previous hook also runs, which prints the backtrace.
pub fn install_tracing_panic_hook(app_name: &'static str, settings: &LogSettings) {
    static INSTALLED: OnceLock<()> = OnceLock::new();

    let forward_to_default = settings.include_backtrace;
    INSTALLED.get_or_init(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let thread = std::thread::current();
            tracing::error!(
                application = app_name,
                thread = thread.name().unwrap_or("<unnamed>"),
                location = %describe_location(info.location()),
                panic_message = %panic_message(info.payload()),
                "panic"
            );
            if forward_to_default {
                previous(info);
            }
        }));
    });
}

fn describe_location(location: Option<&panic::Location<'_>>) -> String {
    location.map_or_else(
        || "<unknown>".to_string(),
        |loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()),
    )
}

// panic!("literal") carries &str, panic!("{x}") carries String
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "<non-string panic payload>".to_string()
    }
}

fn rotating_file_writer(app_name: &'static str, settings: &LogSettings) -> Option<BoxMakeWriter> {
    let dir = settings.directory.as_ref()?;
    if let Err(err) = std::fs::create_dir_all(dir) {
        tracing::warn!(error = %err, dir = %dir.display(), "failed to create log directory; falling back to stdout");
        return None;
    }

    let appender = tracing_appender::rolling::daily(dir, format!("{app_name}.log"));
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(guard);
    Some(BoxMakeWriter::new(non_blocking))
}

/// Initialize the global tracing subscriber.
///
/// Uses `RUST_LOG` for filtering if present, falling back to `settings.default_filter`.
/// Calling it again after a subscriber is installed is a no-op.
pub fn init_tracing_subscriber(app_name: &'static str, settings: &LogSettings) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.default_filter));
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);

    if let Some(writer) = rotating_file_writer(app_name, settings) {
        let _ = builder.with_writer(writer).try_init();
    } else {
        let _ = builder.try_init();
    }
}
