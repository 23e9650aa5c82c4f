//! Cloudflag Logging
//!
//! Structured logging for the cloudflag crates, configured through
//! `CLOUDFLAG_*` environment variables, plus the [`Logger`] capability that
//! services accept as an optional collaborator.
//!
//! # Usage
//!
//! ```rust
//! use cloudflag_log::{debug, error, info};
//!
//! debug!("Creating evaluation client");
//! info!("Flag service ready");
//! error!(target: "cloudflag::service", "Failed to evaluate {}", "new-ui");
//! ```
//!
//! Injecting a logger into a component:
//!
//! ```rust
//! use cloudflag_log::{ConsoleLogger, Logger, SharedLogger};
//! use std::sync::Arc;
//!
//! let logger: SharedLogger = Arc::new(ConsoleLogger::new("my_app"));
//! logger.error("Something went wrong");
//! ```
//!
//! # Environment Variables
//!
//! - `CLOUDFLAG_DEBUG=1` - Enable debug logging
//! - `CLOUDFLAG_LOG_LEVEL=trace|debug|info|warn|error|off` - Minimum level
//! - `CLOUDFLAG_LOG_FORMAT=pretty|compact|json` - Output format
//! - `CLOUDFLAG_LOG_TIMESTAMPS=1|0` - Include timestamps

mod logger;

pub use logger::{ConsoleLogger, LogFacade, Logger, SharedLogger};

#[cfg(feature = "tracing")]
pub use logger::TracingLogger;

use once_cell::sync::Lazy;
use std::env;
use std::io::Write;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

// ============================================================================
// Log Levels
// ============================================================================

/// Severity of a log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    /// Disables output entirely.
    Off = 5,
}

impl Level {
    /// Upper-case level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            _ => Level::Off,
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "off" | "none" => Ok(Level::Off),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for log lines written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human readable, full timestamp and target
    Pretty,
    /// Single letter level, short timestamp
    Compact,
    /// One JSON object per line
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Format::Pretty),
            "compact" => Ok(Format::Compact),
            "json" => Ok(Format::Json),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

// ============================================================================
// Global Configuration
// ============================================================================

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);

static CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::from_env);

/// Logging configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub debug: bool,
    pub level: Level,
    pub format: Format,
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Info,
            format: Format::Json,
            timestamps: true,
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

impl LogConfig {
    /// Build the configuration from `CLOUDFLAG_*` variables and publish the
    /// resulting level to the global filter.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let debug = env_flag("CLOUDFLAG_DEBUG").unwrap_or(defaults.debug);

        let level = env::var("CLOUDFLAG_LOG_LEVEL")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(if debug { Level::Debug } else { defaults.level });

        let format = env::var("CLOUDFLAG_LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.format);

        let timestamps = env_flag("CLOUDFLAG_LOG_TIMESTAMPS").unwrap_or(defaults.timestamps);

        DEBUG_ENABLED.store(debug, Ordering::SeqCst);
        LOG_LEVEL.store(level as u8, Ordering::SeqCst);

        Self {
            debug,
            level,
            format,
            timestamps,
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Force configuration loading. Happens implicitly on first emit.
pub fn init() {
    Lazy::force(&CONFIG);
}

#[inline]
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

pub fn current_level() -> Level {
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Change the minimum level at runtime.
pub fn set_level(level: Level) {
    init();
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Toggle debug mode at runtime. Enabling it lowers the level to `Debug`.
pub fn set_debug(enabled: bool) {
    init();
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    if enabled && current_level() > Level::Debug {
        LOG_LEVEL.store(Level::Debug as u8, Ordering::SeqCst);
    }
}

pub fn config() -> &'static LogConfig {
    &CONFIG
}

// ============================================================================
// Log Output
// ============================================================================

/// Write one log line to stderr in the configured format.
#[doc(hidden)]
pub fn emit(level: Level, target: &str, message: &str) {
    let config = config();
    if !is_level_enabled(level) {
        return;
    }

    let line = render(config, level, target, message);
    let _ = writeln!(std::io::stderr().lock(), "{}", line);
}

/// Render a log line without writing it.
pub fn render(config: &LogConfig, level: Level, target: &str, message: &str) -> String {
    match config.format {
        Format::Pretty => {
            let mut line = String::new();
            if config.timestamps {
                line.push_str(&chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f ").to_string());
            }
            line.push_str(&format!("{:5} ", level.as_str()));
            if !target.is_empty() {
                line.push_str(&format!("[{}] ", target));
            }
            line.push_str(message);
            line
        }
        Format::Compact => {
            let mut line = String::new();
            if config.timestamps {
                line.push_str(&chrono::Local::now().format("%H:%M:%S ").to_string());
            }
            line.push(level.as_str().chars().next().unwrap_or('?'));
            line.push(' ');
            if !target.is_empty() {
                line.push_str(target);
                line.push_str(": ");
            }
            line.push_str(message);
            line
        }
        Format::Json => render_json(level, target, message),
    }
}

#[cfg(feature = "json")]
fn render_json(level: Level, target: &str, message: &str) -> String {
    #[derive(serde::Serialize)]
    struct Entry<'a> {
        timestamp: String,
        level: &'a str,
        target: &'a str,
        message: &'a str,
    }

    let entry = Entry {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: level.as_str(),
        target,
        message,
    };

    serde_json::to_string(&entry).unwrap_or_else(|_| message.to_string())
}

#[cfg(not(feature = "json"))]
fn render_json(level: Level, target: &str, message: &str) -> String {
    format!(
        r#"{{"timestamp":"{}","level":"{}","target":"{}","message":"{}"}}"#,
        chrono::Utc::now().to_rfc3339(),
        level.as_str(),
        target.escape_default(),
        message.escape_default()
    )
}

// ============================================================================
// Macros
// ============================================================================

#[macro_export]
macro_rules! trace {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Trace) {
            $crate::emit($crate::Level::Trace, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::trace!(target: module_path!(), $($arg)+)
    };
}

/// Log a debug message. Enabled by `CLOUDFLAG_DEBUG=1` or a debug level.
#[macro_export]
macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_debug_enabled() || $crate::is_level_enabled($crate::Level::Debug) {
            $crate::emit($crate::Level::Debug, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::debug!(target: module_path!(), $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Info) {
            $crate::emit($crate::Level::Info, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::info!(target: module_path!(), $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Warn) {
            $crate::emit($crate::Level::Warn, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::warn!(target: module_path!(), $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Error) {
            $crate::emit($crate::Level::Error, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        $crate::error!(target: module_path!(), $($arg)+)
    };
}

// ============================================================================
// Tracing Integration
// ============================================================================

#[cfg(feature = "tracing")]
pub mod tracing_compat {
    //! Subscriber honouring the `CLOUDFLAG_*` level when `RUST_LOG` is unset.

    use super::*;

    pub fn subscriber() -> impl tracing::Subscriber {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::{EnvFilter, fmt};

        let level = config().level.as_str().to_lowercase();
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(false))
    }
}
