//! Injectable logger capability.

use crate::Level;
use std::error::Error as StdError;
use std::sync::Arc;

/// Logger collaborator accepted by services that log on their error paths.
///
/// Implementations must be cheap to share; services hold them as
/// [`SharedLogger`] and only call them when present.
pub trait Logger: Send + Sync {
    /// Record a message, optionally with the error that caused it.
    fn log(&self, level: Level, message: &str, error: Option<&(dyn StdError + 'static)>);

    fn error(&self, message: &str) {
        self.log(Level::Error, message, None);
    }

    fn error_with(&self, message: &str, error: &(dyn StdError + 'static)) {
        self.log(Level::Error, message, Some(error));
    }

    fn warn(&self, message: &str) {
        self.log(Level::Warn, message, None);
    }

    fn info(&self, message: &str) {
        self.log(Level::Info, message, None);
    }

    fn debug(&self, message: &str) {
        self.log(Level::Debug, message, None);
    }
}

pub type SharedLogger = Arc<dyn Logger>;

fn with_cause(message: &str, error: Option<&(dyn StdError + 'static)>) -> String {
    match error {
        Some(err) => format!("{}: {}", message, err),
        None => message.to_string(),
    }
}

/// Writes to stderr through the crate's own formatter, honouring the
/// `CLOUDFLAG_*` configuration.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    target: String,
}

impl ConsoleLogger {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new("cloudflag")
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: Level, message: &str, error: Option<&(dyn StdError + 'static)>) {
        crate::emit(level, &self.target, &with_cause(message, error));
    }
}

/// Forwards to the `log` crate facade, so records land in whatever backend
/// the host application installed.
#[derive(Debug, Clone)]
pub struct LogFacade {
    target: String,
}

impl LogFacade {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl Default for LogFacade {
    fn default() -> Self {
        Self::new("cloudflag")
    }
}

impl Logger for LogFacade {
    fn log(&self, level: Level, message: &str, error: Option<&(dyn StdError + 'static)>) {
        let level = match level {
            Level::Trace => log::Level::Trace,
            Level::Debug => log::Level::Debug,
            Level::Info => log::Level::Info,
            Level::Warn => log::Level::Warn,
            Level::Error => log::Level::Error,
            Level::Off => return,
        };

        log::log!(target: self.target.as_str(), level, "{}", with_cause(message, error));
    }
}

/// Emits `tracing` events under the `cloudflag` target.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

#[cfg(feature = "tracing")]
impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str, error: Option<&(dyn StdError + 'static)>) {
        let error = error.map(|e| e.to_string());
        let error = error.as_deref();
        match level {
            Level::Trace => tracing::trace!(target: "cloudflag", error, "{}", message),
            Level::Debug => tracing::debug!(target: "cloudflag", error, "{}", message),
            Level::Info => tracing::info!(target: "cloudflag", error, "{}", message),
            Level::Warn => tracing::warn!(target: "cloudflag", error, "{}", message),
            Level::Error => tracing::error!(target: "cloudflag", error, "{}", message),
            Level::Off => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Capture {
        entries: Mutex<Vec<(Level, String)>>,
    }

    impl Logger for Capture {
        fn log(&self, level: Level, message: &str, error: Option<&(dyn StdError + 'static)>) {
            self.entries
                .lock()
                .unwrap()
                .push((level, with_cause(message, error)));
        }
    }

    #[test]
    fn test_default_methods_route_levels() {
        let capture = Capture::default();
        capture.error("e");
        capture.warn("w");
        capture.info("i");
        capture.debug("d");

        let levels: Vec<Level> = capture.entries.lock().unwrap().iter().map(|e| e.0).collect();
        assert_eq!(levels, vec![Level::Error, Level::Warn, Level::Info, Level::Debug]);
    }

    #[test]
    fn test_error_with_appends_cause() {
        let capture = Capture::default();
        let cause = std::io::Error::other("socket closed");
        capture.error_with("client failed", &cause);

        let entries = capture.entries.lock().unwrap();
        assert_eq!(entries[0].1, "client failed: socket closed");
    }

    #[test]
    fn test_builtin_loggers_as_shared() {
        let loggers: Vec<SharedLogger> = vec![
            Arc::new(ConsoleLogger::default()),
            Arc::new(LogFacade::new("test")),
        ];
        for logger in loggers {
            logger.log(Level::Off, "ignored", None);
            logger.debug("below default level");
        }
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn test_tracing_logger_accepts_all_levels() {
        let logger = TracingLogger;
        logger.error_with("failed", &std::io::Error::other("cause"));
        logger.log(Level::Trace, "trace", None);
    }
}
