use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use parking_lot::Mutex;

/// Log verbosity levels, numbered as in the config file
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Nothing = 0,
    User = 1,
    Error = 2,
    #[default]
    Warning = 3,
    Info = 4,
    Debug = 5,
    All = 6,
}

impl LogLevel {
    /// Create a LogLevel from an integer
    pub fn from_i32(level: i32) -> Self {
        match level {
            i32::MIN..=0 => LogLevel::Nothing,
            1 => LogLevel::User,
            2 => LogLevel::Error,
            3 => LogLevel::Warning,
            4 => LogLevel::Info,
            5 => LogLevel::Debug,
            _ => LogLevel::All,
        }
    }

    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name.trim().to_lowercase().as_str() {
            "nothing" | "none" | "off" => LogLevel::Nothing,
            "user" => LogLevel::User,
            "error" => LogLevel::Error,
            "warning" | "warn" => LogLevel::Warning,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "all" | "trace" => LogLevel::All,
            _ => return None,
        })
    }

    /// Filter for the `log` facade. User messages are logged at error level
    /// so only `Nothing` silences them.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Nothing => log::LevelFilter::Off,
            LogLevel::User | LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::All => log::LevelFilter::Trace,
        }
    }

    fn to_log_level(self) -> Option<log::Level> {
        match self {
            LogLevel::Nothing => None,
            LogLevel::User | LogLevel::Error => Some(log::Level::Error),
            LogLevel::Warning => Some(log::Level::Warn),
            LogLevel::Info => Some(log::Level::Info),
            LogLevel::Debug => Some(log::Level::Debug),
            LogLevel::All => Some(log::Level::Trace),
        }
    }
}

/// Add a log entry at one of the application levels
pub fn log_add(level: LogLevel, message: &str) {
    if let Some(lvl) = level.to_log_level() {
        log::log!(lvl, "{}", message);
    }
}

enum Sink {
    Stderr,
    File(Mutex<File>),
}

/// Line oriented backend writing to stderr or a file
struct Logger {
    level: log::LevelFilter,
    sink: Sink,
}

impl Logger {
    fn format(record: &log::Record) -> String {
        format!("[{}] {}: {}", record.level(), record.target(), record.args())
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format(record);
        match &self.sink {
            Sink::Stderr => eprintln!("{}", line),
            Sink::File(file) => {
                // A failed log write has nowhere to be reported
                let _ = writeln!(file.lock(), "{}", line);
            }
        }
    }

    fn flush(&self) {
        if let Sink::File(file) = &self.sink {
            let _ = file.lock().flush();
        }
    }
}

/// Install the process-wide logger
///
/// Messages go to `log_file` when given, otherwise to stderr. Fails if a
/// logger is already installed or the file cannot be created.
pub fn log_init(level: LogLevel, log_file: Option<&Path>) -> Result<()> {
    let sink = match log_file {
        Some(path) => Sink::File(Mutex::new(
            File::create(path).with_context(|| format!("Failed to create log file {}", path.display()))?,
        )),
        None => Sink::Stderr,
    };
    let filter = level.to_level_filter();
    let logger = Box::new(Logger {
        level: filter,
        sink,
    });
    log::set_logger(Box::leak(logger))
        .map_err(|e| anyhow::anyhow!("Logger already initialized: {e}"))?;
    log::set_max_level(filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_i32() {
        assert_eq!(LogLevel::from_i32(0), LogLevel::Nothing);
        assert_eq!(LogLevel::from_i32(1), LogLevel::User);
        assert_eq!(LogLevel::from_i32(2), LogLevel::Error);
        assert_eq!(LogLevel::from_i32(3), LogLevel::Warning);
        assert_eq!(LogLevel::from_i32(4), LogLevel::Info);
        assert_eq!(LogLevel::from_i32(5), LogLevel::Debug);
        assert_eq!(LogLevel::from_i32(6), LogLevel::All);
    }

    #[test]
    fn test_log_level_as_i32() {
        for level in 0..=6 {
            assert_eq!(LogLevel::from_i32(level).as_i32(), level);
        }
    }

    #[test]
    fn test_log_level_out_of_range() {
        assert_eq!(LogLevel::from_i32(100), LogLevel::All);
        assert_eq!(LogLevel::from_i32(-1), LogLevel::Nothing);
    }

    #[test]
    fn test_log_level_names() {
        assert_eq!(LogLevel::from_name("WARN"), Some(LogLevel::Warning));
        assert_eq!(LogLevel::from_name("trace"), Some(LogLevel::All));
        assert_eq!(LogLevel::from_name("loud"), None);
        assert_eq!(LogLevel::default(), LogLevel::Warning);
    }

    #[test]
    fn test_level_filter() {
        assert_eq!(LogLevel::Nothing.to_level_filter(), log::LevelFilter::Off);
        assert_eq!(LogLevel::User.to_level_filter(), log::LevelFilter::Error);
        assert_eq!(LogLevel::Debug.to_level_filter(), log::LevelFilter::Debug);
        assert!(LogLevel::Info > LogLevel::Warning);
    }

    #[test]
    fn test_logger_writes_to_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let logger = Logger {
            level: log::LevelFilter::Info,
            sink: Sink::File(Mutex::new(file.reopen().unwrap())),
        };
        use log::Log;
        logger.log(
            &log::Record::builder()
                .level(log::Level::Info)
                .target("exult")
                .args(format_args!("scaled {}", 3))
                .build(),
        );
        logger.log(
            &log::Record::builder()
                .level(log::Level::Debug)
                .target("exult")
                .args(format_args!("hidden"))
                .build(),
        );
        logger.flush();
        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(text, "[INFO] exult: scaled 3\n");
    }

    #[test]
    fn test_log_init_only_once() {
        let _ = log_init(LogLevel::Nothing, None);
        let err = log_init(LogLevel::Nothing, None).unwrap_err();
        assert!(err.to_string().starts_with("Logger already initialized"));
    }

    #[test]
    fn test_log_add_without_logger() {
        log_add(LogLevel::User, "no logger installed");
        log_add(LogLevel::Nothing, "dropped");
    }
}
