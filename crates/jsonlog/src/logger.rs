//! The log sink and its severity levels.

use std::backtrace::Backtrace;
use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Log severity, ordered `Info < Error < Fatal < Off`.
///
/// `Off` is a threshold-only value: no entry is ever written at it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Info,
    Error,
    Fatal,
    Off,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
            Level::Off => "",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level {0:?} (expected info, error, fatal or off)")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Level::Info),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            "off" => Ok(Level::Off),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// One line on the wire.
#[derive(Serialize)]
struct Entry<'a> {
    level: &'static str,
    time: String,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<&'a HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<String>,
}

/// Leveled JSON line logger.
///
/// Writes one JSON object per line to the wrapped writer. The writer sits
/// behind a mutex so concurrent callers cannot interleave lines. Entries
/// below `min_level` are dropped before any formatting happens.
pub struct Logger {
    out: Mutex<Box<dyn Write + Send>>,
    min_level: Level,
}

impl Logger {
    pub fn new(out: impl Write + Send + 'static, min_level: Level) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
            min_level,
        }
    }

    /// The configured threshold.
    pub fn min_level(&self) -> Level {
        self.min_level
    }

    pub fn print_info(&self, message: &str, properties: Option<HashMap<String, String>>) {
        self.print(Level::Info, message, properties);
    }

    pub fn print_error(&self, err: &dyn std::error::Error, properties: Option<HashMap<String, String>>) {
        self.print(Level::Error, &err.to_string(), properties);
    }

    /// Logs at fatal severity, then terminates the process with exit code 1.
    pub fn print_fatal(&self, err: &dyn std::error::Error, properties: Option<HashMap<String, String>>) -> ! {
        self.print(Level::Fatal, &err.to_string(), properties);
        std::process::exit(1);
    }

    fn print(&self, level: Level, message: &str, properties: Option<HashMap<String, String>>) {
        if level < self.min_level {
            return;
        }

        let entry = Entry {
            level: level.as_str(),
            time: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            message,
            properties: properties.as_ref(),
            trace: (level >= Level::Error).then(|| Backtrace::force_capture().to_string()),
        };

        // Fall back to a plain line rather than losing the entry.
        let line = serde_json::to_string(&entry).unwrap_or_else(|err| {
            format!("{}: unable to marshal log message: {}", Level::Error.as_str(), err)
        });

        // A poisoned lock still holds a usable writer.
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writeln!(out, "{line}");
        let _ = out.flush();
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io;
    use std::sync::Arc;

    /// Writer the test can keep a handle on after handing it to the logger.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> Vec<u8> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn level_strings() {
        assert_eq!(Level::Info.as_str(), "INFO");
        assert_eq!(Level::Error.as_str(), "ERROR");
        assert_eq!(Level::Fatal.as_str(), "FATAL");
        assert_eq!(Level::Off.as_str(), "");
    }

    #[test]
    fn level_parses_from_flag_values() {
        assert_eq!("info".parse::<Level>(), Ok(Level::Info));
        assert_eq!("ERROR".parse::<Level>(), Ok(Level::Error));
        assert_eq!("fatal".parse::<Level>(), Ok(Level::Fatal));
        assert_eq!("off".parse::<Level>(), Ok(Level::Off));
        assert!("debug".parse::<Level>().is_err());
    }

    #[test]
    fn print_info_writes_one_json_line() {
        let buf = SharedBuf::default();
        let logger = Logger::new(buf.clone(), Level::Info);

        logger.print_info(
            "test message",
            Some(HashMap::from([("key".to_string(), "value".to_string())])),
        );

        let contents = buf.contents();
        let line = std::str::from_utf8(&contents).unwrap();
        assert_eq!(line.lines().count(), 1);

        let entry: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(entry["level"], "INFO");
        assert_eq!(entry["message"], "test message");
        assert_eq!(entry["properties"]["key"], "value");
        assert!(entry.get("trace").is_none());

        let time = entry["time"].as_str().unwrap();
        chrono::DateTime::parse_from_rfc3339(time).expect("time must be RFC 3339");
    }

    #[test]
    fn print_error_uses_error_display_and_captures_trace() {
        let buf = SharedBuf::default();
        let logger = Logger::new(buf.clone(), Level::Error);

        let err = io::Error::other("disk on fire");
        logger.print_error(&err, None);

        let contents = buf.contents();
        let entry: serde_json::Value = serde_json::from_slice(&contents).unwrap();
        assert_eq!(entry["level"], "ERROR");
        assert_eq!(entry["message"], "disk on fire");
        assert!(entry.get("properties").is_none());
        assert!(entry["trace"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[test]
    fn entries_below_threshold_write_nothing() {
        let buf = SharedBuf::default();
        let logger = Logger::new(buf.clone(), Level::Error);

        logger.print_info("this should not appear", None);
        assert!(buf.contents().is_empty());

        let err = io::Error::other("boom");
        logger.print_error(&err, None);

        let contents = buf.contents();
        let line = std::str::from_utf8(&contents).unwrap();
        assert_eq!(line.lines().count(), 1);
        assert!(line.contains(r#""level":"ERROR""#));
    }

    #[test]
    fn off_threshold_suppresses_everything() {
        let buf = SharedBuf::default();
        let logger = Logger::new(buf.clone(), Level::Off);

        logger.print_info("nope", None);
        let err = io::Error::other("nope");
        logger.print_error(&err, None);

        assert!(buf.contents().is_empty());
    }
}
