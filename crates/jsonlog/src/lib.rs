//! `marquee-jsonlog` — leveled JSON line logger.
//!
//! One log entry per line, each a single JSON object:
//! `{"level", "time", "message", "properties"?, "trace"?}`. Entries below the
//! configured threshold write nothing. A [`Logger`] is constructed explicitly
//! in `main` and passed to whatever needs it; there is no global sink.

pub mod logger;

pub use logger::{Level, Logger, ParseLevelError};
