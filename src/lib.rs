//! deferlog - a logging facade with late binding of the backend
//!
//! Library code logs through the macros and functions here without knowing
//! which logging backend the embedding application will pick. Until the host
//! calls [`install`], info, error and fatal messages are kept in a bounded
//! buffer (at most [`DEFERRED_CAPACITY`] entries, oldest evicted first) and
//! replayed into the backend the moment it is installed, so diagnostics from
//! early startup are not lost.
//!
//! ```
//! use std::sync::Arc;
//! use deferlog::MemorySink;
//!
//! deferlog::info!("hello {}", "world");
//! deferlog::error!("bad {}", 7);
//!
//! let backend = Arc::new(MemorySink::new());
//! deferlog::install(backend.clone());
//! assert_eq!(backend.messages(), ["hello world", "bad 7"]);
//! ```

mod macros;

pub mod config;
pub mod logging;

use std::sync::Arc;
use std::time::Instant;

pub use config::Config;
pub use logging::{
    format_elapsed, BufferedEntry, DeferredSink, Facade, MemorySink, NullSink, Severity, Sink,
    TimeTrack, DEBUG_WARNING, DEFERRED_CAPACITY, FATAL_EXIT_CODE,
};

/// Get the active sink of the global facade
pub fn sink() -> Arc<dyn Sink> {
    Facade::global().sink()
}

/// Install a backend and replay everything buffered so far into it
pub fn install(sink: Arc<dyn Sink>) {
    Facade::global().install(sink);
}

/// Drop the installed backend and start buffering again
pub fn uninstall() {
    Facade::global().uninstall();
}

pub fn is_debug_enabled() -> bool {
    Facade::global().is_debug_enabled()
}

/// Set the debug flag; enabling it prints a warning line to stdout
pub fn set_debug_enabled(enabled: bool) {
    Facade::global().set_debug_enabled(enabled);
}

/// Log each line of `text` separately, see [`Facade::multi_line`]
pub fn multi_line(as_debug: bool, text: &str) {
    Facade::global().multi_line(as_debug, text);
}

/// Log how long ago `start` was, as `"<label> took <elapsed>"`
pub fn time_track(start: Instant, label: &str) {
    Facade::global().time_track(start, label);
}

/// Start a guard that logs its lifetime through the global facade when dropped
pub fn track(label: impl Into<String>) -> TimeTrack<'static> {
    Facade::global().track(label)
}

/// Log an unformatted message at fatal severity.
///
/// Unlike [`fatal!`], this is ignored while no backend is installed.
pub fn fatal_plain(message: &str) {
    sink().fatal_plain(message);
}
