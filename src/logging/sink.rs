//! Sink capability the facade dispatches into
//!
//! A sink is whatever backend the host application chooses. The facade only
//! ever talks to it through the five methods of [`Sink`].

use std::fmt::Arguments;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::severity::Severity;

/// Leveled output supplied by the host.
///
/// Messages arrive as lazily formatted [`Arguments`]; the sink decides when
/// (and whether) to render them. No method reports failure: if a backend
/// cannot write, that is its own business.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` because the facade shares the
/// installed sink between every thread that logs.
///
/// # Fatal
///
/// There are two fatal entry points. [`Sink::fatal`] carries a formatted
/// message and should terminate the process once it has been emitted.
/// [`Sink::fatal_plain`] carries an already-built message and *may*
/// terminate; callers use it during bootstrap when they can still recover,
/// which is why the deferred sink ignores it entirely.
pub trait Sink: Send + Sync {
    /// Emit at debug severity.
    fn debug(&self, args: Arguments<'_>);

    /// Emit at info severity.
    fn info(&self, args: Arguments<'_>);

    /// Emit at error severity.
    fn error(&self, args: Arguments<'_>);

    /// Emit at fatal severity, then terminate the process.
    fn fatal(&self, args: Arguments<'_>);

    /// Emit an unformatted message at fatal severity.
    fn fatal_plain(&self, message: &str) {
        self.fatal(format_args!("{}", message));
    }
}

/// A sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl Sink for NullSink {
    #[inline]
    fn debug(&self, _args: Arguments<'_>) {}

    #[inline]
    fn info(&self, _args: Arguments<'_>) {}

    #[inline]
    fn error(&self, _args: Arguments<'_>) {}

    #[inline]
    fn fatal(&self, _args: Arguments<'_>) {}

    #[inline]
    fn fatal_plain(&self, _message: &str) {}
}

/// A sink that keeps every message in memory.
///
/// Handy for tests of code that logs through the facade. It never terminates
/// the process, not even on [`Sink::fatal`].
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<(Severity, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(Severity, String)>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Everything recorded so far, oldest first
    pub fn records(&self) -> Vec<(Severity, String)> {
        self.lock().to_vec()
    }

    /// Only the messages, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|(_, m)| m).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn push(&self, severity: Severity, args: Arguments<'_>) {
        let message = args.to_string();
        self.lock().push((severity, message));
    }
}

impl Sink for MemorySink {
    fn debug(&self, args: Arguments<'_>) {
        self.push(Severity::Debug, args);
    }

    fn info(&self, args: Arguments<'_>) {
        self.push(Severity::Info, args);
    }

    fn error(&self, args: Arguments<'_>) {
        self.push(Severity::Error, args);
    }

    fn fatal(&self, args: Arguments<'_>) {
        self.push(Severity::Fatal, args);
    }
}
