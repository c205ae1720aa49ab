//! Deferred buffer sink
//!
//! The sink the facade starts with. It holds on to early info, error and
//! fatal messages in a bounded FIFO until the host installs a real backend,
//! at which point the entries are replayed into it in the order they were
//! produced.

use std::collections::VecDeque;
use std::fmt::Arguments;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::facade::ActiveSlot;
use super::severity::Severity;
use super::sink::Sink;

/// Maximum number of entries a deferred sink retains
pub const DEFERRED_CAPACITY: usize = 100;

/// Exit status used when a formatted fatal message arrives before any backend
pub const FATAL_EXIT_CODE: i32 = 1;

/// A message captured before a backend was installed
#[derive(Debug, Clone, Serialize)]
pub struct BufferedEntry {
    /// When the message was captured
    pub captured_at: DateTime<Utc>,
    /// Severity the message was logged at
    pub severity: Severity,
    /// Fully formatted message
    pub message: String,
}

impl BufferedEntry {
    /// Create a new entry stamped with the current time
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            captured_at: Utc::now(),
            severity,
            message: message.into(),
        }
    }
}

/// Outcome of draining a deferred sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Replay {
    pub replayed: usize,
    pub dropped: u64,
}

struct BufferState {
    entries: VecDeque<BufferedEntry>,
    /// Entries evicted by the capacity limit
    dropped: u64,
    /// Set once drained; later writes go to whatever this slot holds
    forward: Option<Weak<ActiveSlot>>,
}

/// Default sink: null for debug and unformatted fatal, capturing otherwise.
///
/// | method        | behaviour                                        |
/// |---------------|--------------------------------------------------|
/// | `debug`       | dropped                                          |
/// | `info`        | buffered                                         |
/// | `error`       | buffered                                         |
/// | `fatal_plain` | dropped, bootstrap code may still recover        |
/// | `fatal`       | buffered, then the process exits with status 1   |
///
/// The buffer never holds more than [`DEFERRED_CAPACITY`] entries; when an
/// append overflows it, the oldest entries are cut off in one go.
///
/// Once the facade has drained this sink into a backend it is sealed, and
/// any caller still holding it is forwarded to the facade's active sink at
/// the time of each call.
pub struct DeferredSink {
    state: Mutex<BufferState>,
}

impl Default for DeferredSink {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DeferredSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("DeferredSink")
            .field("len", &state.entries.len())
            .field("dropped", &state.dropped)
            .field("sealed", &state.forward.is_some())
            .finish()
    }
}

impl DeferredSink {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BufferState {
                entries: VecDeque::with_capacity(DEFERRED_CAPACITY),
                dropped: 0,
                forward: None,
            }),
        }
    }

    // Poisoning is ignored: the buffer is always left consistent
    fn lock(&self) -> MutexGuard<'_, BufferState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the buffered entries, oldest first
    pub fn entries(&self) -> Vec<BufferedEntry> {
        self.lock().entries.iter().cloned().collect()
    }

    /// Get the number of buffered entries
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries evicted because the buffer was full
    pub fn dropped(&self) -> u64 {
        self.lock().dropped
    }

    /// Whether this sink has already been drained into a backend
    pub fn is_sealed(&self) -> bool {
        self.lock().forward.is_some()
    }

    /// Buffer a message, or forward it if this sink is sealed.
    ///
    /// Returns `true` when the message went into the buffer.
    fn record(&self, severity: Severity, args: Arguments<'_>) -> bool {
        // Formatted outside the lock, Display impls may log themselves
        let message = args.to_string();

        let mut state = self.lock();
        let forward = state.forward.clone();
        if let Some(slot) = forward {
            drop(state);
            if let Some(slot) = slot.upgrade() {
                dispatch(slot.current().as_ref(), severity, &message);
            }
            return false;
        }

        state.entries.push_back(BufferedEntry::new(severity, message));
        let overflow = state.entries.len().saturating_sub(DEFERRED_CAPACITY);
        if overflow > 0 {
            state.entries.drain(..overflow);
            state.dropped += overflow as u64;
        }
        drop(state);

        // A subscriber may feed events back into this sink
        if overflow > 0 {
            tracing::trace!(overflow, "deferred log buffer full, evicted oldest entries");
        }
        true
    }

    /// The facade's active sink, if this sink has been sealed
    fn sealed_target(&self) -> Option<Arc<dyn Sink>> {
        let forward = self.lock().forward.clone();
        forward.and_then(|slot| slot.upgrade()).map(|slot| slot.current())
    }

    /// Lock the buffer ahead of a sink swap.
    ///
    /// The lock is held until [`ReplayGuard::replay`] has finished, so no
    /// writer can slip an entry in between the swap and the drain.
    pub(crate) fn begin_replay(&self) -> ReplayGuard<'_> {
        ReplayGuard { state: self.lock() }
    }
}

/// Buffer lock held across an install
pub(crate) struct ReplayGuard<'a> {
    state: MutexGuard<'a, BufferState>,
}

impl ReplayGuard<'_> {
    /// Drain every buffered entry into `target`, then seal the buffer so
    /// later writes follow whatever `slot` holds
    pub(crate) fn replay(mut self, target: Arc<dyn Sink>, slot: Weak<ActiveSlot>) -> Replay {
        let entries = std::mem::take(&mut self.state.entries);
        let dropped = self.state.dropped;
        self.state.forward = Some(slot);

        let replayed = entries.len();
        for entry in entries {
            dispatch(target.as_ref(), entry.severity, &entry.message);
        }

        Replay { replayed, dropped }
    }
}

/// Send an already formatted message to the sink method matching `severity`
pub(crate) fn dispatch(sink: &dyn Sink, severity: Severity, message: &str) {
    match severity {
        Severity::Fatal => sink.fatal(format_args!("{}", message)),
        Severity::Error => sink.error(format_args!("{}", message)),
        Severity::Info => sink.info(format_args!("{}", message)),
        Severity::Debug => sink.debug(format_args!("{}", message)),
    }
}

impl Sink for DeferredSink {
    fn debug(&self, args: Arguments<'_>) {
        if let Some(target) = self.sealed_target() {
            target.debug(args);
        }
    }

    fn info(&self, args: Arguments<'_>) {
        self.record(Severity::Info, args);
    }

    fn error(&self, args: Arguments<'_>) {
        self.record(Severity::Error, args);
    }

    /// Buffers the message and exits the process without draining.
    fn fatal(&self, args: Arguments<'_>) {
        if self.record(Severity::Fatal, args) {
            std::process::exit(FATAL_EXIT_CODE);
        }
    }

    /// Ignored unless sealed.
    fn fatal_plain(&self, message: &str) {
        if let Some(target) = self.sealed_target() {
            target.fatal_plain(message);
        }
    }
}
