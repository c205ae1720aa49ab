//! Facade state: the active sink, the debug flag and replay on install
//!
//! Library code logs through [`Facade::global`] (usually via the crate-level
//! macros) without knowing which backend, if any, the host has set up. Until
//! [`Facade::install`] is called the active sink is a [`DeferredSink`].

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use super::deferred::DeferredSink;
use super::elapsed::{format_elapsed, TimeTrack};
use super::sink::Sink;

/// Line written to stdout when debug logging is switched on
pub const DEBUG_WARNING: &str = "Warning: debug logging is enabled";

#[derive(Clone)]
pub(crate) enum Active {
    /// No backend yet, messages are buffered
    Deferred(Arc<DeferredSink>),
    /// Host supplied backend
    Installed(Arc<dyn Sink>),
}

impl Active {
    fn sink(&self) -> Arc<dyn Sink> {
        match self {
            Active::Deferred(deferred) => Arc::clone(deferred) as Arc<dyn Sink>,
            Active::Installed(sink) => Arc::clone(sink),
        }
    }

    /// Whether this is still the state an install started from
    fn is(&self, deferred: Option<&Arc<DeferredSink>>) -> bool {
        match (self, deferred) {
            (Active::Deferred(current), Some(expected)) => Arc::ptr_eq(current, expected),
            (Active::Installed(_), None) => true,
            _ => false,
        }
    }
}

/// The swappable active sink.
///
/// Shared with drained deferred sinks so that a stale handle keeps following
/// whatever is installed now.
pub(crate) struct ActiveSlot {
    active: RwLock<Active>,
}

impl ActiveSlot {
    pub(crate) fn new(active: Active) -> Self {
        Self {
            active: RwLock::new(active),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Active> {
        self.active.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Active> {
        self.active.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the sink active right now
    pub(crate) fn current(&self) -> Arc<dyn Sink> {
        self.read().sink()
    }

    pub(crate) fn replace(&self, active: Active) {
        *self.write() = active;
    }
}

/// Active sink plus debug flag.
///
/// There is one process-wide instance behind [`Facade::global`]; further
/// instances can be created with [`Facade::new`] and behave identically,
/// which keeps tests away from the global one.
pub struct Facade {
    active: Arc<ActiveSlot>,
    debug_enabled: AtomicBool,
}

impl Default for Facade {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Facade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Facade")
            .field("installed", &self.deferred().is_none())
            .field("debug_enabled", &self.is_debug_enabled())
            .finish()
    }
}

impl Facade {
    /// Create a facade with a fresh deferred sink and debug disabled
    pub fn new() -> Self {
        Self {
            active: Arc::new(ActiveSlot::new(Active::Deferred(Arc::new(
                DeferredSink::new(),
            )))),
            debug_enabled: AtomicBool::new(false),
        }
    }

    /// The process-wide facade
    pub fn global() -> &'static Facade {
        static GLOBAL: OnceLock<Facade> = OnceLock::new();
        GLOBAL.get_or_init(Facade::new)
    }

    /// Get the currently active sink
    pub fn sink(&self) -> Arc<dyn Sink> {
        self.active.current()
    }

    /// Get the deferred sink, if no backend has been installed
    pub fn deferred(&self) -> Option<Arc<DeferredSink>> {
        match &*self.active.read() {
            Active::Deferred(deferred) => Some(Arc::clone(deferred)),
            Active::Installed(_) => None,
        }
    }

    /// Make `sink` the active sink and replay everything buffered so far.
    ///
    /// The buffer stays locked from before the swap until the last entry has
    /// been replayed, so anyone still logging through the old deferred sink
    /// waits for the replay and then lands in `sink` after it. The active
    /// handle itself is swapped before the replay starts: `sink` may log
    /// through this facade while it is being fed, but another thread that
    /// picks up `sink` during the replay can reach it ahead of the replayed
    /// entries. Installing over an already installed sink replays nothing.
    pub fn install(&self, sink: Arc<dyn Sink>) {
        loop {
            let deferred = self.deferred();
            let pending = deferred.as_deref().map(DeferredSink::begin_replay);

            let mut active = self.active.write();
            if !active.is(deferred.as_ref()) {
                // Raced with another install or uninstall
                continue;
            }
            *active = Active::Installed(Arc::clone(&sink));
            drop(active);

            match pending {
                Some(guard) => {
                    let replay = guard.replay(sink, Arc::downgrade(&self.active));
                    tracing::debug!(
                        replayed = replay.replayed,
                        dropped = replay.dropped,
                        "installed log sink"
                    );
                }
                None => tracing::debug!("replaced installed log sink"),
            }
            return;
        }
    }

    /// Go back to buffering into a fresh deferred sink
    pub fn uninstall(&self) {
        self.active
            .replace(Active::Deferred(Arc::new(DeferredSink::new())));
        tracing::debug!("log sink uninstalled");
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.debug_enabled.load(Ordering::Relaxed)
    }

    /// Set the debug flag; enabling it prints [`DEBUG_WARNING`] to stdout
    pub fn set_debug_enabled(&self, enabled: bool) {
        self.set_debug_enabled_to(enabled, &mut io::stdout().lock());
    }

    pub(crate) fn set_debug_enabled_to<W: Write>(&self, enabled: bool, out: &mut W) {
        self.debug_enabled.store(enabled, Ordering::Relaxed);
        if enabled {
            let _ = writeln!(out, "{}", DEBUG_WARNING);
        }
    }

    /// Log each line of `text` as its own entry.
    ///
    /// With `as_debug` the lines go out at debug severity, and only while the
    /// debug flag is on. Otherwise they go out at error severity. Lines are not
    /// trimmed, so a trailing newline produces a final empty entry.
    pub fn multi_line(&self, as_debug: bool, text: &str) {
        if as_debug && !self.is_debug_enabled() {
            return;
        }

        let sink = self.sink();
        for line in text.split('\n') {
            if as_debug {
                sink.debug(format_args!("{}", line));
            } else {
                sink.error(format_args!("{}", line));
            }
        }
    }

    /// Log `"<label> took <elapsed>"` at info severity
    pub fn time_track(&self, start: Instant, label: &str) {
        let elapsed = format_elapsed(start.elapsed());
        self.sink().info(format_args!("{} took {}", label, elapsed));
    }

    /// Start a guard that calls [`Facade::time_track`] when dropped
    pub fn track(&self, label: impl Into<String>) -> TimeTrack<'_> {
        TimeTrack::new(self, label)
    }
}
