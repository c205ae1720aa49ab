//! Logging facade internals
//!
//! Provides the sink capability, the deferred buffer sink that captures early
//! diagnostics, the facade that swaps sinks and replays the buffer, and the
//! elapsed-time helper.

mod deferred;
mod elapsed;
mod facade;
mod severity;
mod sink;

pub use deferred::{BufferedEntry, DeferredSink, DEFERRED_CAPACITY, FATAL_EXIT_CODE};
pub use elapsed::{format_elapsed, TimeTrack};
pub use facade::{Facade, DEBUG_WARNING};
pub use severity::Severity;
pub use sink::{MemorySink, NullSink, Sink};
