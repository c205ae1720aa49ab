//! Formatting macros over the global facade.
//!
//! Each macro fetches the active sink once and hands it the formatted
//! arguments, so a call made before any backend exists is buffered and one
//! made afterwards goes straight to the backend.

/// Log at debug severity. Dropped while no backend is installed.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::Sink::debug(&*$crate::sink(), format_args!($($arg)*))
    };
}

/// Log at info severity.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::Sink::info(&*$crate::sink(), format_args!($($arg)*))
    };
}

/// Log at error severity.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::Sink::error(&*$crate::sink(), format_args!($($arg)*))
    };
}

/// Log at fatal severity and terminate.
///
/// Before a backend is installed the message is buffered and the process
/// exits with [`FATAL_EXIT_CODE`](crate::FATAL_EXIT_CODE). Afterwards the
/// installed backend decides.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {
        $crate::Sink::fatal(&*$crate::sink(), format_args!($($arg)*))
    };
}
