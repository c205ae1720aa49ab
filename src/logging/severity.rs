//! Severity of a facade log call

use serde::Serialize;

/// Severity of a log entry.
///
/// Discriminants run from the most severe (`Fatal = 0`) to the least
/// (`Debug = 3`). The facade never filters on this ordering; it only selects
/// which sink method an entry is dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum Severity {
    Fatal = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
}

impl Severity {
    /// Get the display name for this severity
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Fatal => "FATAL",
            Severity::Error => "ERROR",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Severity> for tracing::Level {
    fn from(severity: Severity) -> Self {
        match severity {
            // tracing has nothing above ERROR
            Severity::Fatal | Severity::Error => tracing::Level::ERROR,
            Severity::Info => tracing::Level::INFO,
            Severity::Debug => tracing::Level::DEBUG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_as_str() {
        assert_eq!(Severity::Fatal.as_str(), "FATAL");
        assert_eq!(Severity::Error.as_str(), "ERROR");
        assert_eq!(Severity::Info.as_str(), "INFO");
        assert_eq!(Severity::Debug.as_str(), "DEBUG");
    }

    #[test]
    fn test_severity_ordering_fatal_first() {
        assert!(Severity::Fatal < Severity::Error);
        assert!(Severity::Error < Severity::Info);
        assert!(Severity::Info < Severity::Debug);
        assert_eq!(Severity::Fatal as u8, 0);
        assert_eq!(Severity::Debug as u8, 3);
    }

    #[test]
    fn test_severity_to_tracing_level() {
        assert_eq!(tracing::Level::from(Severity::Fatal), tracing::Level::ERROR);
        assert_eq!(tracing::Level::from(Severity::Error), tracing::Level::ERROR);
        assert_eq!(tracing::Level::from(Severity::Info), tracing::Level::INFO);
        assert_eq!(tracing::Level::from(Severity::Debug), tracing::Level::DEBUG);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Info.to_string(), "INFO");
    }
}
