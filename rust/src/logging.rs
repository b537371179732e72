//! Logging macros for the layout pipeline with verbosity level control.
//!
//! Provides zero-cost logging when disabled (verbosity=0).
//! Verbosity levels:
//! - 0: SILENT
//! - 1: REJECTS (rejected or clamped entries)
//! - 2: STEPS (column and lane decisions per entry)
//! - 3: DEBUG (sweep internals, cache hits)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_REJECTS: u8 = 1;
pub const VERBOSITY_STEPS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at REJECTS level (verbosity >= 1).
///
/// Used for: entries dropped by validation, ranges clamped to the day window.
#[macro_export]
macro_rules! log_rejects {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_REJECTS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at STEPS level (verbosity >= 2).
///
/// Used for: column assignments, lane counts, per-resource summaries.
#[macro_export]
macro_rules! log_steps {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_STEPS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels_are_ordered() {
        assert!(VERBOSITY_SILENT < VERBOSITY_REJECTS);
        assert!(VERBOSITY_REJECTS < VERBOSITY_STEPS);
        assert!(VERBOSITY_STEPS < VERBOSITY_DEBUG);
    }

    #[test]
    fn test_log_macros_compile() {
        let verbosity = VERBOSITY_SILENT;
        log_rejects!(verbosity, "rejected {}", "a");
        log_steps!(verbosity, "column {}", 1);
        log_debug!(verbosity, "active {:?}", vec![1, 2]);
    }
}
