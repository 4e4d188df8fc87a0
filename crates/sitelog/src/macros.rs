//! crates/sitelog/src/macros.rs
//! Formatting log macros.
//!
//! Each macro takes the logger (anything that is `AsRef<Logger>`, such as a
//! [`Logger`](crate::Logger), a [`FileLogger`](crate::FileLogger) or an
//! `Rc` of either) followed by `format!` arguments. The message is only
//! formatted when the entry will be emitted, and the call site is the
//! macro's expansion site.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_with {
    ($severity:expr, $logger:expr, $($arg:tt)+) => {{
        match &$logger {
            __sitelog_logger_ref => {
                let logger: &$crate::Logger =
                    ::core::convert::AsRef::<$crate::Logger>::as_ref(__sitelog_logger_ref);
                if logger.would_emit($severity) {
                    let site = $crate::CallSite::from_path(
                        ::core::file!(),
                        ::core::line!(),
                        logger.path_depth(),
                    );
                    logger.log_at($severity, &site, &::std::format!($($arg)+));
                }
            }
        }
    }};
}

/// Logs a formatted message at DEBUG severity.
///
/// ```
/// use sitelog::{Environment, Logger, log_debug};
///
/// let logger = Logger::builder()
///     .environment(Environment::plain())
///     .writer(std::io::sink())
///     .build()?;
/// log_debug!(logger, "{} items loaded", 3);
/// # Ok::<(), sitelog::ConfigError>(())
/// ```
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_with!($crate::Severity::Debug, $logger, $($arg)+)
    };
}

/// Logs a formatted message at INFO severity.
#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_with!($crate::Severity::Info, $logger, $($arg)+)
    };
}

/// Logs a formatted message at WARNING severity.
#[macro_export]
macro_rules! log_warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_with!($crate::Severity::Warning, $logger, $($arg)+)
    };
}

/// Logs a formatted message at ERROR severity.
#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_with!($crate::Severity::Error, $logger, $($arg)+)
    };
}

/// Logs a formatted message at CRITICAL severity.
#[macro_export]
macro_rules! log_critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_with!($crate::Severity::Critical, $logger, $($arg)+)
    };
}

/// Logs a formatted message at EXCEPTION severity.
#[macro_export]
macro_rules! log_exception {
    ($logger:expr, $($arg:tt)+) => {
        $crate::__log_with!($crate::Severity::Exception, $logger, $($arg)+)
    };
}
