//! crates/sitelog/src/trace.rs
//! Formatting of errors with their backtrace and source chain.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fmt::Write as _;

use crate::{Logger, Severity};

/// Returns true for the first line of a backtrace frame, e.g. `"  3: main"`.
fn is_frame_header(line: &str) -> bool {
    let trimmed = line.trim_start();
    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && trimmed[digits..].starts_with(':')
}

/// Renders `error` as a multi-line report.
///
/// The report starts with the error's message. A captured `backtrace`
/// follows under `stack backtrace:`, cut after `limit` frames when a limit
/// is given. With `include_chain`, every error in the [`Error::source`]
/// chain is listed under `Caused by:`.
///
/// ```
/// use std::io;
/// use sitelog::format_exception;
///
/// let err = io::Error::new(io::ErrorKind::NotFound, "config.toml missing");
/// assert_eq!(format_exception(&err, None, None, true), "config.toml missing");
/// ```
pub fn format_exception(
    error: &dyn Error,
    backtrace: Option<&Backtrace>,
    limit: Option<usize>,
    include_chain: bool,
) -> String {
    let mut report = error.to_string();

    if let Some(backtrace) = backtrace {
        report.push_str("\nstack backtrace:");
        if backtrace.status() == BacktraceStatus::Captured {
            let rendered = backtrace.to_string();
            let mut frames = 0;
            for line in rendered.lines() {
                if is_frame_header(line) {
                    if limit.is_some_and(|limit| frames >= limit) {
                        break;
                    }
                    frames += 1;
                }
                report.push('\n');
                report.push_str(line);
            }
        } else {
            let _ = write!(report, "\n  {backtrace}");
        }
    }

    if include_chain {
        let mut source = error.source();
        let mut index = 0;
        while let Some(cause) = source {
            if index == 0 {
                report.push_str("\n\nCaused by:");
            }
            let _ = write!(report, "\n    {index}: {cause}");
            index += 1;
            source = cause.source();
        }
    }

    report
}

/// Logs a formatted error report at ERROR severity.
///
/// The call site is the caller of this function.
#[track_caller]
pub fn log_exception(
    logger: &Logger,
    error: &dyn Error,
    backtrace: Option<&Backtrace>,
    limit: Option<usize>,
    include_chain: bool,
) {
    if !logger.would_emit(Severity::Error) {
        return;
    }
    logger.error(&format_exception(error, backtrace, limit, include_chain));
}
