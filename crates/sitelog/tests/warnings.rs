//! Integration tests for warning redirection.
//!
//! The handler is per thread. Every test restores the handler it replaced
//! before returning, so tests that share a thread see the default.

use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use sitelog::warnings::{self, WarningRecord, WarningRedirector};
use sitelog::{CallSiteError, Environment, FileLogger, Level, Logger};
use test_support::{SharedBuffer, log_path, temp_dir};

fn logger(level: Level, buffer: &SharedBuffer, session: Option<&str>) -> Rc<Logger> {
    Rc::new(
        Logger::builder()
            .level(level)
            .environment(Environment {
                session: session.map(str::to_owned),
                ..Environment::plain()
            })
            .writer(buffer.clone())
            .build()
            .unwrap(),
    )
}

// ============================================================================
// Forwarding Tests
// ============================================================================

/// Verifies a warning is written at its own location, regardless of level.
#[test]
fn warning_is_forwarded_at_its_location() {
    let buffer = SharedBuffer::new();
    let log = logger(Level::Critical, &buffer, None);

    {
        let _redirect = WarningRedirector::new(Rc::clone(&log));
        warnings::warn(&WarningRecord::new("slow query").at("/srv/app/db.py", 88)).unwrap();
    }

    assert_eq!(
        buffer.contents(),
        format!("WARNING: {:<28} slow query\n", "db.py:88")
    );
}

/// Verifies compiled module names are reported as their source.
#[test]
fn compiled_module_is_reported_as_source() {
    let buffer = SharedBuffer::new();
    let log = logger(Level::Debug, &buffer, None);

    WarningRedirector::scope(log, || {
        warnings::warn(&WarningRecord::new("old api").at("pkg/mod.pyc", 3)).unwrap();
    });

    assert!(buffer.contents().starts_with("WARNING: mod.py:3 "));
}

/// Verifies `warn_here` locates the warning at the caller.
#[test]
fn warn_here_uses_caller_location() {
    let buffer = SharedBuffer::new();
    let log = logger(Level::Debug, &buffer, None);
    let _redirect = WarningRedirector::new(log);

    let line = line!() + 1;
    warnings::warn_here("here").unwrap();

    assert!(
        buffer
            .contents()
            .starts_with(&format!("WARNING: warnings.rs:{line} "))
    );
}

/// Verifies warnings without a file fall back to the session name.
#[test]
fn fileless_warning_uses_session() {
    let buffer = SharedBuffer::new();
    let log = logger(Level::Debug, &buffer, Some("notebook"));
    let _redirect = WarningRedirector::new(log);

    let mut record = WarningRecord::new("cell warning");
    record.line = 2;
    warnings::warn(&record).unwrap();

    assert!(buffer.contents().starts_with("WARNING: notebook:2 "));
}

/// Verifies a warning with no location at all is reported as an error.
#[test]
fn unlocated_warning_is_an_error() {
    let buffer = SharedBuffer::new();
    let log = logger(Level::Debug, &buffer, None);
    let _redirect = WarningRedirector::new(log);

    let err = warnings::warn(&WarningRecord::new("nowhere")).unwrap_err();
    assert_eq!(err, CallSiteError::Unresolvable { line: 0 });
    assert!(buffer.is_empty());
}

/// Verifies a disabled logger drops forwarded warnings.
#[test]
fn disabled_logger_drops_warnings() {
    let buffer = SharedBuffer::new();
    let log = logger(Level::Debug, &buffer, None);
    log.disable();
    let _redirect = WarningRedirector::new(Rc::clone(&log));

    warnings::warn(&WarningRecord::new("muted").at("a.rs", 1)).unwrap();
    assert!(buffer.is_empty());
}

/// Verifies a file logger can be the redirect target.
#[test]
fn file_logger_receives_warnings() {
    let dir = temp_dir();
    let path = log_path(dir.path(), "warn.log");
    let log = Rc::new(
        FileLogger::builder()
            .path(&path)
            .include_stream(false)
            .build()
            .unwrap(),
    );

    WarningRedirector::scope(Rc::clone(&log), || {
        warnings::warn(&WarningRecord::new("to file").at("w.rs", 5)).unwrap();
    });
    drop(log);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("WARNING: w.rs:5 "));
}

// ============================================================================
// Restoration Tests
// ============================================================================

/// Verifies nested redirectors restore the outer one, then the original.
#[test]
fn nested_redirectors_restore_in_order() {
    let outer_buffer = SharedBuffer::new();
    let inner_buffer = SharedBuffer::new();
    let outer = logger(Level::Debug, &outer_buffer, None);
    let inner = logger(Level::Debug, &inner_buffer, None);
    let original = warnings::handler();

    {
        let outer_redirect = WarningRedirector::new(outer);
        let outer_handler = warnings::handler();
        {
            let inner_redirect = WarningRedirector::new(inner);
            assert!(Rc::ptr_eq(
                inner_redirect.previous_handler().unwrap(),
                &outer_handler
            ));
            warnings::warn(&WarningRecord::new("inner").at("x.rs", 1)).unwrap();
        }
        assert!(Rc::ptr_eq(&warnings::handler(), &outer_handler));
        warnings::warn(&WarningRecord::new("outer").at("x.rs", 2)).unwrap();
        assert!(Rc::ptr_eq(
            outer_redirect.previous_handler().unwrap(),
            &original
        ));
    }

    assert!(Rc::ptr_eq(&warnings::handler(), &original));
    assert!(inner_buffer.contents().contains(" inner\n"));
    assert!(!inner_buffer.contents().contains("outer"));
    assert!(outer_buffer.contents().contains(" outer\n"));
}

/// Verifies the handler is restored when the scope panics.
#[test]
fn handler_is_restored_after_panic() {
    let buffer = SharedBuffer::new();
    let log = logger(Level::Debug, &buffer, None);
    let original = warnings::handler();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        WarningRedirector::scope(log, || {
            warnings::warn(&WarningRecord::new("then panic").at("p.rs", 9)).unwrap();
            if !buffer.is_empty() {
                panic!("inside redirect");
            }
        });
    }));

    assert!(result.is_err());
    assert!(Rc::ptr_eq(&warnings::handler(), &original));
    assert!(buffer.contents().contains("then panic"));
}

/// Verifies back-to-back redirects on one thread each leave the original
/// handler in place for the next.
#[test]
fn sequential_redirects_share_a_thread() {
    let original = warnings::handler();

    for round in 0..3u32 {
        let buffer = SharedBuffer::new();
        let log = logger(Level::Debug, &buffer, None);
        {
            let redirect = WarningRedirector::new(log);
            assert!(Rc::ptr_eq(redirect.previous_handler().unwrap(), &original));
            let record = WarningRecord::new(format!("round {round}")).at("s.rs", round + 1);
            warnings::warn(&record).unwrap();
        }
        assert!(Rc::ptr_eq(&warnings::handler(), &original));
        assert_eq!(buffer.lines().len(), 1);
    }
}
