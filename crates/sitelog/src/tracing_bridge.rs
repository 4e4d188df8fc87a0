//! crates/sitelog/src/tracing_bridge.rs
//! Routes `tracing` warnings through the thread's warning handler.
//!
//! [`WarningLayer`] turns every `WARN` event into a [`WarningRecord`] located
//! at the event's source file and line, so a
//! [`WarningRedirector`](crate::warnings::WarningRedirector) captures
//! `tracing::warn!` output the same way it captures [`warnings::warn`].
//! Events whose target starts with `sitelog` are skipped; they are this
//! crate's own diagnostics.

use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::warnings::{self, WarningRecord};

const OWN_TARGET: &str = "sitelog";

/// A tracing layer that forwards `WARN` events as warnings.
#[derive(Clone, Copy, Debug, Default)]
pub struct WarningLayer {
    _private: (),
}

impl WarningLayer {
    /// Creates the layer.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    fn forwards(level: &Level, target: &str) -> bool {
        *level == Level::WARN && !target.starts_with(OWN_TARGET)
    }
}

impl<S> Layer<S> for WarningLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !Self::forwards(metadata.level(), metadata.target()) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let Some(message) = visitor.message else {
            return;
        };

        let mut record = WarningRecord::new(message).with_category(metadata.target());
        if let Some(file) = metadata.file() {
            record = record.at(file, metadata.line().unwrap_or(0));
        }
        let _ = warnings::warn(&record);
    }
}

/// Visitor to extract the message from a tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Installs a global subscriber with the [`WarningLayer`].
///
/// # Panics
///
/// Panics if a global subscriber is already set.
pub fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry().with(WarningLayer::new()).init();
}

/// Installs a global subscriber with `filter` in front of the
/// [`WarningLayer`].
///
/// ```rust,ignore
/// use tracing_subscriber::EnvFilter;
///
/// sitelog::tracing_bridge::init_tracing_with_filter(EnvFilter::from_default_env());
/// ```
pub fn init_tracing_with_filter<F>(filter: F)
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(WarningLayer::new())
        .init();
}
