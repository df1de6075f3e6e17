/// Sink for the one summary message each run produces.
///
/// Services call exactly one of the two methods per run, from the terminal
/// matcher only.
pub trait Logger: Send + Sync {
    fn log_success(&self, text: &str);

    fn log_failure(&self, text: &str);
}

impl<L: Logger + ?Sized> Logger for std::sync::Arc<L> {
    fn log_success(&self, text: &str) {
        (**self).log_success(text);
    }

    fn log_failure(&self, text: &str) {
        (**self).log_failure(text);
    }
}

/// Forwards run summaries to `tracing` at info and warn level.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

#[cfg(feature = "tracing")]
impl Logger for TracingLogger {
    fn log_success(&self, text: &str) {
        tracing::info!(target: "step_rail::registration", "{text}");
    }

    fn log_failure(&self, text: &str) {
        tracing::warn!(target: "step_rail::registration", "{text}");
    }
}
