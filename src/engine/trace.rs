//! engine::trace
//!
//! Caller-supplied sink for the human-readable synchronization trace.
//!
//! Trace lines are an observable side effect, not part of the correctness
//! contract. The same events also go to `tracing` for structured logs.

/// Receiver of trace lines.
pub trait LogSink {
    /// Accept one line of text (no trailing newline).
    fn line(&mut self, line: &str);
}

impl LogSink for Vec<String> {
    fn line(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    fn line(&mut self, _line: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_collects_lines() {
        let mut sink: Vec<String> = Vec::new();
        sink.line("one");
        sink.line("two");
        assert_eq!(sink, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn null_sink_accepts_lines() {
        let mut sink = NullSink;
        sink.line("ignored");
    }
}
