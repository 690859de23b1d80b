//! Transient, non-blocking notifications.
//!
//! Failures never take the console down: they are logged and queued here
//! for the presentation layer to show and auto-dismiss. The queue is
//! drained by the renderer; nothing in it blocks further operations.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

/// FIFO queue of pending notices.
#[derive(Debug, Default)]
pub struct NoticeLog {
    pending: Vec<Notice>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(%message, "console notice");
        self.pending.push(Notice {
            severity: Severity::Info,
            message,
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "console error notice");
        self.pending.push(Notice {
            severity: Severity::Error,
            message,
        });
    }

    /// Take all pending notices, oldest first.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_notices_in_order_and_clears() {
        let mut log = NoticeLog::new();
        log.info("loaded");
        log.error("save failed");

        let notices = log.drain();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].severity, Severity::Info);
        assert_eq!(notices[1].severity, Severity::Error);
        assert!(log.is_empty());
    }
}
