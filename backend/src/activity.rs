use chrono::Local;
use std::fmt;
use std::sync::Mutex;

/// Number of entries returned by [`ActivityLog::recent`].
pub const RECENT_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Info => "INFO",
            LogLevel::Success => "SUCCESS",
            LogLevel::Error => "ERROR",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub timestamp: String,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} - {}", self.level, self.timestamp, self.message)
    }
}

/// Append-only operator log, owned by one manager for its lifetime.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, level: LogLevel, message: impl Into<String>) {
        let entry = LogEntry {
            level,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            message: message.into(),
        };

        match level {
            LogLevel::Error => tracing::error!("{}", entry),
            LogLevel::Info | LogLevel::Success => tracing::info!("{}", entry),
        }

        self.lock().push(entry);
    }

    /// The last [`RECENT_LIMIT`] lines, oldest first.
    pub fn recent(&self) -> Vec<String> {
        let entries = self.lock();
        let start = entries.len().saturating_sub(RECENT_LIMIT);
        entries[start..].iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogEntry>> {
        // a panic mid-push cannot leave the vector inconsistent
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
