//! Diagnostic output for a combine run
//!
//! The pipeline reports per-page progress and skips through a
//! `DiagnosticSink` handed to it by the caller instead of configuring a
//! global logger itself.

use chrono::{DateTime, Local};
use log::Level;
use std::sync::{Arc, Mutex};

/// Receives diagnostic records from the pipeline
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, level: Level, message: &str);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn record(&self, level: Level, message: &str) {
        (**self).record(level, message)
    }
}

/// Forwards records to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&self, level: Level, message: &str) {
        log::log!(target: "pdf_nup", level, "{}", message);
    }
}

/// Discards every record
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&self, _level: Level, _message: &str) {}
}

#[derive(Debug, Clone)]
pub struct DiagnosticEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub message: String,
}

/// Keeps the most recent records in memory
#[derive(Clone)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<DiagnosticEntry>>>,
    max_entries: usize,
}

impl MemorySink {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            max_entries,
        }
    }

    pub fn entries(&self) -> Vec<DiagnosticEntry> {
        self.lock().clone()
    }

    /// Messages recorded at `level`, oldest first
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|entry| entry.level == level)
            .map(|entry| entry.message.clone())
            .collect()
    }

    pub fn latest_message(&self) -> Option<String> {
        self.lock().last().map(|entry| entry.message.clone())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DiagnosticEntry>> {
        // A panic while holding the lock cannot leave the Vec half-updated
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, level: Level, message: &str) {
        let entry = DiagnosticEntry {
            timestamp: Local::now(),
            level,
            message: message.to_string(),
        };

        let mut entries = self.lock();
        entries.push(entry);

        // Keep only the most recent entries
        if entries.len() > self.max_entries {
            let excess = entries.len() - self.max_entries;
            entries.drain(0..excess);
        }
    }
}
