//! Per-export logger with GUI callback output.
//!
//! Each export gets its own logger that:
//! - Formats lines with a timestamp and message prefix
//! - Sends them to the GUI callback (if provided) and to `tracing`
//! - Keeps a tail buffer of tool output for failure diagnosis

use std::collections::VecDeque;

use chrono::Local;
use parking_lot::Mutex;

use super::types::{GuiLogCallback, LogConfig, LogLevel, MessagePrefix};

/// Logger for a single export run.
pub struct ExportLogger {
    gui_callback: Option<GuiLogCallback>,
    config: LogConfig,
    tail_buffer: Mutex<VecDeque<String>>,
}

impl ExportLogger {
    pub fn new(config: LogConfig, gui_callback: Option<GuiLogCallback>) -> Self {
        let capacity = config.error_tail;
        Self {
            gui_callback,
            config,
            tail_buffer: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// A logger that only writes to `tracing`.
    pub fn detached() -> Self {
        Self::new(LogConfig::default(), None)
    }

    /// Log a message at the specified level.
    pub fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => tracing::error!("{}", message),
            LogLevel::Warn => tracing::warn!("{}", message),
            LogLevel::Info => tracing::info!("{}", message),
            LogLevel::Debug => tracing::debug!("{}", message),
            LogLevel::Trace => tracing::trace!("{}", message),
        }

        if level < self.config.level {
            return;
        }
        self.output(&self.format_message(message));
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, &MessagePrefix::Warning.format(message));
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, &MessagePrefix::Error.format(message));
    }

    /// Log a command line about to be executed.
    pub fn command(&self, command: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Command.format(command));
    }

    /// Log a phase marker.
    pub fn phase(&self, phase_name: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Phase.format(phase_name));
    }

    pub fn success(&self, message: &str) {
        self.log(LogLevel::Info, &MessagePrefix::Success.format(message));
    }

    /// Record output from an external tool.
    ///
    /// Lines only reach the GUI through [`show_tail`](Self::show_tail).
    pub fn output_line(&self, line: &str) {
        tracing::trace!("{}", line);

        if self.config.error_tail == 0 {
            return;
        }
        let mut buffer = self.tail_buffer.lock();
        if buffer.len() >= self.config.error_tail {
            buffer.pop_front();
        }
        buffer.push_back(line.to_string());
    }

    /// Record every line of a tool's captured output.
    pub fn output_text(&self, text: &str) {
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            self.output_line(line);
        }
    }

    /// Show the tail buffer (typically after an error).
    pub fn show_tail(&self, header: &str) {
        let buffer = self.tail_buffer.lock();
        if buffer.is_empty() {
            return;
        }

        self.output(&self.format_message(&format!("[{}/tail]", header)));
        for line in buffer.iter() {
            self.output(&self.format_message(line));
        }
    }

    pub fn clear_tail(&self) {
        self.tail_buffer.lock().clear();
    }

    fn format_message(&self, message: &str) -> String {
        if self.config.show_timestamps {
            let timestamp = Local::now().format("%H:%M:%S");
            format!("[{}] {}", timestamp, message)
        } else {
            message.to_string()
        }
    }

    fn output(&self, formatted: &str) {
        if let Some(ref callback) = self.gui_callback {
            callback(formatted);
        }
    }
}
