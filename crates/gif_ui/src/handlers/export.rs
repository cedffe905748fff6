//! Export handlers.
//!
//! The worker thread's events are forwarded into the iced runtime through
//! a stream, one `ExportProgress` message per event.

use iced::futures::channel::mpsc;
use iced::futures::{SinkExt, Stream};
use iced::Task;

use gif_core::config::ConfigSection;
use gif_core::export::{ExportEvent, ExportHandle, ExportOutcome, BUSY_MESSAGE};
use gif_core::logging::LogConfig;
use gif_core::models::InputError;

use super::dialogs;
use crate::app::{App, Message};

impl App {
    /// Validate the form and hand the export to the worker.
    pub fn start_export(&mut self) -> Task<Message> {
        if self.tools_ok == Some(false) {
            return dialogs::error(
                "ffmpeg missing",
                "ffmpeg or ffprobe not found. Install ffmpeg and try again.",
            );
        }
        if self.is_exporting() {
            self.append_log(BUSY_MESSAGE);
            return Task::none();
        }

        let resolved = match self.form.resolve(self.input_path.as_deref(), self.duration) {
            Ok(resolved) => resolved,
            Err(InputError::MissingOutput) => return self.browse_output(true),
            Err(e) => return dialogs::warning(e.title(), &e.to_string()),
        };

        if let Some(duration) = resolved.end_from_duration {
            self.form.end = format!("{:.3}", duration);
        }

        let request = resolved.request;
        let options = request.options;
        let settings = self.config.settings();
        let tools = settings.tools.clone();
        let log_config = LogConfig::from_settings(&settings.logging);

        self.append_log(&format!(
            "Starting export: {} [{} -> {}] fps={} width={} method={}",
            request.input.display(),
            request.start,
            request.end,
            options.fps,
            options
                .width
                .map_or_else(|| "source".to_string(), |w| w.to_string()),
            options.method.short_name()
        ));

        match self.worker.spawn(request, tools, log_config) {
            Ok(handle) => {
                self.pending_options = Some(options);
                Task::run(export_events(handle), Message::ExportProgress)
            }
            Err(e) => {
                self.append_log(&e.to_string());
                dialogs::error(e.title(), &e.to_string())
            }
        }
    }

    pub fn handle_export_event(&mut self, event: ExportEvent) -> Task<Message> {
        match event {
            ExportEvent::Log(line) => {
                self.append_log(&line);
                Task::none()
            }
            ExportEvent::Finished(Ok(outcome)) => self.handle_export_succeeded(outcome),
            ExportEvent::Finished(Err(message)) => {
                self.pending_options = None;
                self.append_log(&format!("Failed: {}", message));
                dialogs::error("Export failed", &message)
            }
        }
    }

    fn handle_export_succeeded(&mut self, outcome: ExportOutcome) -> Task<Message> {
        self.append_log(&format!("Success: {}", outcome.message));
        self.append_log(&format!("Output saved to: {}", outcome.output.display()));

        if let Some(options) = self.pending_options.take() {
            self.config.settings_mut().export.remember(&options);
            self.save_section(ConfigSection::Export);
        }
        if let Some(parent) = outcome.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.config.settings_mut().paths.last_output_dir = parent.to_string_lossy().into_owned();
            self.save_section(ConfigSection::Paths);
        }

        dialogs::info(
            "Export complete",
            &format!("GIF exported to:\n{}", outcome.output.display()),
        )
    }
}

/// Stream the worker's events without blocking the runtime.
fn export_events(handle: ExportHandle) -> impl Stream<Item = ExportEvent> {
    iced::stream::channel(100, move |mut output: mpsc::Sender<ExportEvent>| async move {
        let (sender, mut receiver) = tokio::sync::mpsc::unbounded_channel();

        tokio::task::spawn_blocking(move || {
            for event in handle.events() {
                if sender.send(event).is_err() {
                    break;
                }
            }
        });

        while let Some(event) = receiver.recv().await {
            if output.send(event).await.is_err() {
                break;
            }
        }
    })
}
