//! Preview frame handlers.

use iced::widget::image;
use iced::Task;

use gif_core::preview::{extract_preview, PreviewFrame};
use gif_core::time::parse_time;

use super::dialogs;
use crate::app::{App, Message};
use crate::theme::preview;

impl App {
    /// Extract the frame at the start time.
    pub fn start_preview(&mut self) -> Task<Message> {
        let Some(input) = self.input_path.clone() else {
            return dialogs::warning("No file", "Please choose a video file first.");
        };
        let at = match parse_time(&self.form.start) {
            Ok(at) => at,
            Err(e) => return dialogs::warning("Invalid start", &format!("Start time is invalid: {}", e)),
        };
        if self.is_previewing {
            return Task::none();
        }

        self.is_previewing = true;
        self.append_log(&format!("Extracting frame at {} ...", at));

        let tools = self.config.settings().tools.clone();
        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || {
                    extract_preview(&tools, &input, at, preview::WIDTH, preview::HEIGHT)
                })
                .await
                .map_err(|e| e.to_string())
                .and_then(|r| r.map_err(|e| e.to_string()))
            },
            Message::PreviewLoaded,
        )
    }

    pub fn handle_preview_loaded(&mut self, result: Result<PreviewFrame, String>) {
        self.is_previewing = false;
        match result {
            Ok(frame) => {
                self.preview = Some(image::Handle::from_rgba(
                    frame.width,
                    frame.height,
                    frame.rgba,
                ));
                self.append_log("Preview displayed.");
            }
            Err(e) => {
                tracing::warn!("Preview failed: {}", e);
                self.append_log(&format!("Preview failed: {}", e));
            }
        }
    }
}
