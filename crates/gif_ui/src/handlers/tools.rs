//! Startup check for ffmpeg and ffprobe.

use iced::Task;

use gif_core::tools::check_tools;

use super::dialogs;
use crate::app::{App, Message};

impl App {
    /// Run `-version` on both tools in the background.
    pub fn check_tools(&self) -> Task<Message> {
        let tools = self.config.settings().tools.clone();

        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || check_tools(&tools))
                    .await
                    .map_err(|e| e.to_string())
                    .and_then(|result| result.map_err(|e| e.to_string()))
            },
            Message::ToolsChecked,
        )
    }

    pub fn handle_tools_checked(&mut self, result: Result<(), String>) -> Task<Message> {
        match result {
            Ok(()) => {
                self.tools_ok = Some(true);
                tracing::info!("ffmpeg and ffprobe available");
                Task::none()
            }
            Err(e) => {
                self.tools_ok = Some(false);
                self.append_log(&format!("[ERROR] {}", e));
                dialogs::error(
                    "ffmpeg not found",
                    "ffmpeg or ffprobe not found on PATH. Please install ffmpeg and ensure ffmpeg and ffprobe are available.",
                )
            }
        }
    }
}
