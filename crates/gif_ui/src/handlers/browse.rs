//! File browsing handlers.

use std::path::{Path, PathBuf};

use iced::Task;

use gif_core::config::ConfigSection;
use gif_core::time::format_time;
use gif_core::tools::probe_duration;

use crate::app::{App, Message};

const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "MP4", "mov", "MOV", "mkv", "MKV", "avi", "AVI", "webm", "WEBM",
];

impl App {
    /// Browse for the source video.
    pub fn browse_input(&self) -> Task<Message> {
        let start_dir = self
            .config
            .settings()
            .paths
            .last_input()
            .or_else(|| directories::UserDirs::new().map(|dirs| dirs.home_dir().to_path_buf()));

        Task::perform(
            async move {
                // "All files" first so native panels don't grey out odd extensions
                let mut dialog = rfd::AsyncFileDialog::new()
                    .set_title("Choose video file")
                    .add_filter("All files", &["*"])
                    .add_filter("Video files", VIDEO_EXTENSIONS);
                if let Some(dir) = start_dir {
                    dialog = dialog.set_directory(dir);
                }
                dialog.pick_file().await.map(|f| f.path().to_path_buf())
            },
            Message::InputSelected,
        )
    }

    /// Handle input selected: remember it and probe its duration.
    pub fn handle_input_selected(&mut self, path: Option<PathBuf>) -> Task<Message> {
        let Some(path) = path else {
            return Task::none();
        };

        self.append_log(&format!("Selected: {}", path.display()));
        self.input_path = Some(path.clone());
        self.duration = None;
        self.preview = None;

        if let Some(parent) = path.parent() {
            self.config.settings_mut().paths.last_input_dir = parent.to_string_lossy().into_owned();
            self.save_section(ConfigSection::Paths);
        }

        let tools = self.config.settings().tools.clone();
        Task::perform(
            async move {
                let probe_path = path.clone();
                let result = tokio::task::spawn_blocking(move || probe_duration(&tools, &probe_path))
                    .await
                    .map_err(|e| e.to_string())
                    .and_then(|r| r.map_err(|e| e.to_string()));
                (path, result)
            },
            |(path, result)| Message::DurationProbed(path, result),
        )
    }

    /// Handle the probed duration of the current input.
    pub fn handle_duration_probed(&mut self, path: PathBuf, result: Result<f64, String>) {
        // A newer selection replaced this one while probing
        if self.input_path.as_deref() != Some(path.as_path()) {
            return;
        }

        match result {
            Ok(duration) => {
                self.duration = Some(duration);
                self.append_log(&format!("Duration: {:.2} seconds", duration));
                if self.form.end.trim().is_empty() {
                    self.form.end = format!("{:.3}", duration);
                }
            }
            Err(e) => {
                tracing::warn!("{}", e);
                self.duration = None;
                self.append_log("Duration: unknown");
            }
        }
    }

    /// Duration label text.
    pub fn duration_label(&self) -> String {
        match self.duration {
            Some(d) => format!("{} ({:.2} s)", format_time(d), d),
            None => "Unknown".to_string(),
        }
    }

    /// Browse for the output GIF.
    ///
    /// With `then_export` set, the export starts once a file is chosen.
    pub fn browse_output(&self, then_export: bool) -> Task<Message> {
        let file_name = self.input_path.as_deref().and_then(suggested_output_name);
        let start_dir = self.config.settings().paths.last_output().or_else(|| {
            self.input_path
                .as_deref()
                .and_then(Path::parent)
                .map(Path::to_path_buf)
        });

        Task::perform(
            async move {
                let mut dialog = rfd::AsyncFileDialog::new()
                    .set_title("Choose output GIF")
                    .add_filter("GIF", &["gif"]);
                if let Some(dir) = start_dir {
                    dialog = dialog.set_directory(dir);
                }
                if let Some(name) = file_name {
                    dialog = dialog.set_file_name(name);
                }
                dialog.save_file().await.map(|f| with_gif_extension(f.path()))
            },
            move |path| Message::OutputSelected(path, then_export),
        )
    }

    /// Handle output selected from the save dialog.
    pub fn handle_output_selected(&mut self, path: Option<PathBuf>, then_export: bool) -> Task<Message> {
        let Some(path) = path else {
            return Task::none();
        };

        self.form.output = path.to_string_lossy().into_owned();
        self.append_log(&format!("Output set: {}", path.display()));

        if then_export {
            self.start_export()
        } else {
            Task::none()
        }
    }
}

/// `<input stem>.gif`.
fn suggested_output_name(input: &Path) -> Option<String> {
    input
        .file_stem()
        .map(|stem| format!("{}.gif", stem.to_string_lossy()))
}

/// Add `.gif` when the dialog returned a name without an extension.
fn with_gif_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("gif")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_stem_with_gif_extension() {
        assert_eq!(
            suggested_output_name(Path::new("/videos/holiday.clip.mp4")),
            Some("holiday.clip.gif".to_string())
        );
        assert_eq!(suggested_output_name(Path::new("/")), None);
    }

    #[test]
    fn adds_missing_extension() {
        assert_eq!(with_gif_extension(Path::new("/tmp/out")), PathBuf::from("/tmp/out.gif"));
        assert_eq!(with_gif_extension(Path::new("/tmp/out.gif")), PathBuf::from("/tmp/out.gif"));
    }
}
