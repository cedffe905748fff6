//! Main application module for Video to GIF.
//!
//! Holds the window state, the message type and the `update` dispatch.
//! The handlers live in `handlers/`, the view in `pages/`.

use std::path::PathBuf;

use iced::widget::image;
use iced::{Element, Task};

use gif_core::config::{ConfigManager, ConfigSection, Settings};
use gif_core::export::{ExportEvent, ExportWorker};
use gif_core::models::{ExportForm, ExportMethod, ExportOptions};
use gif_core::preview::PreviewFrame;

/// Log view keeps at most this many lines.
const MAX_LOG_LINES: usize = 2000;

/// Initialization data for the App.
#[derive(Debug, Clone)]
pub struct AppInit {
    pub config_path: PathBuf,
    pub settings: Settings,
}

/// All possible messages the application can receive.
#[derive(Debug, Clone)]
pub enum Message {
    // Startup
    ToolsChecked(Result<(), String>),

    // Input file
    OpenInput,
    InputSelected(Option<PathBuf>),
    DurationProbed(PathBuf, Result<f64, String>),

    // Form fields
    StartChanged(String),
    EndChanged(String),
    FpsChanged(String),
    WidthChanged(String),
    MethodSelected(ExportMethod),
    OutputChanged(String),

    // Output file
    ChooseOutput,
    /// The flag is set when an export is waiting for this choice.
    OutputSelected(Option<PathBuf>, bool),

    // Preview
    PreviewFrame,
    PreviewLoaded(Result<PreviewFrame, String>),

    // Export
    Export,
    ExportProgress(ExportEvent),

    DialogClosed,
}

/// Main application state.
pub struct App {
    pub config: ConfigManager,
    pub worker: ExportWorker,

    /// `None` until the startup check has finished.
    pub tools_ok: Option<bool>,

    pub input_path: Option<PathBuf>,
    pub duration: Option<f64>,
    pub form: ExportForm,

    pub preview: Option<image::Handle>,
    pub is_previewing: bool,

    /// Options of the export in flight, remembered on success.
    pub pending_options: Option<ExportOptions>,

    pub log_lines: Vec<String>,
}

impl App {
    pub fn new(init: AppInit) -> (Self, Task<Message>) {
        let mut config = ConfigManager::new(init.config_path);
        *config.settings_mut() = init.settings;

        let form = ExportForm::from_options(&config.settings().export.to_options());

        let app = Self {
            config,
            worker: ExportWorker::new(),
            tools_ok: None,
            input_path: None,
            duration: None,
            form,
            preview: None,
            is_previewing: false,
            pending_options: None,
            log_lines: vec!["Ready.".to_string()],
        };

        let task = app.check_tools();
        (app, task)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ToolsChecked(result) => self.handle_tools_checked(result),

            Message::OpenInput => self.browse_input(),
            Message::InputSelected(path) => self.handle_input_selected(path),
            Message::DurationProbed(path, result) => {
                self.handle_duration_probed(path, result);
                Task::none()
            }

            Message::StartChanged(value) => {
                self.form.start = value;
                Task::none()
            }
            Message::EndChanged(value) => {
                self.form.end = value;
                Task::none()
            }
            Message::FpsChanged(value) => {
                self.form.fps = value;
                Task::none()
            }
            Message::WidthChanged(value) => {
                self.form.width = value;
                Task::none()
            }
            Message::MethodSelected(method) => {
                self.form.method = method;
                Task::none()
            }
            Message::OutputChanged(value) => {
                self.form.output = value;
                Task::none()
            }

            Message::ChooseOutput => self.browse_output(false),
            Message::OutputSelected(path, then_export) => {
                self.handle_output_selected(path, then_export)
            }

            Message::PreviewFrame => self.start_preview(),
            Message::PreviewLoaded(result) => {
                self.handle_preview_loaded(result);
                Task::none()
            }

            Message::Export => self.start_export(),
            Message::ExportProgress(event) => self.handle_export_event(event),

            Message::DialogClosed => Task::none(),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        crate::pages::main_window::view(self)
    }

    pub fn append_log(&mut self, message: &str) {
        self.log_lines.push(message.trim_end().to_string());
        if self.log_lines.len() > MAX_LOG_LINES {
            let excess = self.log_lines.len() - MAX_LOG_LINES;
            self.log_lines.drain(..excess);
        }
    }

    /// Write one config section, logging instead of failing.
    pub fn save_section(&mut self, section: ConfigSection) {
        if let Err(e) = self.config.update_section(section) {
            tracing::warn!("Failed to save [{}]: {}", section.table_name(), e);
        }
    }

    pub fn is_exporting(&self) -> bool {
        self.worker.is_busy()
    }
}
