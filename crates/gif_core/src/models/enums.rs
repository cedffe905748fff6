//! Core enums used throughout the application.

use serde::{Deserialize, Serialize};

/// How the animated image is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExportMethod {
    /// Two passes: generate an optimal palette, then encode with it.
    #[default]
    #[serde(rename = "palette")]
    Palette,
    /// One pass without a dedicated palette. Faster, lower quality.
    #[serde(rename = "single")]
    SingleStep,
}

impl ExportMethod {
    /// All methods, in the order they are offered to the user.
    pub const ALL: [ExportMethod; 2] = [ExportMethod::Palette, ExportMethod::SingleStep];

    /// Label shown next to the radio button.
    pub fn label(&self) -> &'static str {
        match self {
            ExportMethod::Palette => "Palette (best)",
            ExportMethod::SingleStep => "Single-step (faster)",
        }
    }

    /// Short name used in log lines and success messages.
    pub fn short_name(&self) -> &'static str {
        match self {
            ExportMethod::Palette => "palette",
            ExportMethod::SingleStep => "single-step",
        }
    }
}

impl std::fmt::Display for ExportMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
