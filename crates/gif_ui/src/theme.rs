//! Theme constants for Video to GIF.

use iced::Color;

/// Application colors.
pub mod colors {
    use super::Color;

    /// Preview canvas background
    pub const PREVIEW_BG: Color = Color::from_rgb(0.13, 0.13, 0.13);

    /// Log panel background
    pub const LOG_BG: Color = Color::from_rgb(0.96, 0.96, 0.96);

    pub const TEXT_ON_DARK: Color = Color::from_rgb(0.93, 0.93, 0.93);

    pub const TEXT_SECONDARY: Color = Color::from_rgb(0.45, 0.45, 0.45);

    pub const ERROR: Color = Color::from_rgb(0.70, 0.18, 0.18);

    pub const SUCCESS: Color = Color::from_rgb(0.18, 0.50, 0.18);

    pub const BORDER: Color = Color::from_rgb(0.80, 0.80, 0.80);
}

/// Spacing constants.
pub mod spacing {
    /// Extra small spacing (4px)
    pub const XS: f32 = 4.0;
    /// Small spacing (8px)
    pub const SM: f32 = 8.0;
    /// Medium spacing (12px)
    pub const MD: f32 = 12.0;
}

/// Font sizes.
pub mod font {
    pub const SM: f32 = 12.0;
    pub const NORMAL: f32 = 13.0;
}

/// Preview canvas size.
pub mod preview {
    pub const WIDTH: u32 = 320;
    pub const HEIGHT: u32 = 180;
}

/// Color for a log line, if it deserves one.
pub fn log_line_color(line: &str) -> Option<Color> {
    if line.contains("[ERROR]") || line.starts_with("Failed:") {
        Some(colors::ERROR)
    } else if line.contains("[SUCCESS]") || line.starts_with("Success:") {
        Some(colors::SUCCESS)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_convert_to_pixels() {
        let sizes: [iced::Pixels; 5] = [
            spacing::XS.into(),
            spacing::SM.into(),
            spacing::MD.into(),
            font::SM.into(),
            font::NORMAL.into(),
        ];
        assert_eq!(sizes[1], iced::Pixels(8.0));
        assert_eq!(sizes[4], iced::Pixels(13.0));
        let _padding: iced::Padding = spacing::MD.into();
    }

    #[test]
    fn colors_errors_and_successes() {
        assert_eq!(log_line_color("[12:00:00] [ERROR] boom"), Some(colors::ERROR));
        assert_eq!(log_line_color("Success: GIF created"), Some(colors::SUCCESS));
        assert_eq!(log_line_color("Selected: clip.mp4"), None);
    }
}
