//! ffmpeg command builders.
//!
//! Pure functions: they only assemble arguments, nothing is executed.
//! Times are passed to ffmpeg as `HH:MM:SS.mmm`; input seeking (`-ss`
//! before `-i`) keeps long videos fast to cut.

use std::path::Path;

use super::runner::CommandLine;
use crate::models::ExportRequest;
use crate::time::Timecode;

/// File name of the generated palette inside the work directory.
pub const PALETTE_FILE_NAME: &str = "palette.png";

/// Lanczos scale filter. Without a width the source width is kept;
/// height always follows the aspect ratio.
pub fn scale_filter(width: Option<u32>) -> String {
    match width {
        Some(w) => format!("scale={}:-1:flags=lanczos", w),
        None => "scale=iw:-1:flags=lanczos".to_string(),
    }
}

/// Frame-rate sampling plus scaling, shared by every encode.
fn base_filter(request: &ExportRequest) -> String {
    format!(
        "fps={},{}",
        request.options.fps,
        scale_filter(request.options.width)
    )
}

/// `-ss START -to END -i INPUT`
fn trimmed_input(ffmpeg: &str, request: &ExportRequest) -> CommandLine {
    CommandLine::new(ffmpeg)
        .arg("-ss")
        .arg(request.start.to_string())
        .arg("-to")
        .arg(request.end.to_string())
        .arg("-i")
        .arg(&request.input)
}

/// First palette pass: derive an optimal palette for the range.
pub fn palette_gen_command(ffmpeg: &str, request: &ExportRequest, palette: &Path) -> CommandLine {
    trimmed_input(ffmpeg, request)
        .arg("-vf")
        .arg(format!("{},palettegen", base_filter(request)))
        .arg("-y")
        .arg(palette)
}

/// Second palette pass: encode the range using the generated palette.
pub fn palette_use_command(ffmpeg: &str, request: &ExportRequest, palette: &Path) -> CommandLine {
    trimmed_input(ffmpeg, request)
        .arg("-i")
        .arg(palette)
        .arg("-lavfi")
        .arg(format!("{} [x]; [x][1:v] paletteuse", base_filter(request)))
        .arg("-y")
        .arg(&request.output)
}

/// Single pass without a dedicated palette.
pub fn single_step_command(ffmpeg: &str, request: &ExportRequest) -> CommandLine {
    trimmed_input(ffmpeg, request)
        .arg("-vf")
        .arg(base_filter(request))
        .arg("-y")
        .arg(&request.output)
}

/// Grab one high-quality frame at `at` into `output`.
pub fn frame_extract_command(ffmpeg: &str, input: &Path, at: Timecode, output: &Path) -> CommandLine {
    CommandLine::new(ffmpeg)
        .arg("-ss")
        .arg(at.to_string())
        .arg("-i")
        .arg(input)
        .args(["-frames:v", "1", "-q:v", "2", "-y"])
        .arg(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExportMethod, ExportOptions};
    use std::path::PathBuf;

    fn request(width: Option<u32>) -> ExportRequest {
        ExportRequest {
            input: PathBuf::from("/in/clip.mp4"),
            output: PathBuf::from("/out/clip.gif"),
            start: Timecode::from_millis(1_500),
            end: Timecode::from_millis(4_250),
            options: ExportOptions {
                fps: 15,
                width,
                method: ExportMethod::Palette,
            },
        }
    }

    #[test]
    fn scale_keeps_source_width_when_unset() {
        assert_eq!(scale_filter(None), "scale=iw:-1:flags=lanczos");
        assert_eq!(scale_filter(Some(320)), "scale=320:-1:flags=lanczos");
    }

    #[test]
    fn palette_generation_args() {
        let palette = Path::new("/tmp/work/palette.png");
        let cmd = palette_gen_command("ffmpeg", &request(Some(480)), palette);

        assert_eq!(cmd.program(), "ffmpeg");
        assert_eq!(
            cmd.args_lossy(),
            vec![
                "-ss",
                "00:00:01.500",
                "-to",
                "00:00:04.250",
                "-i",
                "/in/clip.mp4",
                "-vf",
                "fps=15,scale=480:-1:flags=lanczos,palettegen",
                "-y",
                "/tmp/work/palette.png",
            ]
        );
    }

    #[test]
    fn palette_use_args() {
        let palette = Path::new("/tmp/work/palette.png");
        let cmd = palette_use_command("ffmpeg", &request(None), palette);

        assert_eq!(
            cmd.args_lossy(),
            vec![
                "-ss",
                "00:00:01.500",
                "-to",
                "00:00:04.250",
                "-i",
                "/in/clip.mp4",
                "-i",
                "/tmp/work/palette.png",
                "-lavfi",
                "fps=15,scale=iw:-1:flags=lanczos [x]; [x][1:v] paletteuse",
                "-y",
                "/out/clip.gif",
            ]
        );
    }

    #[test]
    fn single_step_args() {
        let cmd = single_step_command("/usr/bin/ffmpeg", &request(Some(640)));

        assert_eq!(cmd.program(), "/usr/bin/ffmpeg");
        assert_eq!(
            cmd.args_lossy(),
            vec![
                "-ss",
                "00:00:01.500",
                "-to",
                "00:00:04.250",
                "-i",
                "/in/clip.mp4",
                "-vf",
                "fps=15,scale=640:-1:flags=lanczos",
                "-y",
                "/out/clip.gif",
            ]
        );
    }

    #[test]
    fn frame_extract_args() {
        let cmd = frame_extract_command(
            "ffmpeg",
            Path::new("/in/clip.mp4"),
            Timecode::from_millis(62_000),
            Path::new("/tmp/preview.jpg"),
        );

        assert_eq!(
            cmd.args_lossy(),
            vec![
                "-ss",
                "00:01:02.000",
                "-i",
                "/in/clip.mp4",
                "-frames:v",
                "1",
                "-q:v",
                "2",
                "-y",
                "/tmp/preview.jpg",
            ]
        );
    }
}
