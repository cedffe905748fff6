//! Media duration probing.
//!
//! ffprobe is asked for the container duration as JSON. When that fails
//! (missing ffprobe, odd container) the banner that `ffmpeg -i` prints to
//! stderr is scanned for its `Duration:` line instead.

use std::path::Path;

use serde_json::Value;

use super::runner::CommandLine;
use super::types::{ToolError, ToolPaths, ToolResult};
use crate::time::parse_time;

/// Duration of `input` in seconds.
pub fn probe_duration(paths: &ToolPaths, input: &Path) -> ToolResult<f64> {
    tracing::debug!("Probing duration: {}", input.display());

    let ffprobe = CommandLine::new(paths.ffprobe.as_str())
        .args(["-v", "error", "-show_entries", "format=duration", "-of", "json"])
        .arg(input);

    match ffprobe.run() {
        Ok(out) if out.success() => {
            if let Some(seconds) = parse_ffprobe_duration(&out.stdout) {
                return Ok(seconds);
            }
            tracing::debug!("ffprobe reported no duration, trying ffmpeg");
        }
        Ok(out) => {
            tracing::debug!(
                "ffprobe exited with {}: {}",
                out.code_or_unknown(),
                out.diagnostic()
            );
        }
        Err(e) => tracing::debug!("{}", e),
    }

    // ffmpeg exits non-zero here because no output is given; only the
    // banner matters.
    let ffmpeg = CommandLine::new(paths.ffmpeg.as_str())
        .arg("-hide_banner")
        .arg("-i")
        .arg(input);
    let out = match ffmpeg.run() {
        Ok(out) => out,
        Err(e) => {
            tracing::debug!("{}", e);
            return Err(ToolError::DurationUnavailable(input.to_path_buf()));
        }
    };

    let text = format!("{}{}", out.stdout, out.stderr);
    parse_ffmpeg_duration(&text).ok_or_else(|| ToolError::DurationUnavailable(input.to_path_buf()))
}

/// Extract `format.duration` from `ffprobe -of json` output.
pub fn parse_ffprobe_duration(json: &str) -> Option<f64> {
    let value: Value = serde_json::from_str(json).ok()?;
    let duration = value.get("format")?.get("duration")?;

    let seconds = match duration {
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Number(n) => n.as_f64()?,
        _ => return None,
    };

    valid_duration(seconds)
}

/// Extract the `Duration: HH:MM:SS.xx` value from ffmpeg's banner.
pub fn parse_ffmpeg_duration(text: &str) -> Option<f64> {
    const MARKER: &str = "Duration: ";

    let start = text.find(MARKER)? + MARKER.len();
    let rest = &text[start..];
    let end = rest.find(|c: char| c == ',' || c == '\n').unwrap_or(rest.len());

    let seconds = parse_time(&rest[..end]).ok()?.as_secs_f64();
    valid_duration(seconds)
}

fn valid_duration(seconds: f64) -> Option<f64> {
    (seconds.is_finite() && seconds > 0.0).then_some(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ffprobe_json() {
        let json = r#"{ "format": { "duration": "12.345000" } }"#;
        assert_eq!(parse_ffprobe_duration(json), Some(12.345));
    }

    #[test]
    fn ffprobe_json_without_duration() {
        assert_eq!(parse_ffprobe_duration(r#"{ "format": {} }"#), None);
        assert_eq!(parse_ffprobe_duration(r#"{ "format": { "duration": "N/A" } }"#), None);
        assert_eq!(parse_ffprobe_duration("not json"), None);
    }

    #[test]
    fn parses_ffmpeg_banner() {
        let banner = "Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'clip.mp4':\n  \
                      Duration: 00:01:02.50, start: 0.000000, bitrate: 1205 kb/s\n";
        assert_eq!(parse_ffmpeg_duration(banner), Some(62.5));
    }

    #[test]
    fn ffmpeg_banner_without_duration() {
        assert_eq!(parse_ffmpeg_duration("clip.mp4: No such file or directory"), None);
        assert_eq!(parse_ffmpeg_duration("  Duration: N/A, bitrate: N/A"), None);
    }

    #[test]
    fn missing_tools_fail_cleanly() {
        let paths = ToolPaths {
            ffmpeg: "/nonexistent/ffmpeg".to_string(),
            ffprobe: "/nonexistent/ffprobe".to_string(),
        };
        let result = probe_duration(&paths, Path::new("/nonexistent/clip.mp4"));
        assert!(matches!(result, Err(ToolError::DurationUnavailable(_))));
    }
}
