//! External program wrappers (ffmpeg, ffprobe).
//!
//! This module provides:
//! - **Runner**: blocking subprocess execution with captured output
//! - **Commands**: pure builders for every ffmpeg command line we use
//! - **Probe**: media duration lookup via ffprobe, with an ffmpeg fallback
//! - **Validation**: a `-version` check that both tools can be started
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use gif_core::tools::{check_tools, probe_duration, ToolPaths};
//!
//! let tools = ToolPaths::default();
//! check_tools(&tools)?;
//! let seconds = probe_duration(&tools, Path::new("/videos/clip.mp4"))?;
//! println!("{:.2} s", seconds);
//! # Ok::<(), gif_core::tools::ToolError>(())
//! ```

mod commands;
mod probe;
mod runner;
mod types;

pub use commands::{
    frame_extract_command, palette_gen_command, palette_use_command, scale_filter,
    single_step_command, PALETTE_FILE_NAME,
};
pub use probe::{parse_ffmpeg_duration, parse_ffprobe_duration, probe_duration};
pub use runner::{check_tools, run_command, CommandLine};
pub use types::{ToolError, ToolPaths, ToolResult};
