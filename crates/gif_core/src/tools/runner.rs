//! Subprocess execution.
//!
//! Every external call goes through [`CommandLine`], so the exact command
//! can be logged before it runs and the captured output is always returned
//! as a [`ProcessOutput`], whatever the exit code.

use std::borrow::Cow;
use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};

use super::types::{ToolError, ToolPaths, ToolResult};
use crate::models::ProcessOutput;

/// A program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<OsString>,
}

impl CommandLine {
    /// Start a command line for `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The program as configured (name or path).
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments, lossily converted for inspection.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Short tool name for error messages (`/opt/bin/ffmpeg` -> `ffmpeg`).
    pub fn tool_name(&self) -> String {
        Path::new(&self.program)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.clone())
    }

    /// Run to completion, capturing stdout and stderr.
    pub fn run(&self) -> ToolResult<ProcessOutput> {
        run_command(self)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(&arg.to_string_lossy()))?;
        }
        Ok(())
    }
}

/// Quote an argument for display in POSIX shell syntax.
fn shell_quote(arg: &str) -> Cow<'_, str> {
    let is_safe = |c: char| c.is_ascii_alphanumeric() || "_-+=.,/:@%".contains(c);

    if arg.is_empty() {
        Cow::Borrowed("''")
    } else if arg.chars().all(is_safe) {
        Cow::Borrowed(arg)
    } else {
        Cow::Owned(format!("'{}'", arg.replace('\'', "'\"'\"'")))
    }
}

/// Run a command and capture its output.
///
/// A non-zero exit is not an error here; callers decide what it means.
pub fn run_command(cmd: &CommandLine) -> ToolResult<ProcessOutput> {
    tracing::debug!("Running: {}", cmd);

    let output = Command::new(&cmd.program)
        .args(&cmd.args)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| ToolError::Spawn {
            tool: cmd.tool_name(),
            source: e,
        })?;

    let result = ProcessOutput {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    tracing::debug!(
        "{} exited with {:?} ({} bytes stderr)",
        cmd.tool_name(),
        result.exit_code,
        result.stderr.len()
    );

    Ok(result)
}

/// Check that ffmpeg and ffprobe can be started and answer `-version`.
pub fn check_tools(paths: &ToolPaths) -> ToolResult<()> {
    for (tool, path) in [("ffmpeg", &paths.ffmpeg), ("ffprobe", &paths.ffprobe)] {
        let ok = CommandLine::new(path.as_str())
            .arg("-version")
            .run()
            .map(|out| out.success())
            .unwrap_or(false);

        if !ok {
            tracing::warn!("{} unavailable at '{}'", tool, path);
            return Err(ToolError::Missing {
                tool: tool.to_string(),
                path: path.clone(),
            });
        }
    }

    tracing::info!("Found ffmpeg ({}) and ffprobe ({})", paths.ffmpeg, paths.ffprobe);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_only_when_needed() {
        let cmd = CommandLine::new("ffmpeg")
            .args(["-ss", "00:00:01.000", "-i"])
            .arg(Path::new("/videos/my clip.mp4"))
            .args(["-vf", "fps=10,scale=iw:-1:flags=lanczos [x]"]);

        assert_eq!(
            cmd.to_string(),
            "ffmpeg -ss 00:00:01.000 -i '/videos/my clip.mp4' -vf 'fps=10,scale=iw:-1:flags=lanczos [x]'"
        );
    }

    #[test]
    fn quote_escapes_single_quotes() {
        assert_eq!(shell_quote("it's"), "'it'\"'\"'s'");
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("plain"), "plain");
    }

    #[test]
    fn tool_name_strips_directories() {
        assert_eq!(CommandLine::new("/opt/ff/bin/ffmpeg").tool_name(), "ffmpeg");
        assert_eq!(CommandLine::new("ffprobe").tool_name(), "ffprobe");
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let cmd = CommandLine::new("/nonexistent/definitely-not-ffmpeg").arg("-version");
        assert!(matches!(cmd.run(), Err(ToolError::Spawn { .. })));
    }

    #[test]
    fn check_tools_reports_missing() {
        let paths = ToolPaths {
            ffmpeg: "/nonexistent/ffmpeg".to_string(),
            ffprobe: "/nonexistent/ffprobe".to_string(),
        };
        match check_tools(&paths) {
            Err(ToolError::Missing { tool, .. }) => assert_eq!(tool, "ffmpeg"),
            other => panic!("expected Missing, got {:?}", other),
        }
    }
}
