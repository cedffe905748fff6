//! Single-flight background export worker.
//!
//! At most one export runs at a time. A request made while one is in
//! flight is rejected with [`ExportError::Busy`], never queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use super::errors::{ExportError, ExportResult};
use super::run_export;
use super::types::ExportOutcome;
use crate::logging::{ExportLogger, GuiLogCallback, LogConfig};
use crate::models::ExportRequest;
use crate::tools::ToolPaths;

/// Progress of a background export.
#[derive(Debug, Clone)]
pub enum ExportEvent {
    /// A formatted log line.
    Log(String),
    /// Sent exactly once, last. Errors are already user-facing text.
    Finished(Result<ExportOutcome, String>),
}

/// Guards the single export slot.
#[derive(Debug, Clone, Default)]
pub struct ExportWorker {
    busy: Arc<AtomicBool>,
}

impl ExportWorker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an export currently holds the slot.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Take the slot without waiting.
    pub fn try_acquire(&self) -> ExportResult<ExportPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| ExportError::Busy)?;

        Ok(ExportPermit {
            busy: Arc::clone(&self.busy),
        })
    }

    /// Start `request` on a background thread.
    ///
    /// The slot is taken before the thread starts and released before the
    /// `Finished` event is sent, so a caller reacting to `Finished` can
    /// start the next export straight away.
    pub fn spawn(
        &self,
        request: ExportRequest,
        tools: ToolPaths,
        log_config: LogConfig,
    ) -> ExportResult<ExportHandle> {
        let permit = self.try_acquire()?;
        let (sender, receiver) = mpsc::channel();

        thread::Builder::new()
            .name("gif-export".to_string())
            .spawn(move || export_thread(permit, request, tools, log_config, sender))
            .map_err(|e| ExportError::setup("starting the export thread", e))?;

        Ok(ExportHandle { receiver })
    }
}

fn export_thread(
    permit: ExportPermit,
    request: ExportRequest,
    tools: ToolPaths,
    log_config: LogConfig,
    sender: Sender<ExportEvent>,
) {
    let log_sender = sender.clone();
    let callback: GuiLogCallback = Box::new(move |line| {
        let _ = log_sender.send(ExportEvent::Log(line.to_string()));
    });
    let logger = Arc::new(ExportLogger::new(log_config, Some(callback)));

    let result = run_export(&request, &tools, logger).map_err(|e| {
        tracing::warn!("Export failed: {}", e);
        e.to_string()
    });

    drop(permit);
    let _ = sender.send(ExportEvent::Finished(result));
}

/// Holds the export slot; releases it on drop.
#[derive(Debug)]
pub struct ExportPermit {
    busy: Arc<AtomicBool>,
}

impl Drop for ExportPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}

/// Receiving end of a running export.
pub struct ExportHandle {
    receiver: Receiver<ExportEvent>,
}

impl ExportHandle {
    /// Blocking iterator over all remaining events.
    pub fn events(self) -> impl Iterator<Item = ExportEvent> {
        self.receiver.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExportMethod, ExportOptions};
    use crate::time::Timecode;
    use std::path::PathBuf;

    fn bogus_request() -> ExportRequest {
        ExportRequest {
            input: PathBuf::from("/nonexistent/clip.mp4"),
            output: PathBuf::from("/nonexistent/clip.gif"),
            start: Timecode::ZERO,
            end: Timecode::from_millis(1_000),
            options: ExportOptions {
                method: ExportMethod::Palette,
                ..ExportOptions::default()
            },
        }
    }

    fn bogus_tools() -> ToolPaths {
        ToolPaths {
            ffmpeg: "/nonexistent/ffmpeg".to_string(),
            ffprobe: "/nonexistent/ffprobe".to_string(),
        }
    }

    #[test]
    fn second_acquire_is_rejected() {
        let worker = ExportWorker::new();
        let permit = worker.try_acquire().unwrap();
        assert!(worker.is_busy());

        let second = worker.try_acquire();
        assert!(matches!(second, Err(ExportError::Busy)));

        drop(permit);
        assert!(!worker.is_busy());
        assert!(worker.try_acquire().is_ok());
    }

    #[test]
    fn spawn_while_busy_is_rejected() {
        let worker = ExportWorker::new();
        let _held = worker.try_acquire().unwrap();

        let result = worker.spawn(bogus_request(), bogus_tools(), LogConfig::default());
        match result {
            Err(e) => assert_eq!(e.to_string(), "Another export is in progress. Please wait."),
            Ok(_) => panic!("export should have been rejected"),
        }
    }

    #[test]
    fn failed_export_finishes_once_and_frees_slot() {
        let worker = ExportWorker::new();
        let handle = worker
            .spawn(bogus_request(), bogus_tools(), LogConfig::default())
            .unwrap();

        let events: Vec<ExportEvent> = handle.events().collect();

        let finished: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, ExportEvent::Finished(_)))
            .collect();
        assert_eq!(finished.len(), 1);
        assert!(matches!(events.last(), Some(ExportEvent::Finished(Err(msg))) if msg.starts_with("Palette generation failed")));
        assert!(events.iter().any(|e| matches!(e, ExportEvent::Log(_))));
        assert!(!worker.is_busy());
    }

    /// ffmpeg stand-in that runs for a second, prints a diagnostic and fails.
    #[cfg(unix)]
    fn slow_failing_ffmpeg(dir: &std::path::Path) -> ToolPaths {
        use std::os::unix::fs::PermissionsExt;

        let script = dir.join("ffmpeg");
        std::fs::write(&script, "#!/bin/sh\nsleep 1\necho 'Conversion failed!' >&2\nexit 1\n")
            .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        ToolPaths {
            ffmpeg: script.to_string_lossy().into_owned(),
            ffprobe: "/nonexistent/ffprobe".to_string(),
        }
    }

    #[cfg(unix)]
    #[test]
    fn second_spawn_rejected_while_export_runs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clip.mp4");
        std::fs::write(&input, b"video").unwrap();
        let tools = slow_failing_ffmpeg(dir.path());

        let request = ExportRequest {
            input,
            output: dir.path().join("clip.gif"),
            ..bogus_request()
        };

        let worker = ExportWorker::new();
        let handle = worker
            .spawn(request.clone(), tools.clone(), LogConfig::default())
            .unwrap();
        assert!(worker.is_busy());

        let second = worker.spawn(request, tools, LogConfig::default());
        assert!(matches!(second, Err(ExportError::Busy)));

        let events: Vec<ExportEvent> = handle.events().collect();
        let finished: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                ExportEvent::Finished(result) => Some(result),
                ExportEvent::Log(_) => None,
            })
            .collect();
        assert_eq!(finished.len(), 1);
        match finished[0] {
            Err(msg) => {
                assert!(msg.starts_with("Palette generation failed"));
                assert!(msg.contains("Conversion failed!"));
            }
            Ok(_) => panic!("fake ffmpeg should fail the export"),
        }
        assert!(events.iter().any(|e| matches!(e, ExportEvent::Log(line) if line.contains("[ffmpeg/tail]"))));
        assert!(!worker.is_busy());
    }

    #[test]
    fn clones_share_the_slot() {
        let worker = ExportWorker::new();
        let clone = worker.clone();
        let _permit = worker.try_acquire().unwrap();
        assert!(clone.is_busy());
        assert!(matches!(clone.try_acquire(), Err(ExportError::Busy)));
    }
}
