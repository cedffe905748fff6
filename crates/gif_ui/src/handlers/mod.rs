//! Message handlers for the App.
//!
//! Each file adds an `impl App` block for one area of the window.
//! Blocking work (ffprobe, ffmpeg) runs on tokio's blocking pool and comes
//! back as a message.

mod browse;
pub mod dialogs;
mod export;
mod preview;
mod tools;
