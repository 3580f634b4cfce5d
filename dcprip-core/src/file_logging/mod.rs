pub mod setup;

use crate::events::{Event, EventHandler};
use crate::utils::format_duration;
use log::{debug, info, warn};
use std::sync::Mutex;

/// Percent step between two logged remap progress lines.
const PROGRESS_STEP: u64 = 10;

/// Writes events to the log, throttling remap progress to milestones.
pub struct FileLoggingHandler {
    last_logged_percent: Mutex<u64>,
}

impl Default for FileLoggingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl FileLoggingHandler {
    pub fn new() -> Self {
        Self {
            last_logged_percent: Mutex::new(0),
        }
    }

    fn reset_progress_state(&self) {
        if let Ok(mut last) = self.last_logged_percent.lock() {
            *last = 0;
        }
    }

    /// Returns true when `percent` crossed the next milestone.
    fn should_log_progress(&self, percent: u64) -> bool {
        let Ok(mut last) = self.last_logged_percent.lock() else {
            return false;
        };
        if percent >= *last + PROGRESS_STEP {
            *last = percent - percent % PROGRESS_STEP;
            true
        } else {
            false
        }
    }
}

impl EventHandler for FileLoggingHandler {
    fn handle(&self, event: &Event) {
        match event {
            Event::ScanStarted { compositions } => {
                info!("Scanning {} composition(s)", compositions);
            }

            Event::CompositionResolved { title, reels } => {
                info!("Resolved {} ({} reel(s))", title, reels);
            }

            Event::CompositionFailed { title, reason } => {
                warn!("Failed to load {}: {}", title, reason);
            }

            Event::ScanComplete { resolved, failed } => {
                info!("Scan complete: {} resolved, {} failed", resolved, failed);
            }

            Event::RemapStarted {
                input_file,
                strategy,
                input_channels,
                output_channels,
                total_frames,
            } => {
                self.reset_progress_state();
                info!(
                    "Remap of {} started: {} -> {} channels, {} frames, {}",
                    input_file, input_channels, output_channels, total_frames, strategy
                );
            }

            Event::RemapProgress {
                frames_done,
                total_frames,
            } => {
                if *total_frames == 0 {
                    return;
                }
                let percent = frames_done * 100 / total_frames;
                if self.should_log_progress(percent) {
                    debug!(
                        "Remap progress: {}% ({} of {} frames)",
                        percent, frames_done, total_frames
                    );
                }
            }

            Event::RemapComplete {
                output_file,
                frames,
                elapsed,
            } => {
                info!(
                    "Remap complete: {} ({} frames in {})",
                    output_file,
                    frames,
                    format_duration(elapsed.as_secs_f64())
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_throttled() {
        let handler = FileLoggingHandler::new();
        assert!(!handler.should_log_progress(5));
        assert!(handler.should_log_progress(12));
        assert!(!handler.should_log_progress(19));
        assert!(handler.should_log_progress(20));
        assert!(handler.should_log_progress(100));

        handler.reset_progress_state();
        assert!(handler.should_log_progress(10));
    }
}
