// ============================================================================
// dcprip-cli/src/progress.rs
// ============================================================================
//
// PROGRESS REPORTING: indicatif progress bar for channel remaps
//
// The core emits remap events through its EventDispatcher; this handler
// turns them into a progress bar on stderr. indicatif hides the bar when
// stderr is not a terminal.
//
// AI-ASSISTANT-INFO: CLI-specific progress reporting

// ---- External crate imports ----
use dcprip_core::events::{Event, EventHandler};
use indicatif::{ProgressBar, ProgressStyle};

// ---- Standard library imports ----
use std::sync::Mutex;
use std::time::Duration;

const BAR_TEMPLATE: &str =
    "{spinner:.green} {msg} [{bar:40.cyan/blue}] {percent}% ({eta})";

/// Draws a progress bar for each remap.
#[derive(Default)]
pub struct RemapProgressHandler {
    bar: Mutex<Option<ProgressBar>>,
}

impl RemapProgressHandler {
    pub fn new() -> Self {
        Self::default()
    }

    fn create_bar(total_frames: u64, message: String) -> ProgressBar {
        let bar = ProgressBar::new(total_frames);
        if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
            bar.set_style(style.progress_chars("█▓▒░ "));
        }
        bar.set_message(message);
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    }
}

impl EventHandler for RemapProgressHandler {
    fn handle(&self, event: &Event) {
        let Ok(mut bar) = self.bar.lock() else {
            return;
        };
        match event {
            Event::RemapStarted {
                strategy,
                input_channels,
                output_channels,
                total_frames,
                ..
            } => {
                let message = format!(
                    "{} ({} -> {} ch)",
                    strategy, input_channels, output_channels
                );
                *bar = Some(Self::create_bar(*total_frames, message));
            }
            Event::RemapProgress { frames_done, .. } => {
                if let Some(bar) = bar.as_ref() {
                    bar.set_position(*frames_done);
                }
            }
            Event::RemapComplete { .. } => {
                if let Some(bar) = bar.take() {
                    bar.finish_and_clear();
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_follows_remap_events() {
        let handler = RemapProgressHandler::new();
        handler.handle(&Event::RemapStarted {
            input_file: "in.wav".to_string(),
            strategy: "surround".to_string(),
            input_channels: 12,
            output_channels: 8,
            total_frames: 100,
        });
        handler.handle(&Event::RemapProgress {
            frames_done: 40,
            total_frames: 100,
        });
        assert_eq!(
            handler.bar.lock().unwrap().as_ref().map(ProgressBar::position),
            Some(40)
        );

        handler.handle(&Event::RemapComplete {
            output_file: "out.wav".to_string(),
            frames: 100,
            elapsed: Duration::from_secs(1),
        });
        assert!(handler.bar.lock().unwrap().is_none());
    }
}
