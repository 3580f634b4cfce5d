//! Progress events emitted by long-running operations.
//!
//! The core never draws anything. Batch scans and channel remaps emit
//! [`Event`]s through an [`EventDispatcher`]; front ends register handlers
//! that turn them into progress bars, log lines or JSON.

use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // Scan events
    ScanStarted {
        compositions: usize,
    },
    CompositionResolved {
        title: String,
        reels: usize,
    },
    CompositionFailed {
        title: String,
        reason: String,
    },
    ScanComplete {
        resolved: usize,
        failed: usize,
    },

    // Remap events
    RemapStarted {
        input_file: String,
        strategy: String,
        input_channels: usize,
        output_channels: usize,
        total_frames: u64,
    },
    RemapProgress {
        frames_done: u64,
        total_frames: u64,
    },
    RemapComplete {
        output_file: String,
        frames: u64,
        elapsed: Duration,
    },
}

pub trait EventHandler: Send + Sync {
    fn handle(&self, event: &Event);
}

pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    pub fn emit(&self, event: Event) {
        for handler in &self.handlers {
            handler.handle(&event);
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Emits through an optional dispatcher.
pub(crate) fn emit(dispatcher: Option<&EventDispatcher>, event: Event) {
    if let Some(dispatcher) = dispatcher {
        dispatcher.emit(event);
    }
}
