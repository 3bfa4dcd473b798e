//! Runs the pipeline as one unit of background work.

use std::sync::mpsc;

use crate::convert::{convert_stack, ConvertOptions, OutputRecord};
use crate::error::PipelineError;
use crate::layer::LayerStack;

/// A running conversion, executing on its own thread.
///
/// The whole pipeline runs off the caller's thread as a single non-blocking
/// unit and delivers one completion message. There is no cancellation once
/// started.
pub struct ConvertTask {
    handle: Option<std::thread::JoinHandle<()>>,
    rx: mpsc::Receiver<Result<Vec<OutputRecord>, PipelineError>>,
}

impl ConvertTask {
    /// Start the pipeline on a background thread.
    pub fn spawn(stack: LayerStack, options: ConvertOptions) -> Self {
        let (tx, rx) = mpsc::channel();

        let handle = std::thread::spawn(move || {
            let result = convert_stack(&stack, &options);
            // the receiver may already be gone; nothing to do then
            let _ = tx.send(result);
        });

        Self {
            handle: Some(handle),
            rx,
        }
    }

    /// Poll for the result without blocking.
    ///
    /// Returns `None` while the pipeline is still running.
    pub fn try_result(&self) -> Option<Result<Vec<OutputRecord>, PipelineError>> {
        self.rx.try_recv().ok()
    }

    /// Block until the pipeline completes and return its result.
    ///
    /// # Errors
    ///
    /// [`PipelineError::WorkerLost`] if the worker thread died before
    /// delivering a result.
    pub fn wait(mut self) -> Result<Vec<OutputRecord>, PipelineError> {
        let result = self.rx.recv().map_err(|_| PipelineError::WorkerLost)?;
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        result
    }
}
