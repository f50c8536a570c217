#![warn(missing_docs)]
//! Per-worker transport session
//!
//! Each track-transport worker thread owns exactly one [`TransportSession`]:
//! its private step filter and its private record sink. The detector model is
//! shared read-only between all sessions. At end of run the per-worker sinks
//! are merged into one.
use crate::detector::DetectorModel;
use crate::records::HistogramSink;
use crate::stepping::{FilterConfig, Step, StepFilter, TrackStatus};

/// Private per-worker state of one transport thread.
#[derive(Debug)]
pub struct TransportSession<'a> {
    model: &'a DetectorModel,
    filter: StepFilter,
    sink: HistogramSink,
    events_completed: usize,
}

impl<'a> TransportSession<'a> {
    /// Create a new [`TransportSession`] for one worker thread.
    #[must_use]
    pub fn new(model: &'a DetectorModel, config: FilterConfig) -> Self {
        Self {
            model,
            filter: StepFilter::new(config),
            sink: HistogramSink::new(),
            events_completed: 0,
        }
    }
    /// Handle one transport step and return the resulting track status. The
    /// caller (the engine callback) is responsible for applying a
    /// [`TrackStatus::StopAndKill`] decision to the engine's track.
    pub fn handle_step(&mut self, step: &Step) -> TrackStatus {
        self.filter.process(step, self.model.geometry(), &mut self.sink)
    }
    /// Mark the current event as completed.
    pub fn end_of_event(&mut self) {
        self.events_completed += 1;
    }
    /// Return the number of completed events of this session.
    #[must_use]
    pub const fn events_completed(&self) -> usize {
        self.events_completed
    }
    /// Return a reference to the records accumulated so far.
    #[must_use]
    pub const fn sink(&self) -> &HistogramSink {
        &self.sink
    }
    /// Finish this session and hand over its accumulated records for the
    /// end-of-run merge.
    #[must_use]
    pub fn finish(self) -> HistogramSink {
        self.sink
    }
}
