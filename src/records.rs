#![warn(missing_docs)]
//! Records emitted by the step filter and the sinks receiving them
//!
//! The step filter produces [`Record`]s and hands them to an [`EventSink`].
//! Emission is synchronous and infallible; the histogram/ntuple persistence
//! behind the sink is an external concern. Each worker thread owns its own
//! sink, merged at end of run (see [`HistogramSink::merge`]).
use kahan::KahanSummator;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use uom::si::energy::megaelectronvolt;
use uom::si::f64::{Energy, Length, Time};

/// The coarse category a [`Record`] is binned into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, strum::Display,
)]
pub enum RecordCategory {
    /// energy deposit anywhere in the detector setup
    #[strum(serialize = "whole-detector")]
    WholeDetector,
    /// photon transport inside the fiber region (carries kinetic energy)
    #[strum(serialize = "fiber")]
    Fiber,
    /// flat per-step log line for event-by-event replay/debugging
    #[strum(serialize = "log-line")]
    LogLine,
}

/// One record emitted by the step filter, owned by the sink once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// category this record is binned into
    pub category: RecordCategory,
    /// post-step position of the recorded step
    pub position: Point3<Length>,
    /// pre-step position ([`RecordCategory::LogLine`] records only)
    pub pre_position: Option<Point3<Length>>,
    /// deposited energy ([`RecordCategory::WholeDetector`], [`RecordCategory::LogLine`])
    /// or post-step kinetic energy ([`RecordCategory::Fiber`])
    pub energy: Energy,
    /// event the step belongs to
    pub event_id: Option<i32>,
    /// particle species of the track
    pub particle: Option<String>,
    /// name of the creator process ("primary" for primary tracks)
    pub process: Option<String>,
    /// track the step belongs to
    pub track_id: Option<i32>,
    /// local time of the step
    pub time: Option<Time>,
}

impl Record {
    /// Create a whole-detector energy-deposit record.
    #[must_use]
    pub fn deposit(position: Point3<Length>, deposited_energy: Energy) -> Self {
        Self {
            category: RecordCategory::WholeDetector,
            position,
            pre_position: None,
            energy: deposited_energy,
            event_id: None,
            particle: None,
            process: None,
            track_id: None,
            time: None,
        }
    }
    /// Create a fiber photon-arrival record carrying the post-step kinetic
    /// energy.
    #[must_use]
    pub fn fiber(position: Point3<Length>, kinetic_energy: Energy) -> Self {
        Self {
            category: RecordCategory::Fiber,
            position,
            pre_position: None,
            energy: kinetic_energy,
            event_id: None,
            particle: None,
            process: None,
            track_id: None,
            time: None,
        }
    }
    /// Create a flat log-line record for event-by-event replay.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn log_line(
        pre_position: Point3<Length>,
        post_position: Point3<Length>,
        deposited_energy: Energy,
        event_id: i32,
        particle: &str,
        process: &str,
        track_id: i32,
        time: Time,
    ) -> Self {
        Self {
            category: RecordCategory::LogLine,
            position: post_position,
            pre_position: Some(pre_position),
            energy: deposited_energy,
            event_id: Some(event_id),
            particle: Some(particle.to_string()),
            process: Some(process.to_string()),
            track_id: Some(track_id),
            time: Some(time),
        }
    }
}

/// Receiver of the records emitted by the step filter.
///
/// Implementations must not block; the step filter performs no I/O beyond this
/// synchronous call.
pub trait EventSink {
    /// Take ownership of one emitted record.
    fn emit(&mut self, record: Record);
}

/// An in-memory sink binning records per category.
///
/// One instance per worker thread; the per-thread instances are merged into a
/// single sink at end of run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistogramSink {
    records: Vec<Record>,
}

impl HistogramSink {
    /// Create a new (empty) [`HistogramSink`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Return all records of the given category in emission order.
    #[must_use]
    pub fn records(&self, category: RecordCategory) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| record.category == category)
            .collect()
    }
    /// Return the number of records of the given category.
    #[must_use]
    pub fn count(&self, category: RecordCategory) -> usize {
        self.records(category).len()
    }
    /// Return the total number of records.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.records.len()
    }
    /// Return the summed energy of all records of the given category.
    ///
    /// The sum is compensated, so merging many small deposits into a large
    /// accumulated value does not lose precision.
    #[must_use]
    pub fn total_energy(&self, category: RecordCategory) -> Energy {
        let energies: Vec<f64> = self
            .records
            .iter()
            .filter(|record| record.category == category)
            .map(|record| record.energy.get::<megaelectronvolt>())
            .collect();
        let kahan_sum: kahan::KahanSum<f64> = energies.iter().kahan_sum();
        Energy::new::<megaelectronvolt>(kahan_sum.sum())
    }
    /// Merge the records of another sink into this one (end-of-run merge of
    /// the per-worker sinks).
    pub fn merge(&mut self, other: Self) {
        self.records.extend(other.records);
    }
}

impl EventSink for HistogramSink {
    fn emit(&mut self, record: Record) {
        self.records.push(record);
    }
}

/// A sink discarding every record. Useful for exercising the step filter
/// alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _record: Record) {}
}
