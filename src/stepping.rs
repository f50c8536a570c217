#![warn(missing_docs)]
//! The per-step track filter
//!
//! The external transport engine advances one track by one step and hands the
//! observed quantities to [`StepFilter::process`]. The filter decides, against
//! the immutable [`GeometryGraph`], whether records are emitted and whether
//! the track is terminated. It never blocks and never fails: steps whose
//! volumes cannot be resolved simply produce no records.
use crate::geometry::{GeometryGraph, VolumeRole};
use crate::records::{EventSink, Record};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use uom::num_traits::Zero;
use uom::si::f64::{Energy, Length, Time};

/// Status of a track. `StopAndKill` is terminal: a dead track produces no
/// further records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum TrackStatus {
    /// the track continues to be transported
    Alive,
    /// the track is terminated after this step
    StopAndKill,
}

/// One transport step as observed by the external engine. Transient: consumed
/// by the filter and discarded, never persisted directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// id of the track this step belongs to
    pub track_id: i32,
    /// id of the event this track belongs to
    pub event_id: i32,
    /// particle species of the track
    pub particle: String,
    /// name of the process that spawned this track; `None` for primary tracks
    pub creator_process: Option<String>,
    /// name of the volume at the pre-step point
    pub pre_volume: String,
    /// name of the volume at the post-step point
    pub post_volume: String,
    /// position of the pre-step point
    pub pre_position: Point3<Length>,
    /// position of the post-step point
    pub post_position: Point3<Length>,
    /// kinetic energy at the pre-step point
    pub pre_kinetic_energy: Energy,
    /// kinetic energy at the post-step point
    pub post_kinetic_energy: Energy,
    /// energy deposited along this step
    pub deposited_energy: Energy,
    /// track status as reported by the engine before filtering
    pub status: TrackStatus,
    /// local time at the post-step point
    pub local_time: Time,
}

/// Configuration of a [`StepFilter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// forcibly terminate a track whose post-step volume is the world instead
    /// of leaving the escape to the engine's boundary handling
    pub kill_on_world_exit: bool,
    /// additionally emit a flat log-line record for every step with a non-zero
    /// energy deposit or a post-step volume inside the detector
    pub log_steps: bool,
}

/// The step-level track filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFilter {
    config: FilterConfig,
}

impl StepFilter {
    /// Create a new [`StepFilter`] with the given configuration.
    #[must_use]
    pub const fn new(config: FilterConfig) -> Self {
        Self { config }
    }
    /// Return the configuration of this filter.
    #[must_use]
    pub const fn config(&self) -> &FilterConfig {
        &self.config
    }
    /// Process one transport step.
    ///
    /// Emits records to the given sink and returns the resulting track status:
    ///   - steps of non-alive tracks are ignored entirely
    ///   - primary-particle steps and escapes to the world volume emit no
    ///     histogram records
    ///   - all other steps emit a whole-detector energy-deposit record and,
    ///     if the step stays within the fiber region, a fiber record carrying
    ///     the post-step kinetic energy
    ///   - a step ending in the sensitive detector terminates the track
    ///
    /// Steps whose pre- or post-step volume cannot be resolved against the
    /// geometry emit no histogram records but never fail.
    pub fn process(
        &self,
        step: &Step,
        geometry: &GeometryGraph,
        sink: &mut impl EventSink,
    ) -> TrackStatus {
        if step.status != TrackStatus::Alive {
            return step.status;
        }
        let pre_role = geometry.role(&step.pre_volume);
        let post_role = geometry.role(&step.post_volume);

        if self.config.log_steps
            && (!step.deposited_energy.is_zero() || post_role == Some(VolumeRole::Detector))
        {
            sink.emit(Record::log_line(
                step.pre_position,
                step.post_position,
                step.deposited_energy,
                step.event_id,
                &step.particle,
                step.creator_process.as_deref().unwrap_or("primary"),
                step.track_id,
                step.local_time,
            ));
        }

        let is_secondary = step.creator_process.is_some();
        let resolved = pre_role.is_some() && post_role.is_some();
        if is_secondary && resolved && post_role != Some(VolumeRole::World) {
            sink.emit(Record::deposit(step.post_position, step.deposited_energy));
            if pre_role.is_some_and(|role| role.is_fiber())
                && post_role.is_some_and(|role| role.is_fiber())
            {
                sink.emit(Record::fiber(step.post_position, step.post_kinetic_energy));
            }
        }

        match post_role {
            Some(VolumeRole::Detector) => TrackStatus::StopAndKill,
            Some(VolumeRole::World) if self.config.kill_on_world_exit => TrackStatus::StopAndKill,
            _ => TrackStatus::Alive,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::{Shape, Solid, Volume};
    use crate::records::{HistogramSink, RecordCategory};
    use crate::{electronvolt, megaelectronvolt, millimeter, nanosecond};
    use approx::assert_relative_eq;
    use nalgebra::vector;
    use uom::si::energy::{electronvolt, megaelectronvolt};

    fn test_geometry() -> GeometryGraph {
        let mut graph = GeometryGraph::new();
        let box_solid = |half: f64| {
            Solid::new(Shape::Box {
                half_size: vector![millimeter!(half), millimeter!(half), millimeter!(half)],
            })
            .unwrap()
        };
        let tube_solid = |inner: f64, outer: f64| {
            Solid::new(Shape::Tube {
                inner_radius: millimeter!(inner),
                outer_radius: millimeter!(outer),
                half_length: millimeter!(126.0),
            })
            .unwrap()
        };
        let world = graph
            .add_volume(
                Volume::new(
                    "World",
                    VolumeRole::World,
                    box_solid(1200.0),
                    millimeter!(0.0, 0.0, 0.0),
                    "Galactic",
                ),
                None,
            )
            .unwrap();
        for (name, role, solid, z) in [
            ("Tank", VolumeRole::Absorber, box_solid(126.0), 130.0),
            ("FiberCore", VolumeRole::FiberCore, tube_solid(0.0, 0.2303), 130.0),
            (
                "FiberCladding",
                VolumeRole::FiberCladding,
                tube_solid(0.2303, 0.235),
                130.0,
            ),
            ("Detector", VolumeRole::Detector, box_solid(1.0), 257.0),
        ] {
            graph
                .add_volume(
                    Volume::new(name, role, solid, millimeter!(0.0, 0.0, z), "test"),
                    Some(world),
                )
                .unwrap();
        }
        graph
    }
    fn secondary_step(pre: &str, post: &str) -> Step {
        Step {
            track_id: 2,
            event_id: 1,
            particle: "opticalphoton".to_string(),
            creator_process: Some("Scintillation".to_string()),
            pre_volume: pre.to_string(),
            post_volume: post.to_string(),
            pre_position: millimeter!(0.0, 0.0, 100.0),
            post_position: millimeter!(0.1, 0.0, 101.0),
            pre_kinetic_energy: electronvolt!(1.5),
            post_kinetic_energy: electronvolt!(1.5),
            deposited_energy: megaelectronvolt!(0.0),
            status: TrackStatus::Alive,
            local_time: nanosecond!(0.5),
        }
    }
    #[test]
    fn dead_track_emits_nothing() {
        let geometry = test_geometry();
        let filter = StepFilter::default();
        let mut sink = HistogramSink::new();
        let mut step = secondary_step("Tank", "Detector");
        step.status = TrackStatus::StopAndKill;
        step.deposited_energy = megaelectronvolt!(0.2);
        assert_eq!(
            filter.process(&step, &geometry, &mut sink),
            TrackStatus::StopAndKill
        );
        assert_eq!(sink.total_count(), 0);
    }
    #[test]
    fn primary_step_emits_nothing() {
        // a primary track (no creator process) stepping world -> tank
        let geometry = test_geometry();
        let filter = StepFilter::default();
        let mut sink = HistogramSink::new();
        let mut step = secondary_step("World", "Tank");
        step.creator_process = None;
        step.deposited_energy = megaelectronvolt!(0.7);
        assert_eq!(
            filter.process(&step, &geometry, &mut sink),
            TrackStatus::Alive
        );
        assert_eq!(sink.total_count(), 0);
    }
    #[test]
    fn escape_to_world_emits_nothing() {
        let geometry = test_geometry();
        let filter = StepFilter::default();
        let mut sink = HistogramSink::new();
        let mut step = secondary_step("Tank", "World");
        step.deposited_energy = megaelectronvolt!(0.1);
        assert_eq!(
            filter.process(&step, &geometry, &mut sink),
            TrackStatus::Alive
        );
        assert_eq!(sink.total_count(), 0);
    }
    #[test]
    fn kill_on_world_exit_flag() {
        let geometry = test_geometry();
        let filter = StepFilter::new(FilterConfig {
            kill_on_world_exit: true,
            log_steps: false,
        });
        let mut sink = HistogramSink::new();
        let step = secondary_step("Tank", "World");
        assert_eq!(
            filter.process(&step, &geometry, &mut sink),
            TrackStatus::StopAndKill
        );
        assert_eq!(sink.total_count(), 0);
    }
    #[test]
    fn photon_inside_fiber_emits_two_records() {
        // secondary photon stepping core -> core with zero deposit and 1.5 eV
        // kinetic energy
        let geometry = test_geometry();
        let filter = StepFilter::default();
        let mut sink = HistogramSink::new();
        let step = secondary_step("FiberCore", "FiberCore");
        assert_eq!(
            filter.process(&step, &geometry, &mut sink),
            TrackStatus::Alive
        );
        assert_eq!(sink.total_count(), 2);
        let fiber_records = sink.records(RecordCategory::Fiber);
        assert_eq!(fiber_records.len(), 1);
        assert_relative_eq!(fiber_records[0].energy.get::<electronvolt>(), 1.5);
        assert_eq!(fiber_records[0].position, step.post_position);
        let deposit_records = sink.records(RecordCategory::WholeDetector);
        assert_eq!(deposit_records.len(), 1);
        assert_relative_eq!(deposit_records[0].energy.get::<megaelectronvolt>(), 0.0);
    }
    #[test]
    fn core_to_cladding_counts_as_fiber() {
        let geometry = test_geometry();
        let filter = StepFilter::default();
        let mut sink = HistogramSink::new();
        let step = secondary_step("FiberCore", "FiberCladding");
        filter.process(&step, &geometry, &mut sink);
        assert_eq!(sink.count(RecordCategory::Fiber), 1);
        assert_eq!(sink.count(RecordCategory::WholeDetector), 1);
    }
    #[test]
    fn tank_to_fiber_is_no_fiber_record() {
        let geometry = test_geometry();
        let filter = StepFilter::default();
        let mut sink = HistogramSink::new();
        let step = secondary_step("Tank", "FiberCore");
        filter.process(&step, &geometry, &mut sink);
        assert_eq!(sink.count(RecordCategory::Fiber), 0);
        assert_eq!(sink.count(RecordCategory::WholeDetector), 1);
    }
    #[test]
    fn step_into_detector_kills_track() {
        // track stepping from tank into the detector with 0.2 MeV deposit
        let geometry = test_geometry();
        let filter = StepFilter::default();
        let mut sink = HistogramSink::new();
        let mut step = secondary_step("Tank", "Detector");
        step.deposited_energy = megaelectronvolt!(0.2);
        assert_eq!(
            filter.process(&step, &geometry, &mut sink),
            TrackStatus::StopAndKill
        );
        let deposit_records = sink.records(RecordCategory::WholeDetector);
        assert_eq!(deposit_records.len(), 1);
        assert_relative_eq!(deposit_records[0].energy.get::<megaelectronvolt>(), 0.2);
        assert_eq!(sink.count(RecordCategory::Fiber), 0);
    }
    #[test]
    fn primary_into_detector_is_killed_without_records() {
        let geometry = test_geometry();
        let filter = StepFilter::default();
        let mut sink = HistogramSink::new();
        let mut step = secondary_step("Tank", "Detector");
        step.creator_process = None;
        assert_eq!(
            filter.process(&step, &geometry, &mut sink),
            TrackStatus::StopAndKill
        );
        assert_eq!(sink.total_count(), 0);
    }
    #[test]
    fn unresolved_volume_emits_nothing() {
        let geometry = test_geometry();
        let filter = StepFilter::default();
        let mut sink = HistogramSink::new();
        let step = secondary_step("Tank", "NoSuchVolume");
        assert_eq!(
            filter.process(&step, &geometry, &mut sink),
            TrackStatus::Alive
        );
        assert_eq!(sink.total_count(), 0);
        let step = secondary_step("NoSuchVolume", "Tank");
        assert_eq!(
            filter.process(&step, &geometry, &mut sink),
            TrackStatus::Alive
        );
        assert_eq!(sink.total_count(), 0);
    }
    #[test]
    fn log_mode_records_deposits_and_detector_arrivals() {
        let geometry = test_geometry();
        let filter = StepFilter::new(FilterConfig {
            kill_on_world_exit: false,
            log_steps: true,
        });
        let mut sink = HistogramSink::new();
        // zero deposit inside the fiber: histogram records only
        filter.process(&secondary_step("FiberCore", "FiberCore"), &geometry, &mut sink);
        assert_eq!(sink.count(RecordCategory::LogLine), 0);
        // non-zero deposit: log line in addition to the histogram record
        let mut step = secondary_step("Tank", "Tank");
        step.deposited_energy = megaelectronvolt!(0.05);
        filter.process(&step, &geometry, &mut sink);
        assert_eq!(sink.count(RecordCategory::LogLine), 1);
        // primary reaching the detector: log line despite zero deposit
        let mut step = secondary_step("Tank", "Detector");
        step.creator_process = None;
        filter.process(&step, &geometry, &mut sink);
        let log_lines = sink.records(RecordCategory::LogLine);
        assert_eq!(log_lines.len(), 2);
        assert_eq!(log_lines[1].process.as_deref(), Some("primary"));
        assert_eq!(log_lines[1].event_id, Some(1));
        assert_eq!(log_lines[1].track_id, Some(2));
        // both step endpoints survive into the replay record
        assert_eq!(log_lines[1].pre_position, Some(step.pre_position));
        assert_eq!(log_lines[1].position, step.post_position);
    }
}
