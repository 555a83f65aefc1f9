//! Per-cycle orchestration: predict every live track, associate or create
//! from each incoming measurement, then prune and maintain.

use crate::association;
use crate::config::FusionConfig;
use crate::error::FusionError;
use crate::event::FusionEvent;
use crate::kalman::{self, state, Dense, Diagonal, UpperTriangular, N};
use crate::sensor::{self, Plot, Sensor};
use crate::store::{self, FusedObject};

/// A raw radar reading in vehicle-frame meters and m/s, referencing its
/// source sensor by index into the engine's sensor table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawMeasurement {
    pub sensor_index: usize,
    pub pos_x: f32,
    pub pos_y: f32,
    pub vel_x: f32,
    pub vel_y: f32,
}

/// A read-only view of one track-table slot, handed to callers at the end
/// of a cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackView {
    pub id: u8,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// `false` for empty or not-yet-confirmed slots.
    pub valid: bool,
}

/// Owns the track table, the static sensor descriptors, and the derived
/// process model. The only entry points are [`FusionEngine::run_cycle`]
/// and [`FusionEngine::reinitialize`] — there is no way to mutate a single
/// field of a live engine.
pub struct FusionEngine {
    config: FusionConfig,
    sensors: Vec<Sensor>,
    f: Dense,
    process_u: UpperTriangular,
    process_d: Diagonal,
    tracks: Vec<FusedObject>,
}

fn build_f(dt: f32) -> Dense {
    let mut f = [[0.0f32; N]; N];
    f[state::X][state::X] = 1.0;
    f[state::X][state::VX] = dt;
    f[state::Y][state::Y] = 1.0;
    f[state::Y][state::VY] = dt;
    f[state::VX][state::VX] = 1.0;
    f[state::VY][state::VY] = 1.0;
    f
}

fn build_q(config: &FusionConfig, dt: f32) -> Dense {
    let var_qx = config.q_sigma_x * config.q_sigma_x;
    let var_qy = config.q_sigma_y * config.q_sigma_y;
    let var_qvx = config.q_sigma_vx * config.q_sigma_vx;
    let var_qvy = config.q_sigma_vy * config.q_sigma_vy;

    let mut q = [[0.0f32; N]; N];

    q[state::X][state::X] = var_qx * dt + (var_qvx * dt * dt * dt) / 3.0;
    q[state::X][state::VX] = (var_qvx * dt * dt) / 2.0;
    q[state::VX][state::X] = q[state::X][state::VX];
    q[state::VX][state::VX] = var_qvx * dt;

    q[state::Y][state::Y] = var_qy * dt + (var_qvy * dt * dt * dt) / 3.0;
    q[state::Y][state::VY] = (var_qvy * dt * dt) / 2.0;
    q[state::VY][state::Y] = q[state::Y][state::VY];
    q[state::VY][state::VY] = var_qvy * dt;

    q
}

impl FusionEngine {
    /// Builds a fresh engine: derives `F`/`Q` from `config.cycle_time_s` and
    /// allocates `capacity` empty track slots.
    pub fn new(config: FusionConfig, sensors: Vec<Sensor>, capacity: usize) -> Self {
        let f = build_f(config.cycle_time_s);
        let q = build_q(&config, config.cycle_time_s);
        let (process_u, process_d) = kalman::decompose_ud(&q);

        FusionEngine {
            config,
            sensors,
            f,
            process_u,
            process_d,
            tracks: vec![FusedObject::default(); capacity],
        }
    }

    /// Replaces the configuration and sensor table wholesale and resets the
    /// track table to empty. The only sanctioned way to change a tunable:
    /// there is no partial or mid-cycle reconfiguration.
    pub fn reinitialize(&mut self, config: FusionConfig, sensors: Vec<Sensor>) {
        let capacity = self.tracks.len();
        *self = FusionEngine::new(config, sensors, capacity);
    }

    fn predict(&mut self) {
        for track in self.tracks.iter_mut() {
            if track.is_live() {
                track.track.predict(&self.f, &self.process_u, &self.process_d);
                track.priority =
                    sensor::object_priority(track.track.x[state::X], track.track.x[state::Y]);
            }
        }
    }

    fn update_one(
        &mut self,
        plot: &Plot,
        sensor_type_index: usize,
        priority: f32,
        events: &mut Vec<FusionEvent>,
    ) -> Result<(), FusionError> {
        if let Some(pair) = association::find_best_match(plot, &self.tracks, &self.config) {
            self.tracks[pair].seen_this_cycle[sensor_type_index] = true;
            self.tracks[pair].track.fuse(plot);
        } else if let Some(slot) =
            store::create_or_drop(&mut self.tracks, plot, priority, events)?
        {
            events.push(FusionEvent::TrackCreated {
                slot,
                id: self.tracks[slot].id,
            });
        }
        Ok(())
    }

    fn manage(&mut self, events: &mut Vec<FusionEvent>) {
        store::prune_duplicates(&mut self.tracks, &self.config, events);

        for (slot, track) in self.tracks.iter_mut().enumerate() {
            store::maintain(track, slot, &self.config, events);
        }
    }

    /// Runs one full predict/update/manage cycle over `measurements`,
    /// dropping any whose `sensor_index` is out of range or whose values are
    /// non-finite, and returns the events observed during the cycle.
    pub fn run_cycle(
        &mut self,
        measurements: &[RawMeasurement],
    ) -> Result<Vec<FusionEvent>, FusionError> {
        let mut events = Vec::new();

        self.predict();

        for (i, m) in measurements.iter().enumerate() {
            let sensor = match self.sensors.get(m.sensor_index).copied() {
                Some(s) => s,
                None => {
                    events.push(FusionEvent::MeasurementDropped { measurement_index: i });
                    continue;
                }
            };

            let plot = sensor::build_plot(&self.config, &sensor, m.pos_x, m.pos_y, m.vel_x, m.vel_y);
            let plot = match plot {
                Some(p) => p,
                None => {
                    events.push(FusionEvent::MeasurementDropped { measurement_index: i });
                    continue;
                }
            };

            let priority = sensor::object_priority(plot.z[state::X], plot.z[state::Y]);
            let sensor_type_index = sensor.sensor_type.as_index();
            self.update_one(&plot, sensor_type_index, priority, &mut events)?;
        }

        self.manage(&mut events);

        Ok(events)
    }

    /// A read-only snapshot of every slot, confirmed or not.
    pub fn snapshot(&self) -> Vec<TrackView> {
        self.tracks
            .iter()
            .map(|t| TrackView {
                id: t.id,
                x: t.track.x[state::X],
                y: t.track.x[state::Y],
                vx: t.track.x[state::VX],
                vy: t.track.x[state::VY],
                valid: t.is_confirmed(&self.config),
            })
            .collect()
    }

    /// The confirmed subset of [`FusionEngine::snapshot`].
    pub fn confirmed_tracks(&self) -> Vec<TrackView> {
        self.snapshot().into_iter().filter(|t| t.valid).collect()
    }
}
