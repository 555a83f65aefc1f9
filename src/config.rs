//! Tunable parameters of the fusion core.
//!
//! In the system this core is modeled on, these were module-level mutable
//! globals updated one field at a time by a reconfiguration side channel,
//! which then forced a full reinitialization. This crate instead holds them
//! as an immutable value alongside the track store: changing a tunable means
//! building a new [`FusionConfig`] and calling
//! [`crate::engine::FusionEngine::reinitialize`], never mutating a live
//! engine's fields in place.

use serde::{Deserialize, Serialize};

/// All tunables of the fusion core, plus the cycle time needed to derive
/// the process model at init/reinit time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionConfig {
    /// Minimum stddev used to clamp measurement-covariance diagonals (m or m/s).
    pub sigma_base: f32,
    /// Radar range standard deviation (meters).
    pub sigma_range: f32,
    /// Radar Doppler (velocity) standard deviation (m/s).
    pub sigma_doppler: f32,
    /// Radar bearing standard deviation (degrees).
    pub sigma_bearing: f32,

    /// Bearing confidence at or within the weak-bearing boundary.
    pub max_bearing_confidence: f32,
    /// Bearing confidence at the field-of-view limit.
    pub min_bearing_confidence: f32,
    /// Width, in degrees, of the linear falloff near the FOV limit.
    pub sensor_weak_bearing_area: f32,

    /// Process-noise stddev for x (meters).
    pub q_sigma_x: f32,
    /// Process-noise stddev for y (meters).
    pub q_sigma_y: f32,
    /// Process-noise stddev for vx (m/s).
    pub q_sigma_vx: f32,
    /// Process-noise stddev for vy (m/s).
    pub q_sigma_vy: f32,

    /// Pairwise-pruning limit for x (meters).
    pub prune_limit_x: f32,
    /// Pairwise-pruning limit for y (meters).
    pub prune_limit_y: f32,
    /// Pairwise-pruning limit for vx (m/s).
    pub prune_limit_vx: f32,
    /// Pairwise-pruning limit for vy (m/s).
    pub prune_limit_vy: f32,

    /// Gating weight for x.
    pub gating_weight_x: f32,
    /// Gating weight for y.
    pub gating_weight_y: f32,
    /// Gating weight for vx.
    pub gating_weight_vx: f32,
    /// Gating weight for vy.
    pub gating_weight_vy: f32,
    /// Multiplier applied to the total gating threshold.
    pub acceptance_gate_sum_factor: f32,

    /// Cycles an unobserved track is coasted before being destroyed.
    pub max_coasting_cycles: u8,
    /// Lower bound of the coasting-distance band (meters). Not consumed by
    /// any operation yet; carried for round-tripping with the source this
    /// config format was derived from.
    pub min_coasting_dist: f32,
    /// Upper bound of the coasting-distance band (meters). See
    /// `min_coasting_dist`.
    pub max_coasting_dist: f32,

    /// Upper velocity limit the tracker is designed for (m/s). Not consumed
    /// by any operation yet; association does not currently gate on speed.
    pub max_velocity: f32,
    /// Lower velocity limit the tracker is designed for (m/s). See
    /// `max_velocity`.
    pub min_velocity: f32,

    /// Cycles a new track must survive before being reported as confirmed.
    pub min_lifetime_tx_cycles: u8,

    /// Fixed cycle period (seconds) used to derive `F` and `Q` at init.
    pub cycle_time_s: f32,
}

impl FusionConfig {
    /// `STATE_GATING_VALUE_MIN_LIMIT`: per-state similarity floor below which
    /// a pair is vetoed outright, regardless of gating weight.
    pub const STATE_GATING_VALUE_MIN_LIMIT: f32 = 0.1;

    /// `MAX_PRIORITY`: the priority of a hypothetical object at zero range.
    pub const MAX_PRIORITY: f32 = 150.0;

    /// `INVALID_SIMILARITY_VALUE` / `INVALID_GATING_VALUE`.
    pub const INVALID_SIMILARITY_VALUE: f32 = -1.0;

    /// `MAX_SIMILARITY_VALUE`.
    pub const MAX_SIMILARITY_VALUE: f32 = 1000.0;

    /// `INVALID_ID`: the sentinel marking a free track slot.
    pub const INVALID_ID: u8 = 0;

    /// `MAX_ID`: exclusive upper bound of the allocatable ID space.
    pub const MAX_ID: u8 = 32;

    /// Total gating threshold a measurement's best pair must exceed to be
    /// accepted: `N * STATE_GATING_VALUE_MIN_LIMIT * ACCEPTANCE_GATE_SUM_FACTOR`.
    pub fn total_gating_min_limit(&self) -> f32 {
        crate::kalman::N as f32 * Self::STATE_GATING_VALUE_MIN_LIMIT * self.acceptance_gate_sum_factor
    }
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            sigma_base: 0.1,
            sigma_range: 0.5,
            sigma_doppler: 1.5,
            sigma_bearing: 3.0,

            max_bearing_confidence: 1.0,
            min_bearing_confidence: 0.7,
            sensor_weak_bearing_area: 10.0,

            q_sigma_x: 1.5,
            q_sigma_y: 1.5,
            q_sigma_vx: 3.0,
            q_sigma_vy: 3.0,

            prune_limit_x: 2.0,
            prune_limit_y: 2.0,
            prune_limit_vx: 5.0,
            prune_limit_vy: 5.0,

            gating_weight_x: 10.0,
            gating_weight_y: 10.0,
            gating_weight_vx: 30.0,
            gating_weight_vy: 30.0,
            acceptance_gate_sum_factor: 1.0,

            max_coasting_cycles: 20,
            min_coasting_dist: 5.0,
            max_coasting_dist: 15.0,

            max_velocity: 19.2,
            min_velocity: 3.0,

            min_lifetime_tx_cycles: 3,

            cycle_time_s: 0.04,
        }
    }
}
