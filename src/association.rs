//! Measurement-to-track gating and acceptance.

use crate::config::FusionConfig;
use crate::kalman::N;
use crate::sensor::Plot;
use crate::store::FusedObject;

/// Per-pair gating value between a plot and a live track: the sum of
/// per-state similarities, each pre-multiplied by its gating weight, or
/// `None` if any single state's weighted similarity fails to clear
/// [`FusionConfig::STATE_GATING_VALUE_MIN_LIMIT`].
pub fn gating_value(plot: &Plot, track: &FusedObject, config: &FusionConfig) -> Option<f32> {
    let weights = [
        config.gating_weight_x,
        config.gating_weight_y,
        config.gating_weight_vx,
        config.gating_weight_vy,
    ];

    let mut total = 0.0f32;
    for i in 0..N {
        let similarity = crate::radar::similarity(
            plot.z[i],
            track.track.x[i],
            plot.r_diag[i],
            track.track.p[i][i],
        ) * weights[i];

        if similarity > FusionConfig::STATE_GATING_VALUE_MIN_LIMIT {
            total += similarity;
        } else {
            return None;
        }
    }
    Some(total)
}

/// Scans the live slots of `tracks` for the best-gating pair with `plot`,
/// returning its slot index if the best value clears the acceptance gate.
/// Ties go to the first-scanned (lowest-index) track.
pub fn find_best_match(plot: &Plot, tracks: &[FusedObject], config: &FusionConfig) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;

    for (i, track) in tracks.iter().enumerate() {
        if track.id == FusionConfig::INVALID_ID {
            continue;
        }
        if let Some(value) = gating_value(plot, track, config) {
            if best.map(|(_, v)| value > v).unwrap_or(true) {
                best = Some((i, value));
            }
        }
    }

    best.filter(|(_, value)| *value > config.total_gating_min_limit())
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track_at(id: u8, x: f32, y: f32, vx: f32, vy: f32) -> FusedObject {
        let plot = Plot {
            z: [x, y, vx, vy],
            r_diag: [0.25, 0.25, 2.25, 2.25],
            weight: 1.0,
        };
        let mut object = FusedObject::default();
        object.id = id;
        object.track = crate::track::Track::init(&plot);
        object.priority = crate::sensor::object_priority(x, y);
        object
    }

    #[test]
    fn identical_plot_and_track_gate_with_max_similarity() {
        let config = FusionConfig::default();
        let plot = Plot {
            z: [4.0, 3.0, 10.0, 0.0],
            r_diag: [0.25, 0.25, 2.25, 2.25],
            weight: 1.0,
        };
        let track = track_at(1, 4.0, 3.0, 10.0, 0.0);
        let value = gating_value(&plot, &track, &config).unwrap();
        assert!(value > 0.0);
    }

    #[test]
    fn far_away_plot_fails_gating() {
        let config = FusionConfig::default();
        let plot = Plot {
            z: [400.0, 300.0, 10.0, 0.0],
            r_diag: [0.25, 0.25, 2.25, 2.25],
            weight: 1.0,
        };
        let track = track_at(1, 4.0, 3.0, 10.0, 0.0);
        assert!(gating_value(&plot, &track, &config).is_none());
    }

    #[test]
    fn find_best_match_prefers_closer_track_and_skips_free_slots() {
        let config = FusionConfig::default();
        let plot = Plot {
            z: [4.4, 3.0, 10.0, 0.0],
            r_diag: [0.25, 0.25, 2.25, 2.25],
            weight: 1.0,
        };
        let tracks = vec![
            FusedObject::default(),
            track_at(1, 4.0, 3.0, 10.0, 0.0),
            track_at(2, -4.0, 3.0, 10.0, 0.0),
        ];
        assert_eq!(find_best_match(&plot, &tracks, &config), Some(1));
    }

    #[test]
    fn no_live_tracks_means_no_match() {
        let config = FusionConfig::default();
        let plot = Plot {
            z: [4.0, 3.0, 10.0, 0.0],
            r_diag: [0.25, 0.25, 2.25, 2.25],
            weight: 1.0,
        };
        let tracks = vec![FusedObject::default(); 4];
        assert_eq!(find_best_match(&plot, &tracks, &config), None);
    }
}
