//! The fixed-capacity track table and its lifecycle: ID allocation,
//! priority-based slot replacement, pairwise duplicate pruning, coasting,
//! and confirmation.

use crate::config::FusionConfig;
use crate::event::FusionEvent;
use crate::sensor::{Plot, NUM_SENSOR_SLOTS};
use crate::track::Track;

/// One slot of the track table. A slot is free iff `id == FusionConfig::INVALID_ID`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusedObject {
    /// `0` when free, otherwise an identifier unique among live slots.
    pub id: u8,
    /// The Kalman state this slot is tracking.
    pub track: Track,
    /// Cycles since creation (wraps at `2^16 - 1`, matching the reference
    /// counter width).
    pub lifetime_counter: u16,
    /// Per-sensor-type sighting flags for the current cycle, cleared at the
    /// end of maintenance.
    pub seen_this_cycle: [bool; NUM_SENSOR_SLOTS],
    /// Consecutive cycles with no sighting (wraps at `2^8 - 1`).
    pub lost_counter: u8,
    /// Derived from range; used to arbitrate slot contention and pruning.
    pub priority: f32,
}

impl Default for FusedObject {
    fn default() -> Self {
        FusedObject {
            id: FusionConfig::INVALID_ID,
            track: Track {
                x: [0.0; 4],
                p: [[0.0; 4]; 4],
                p_u: crate::kalman::UpperTriangular([0.0; crate::kalman::UPPER_LEN]),
                p_d: crate::kalman::Diagonal([0.0; 4]),
            },
            lifetime_counter: 0,
            seen_this_cycle: [false; NUM_SENSOR_SLOTS],
            lost_counter: 0,
            priority: 0.0,
        }
    }
}

impl FusedObject {
    /// Resets the slot to the free state: all counters and state zeroed,
    /// `id = 0`.
    pub fn reset(&mut self) {
        *self = FusedObject::default();
    }

    /// Whether this slot is currently live.
    pub fn is_live(&self) -> bool {
        self.id != FusionConfig::INVALID_ID
    }

    /// A track is output as confirmed iff live and it has survived at least
    /// `min_lifetime_tx_cycles`.
    pub fn is_confirmed(&self, config: &FusionConfig) -> bool {
        self.is_live() && self.lifetime_counter >= config.min_lifetime_tx_cycles as u16
    }
}

/// Finds the worst-priority slot: any free slot wins outright (conceptual
/// priority `-MAX_PRIORITY`, first free slot found); otherwise the live slot
/// with the minimum priority.
fn worst_priority_slot(tracks: &[FusedObject]) -> (usize, f32) {
    let mut worst = FusionConfig::MAX_PRIORITY;
    let mut index = 0;

    for (i, track) in tracks.iter().enumerate() {
        if track.id == FusionConfig::INVALID_ID {
            return (i, -FusionConfig::MAX_PRIORITY);
        }
        if track.priority < worst {
            worst = track.priority;
            index = i;
        }
    }

    (index, worst)
}

/// First unused ID in `[1, MAX_ID)`, or `None` if exhausted.
fn available_id(tracks: &[FusedObject]) -> Option<u8> {
    (1..FusionConfig::MAX_ID).find(|candidate| !tracks.iter().any(|t| t.id == *candidate))
}

/// Creates a track from a plot if its priority beats the table's current
/// worst slot, displacing that slot if it was live. Drops the plot silently
/// otherwise. Returns the created slot index and ID, or `None` if nothing
/// was created, and `Err` only on genuine ID-space exhaustion (never
/// expected while capacity stays below `MAX_ID`).
pub fn create_or_drop(
    tracks: &mut [FusedObject],
    plot: &Plot,
    priority: f32,
    events: &mut Vec<FusionEvent>,
) -> Result<Option<usize>, crate::error::FusionError> {
    let (index, worst) = worst_priority_slot(tracks);

    if priority <= worst {
        return Ok(None);
    }

    if tracks[index].is_live() {
        events.push(FusionEvent::TrackDisplaced {
            slot: index,
            id: tracks[index].id,
        });
        tracks[index].reset();
    }

    let id = available_id(tracks).ok_or(crate::error::FusionError::IdSpaceExhausted {
        max_id: FusionConfig::MAX_ID,
    })?;

    tracks[index].id = id;
    tracks[index].track = Track::init(plot);
    tracks[index].priority = priority;

    Ok(Some(index))
}

/// Pairwise duplicate pruning: for every ordered pair `(i, j)`, `i < j`,
/// both live, resets whichever has the lower priority if all four state
/// deltas are within their prune limits. Emits a [`FusionEvent::TrackPruned`]
/// for whichever slot is reset.
pub fn prune_duplicates(tracks: &mut [FusedObject], config: &FusionConfig, events: &mut Vec<FusionEvent>) {
    let len = tracks.len();
    for i in 0..len {
        if !tracks[i].is_live() {
            continue;
        }
        for j in (i + 1)..len {
            if !tracks[i].is_live() || !tracks[j].is_live() {
                continue;
            }

            let dx = (tracks[i].track.x[0] - tracks[j].track.x[0]).abs();
            let dy = (tracks[i].track.x[1] - tracks[j].track.x[1]).abs();
            let dvx = (tracks[i].track.x[2] - tracks[j].track.x[2]).abs();
            let dvy = (tracks[i].track.x[3] - tracks[j].track.x[3]).abs();

            let duplicate = dx <= config.prune_limit_x
                && dy <= config.prune_limit_y
                && dvx <= config.prune_limit_vx
                && dvy <= config.prune_limit_vy;

            if duplicate {
                let loser = if tracks[i].priority > tracks[j].priority {
                    j
                } else {
                    i
                };
                events.push(FusionEvent::TrackPruned {
                    slot: loser,
                    id: tracks[loser].id,
                });
                tracks[loser].reset();
            }
        }
    }
}

/// Per-track maintenance: lifetime/lost counters, coasting death, and
/// clearing `seen_this_cycle` for the next cycle. Emits `TrackLost` and
/// `TrackConfirmed` events.
pub fn maintain(
    object: &mut FusedObject,
    slot: usize,
    config: &FusionConfig,
    events: &mut Vec<FusionEvent>,
) {
    if !object.is_live() {
        return;
    }

    let was_confirmed = object.is_confirmed(config);
    object.lifetime_counter = object.lifetime_counter.wrapping_add(1) % u16::MAX;

    if object.lifetime_counter > 1 {
        let seen = object.seen_this_cycle.iter().any(|&s| s);
        if !seen {
            object.lost_counter = object.lost_counter.wrapping_add(1) % u8::MAX;
            if object.lost_counter > config.max_coasting_cycles {
                let id = object.id;
                object.reset();
                events.push(FusionEvent::TrackLost { slot, id });
                return;
            }
        } else {
            object.lost_counter = 0;
        }
    }

    object.seen_this_cycle = [false; NUM_SENSOR_SLOTS];

    if !was_confirmed && object.is_confirmed(config) {
        events.push(FusionEvent::TrackConfirmed {
            slot,
            id: object.id,
        });
    }
}
