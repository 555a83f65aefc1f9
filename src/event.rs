//! Structured lifecycle events emitted by a cycle.
//!
//! The core carries no logging dependency: instead of writing log lines it
//! returns a vector of these from every [`crate::engine::FusionEngine::run_cycle`]
//! call, the same way `ArpaProcessor::process_spoke` in the library this
//! crate's layout is modeled on returns a `Vec` of its own event type rather
//! than logging. A harness is free to log, trace, or discard them.

use serde::{Deserialize, Serialize};

/// One thing that happened to a track slot during a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FusionEvent {
    /// A new track claimed a free or displaced slot.
    TrackCreated {
        /// Index into the track table.
        slot: usize,
        /// The newly allocated ID.
        id: u8,
    },
    /// A track crossed the confirmation threshold and is now reported.
    TrackConfirmed {
        /// Index into the track table.
        slot: usize,
        /// The track's ID.
        id: u8,
    },
    /// A track's coasting limit was exceeded with no sensor sighting.
    TrackLost {
        /// Index into the track table.
        slot: usize,
        /// The track's ID before the slot was freed.
        id: u8,
    },
    /// A track was reset because it duplicated another, higher-priority track.
    TrackPruned {
        /// Index into the track table.
        slot: usize,
        /// The track's ID before the slot was freed.
        id: u8,
    },
    /// A track was reset to make room for a higher-priority new object.
    TrackDisplaced {
        /// Index into the track table.
        slot: usize,
        /// The track's ID before the slot was freed.
        id: u8,
    },
    /// An incoming measurement could not be turned into a plot and was
    /// dropped before entering the core (non-finite value or unknown sensor).
    MeasurementDropped {
        /// Index of the measurement within the cycle's input batch.
        measurement_index: usize,
    },
}
