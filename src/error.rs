//! Error types for boundary-visible fallible operations.
//!
//! Most failure modes described by the fusion core are *not* errors in the
//! Rust sense: an out-of-gate measurement or a full track table simply drops
//! the input, silently, by design. The only conditions surfaced here are the
//! ones a caller can act on.

use thiserror::Error;

/// Failure conditions a caller of the fusion core can observe.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FusionError {
    /// No unused ID remained in `[1, MAX_ID)` while allocating a new track.
    ///
    /// Guaranteed not to occur while the track table capacity stays below
    /// `MAX_ID`; seeing this means the engine was configured with a
    /// capacity too close to the ID space and should be treated as a fatal
    /// configuration error rather than a transient condition.
    #[error("no id available in [1, {max_id}) for a new track")]
    IdSpaceExhausted {
        /// The exclusive upper bound of the ID space.
        max_id: u8,
    },
}
