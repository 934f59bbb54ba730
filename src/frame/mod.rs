//! Frame decoding.
//!
//! The pipeline turns measured pulse widths into committed time fields:
//! classification ([`PulseSymbol::classify`]), frame synchronization and
//! group assembly ([`FrameSynchronizer`]), then per-group field decode with
//! rollover handling at the commit position. The state machine is fed one
//! classified symbol at a time and performs no I/O, so the whole decode
//! path can be driven from a scripted symbol sequence.

mod bits;
mod fields;
mod synchronizer;

pub use bits::{BitBuffer, BIT_WEIGHTS};
pub use synchronizer::FrameSynchronizer;

use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pulse widths classified as logical zero, in milliseconds.
pub const ZERO_WIDTH_MS: RangeInclusive<u64> = 1..=3;
/// Nominal pulse widths for logical one, in milliseconds. The classifier
/// also treats any width outside the other two ranges as a one.
pub const ONE_WIDTH_MS: RangeInclusive<u64> = 4..=6;
/// Pulse widths classified as a reference marker, in milliseconds.
pub const MARKER_WIDTH_MS: RangeInclusive<u64> = 7..=9;

/// One classified pulse.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseSymbol {
    Zero,
    One,
    /// Reference marker bounding a field group; two in a row announce the
    /// frame start.
    Marker,
}

impl PulseSymbol {
    /// Classify a high-pulse width.
    ///
    /// There is no invalid width: anything outside the zero and marker
    /// ranges decodes as a one, so noise enters the frame as data and
    /// framing heals at the next double marker.
    #[must_use]
    pub fn classify(width_ms: u64) -> Self {
        if MARKER_WIDTH_MS.contains(&width_ms) {
            PulseSymbol::Marker
        } else if ZERO_WIDTH_MS.contains(&width_ms) {
            PulseSymbol::Zero
        } else {
            PulseSymbol::One
        }
    }

    pub(crate) fn bit_value(self) -> u16 {
        match self {
            PulseSymbol::One => 1,
            PulseSymbol::Zero | PulseSymbol::Marker => 0,
        }
    }
}

/// Milestones produced by [`FrameSynchronizer::feed`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent {
    /// Two consecutive markers were seen; this is the frame's on-time
    /// instant.
    Start,
    /// A full frame of fields was committed.
    Commit,
}
