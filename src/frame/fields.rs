use tracing::debug;

use super::{BitBuffer, BIT_WEIGHTS};
use crate::timecode::TimeCode;

/// Decodes closed field groups into pending fields and publishes a whole
/// frame at the commit position.
///
/// Pending fields persist across frames: when a group arrives corrupted,
/// the previous frame's value for that field rides along until the
/// position decodes cleanly again.
#[derive(Debug, Default)]
pub(super) struct FieldDecoder {
    pending: TimeCode,
    committed: TimeCode,
}

impl FieldDecoder {
    /// Last committed frame.
    pub(super) fn time(&self) -> TimeCode {
        self.committed
    }

    /// Decode the group that closed when the frame advanced into
    /// `position`. Returns true when the advance committed a frame.
    pub(super) fn decode_group(&mut self, position: u8, bits: &mut BitBuffer) -> bool {
        match position {
            // Control-function bits accumulated since the commit, drained
            // with nothing stored so the seconds group starts clean.
            0 => {
                bits.weighted_sum(BIT_WEIGHTS.len());
            }
            1 => self.pending.seconds = bits.weighted_sum(9),
            2 => self.pending.minutes = bits.weighted_sum(9),
            3 => self.pending.hours = bits.weighted_sum(9),
            // Day-of-year spans two groups; nothing to decode until the
            // second one closes.
            4 => {}
            5 => {
                // Units and tens arrived in the first day group, the
                // hundreds pair right after it, then the tenths-of-second
                // digit. One fixed pop order, ending in a flush.
                let low = bits.take_weighted(&BIT_WEIGHTS[..=8]);
                let hundreds = bits.take_weighted(&BIT_WEIGHTS[9..=10]);
                self.pending.days = low + hundreds;
                self.pending.tenths = bits.weighted_sum(4);
            }
            6 => self.pending.years = bits.weighted_sum(8),
            7 => {
                self.commit();
                return true;
            }
            _ => {}
        }
        false
    }

    /// Advance the pending time by the fixed one-second decode latency,
    /// ripple any rollover, and publish.
    ///
    /// Rollover tests are exact equality: a field already past its modulus
    /// (a corrupted group) does not wrap and rides along until the next
    /// clean decode of that position.
    fn commit(&mut self) {
        self.pending.seconds += 1;
        if self.pending.seconds == 60 {
            self.pending.seconds = 0;
            self.pending.minutes += 1;
        }
        if self.pending.minutes == 60 {
            self.pending.minutes = 0;
            self.pending.hours += 1;
        }
        if self.pending.hours == 24 {
            self.pending.hours = 0;
            self.pending.days += 1;
        }
        if self.pending.days == 367 {
            self.pending.days = 0;
            self.pending.years += 1;
        }
        self.committed = self.pending;
        debug!(
            seconds = self.committed.seconds,
            tenths = self.committed.tenths,
            minutes = self.committed.minutes,
            hours = self.committed.hours,
            days = self.committed.days,
            years = self.committed.years,
            "committed frame"
        );
    }
}
