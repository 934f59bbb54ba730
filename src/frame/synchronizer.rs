use tracing::{debug, trace};

use super::fields::FieldDecoder;
use super::{BitBuffer, FrameEvent, PulseSymbol};
use crate::timecode::TimeCode;

/// Number of cyclic frame positions, one per marker-bounded field group.
const POSITION_COUNT: u8 = 9;
/// Position whose closing marker also pushes the day-group padding symbol.
const DAY_PAD_POSITION: u8 = 4;

/// Symbol-driven frame state machine.
///
/// Tracks the cyclic frame position, assembles field groups in a
/// [`BitBuffer`], and drives the field decoder as markers close each group.
/// A new synchronizer is unsynchronized and ignores everything until the
/// first double marker.
///
/// ```
/// use irigb::frame::{FrameEvent, FrameSynchronizer, PulseSymbol};
///
/// let mut sync = FrameSynchronizer::new();
/// // A single marker is only a group boundary.
/// assert_eq!(sync.feed(PulseSymbol::Marker), None);
/// // The second in a row is the frame start.
/// assert_eq!(sync.feed(PulseSymbol::Marker), Some(FrameEvent::Start));
/// ```
#[derive(Debug, Default)]
pub struct FrameSynchronizer {
    /// Current frame position, `None` until the first double marker.
    position: Option<u8>,
    last_symbol: Option<PulseSymbol>,
    bits: BitBuffer,
    fields: FieldDecoder,
}

impl FrameSynchronizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last committed frame of time fields.
    #[must_use]
    pub fn time(&self) -> TimeCode {
        self.fields.time()
    }

    /// True once a frame start has been seen.
    #[must_use]
    pub fn is_synchronized(&self) -> bool {
        self.position.is_some()
    }

    /// Advance the state machine by one classified pulse.
    ///
    /// Returns the milestone the symbol produced, if any: [`FrameEvent::Start`]
    /// on the second of two consecutive markers, or [`FrameEvent::Commit`]
    /// when the marker closing the control-function group publishes the
    /// frame's fields.
    pub fn feed(&mut self, symbol: PulseSymbol) -> Option<FrameEvent> {
        let event = self.transition(symbol);
        self.last_symbol = Some(symbol);
        event
    }

    fn transition(&mut self, symbol: PulseSymbol) -> Option<FrameEvent> {
        if self.last_symbol == Some(PulseSymbol::Marker) && symbol == PulseSymbol::Marker {
            // The first marker of the pair already closed the previous
            // frame's last group; this one is the on-time instant. Also the
            // recovery path after noise knocked the position off.
            debug!("frame start");
            self.bits.clear();
            self.position = Some(0);
            return Some(FrameEvent::Start);
        }

        let Some(position) = self.position else {
            return None;
        };

        match symbol {
            PulseSymbol::Marker => {
                if position == DAY_PAD_POSITION {
                    self.pad_day_group();
                }
                let position = (position + 1) % POSITION_COUNT;
                self.position = Some(position);
                trace!(position, buffered = self.bits.len(), "group closed");
                if self.fields.decode_group(position, &mut self.bits) {
                    return Some(FrameEvent::Commit);
                }
            }
            PulseSymbol::Zero | PulseSymbol::One => self.bits.push(symbol),
        }
        None
    }

    /// Day-of-year spans the two groups around the fifth marker and is
    /// decoded with one fixed pop order. Pushing a synthetic symbol as the
    /// first group closes keeps the second group's hundreds pair aligned
    /// with the weight table; as a marker it carries bit value zero.
    fn pad_day_group(&mut self) {
        self.bits.push(PulseSymbol::Marker);
    }
}
