use std::collections::VecDeque;

use super::PulseSymbol;

/// Positional weights for draining one field group.
///
/// BCD digit weights with zero-weight slots at the unused positions between
/// digits (indices 4 and 9): units 1-2-4-8, tens 10-20-40-80, hundreds
/// 100-200.
pub const BIT_WEIGHTS: [u16; 12] = [1, 2, 4, 8, 0, 10, 20, 40, 80, 0, 100, 200];

/// FIFO of classified symbols for the field group currently being
/// assembled.
///
/// One buffer lives for the life of a decoder. It is cleared at each frame
/// start, filled with data symbols between markers, and drained when a
/// marker closes the group.
#[derive(Debug, Default)]
pub struct BitBuffer {
    symbols: VecDeque<PulseSymbol>,
}

impl BitBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, symbol: PulseSymbol) {
        self.symbols.push_back(symbol);
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Pop one symbol per entry of `weights`, summing bit value times
    /// weight. Stops quietly if the buffer runs out first and leaves any
    /// remaining symbols in place.
    pub fn take_weighted(&mut self, weights: &[u16]) -> u16 {
        let mut sum = 0;
        for &weight in weights {
            let Some(symbol) = self.symbols.pop_front() else {
                break;
            };
            sum += symbol.bit_value() * weight;
        }
        sum
    }

    /// Drain the whole buffer: the first `len` symbols contribute under
    /// [`BIT_WEIGHTS`], everything after them is discarded so a group never
    /// leaks into the next.
    pub fn weighted_sum(&mut self, len: usize) -> u16 {
        let len = len.min(BIT_WEIGHTS.len());
        let sum = self.take_weighted(&BIT_WEIGHTS[..len]);
        self.symbols.clear();
        sum
    }
}
