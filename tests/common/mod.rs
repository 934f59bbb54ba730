#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use irigb::frame::{PulseSymbol, BIT_WEIGHTS};
use irigb::{Clock, Demodulator, LevelSource};

/// Widths in milliseconds used when synthesizing each symbol.
pub const ZERO_MS: u64 = 2;
pub const ONE_MS: u64 = 5;
pub const MARKER_MS: u64 = 8;
/// Pulses repeat every 10 ms, 100 per frame.
pub const SLOT_MS: u64 = 10;

/// Field values encoded into one synthetic frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameFields {
    pub seconds: u16,
    pub tenths: u16,
    pub minutes: u16,
    pub hours: u16,
    pub days: u16,
    pub years: u16,
}

/// Symbols encoding `value` over the first `slots` entries of the weight
/// table.
fn bcd(value: u16, slots: usize) -> Vec<PulseSymbol> {
    BIT_WEIGHTS[..slots]
        .iter()
        .map(|&weight| {
            let set = match weight {
                0 => false,
                1 | 2 | 4 | 8 => (value % 10) & weight != 0,
                10 | 20 | 40 | 80 => ((value / 10) % 10) & (weight / 10) != 0,
                _ => ((value / 100) % 10) & (weight / 100) != 0,
            };
            if set {
                PulseSymbol::One
            } else {
                PulseSymbol::Zero
            }
        })
        .collect()
}

/// One whole 100-symbol frame, beginning at its reference marker. The
/// frame's trailing marker and the next frame's reference marker form the
/// next start-of-frame double.
pub fn frame_symbols(fields: FrameFields) -> Vec<PulseSymbol> {
    use PulseSymbol::{Marker, One, Zero};

    let mut symbols = vec![Marker];
    symbols.extend(bcd(fields.seconds, 8));
    symbols.push(Marker);
    symbols.extend(bcd(fields.minutes, 9));
    symbols.push(Marker);
    symbols.extend(bcd(fields.hours, 9));
    symbols.push(Marker);
    symbols.extend(bcd(fields.days % 100, 9));
    symbols.push(Marker);
    // Second day group: discarded slot, the hundreds bit, the tenths
    // digit, then tail bits that the decoder flushes.
    symbols.push(Zero);
    symbols.push(if fields.days >= 100 { One } else { Zero });
    symbols.extend(bcd(fields.tenths, 4));
    symbols.extend([Zero; 3]);
    symbols.push(Marker);
    symbols.extend(bcd(fields.years, 9));
    symbols.push(Marker);
    // Control-function groups through the end of the frame.
    for _ in 0..4 {
        symbols.extend([Zero; 9]);
        symbols.push(Marker);
    }
    symbols
}

/// Symbols for consecutive frames, preceded by one lone marker standing in
/// for the tail of an earlier frame so the first frame starts with a
/// double.
pub fn stream(frames: &[FrameFields]) -> Vec<PulseSymbol> {
    let mut symbols = vec![PulseSymbol::Marker];
    for &fields in frames {
        symbols.extend(frame_symbols(fields));
    }
    symbols
}

pub fn symbol_width(symbol: PulseSymbol) -> u64 {
    match symbol {
        PulseSymbol::Zero => ZERO_MS,
        PulseSymbol::One => ONE_MS,
        PulseSymbol::Marker => MARKER_MS,
    }
}

/// Level samples at 1 ms spacing: each symbol is `width` high samples then
/// low for the rest of its slot.
pub fn levels(symbols: &[PulseSymbol]) -> Vec<bool> {
    let mut out = Vec::new();
    for &symbol in symbols {
        let width = symbol_width(symbol);
        for _ in 0..width {
            out.push(true);
        }
        for _ in width..SLOT_MS {
            out.push(false);
        }
    }
    out
}

/// Scripted level source sampled at one step per millisecond, shared with
/// the clock so pulse widths line up with sample indices. Past the end of
/// the script the level is low and time keeps running.
#[derive(Default)]
struct Playback {
    levels: Vec<bool>,
    cursor: usize,
}

#[derive(Clone, Default)]
pub struct Feed(Rc<RefCell<Playback>>);

impl Feed {
    pub fn new(levels: Vec<bool>) -> Self {
        Feed(Rc::new(RefCell::new(Playback { levels, cursor: 0 })))
    }
}

impl LevelSource for Feed {
    fn level(&mut self) -> bool {
        let mut playback = self.0.borrow_mut();
        let level = playback
            .levels
            .get(playback.cursor)
            .copied()
            .unwrap_or(false);
        playback.cursor += 1;
        level
    }
}

impl Clock for Feed {
    fn millis(&mut self) -> u64 {
        (self.0.borrow().cursor as u64).saturating_sub(1)
    }
}

/// Demodulator reading the given symbols, plus the step count that
/// consumes them.
pub fn rig(symbols: &[PulseSymbol]) -> (Demodulator<Feed, Feed>, usize) {
    let samples = levels(symbols);
    let steps = samples.len();
    let feed = Feed::new(samples);
    (Demodulator::new(feed.clone(), feed), steps)
}

pub fn run(demod: &mut Demodulator<Feed, Feed>, steps: usize) {
    for _ in 0..steps {
        demod.step();
    }
}
