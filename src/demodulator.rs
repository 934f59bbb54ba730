use tracing::trace;
use typed_builder::TypedBuilder;

use crate::frame::{
    FrameEvent, FrameSynchronizer, PulseSymbol, MARKER_WIDTH_MS, ONE_WIDTH_MS, ZERO_WIDTH_MS,
};
use crate::timecode::TimeCode;

/// Digital level input carrying the pulse train.
///
/// Implementations own the channel configuration, such as pin setup or
/// signal inversion; the demodulator only samples the current level.
pub trait LevelSource {
    /// Current digital level, true for the high state.
    fn level(&mut self) -> bool;
}

/// Monotonic millisecond clock used to time pulse widths.
pub trait Clock {
    fn millis(&mut self) -> u64;
}

/// Receives the once-per-frame on-time notification.
///
/// Dispatched synchronously from [`Demodulator::step`]; sampling stalls
/// until it returns, so implementations must not block.
pub trait OnTimeHandler {
    fn on_time(&mut self);
}

impl<F: FnMut()> OnTimeHandler for F {
    fn on_time(&mut self) {
        self();
    }
}

/// Tracks one rising-to-falling pulse across steps.
#[derive(Debug, Default)]
struct PulseCapture {
    recording: bool,
    started_at: u64,
}

impl PulseCapture {
    /// Feed one level sample, returning the completed pulse width on a
    /// falling edge.
    fn observe(&mut self, level: bool, now: u64) -> Option<u64> {
        if level && !self.recording {
            self.recording = true;
            self.started_at = now;
            None
        } else if !level && self.recording {
            self.recording = false;
            Some(now.saturating_sub(self.started_at))
        } else {
            None
        }
    }
}

/// Pulse-width demodulator over a polled digital input.
///
/// Each [`Demodulator::step`] samples the level source once, times
/// completed pulses against the clock, and runs them through the frame
/// pipeline. The caller owns the poll loop and its cadence; sampling must
/// be fast enough to observe both edges of the narrowest (1 ms) pulse.
///
/// ```no_run
/// use irigb::{Clock, Demodulator, LevelSource};
///
/// // Stand-ins for a GPIO pin and a monotonic millisecond counter.
/// struct Gpio;
///
/// impl LevelSource for Gpio {
///     fn level(&mut self) -> bool {
///         false
///     }
/// }
///
/// struct Uptime;
///
/// impl Clock for Uptime {
///     fn millis(&mut self) -> u64 {
///         0
///     }
/// }
///
/// let mut demod = Demodulator::builder()
///     .source(Gpio)
///     .clock(Uptime)
///     .on_time(Box::new(|| println!("frame start")))
///     .build();
///
/// loop {
///     demod.step();
///     if !demod.is_stale(2_000) {
///         println!(
///             "{:02}:{:02}:{:02}",
///             demod.hours(),
///             demod.minutes(),
///             demod.seconds()
///         );
///     }
/// }
/// ```
#[derive(TypedBuilder)]
pub struct Demodulator<S, C>
where
    S: LevelSource,
    C: Clock,
{
    /// Input carrying the time-code pulse train.
    source: S,
    /// Monotonic millisecond clock for pulse timing.
    clock: C,
    /// Handler dispatched once per frame start.
    #[builder(default, setter(strip_option))]
    on_time: Option<Box<dyn OnTimeHandler>>,
    #[builder(default, setter(skip))]
    capture: PulseCapture,
    #[builder(default, setter(skip))]
    synchronizer: FrameSynchronizer,
    /// Clock reading at the most recent frame start.
    #[builder(default, setter(skip))]
    last_frame_start: Option<u64>,
}

impl<S, C> Demodulator<S, C>
where
    S: LevelSource,
    C: Clock,
{
    /// Demodulator with no on-time handler registered.
    pub fn new(source: S, clock: C) -> Self {
        Self::builder().source(source).clock(clock).build()
    }

    /// Register the handler dispatched at each frame start, replacing any
    /// previous registration.
    pub fn set_on_time(&mut self, handler: Box<dyn OnTimeHandler>) {
        self.on_time = Some(handler);
    }

    /// Run one poll step: sample the level once, time any completed pulse,
    /// and advance the frame pipeline.
    ///
    /// A step that observes no falling edge changes nothing.
    pub fn step(&mut self) {
        let level = self.source.level();
        let now = self.clock.millis();
        let Some(width) = self.capture.observe(level, now) else {
            return;
        };
        let symbol = PulseSymbol::classify(width);
        if !ZERO_WIDTH_MS.contains(&width)
            && !ONE_WIDTH_MS.contains(&width)
            && !MARKER_WIDTH_MS.contains(&width)
        {
            trace!(width_ms = width, "width outside nominal ranges, decoding as one");
        }
        trace!(width_ms = width, ?symbol, "pulse");
        match self.synchronizer.feed(symbol) {
            Some(FrameEvent::Start) => {
                self.last_frame_start = Some(now);
                if let Some(handler) = self.on_time.as_mut() {
                    handler.on_time();
                }
            }
            Some(FrameEvent::Commit) | None => {}
        }
    }

    /// Last committed frame of time fields.
    #[must_use]
    pub fn time(&self) -> TimeCode {
        self.synchronizer.time()
    }

    #[must_use]
    pub fn seconds(&self) -> u16 {
        self.time().seconds
    }

    /// Tenths of a second within [`Demodulator::seconds`].
    #[must_use]
    pub fn tenths(&self) -> u16 {
        self.time().tenths
    }

    #[must_use]
    pub fn minutes(&self) -> u16 {
        self.time().minutes
    }

    #[must_use]
    pub fn hours(&self) -> u16 {
        self.time().hours
    }

    /// 0-based ordinal day of year.
    #[must_use]
    pub fn days(&self) -> u16 {
        self.time().days
    }

    /// Years since [`crate::EPOCH_YEAR`].
    #[must_use]
    pub fn years(&self) -> u16 {
        self.time().years
    }

    /// Month (1-based) from the committed day-of-year, per the fixed
    /// non-leap table.
    #[must_use]
    pub fn month(&self) -> u16 {
        self.time().month()
    }

    /// Day within [`Demodulator::month`], 0-based.
    #[must_use]
    pub fn day_of_month(&self) -> u16 {
        self.time().day_of_month()
    }

    /// True once a frame start has been observed.
    #[must_use]
    pub fn is_synchronized(&self) -> bool {
        self.synchronizer.is_synchronized()
    }

    /// Clock reading at the most recent on-time event.
    #[must_use]
    pub fn last_frame_start(&self) -> Option<u64> {
        self.last_frame_start
    }

    /// True when no frame start has been seen within the last `max_age_ms`.
    ///
    /// A dead or desynchronized signal freezes the committed fields, so
    /// readers that must not trust frozen time check this first.
    pub fn is_stale(&mut self, max_age_ms: u64) -> bool {
        match self.last_frame_start {
            Some(at) => self.clock.millis().saturating_sub(at) > max_age_ms,
            None => true,
        }
    }
}
