#![doc = include_str!("../README.md")]

mod demodulator;
mod error;
mod timecode;

pub mod calendar;
pub mod frame;

pub use demodulator::{Clock, Demodulator, LevelSource, OnTimeHandler};
pub use error::{Error, Result};
pub use timecode::{TimeCode, EPOCH_YEAR};
