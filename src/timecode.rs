//! Decoded time fields.
//!
//! Reference: [IRIG timecode](https://en.wikipedia.org/wiki/IRIG_timecode)

#[cfg(feature = "epoch")]
use hifitime::{Epoch, Unit};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::calendar;
#[cfg(feature = "epoch")]
use crate::error::{Error, Result};

/// Base year added to the transmitted two-digit year.
pub const EPOCH_YEAR: i32 = 1970;

/// One frame's worth of decoded time fields.
///
/// `days` is the 0-based ordinal day of year as transmitted and `years`
/// counts from [`EPOCH_YEAR`]. Fields are published whole-frame at the
/// commit position, so a reader never observes a half-updated time.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimeCode {
    pub seconds: u16,
    /// Tenths of a second within `seconds`.
    pub tenths: u16,
    pub minutes: u16,
    pub hours: u16,
    /// 0-based ordinal day of year.
    pub days: u16,
    /// Years since [`EPOCH_YEAR`].
    pub years: u16,
}

impl TimeCode {
    /// Month (1-based) containing the committed day-of-year, from the fixed
    /// non-leap table in [`calendar`].
    #[must_use]
    pub fn month(&self) -> u16 {
        calendar::month_of(self.days)
    }

    /// Day within [`TimeCode::month`], 0-based.
    #[must_use]
    pub fn day_of_month(&self) -> u16 {
        calendar::day_of_month(self.days)
    }

    /// Convert to a UTC [`Epoch`].
    ///
    /// Day-of-year is applied as true calendar arithmetic from January 1,
    /// so unlike [`TimeCode::month`] this lands day 59 of a leap year on
    /// February 29.
    ///
    /// # Errors
    /// [`Error::InvalidTime`] when a field is outside its decodable range,
    /// which indicates a corrupted group was committed.
    #[cfg(feature = "epoch")]
    pub fn epoch(&self) -> Result<Epoch> {
        if self.seconds > 59 || self.minutes > 59 || self.hours > 23 {
            return Err(Error::InvalidTime(format!(
                "time of day out of range: {:02}:{:02}:{:02}",
                self.hours, self.minutes, self.seconds
            )));
        }
        if self.tenths > 9 {
            return Err(Error::InvalidTime(format!(
                "tenths of a second out of range: {}",
                self.tenths
            )));
        }
        if self.days > 366 {
            return Err(Error::InvalidTime(format!(
                "day of year out of range: {}",
                self.days
            )));
        }
        let jan1 = Epoch::maybe_from_gregorian_utc(
            EPOCH_YEAR + i32::from(self.years),
            1,
            1,
            self.hours as u8,
            self.minutes as u8,
            self.seconds as u8,
            u32::from(self.tenths) * 100_000_000,
        )
        .map_err(|e| Error::InvalidTime(e.to_string()))?;
        Ok(jan1 + Unit::Day * i64::from(self.days))
    }
}
