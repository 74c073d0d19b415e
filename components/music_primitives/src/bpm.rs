use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BpmError {
    #[error("BPM value out of range: {0}")]
    OutOfRange(f32),
}

/// Beats per minute, stored as integer hundredths for precision without floats.
///
/// Catalog audio features report tempo as a float (e.g. 125.45); track
/// readouts show it rounded to a whole number.
///
/// Valid range: 20.0 to 999.99 BPM
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bpm(u32);

impl Bpm {
    /// Minimum valid BPM (20.0)
    pub const MIN: f32 = 20.0;

    /// Maximum valid BPM (999.99)
    pub const MAX: f32 = 999.99;

    /// Create BPM from floating point value
    ///
    /// # Examples
    /// ```
    /// # use music_primitives::{Bpm, BpmError};
    /// let bpm = Bpm::from_f32(125.45)?;
    /// assert_eq!(bpm.as_u32(), 125);
    /// # Ok::<(), BpmError>(())
    /// ```
    pub fn from_f32(bpm: f32) -> Result<Self, BpmError> {
        if !bpm.is_finite() || bpm < Self::MIN || bpm > Self::MAX {
            return Err(BpmError::OutOfRange(bpm));
        }

        let hundredths = (bpm * 100.0).round() as u32;
        Ok(Bpm(hundredths))
    }

    /// Get BPM as floating point
    pub fn as_f32(&self) -> f32 {
        self.0 as f32 / 100.0
    }

    /// Get BPM as integer (rounded to nearest)
    pub fn as_u32(&self) -> u32 {
        (self.0 + 50) / 100
    }
}

impl fmt::Display for Bpm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}
