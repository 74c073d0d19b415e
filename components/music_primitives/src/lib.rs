mod bpm;
mod key;

pub use bpm::{Bpm, BpmError};
pub use key::{Key, Mode, PitchClass};
