use std::fmt;

/// Musical pitch class (0-11, where 0 = C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PitchClass {
    C = 0,
    CSharp = 1, // C# / Db
    D = 2,
    DSharp = 3, // D# / Eb
    E = 4,
    F = 5,
    FSharp = 6, // F# / Gb
    G = 7,
    GSharp = 8, // G# / Ab
    A = 9,
    ASharp = 10, // A# / Bb
    B = 11,
}

impl PitchClass {
    /// Build from a numeric pitch class, `None` outside 0-11
    pub fn from_number(n: i32) -> Option<Self> {
        match n {
            0 => Some(PitchClass::C),
            1 => Some(PitchClass::CSharp),
            2 => Some(PitchClass::D),
            3 => Some(PitchClass::DSharp),
            4 => Some(PitchClass::E),
            5 => Some(PitchClass::F),
            6 => Some(PitchClass::FSharp),
            7 => Some(PitchClass::G),
            8 => Some(PitchClass::GSharp),
            9 => Some(PitchClass::A),
            10 => Some(PitchClass::ASharp),
            11 => Some(PitchClass::B),
            _ => None,
        }
    }

    /// Get as sharp notation (e.g., "C#")
    pub fn as_sharp(&self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }

    /// Get numeric value (0-11)
    pub fn as_number(&self) -> u8 {
        *self as u8
    }
}

/// Musical mode (Major or Minor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Major,
    Minor,
}

/// Musical key: a pitch class plus a mode.
///
/// Convertible from the numeric encoding music catalogs report
/// (pitch class 0-11, mode 1 for major) and rendered in the compact
/// form DJs read: bare pitch for major ("C"), `m` suffix for minor
/// ("C#m").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pitch: PitchClass,
    mode: Mode,
}

impl Key {
    /// Create a new key
    pub fn new(pitch: PitchClass, mode: Mode) -> Self {
        Self { pitch, mode }
    }

    /// Build from catalog numeric encoding.
    ///
    /// Mode 1 is major; any other mode value is treated as minor.
    /// Returns `None` when the pitch class falls outside 0-11.
    ///
    /// # Examples
    /// ```
    /// # use music_primitives::Key;
    /// assert_eq!(Key::from_numeric(0, 1).unwrap().to_compact(), "C");
    /// assert_eq!(Key::from_numeric(1, 0).unwrap().to_compact(), "C#m");
    /// assert!(Key::from_numeric(-1, 0).is_none());
    /// ```
    pub fn from_numeric(pitch: i32, mode: i32) -> Option<Self> {
        let pitch = PitchClass::from_number(pitch)?;
        let mode = if mode == 1 { Mode::Major } else { Mode::Minor };
        Some(Self { pitch, mode })
    }

    /// Compact notation: "C" for C major, "C#m" for C# minor
    pub fn to_compact(&self) -> String {
        let suffix = match self.mode {
            Mode::Major => "",
            Mode::Minor => "m",
        };
        format!("{}{}", self.pitch.as_sharp(), suffix)
    }

    pub fn pitch(&self) -> PitchClass {
        self.pitch
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_compact())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_encoding_round_trip() {
        let key = Key::from_numeric(0, 1).unwrap();
        assert_eq!(key.pitch(), PitchClass::C);
        assert_eq!(key.mode(), Mode::Major);

        let key = Key::from_numeric(9, 0).unwrap();
        assert_eq!(key.pitch(), PitchClass::A);
        assert_eq!(key.mode(), Mode::Minor);
    }

    #[test]
    fn major_renders_bare_pitch() {
        assert_eq!(Key::from_numeric(0, 1).unwrap().to_compact(), "C");
        assert_eq!(Key::from_numeric(7, 1).unwrap().to_compact(), "G");
    }

    #[test]
    fn minor_renders_m_suffix() {
        assert_eq!(Key::from_numeric(1, 0).unwrap().to_compact(), "C#m");
        assert_eq!(Key::from_numeric(11, 0).unwrap().to_compact(), "Bm");
    }

    #[test]
    fn non_major_modes_are_minor() {
        assert_eq!(Key::from_numeric(2, 0).unwrap().mode(), Mode::Minor);
        assert_eq!(Key::from_numeric(2, -1).unwrap().mode(), Mode::Minor);
        assert_eq!(Key::from_numeric(2, 5).unwrap().mode(), Mode::Minor);
    }

    #[test]
    fn out_of_range_pitch_is_none() {
        assert!(Key::from_numeric(-1, 0).is_none());
        assert!(Key::from_numeric(12, 1).is_none());
    }

    #[test]
    fn display_matches_compact() {
        let key = Key::new(PitchClass::FSharp, Mode::Minor);
        assert_eq!(format!("{}", key), "F#m");
    }
}
