//! Core types describing the actuator and what it is playing.

/// Number of phases in the on/off pattern armed by a timed start.
pub(crate) const IMPLICIT_PATTERN_LEN: usize = 2;

/// Physical flavour of the buzzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorKind {
    /// Self-oscillating buzzer switched by a digital level.
    FixedFrequency,

    /// Passive buzzer driven by a frequency-programmable output.
    #[default]
    VariableFrequency,
}

/// Whether a timed on/off pattern repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopMode {
    /// Play the on and off phases once, then complete.
    #[default]
    Once,

    /// Alternate between the on and off phases until stopped.
    Forever,
}

impl From<bool> for LoopMode {
    fn from(looping: bool) -> Self {
        if looping {
            LoopMode::Forever
        } else {
            LoopMode::Once
        }
    }
}

/// Melody validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MelodyError {
    /// No steps provided.
    Empty,

    /// Duration and frequency tables differ in length.
    LengthMismatch { durations: usize, frequencies: usize },

    /// Requested length is longer than a supplied table.
    LengthOutOfRange { len: usize, available: usize },
}

impl core::fmt::Display for MelodyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MelodyError::Empty => {
                write!(f, "melody must have at least one step")
            }
            MelodyError::LengthMismatch {
                durations,
                frequencies,
            } => {
                write!(
                    f,
                    "melody has {} durations but {} frequencies",
                    durations, frequencies
                )
            }
            MelodyError::LengthOutOfRange { len, available } => {
                write!(
                    f,
                    "melody length {} exceeds table of {} entries",
                    len, available
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MelodyError {}

/// A borrowed sequence of (duration, frequency) steps, e.g. a ringtone.
///
/// Durations are in tick-interval units (milliseconds when the buzzer is
/// ticked with its declared interval). Frequencies are in Hz, `0` being a
/// rest. The tables are never copied: they must outlive playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Melody<'a> {
    durations: &'a [u16],
    frequencies: Option<&'a [u16]>,
}

impl<'a> Melody<'a> {
    /// Creates a melody from equal-length duration and frequency tables.
    ///
    /// # Errors
    /// * `Empty` - No durations were given
    /// * `LengthMismatch` - The tables have different lengths
    pub fn new(durations: &'a [u16], frequencies: &'a [u16]) -> Result<Self, MelodyError> {
        if durations.is_empty() {
            return Err(MelodyError::Empty);
        }

        if durations.len() != frequencies.len() {
            return Err(MelodyError::LengthMismatch {
                durations: durations.len(),
                frequencies: frequencies.len(),
            });
        }

        Ok(Self {
            durations,
            frequencies: Some(frequencies),
        })
    }

    /// Creates a rhythm-only melody, for buzzers that cannot change pitch.
    ///
    /// # Errors
    /// * `Empty` - No durations were given
    pub fn durations_only(durations: &'a [u16]) -> Result<Self, MelodyError> {
        if durations.is_empty() {
            return Err(MelodyError::Empty);
        }

        Ok(Self {
            durations,
            frequencies: None,
        })
    }

    /// Creates a melody from the first `len` entries of each table.
    ///
    /// Useful with ringtone tables that ship alongside a separate length.
    ///
    /// # Errors
    /// * `Empty` - `len` is zero
    /// * `LengthOutOfRange` - A table holds fewer than `len` entries
    pub fn from_parts(
        durations: &'a [u16],
        frequencies: Option<&'a [u16]>,
        len: usize,
    ) -> Result<Self, MelodyError> {
        if len == 0 {
            return Err(MelodyError::Empty);
        }

        let durations = durations
            .get(..len)
            .ok_or(MelodyError::LengthOutOfRange {
                len,
                available: durations.len(),
            })?;

        let frequencies = match frequencies {
            Some(table) => Some(table.get(..len).ok_or(MelodyError::LengthOutOfRange {
                len,
                available: table.len(),
            })?),
            None => None,
        };

        Ok(Self {
            durations,
            frequencies,
        })
    }

    /// Returns the number of steps.
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    /// Always false; a melody holds at least one step.
    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// Returns the duration of the step at `index`.
    pub fn duration(&self, index: usize) -> Option<u16> {
        self.durations.get(index).copied()
    }

    /// Returns the frequency of the step at `index`, if frequencies were given.
    pub fn frequency(&self, index: usize) -> Option<u16> {
        self.frequencies.and_then(|f| f.get(index).copied())
    }

    /// Returns `(duration, frequency)` for the step at `index`.
    pub fn step(&self, index: usize) -> Option<(u16, Option<u16>)> {
        self.duration(index).map(|d| (d, self.frequency(index)))
    }

    pub fn durations(&self) -> &'a [u16] {
        self.durations
    }

    pub fn frequencies(&self) -> Option<&'a [u16]> {
        self.frequencies
    }
}

/// What is currently armed on a buzzer.
///
/// `len == 0` means nothing is armed (or an unbounded tone from `turn_on`),
/// `len == 2` without a melody is the implicit on/off pattern, and any other
/// armed state carries a melody of `len` steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackIntent<'a> {
    pub(crate) len: usize,
    pub(crate) index: usize,
    pub(crate) elapsed: u32,
    pub(crate) step_duration: u32,
    pub(crate) step_frequency: u32,
    pub(crate) loop_mode: LoopMode,
    pub(crate) melody: Option<Melody<'a>>,
}

impl<'a> PlaybackIntent<'a> {
    pub(crate) const fn idle() -> Self {
        Self {
            len: 0,
            index: 0,
            elapsed: 0,
            step_duration: 0,
            step_frequency: 0,
            loop_mode: LoopMode::Once,
            melody: None,
        }
    }

    /// Step count of the armed pattern, `0` when none.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current step cursor.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Time accumulated in the current step.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Time after which the current step ends.
    pub fn step_duration(&self) -> u32 {
        self.step_duration
    }

    /// Frequency of the current step.
    pub fn step_frequency(&self) -> u32 {
        self.step_frequency
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    /// The armed melody, if playing one.
    pub fn melody(&self) -> Option<&Melody<'a>> {
        self.melody.as_ref()
    }
}

impl Default for PlaybackIntent<'_> {
    fn default() -> Self {
        Self::idle()
    }
}
