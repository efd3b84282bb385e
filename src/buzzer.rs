//! Buzzer playback controller and tick sequencer.
//!
//! Provides [`Buzzer`], which arms playback intents (a steady tone, a timed
//! on/off pattern or a [`Melody`]) and advances them from a periodic
//! [`Buzzer::tick`] call. No timer, pin or oscillator is assumed: outputs are
//! reached through [`OutputCapability`] and time only moves when `tick` runs.

use crate::command::BuzzerAction;
use crate::fmt::{debug, trace};
use crate::output::{FrequencyOutput, LevelOutput, OutputCapability, Unused};
use crate::types::{ActuatorKind, IMPLICIT_PATTERN_LEN, LoopMode, Melody, MelodyError, PlaybackIntent};

/// Handler invoked from [`Buzzer::tick`] when a pattern plays to its end.
///
/// Runs in whatever context calls `tick`, typically an interrupt, so keep it
/// short. The buzzer is still marked active while the handler runs.
pub type CompletionHandler<'a, L, F> = fn(&Buzzer<'a, L, F>);

/// Buzzer wired to a frequency-programmable output.
pub type PassiveBuzzer<'a, F> = Buzzer<'a, Unused, F>;

/// Buzzer wired to a digital output.
pub type ActiveBuzzer<'a, L> = Buzzer<'a, L, Unused>;

/// Coarse playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuzzerState {
    /// Nothing playing.
    Idle,
    /// A tone, pattern or melody is playing.
    Playing,
}

/// What a call to [`Buzzer::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickEvent {
    /// Buzzer is not playing.
    Idle,

    /// Current step continues, or an unbounded tone is sounding.
    Hold,

    /// A step boundary was crossed; `index` is the step now playing.
    Advanced { index: usize },

    /// The pattern finished. Output is silenced and the handler has run.
    Complete,
}

/// Drives one buzzer through tones, beeps and melodies.
///
/// Created idle and unconfigured; call [`configure`](Self::configure) once
/// before use. Operations on an unconfigured buzzer update state but drive
/// nothing.
///
/// # Type Parameters
/// * `'a` - Lifetime of borrowed melody tables
/// * `L` - Level output type (use [`Unused`] if not wired)
/// * `F` - Frequency output type (use [`Unused`] if not wired)
pub struct Buzzer<'a, L, F> {
    output: Option<OutputCapability<L, F>>,
    kind: ActuatorKind,
    tick_interval_ms: u32,
    active: bool,
    intent: PlaybackIntent<'a>,
    on_complete: Option<CompletionHandler<'a, L, F>>,
}

impl<'a, L: LevelOutput, F: FrequencyOutput> Buzzer<'a, L, F> {
    /// Creates an idle, unconfigured buzzer.
    ///
    /// Defaults to [`ActuatorKind::VariableFrequency`] and a 1 ms tick.
    pub const fn new() -> Self {
        Self {
            output: None,
            kind: ActuatorKind::VariableFrequency,
            tick_interval_ms: 1,
            active: false,
            intent: PlaybackIntent::idle(),
            on_complete: None,
        }
    }

    /// Creates a buzzer and configures it in one step.
    pub fn with_output(output: OutputCapability<L, F>, tick_interval_ms: u32) -> Self {
        let mut buzzer = Self::new();
        buzzer.configure(output, tick_interval_ms);
        buzzer
    }

    /// Sets the output and the interval at which [`tick`](Self::tick) will be called.
    ///
    /// The actuator kind follows the capability. Playback state is untouched.
    pub fn configure(&mut self, output: OutputCapability<L, F>, tick_interval_ms: u32) {
        self.kind = output.kind();
        self.output = Some(output);
        self.tick_interval_ms = tick_interval_ms;
        debug!("buzzer configured, tick {} ms", tick_interval_ms);
    }

    /// Registers the handler run when a pattern completes on its own.
    pub fn set_completion_handler(&mut self, handler: CompletionHandler<'a, L, F>) {
        self.on_complete = Some(handler);
    }

    pub fn clear_completion_handler(&mut self) {
        self.on_complete = None;
    }

    /// Dispatches a [`BuzzerAction`] to the matching operation.
    pub fn handle_action(&mut self, action: BuzzerAction<'a>) {
        match action {
            BuzzerAction::TurnOn { frequency } => self.turn_on(frequency),
            BuzzerAction::Start {
                frequency,
                period,
                mode,
            } => self.start_timed(frequency, period, mode),
            BuzzerAction::Play(melody) => self.play(melody),
            BuzzerAction::Stop => self.stop(),
        }
    }

    /// Silences the buzzer and ends playback. Can be called from any state.
    ///
    /// Never runs the completion handler.
    pub fn stop(&mut self) {
        self.active = false;
        if let Some(output) = self.output.as_mut() {
            output.silence();
        }
        debug!("buzzer stopped");
    }

    /// Sounds a steady tone until stopped or re-armed.
    ///
    /// `frequency` is ignored by fixed-frequency buzzers.
    pub fn turn_on(&mut self, frequency: u32) {
        self.intent = PlaybackIntent {
            step_frequency: self.frequency_for_kind(frequency),
            ..PlaybackIntent::idle()
        };
        self.active = true;
        self.sound(frequency);
        debug!("buzzer on at {} Hz", frequency);
    }

    /// Beeps once, or repeatedly with [`LoopMode::Forever`].
    ///
    /// The pattern has an on phase and an off phase, each lasting `period`
    /// tick-interval units. A fixed-frequency buzzer toggles between them. A
    /// variable-frequency buzzer keeps the tone through both phases and is
    /// only silenced when a finite pattern ends.
    pub fn start_timed(&mut self, frequency: u32, period: u32, mode: LoopMode) {
        self.intent = PlaybackIntent {
            len: IMPLICIT_PATTERN_LEN,
            step_duration: period,
            step_frequency: self.frequency_for_kind(frequency),
            loop_mode: mode,
            ..PlaybackIntent::idle()
        };
        self.active = true;
        self.sound(frequency);
        debug!("buzzer timed start, {} Hz, period {}", frequency, period);
    }

    /// Validates the tables and plays them as a melody.
    ///
    /// # Errors
    /// Returns the validation error and leaves current playback untouched.
    pub fn start_sequence(
        &mut self,
        durations: &'a [u16],
        frequencies: &'a [u16],
    ) -> Result<(), MelodyError> {
        let melody = Melody::new(durations, frequencies)?;
        self.play(melody);
        Ok(())
    }

    /// Plays a melody from its first step. Melodies never loop.
    ///
    /// Fixed-frequency buzzers sound for the whole melody and use only the
    /// durations. A variable-frequency melody without frequencies keeps the
    /// output as it was.
    pub fn play(&mut self, melody: Melody<'a>) {
        let (duration, frequency) = melody.step(0).unwrap_or((0, None));

        self.intent = PlaybackIntent {
            len: melody.len(),
            step_duration: u32::from(duration),
            step_frequency: frequency.map(u32::from).unwrap_or(0),
            melody: Some(melody),
            ..PlaybackIntent::idle()
        };
        self.active = true;

        match self.kind {
            ActuatorKind::FixedFrequency => self.sound(0),
            ActuatorKind::VariableFrequency => {
                if let Some(hz) = frequency {
                    self.sound(u32::from(hz));
                }
            }
        }
        debug!("buzzer playing melody of {} steps", melody.len());
    }

    /// Advances playback by one tick interval.
    ///
    /// Call every `tick_interval_ms`. A step ends on the first tick where its
    /// accumulated time exceeds its duration, so a step sounds for between
    /// `duration` and `duration + tick_interval_ms`.
    pub fn tick(&mut self) -> TickEvent {
        self.intent.elapsed = self.intent.elapsed.saturating_add(self.tick_interval_ms);

        if !self.active {
            return TickEvent::Idle;
        }

        if self.intent.len == 0 || self.intent.elapsed <= self.intent.step_duration {
            return TickEvent::Hold;
        }

        self.intent.elapsed = 0;
        self.intent.index += 1;

        let looping = self.intent.melody.is_none() && self.intent.loop_mode == LoopMode::Forever;
        if looping {
            self.intent.index %= IMPLICIT_PATTERN_LEN;
        }

        let index = self.intent.index;
        if index >= self.intent.len {
            return self.complete();
        }

        let melody = self.intent.melody;
        match melody {
            None => {
                if self.kind == ActuatorKind::FixedFrequency {
                    self.set_level(index % 2 == 0);
                }
            }
            Some(melody) => {
                if let Some((duration, frequency)) = melody.step(index) {
                    self.intent.step_duration = u32::from(duration);
                    if let Some(hz) = frequency {
                        self.intent.step_frequency = u32::from(hz);
                        if self.kind == ActuatorKind::VariableFrequency {
                            self.sound(u32::from(hz));
                        }
                    }
                }
            }
        }

        trace!("buzzer step {} of {}", index, self.intent.len);
        TickEvent::Advanced { index }
    }

    /// Returns true while a tone, pattern or melody is playing.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn state(&self) -> BuzzerState {
        if self.active {
            BuzzerState::Playing
        } else {
            BuzzerState::Idle
        }
    }

    pub fn kind(&self) -> ActuatorKind {
        self.kind
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.tick_interval_ms
    }

    /// Returns the armed playback intent.
    pub fn intent(&self) -> &PlaybackIntent<'a> {
        &self.intent
    }

    pub fn output(&self) -> Option<&OutputCapability<L, F>> {
        self.output.as_ref()
    }

    pub fn output_mut(&mut self) -> Option<&mut OutputCapability<L, F>> {
        self.output.as_mut()
    }

    /// Consumes the buzzer and returns its output.
    pub fn release(self) -> Option<OutputCapability<L, F>> {
        self.output
    }

    fn complete(&mut self) -> TickEvent {
        if let Some(output) = self.output.as_mut() {
            output.silence();
        }

        if let Some(handler) = self.on_complete {
            handler(self);
        }

        self.active = false;
        debug!("buzzer pattern complete");
        TickEvent::Complete
    }

    fn frequency_for_kind(&self, frequency: u32) -> u32 {
        match self.kind {
            ActuatorKind::FixedFrequency => 0,
            ActuatorKind::VariableFrequency => frequency,
        }
    }

    fn sound(&mut self, frequency: u32) {
        if let Some(output) = self.output.as_mut() {
            output.sound(frequency);
        }
    }

    fn set_level(&mut self, on: bool) {
        if let Some(OutputCapability::Level(output)) = self.output.as_mut() {
            output.set_level(on);
        }
    }
}

impl<L: LevelOutput, F: FrequencyOutput> Default for Buzzer<'_, L, F> {
    fn default() -> Self {
        Self::new()
    }
}
