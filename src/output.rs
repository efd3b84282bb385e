//! Output capabilities the buzzer drives.
//!
//! A buzzer is wired either to a digital output ([`LevelOutput`]) or to a
//! frequency-programmable output such as a PWM channel ([`FrequencyOutput`]).
//! [`OutputCapability`] holds exactly one of them, so the driver never calls
//! an output that does not exist.

use crate::types::ActuatorKind;
use embedded_hal::digital::{OutputPin, PinState};

/// Trait for a fixed-frequency buzzer switched by a digital level.
pub trait LevelOutput {
    /// Drives the buzzer on or off.
    ///
    /// Must return without blocking. Handle hardware errors internally - this
    /// method cannot fail.
    fn set_level(&mut self, on: bool);
}

/// Trait for a variable-frequency buzzer driven by an oscillator output.
pub trait FrequencyOutput {
    /// Starts or changes a square-wave tone at `hz`. `0` silences the output.
    ///
    /// Must return without blocking. Handle hardware errors internally - this
    /// method cannot fail.
    fn set_frequency(&mut self, hz: u32);
}

impl<T: LevelOutput + ?Sized> LevelOutput for &mut T {
    fn set_level(&mut self, on: bool) {
        (**self).set_level(on)
    }
}

impl<T: FrequencyOutput + ?Sized> FrequencyOutput for &mut T {
    fn set_frequency(&mut self, hz: u32) {
        (**self).set_frequency(hz)
    }
}

/// Placeholder for the output slot a board does not wire up.
///
/// Uninhabited, so it can never be configured or called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unused {}

impl LevelOutput for Unused {
    fn set_level(&mut self, _on: bool) {
        match *self {}
    }
}

impl FrequencyOutput for Unused {
    fn set_frequency(&mut self, _hz: u32) {
        match *self {}
    }
}

/// Adapts an `embedded-hal` output pin into a [`LevelOutput`].
///
/// Pin errors are discarded.
#[derive(Debug)]
pub struct PinLevel<P> {
    pin: P,
}

impl<P: OutputPin> PinLevel<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Returns the wrapped pin.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> LevelOutput for PinLevel<P> {
    fn set_level(&mut self, on: bool) {
        let _ = self.pin.set_state(PinState::from(on));
    }
}

/// The single output a buzzer is configured with.
#[derive(Debug)]
pub enum OutputCapability<L, F> {
    /// Digital on/off drive, for [`ActuatorKind::FixedFrequency`].
    Level(L),

    /// Frequency drive, for [`ActuatorKind::VariableFrequency`].
    Frequency(F),
}

impl<L: LevelOutput, F: FrequencyOutput> OutputCapability<L, F> {
    /// Returns the actuator kind this capability drives.
    pub fn kind(&self) -> ActuatorKind {
        match self {
            OutputCapability::Level(_) => ActuatorKind::FixedFrequency,
            OutputCapability::Frequency(_) => ActuatorKind::VariableFrequency,
        }
    }

    /// Turns the actuator on; `hz` is ignored by level outputs.
    pub(crate) fn sound(&mut self, hz: u32) {
        match self {
            OutputCapability::Level(out) => out.set_level(true),
            OutputCapability::Frequency(out) => out.set_frequency(hz),
        }
    }

    pub(crate) fn silence(&mut self) {
        match self {
            OutputCapability::Level(out) => out.set_level(false),
            OutputCapability::Frequency(out) => out.set_frequency(0),
        }
    }
}
