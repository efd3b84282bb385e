#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Buzzer`**: Plays tones, beeps and melodies on one buzzer, advanced by `tick`
//! - **`OutputCapability`**: The single output a buzzer drives (`Level` or `Frequency`)
//! - **`LevelOutput`** / **`FrequencyOutput`**: Traits to implement for your hardware
//! - **`Melody`**: Borrowed (duration, frequency) tables, e.g. a ringtone
//! - **`LoopMode`**: Whether a timed beep plays once or repeats forever
//! - **`TickEvent`**: What a tick did (held, advanced, completed)
//! - **`SharedBuzzer`**: Critical-section wrapper for interrupt-driven ticking
//! - **`BuzzerBank`**: A fixed set of independent buzzers
//! - **`BuzzerAction`** / **`BuzzerCommand`**: Commands that can be sent to buzzers
//!
//! Durations are counted in the unit of the declared tick interval (normally
//! milliseconds). Nothing blocks and nothing allocates.

mod fmt;

pub mod types;
pub mod output;
pub mod buzzer;
pub mod command;
pub mod collection;
pub mod shared;

pub use types::{ActuatorKind, LoopMode, Melody, MelodyError, PlaybackIntent};
pub use output::{FrequencyOutput, LevelOutput, OutputCapability, PinLevel, Unused};
pub use buzzer::{ActiveBuzzer, Buzzer, BuzzerState, CompletionHandler, PassiveBuzzer, TickEvent};
pub use command::{BuzzerAction, BuzzerCommand};
pub use collection::{BuzzerBank, BuzzerId, CollectionError};
pub use shared::SharedBuzzer;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_compile() {
        let _ = ActuatorKind::FixedFrequency;
        let _ = ActuatorKind::VariableFrequency;
        let _ = LoopMode::Once;
        let _ = LoopMode::Forever;
        assert_eq!(LoopMode::from(true), LoopMode::Forever);
        assert_eq!(ActuatorKind::default(), ActuatorKind::VariableFrequency);
    }
}
