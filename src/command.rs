//! Command-based control for buzzers.

use crate::types::{LoopMode, Melody};

/// Actions for controlling a buzzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerAction<'a> {
    /// Steady tone until stopped.
    TurnOn { frequency: u32 },
    /// Timed on/off pattern.
    Start {
        frequency: u32,
        period: u32,
        mode: LoopMode,
    },
    /// Play a melody.
    Play(Melody<'a>),
    /// Silence and stop.
    Stop,
}

/// Command targeting a specific buzzer.
#[derive(Debug, Clone, Copy)]
pub struct BuzzerCommand<'a, Id> {
    pub buzzer_id: Id,
    pub action: BuzzerAction<'a>,
}

impl<'a, Id> BuzzerCommand<'a, Id> {
    /// Creates command.
    pub fn new(buzzer_id: Id, action: BuzzerAction<'a>) -> Self {
        Self { buzzer_id, action }
    }
}
