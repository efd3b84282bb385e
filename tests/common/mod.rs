//! Shared test infrastructure for buzzer-sequencer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use buzzer_sequencer::{Buzzer, FrequencyOutput, LevelOutput, OutputCapability, TickEvent};

// ============================================================================
// Mock Output
// ============================================================================

/// One call made by the buzzer into its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drive {
    Level(bool),
    Frequency(u32),
}

/// Mock output that records every drive call for testing
pub struct MockOutput {
    history: heapless::Vec<Drive, 64>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self {
            history: heapless::Vec::new(),
        }
    }

    pub fn history(&self) -> &[Drive] {
        &self.history
    }
}

impl LevelOutput for MockOutput {
    fn set_level(&mut self, on: bool) {
        let _ = self.history.push(Drive::Level(on));
    }
}

impl FrequencyOutput for MockOutput {
    fn set_frequency(&mut self, hz: u32) {
        let _ = self.history.push(Drive::Frequency(hz));
    }
}

pub type TestBuzzer<'a> = Buzzer<'a, MockOutput, MockOutput>;

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Buzzer switched by a digital level, ticked every `tick_ms`
pub fn fixed_buzzer<'a>(tick_ms: u32) -> TestBuzzer<'a> {
    Buzzer::with_output(OutputCapability::Level(MockOutput::new()), tick_ms)
}

/// Buzzer driven by a frequency output, ticked every `tick_ms`
pub fn variable_buzzer<'a>(tick_ms: u32) -> TestBuzzer<'a> {
    Buzzer::with_output(OutputCapability::Frequency(MockOutput::new()), tick_ms)
}

/// Every drive call the buzzer has made so far
pub fn history<'b>(buzzer: &'b TestBuzzer<'_>) -> &'b [Drive] {
    match buzzer.output() {
        Some(OutputCapability::Level(out)) | Some(OutputCapability::Frequency(out)) => {
            out.history()
        }
        None => &[],
    }
}

/// Most recent drive call, if any
pub fn last_drive(buzzer: &TestBuzzer<'_>) -> Option<Drive> {
    history(buzzer).last().copied()
}

/// Ticks `count` times and returns the last event
pub fn tick_n(buzzer: &mut TestBuzzer<'_>, count: usize) -> TickEvent {
    let mut event = TickEvent::Idle;
    for _ in 0..count {
        event = buzzer.tick();
    }
    event
}

/// Ticks until an event other than `Hold` occurs, returning it with the tick count
pub fn tick_until_change(buzzer: &mut TestBuzzer<'_>, limit: usize) -> (TickEvent, usize) {
    for n in 1..=limit {
        let event = buzzer.tick();
        if event != TickEvent::Hold {
            return (event, n);
        }
    }
    (TickEvent::Hold, limit)
}
