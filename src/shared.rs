//! Sharing a buzzer between an interrupt and foreground code.
//!
//! [`Buzzer::tick`] usually runs in a timer interrupt while playback is armed
//! from the main loop. [`SharedBuzzer`] keeps the buzzer behind a
//! `critical_section::Mutex`: every call, including `tick`, runs with the
//! critical section held, so a tick never observes a half-written intent.
//!
//! ```ignore
//! static BUZZER: SharedBuzzer<'static, Unused, MyPwm> = SharedBuzzer::new();
//!
//! #[interrupt]
//! fn TIM2() {
//!     BUZZER.tick();
//! }
//!
//! fn main() -> ! {
//!     BUZZER.with(|b| b.configure(OutputCapability::Frequency(pwm), 10));
//!     BUZZER.start_timed(2_000, 150, LoopMode::Once);
//!     // ...
//! }
//! ```

use crate::buzzer::{Buzzer, TickEvent};
use crate::command::BuzzerAction;
use crate::output::{FrequencyOutput, LevelOutput};
use crate::types::{LoopMode, Melody};
use core::cell::RefCell;
use critical_section::Mutex;

/// A [`Buzzer`] guarded by a critical section.
///
/// The completion handler runs inside the critical section. It must not call
/// back into the same `SharedBuzzer`; such calls are skipped.
pub struct SharedBuzzer<'a, L, F> {
    inner: Mutex<RefCell<Buzzer<'a, L, F>>>,
}

impl<'a, L: LevelOutput, F: FrequencyOutput> SharedBuzzer<'a, L, F> {
    /// Creates an idle, unconfigured shared buzzer. Usable in a `static`.
    pub const fn new() -> Self {
        Self::from_buzzer(Buzzer::new())
    }

    pub const fn from_buzzer(buzzer: Buzzer<'a, L, F>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(buzzer)),
        }
    }

    /// Runs `f` on the buzzer inside a critical section.
    ///
    /// Returns `None` when the buzzer is already borrowed, which only happens
    /// when called from its own completion handler.
    pub fn with<R>(&self, f: impl FnOnce(&mut Buzzer<'a, L, F>) -> R) -> Option<R> {
        critical_section::with(|cs| {
            let mut buzzer = self.inner.borrow(cs).try_borrow_mut().ok()?;
            Some(f(&mut buzzer))
        })
    }

    /// Advances playback; call from the periodic interrupt or task.
    pub fn tick(&self) -> TickEvent {
        self.with(|buzzer| buzzer.tick()).unwrap_or(TickEvent::Idle)
    }

    pub fn stop(&self) {
        self.with(|buzzer| buzzer.stop());
    }

    pub fn turn_on(&self, frequency: u32) {
        self.with(|buzzer| buzzer.turn_on(frequency));
    }

    pub fn start_timed(&self, frequency: u32, period: u32, mode: LoopMode) {
        self.with(|buzzer| buzzer.start_timed(frequency, period, mode));
    }

    pub fn play(&self, melody: Melody<'a>) {
        self.with(|buzzer| buzzer.play(melody));
    }

    pub fn handle_action(&self, action: BuzzerAction<'a>) {
        self.with(|buzzer| buzzer.handle_action(action));
    }

    pub fn is_active(&self) -> bool {
        self.with(|buzzer| buzzer.is_active()).unwrap_or(false)
    }

    /// Consumes the wrapper and returns the buzzer.
    pub fn into_inner(self) -> Buzzer<'a, L, F> {
        self.inner.into_inner().into_inner()
    }
}

impl<L: LevelOutput, F: FrequencyOutput> Default for SharedBuzzer<'_, L, F> {
    fn default() -> Self {
        Self::new()
    }
}
