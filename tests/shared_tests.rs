//! Integration tests for SharedBuzzer

mod common;
use common::*;

use buzzer_sequencer::{
    Buzzer, BuzzerAction, LoopMode, Melody, OutputCapability, SharedBuzzer, TickEvent,
};
use std::thread;

static DURATIONS: [u16; 4] = [3, 3, 3, 3];
static FREQUENCIES: [u16; 4] = [523, 659, 784, 1_047];

#[test]
fn shared_buzzer_can_live_in_a_static() {
    static BUZZER: SharedBuzzer<'static, MockOutput, MockOutput> = SharedBuzzer::new();

    BUZZER.with(|buzzer| buzzer.configure(OutputCapability::Frequency(MockOutput::new()), 1));
    BUZZER.play(Melody::new(&DURATIONS, &FREQUENCIES).unwrap());
    assert!(BUZZER.is_active());

    let mut completed = false;
    for _ in 0..32 {
        if BUZZER.tick() == TickEvent::Complete {
            completed = true;
        }
    }

    assert!(completed);
    assert!(!BUZZER.is_active());
    let drives = BUZZER.with(|buzzer| history(buzzer).len()).unwrap();
    assert_eq!(drives, 5);
}

#[test]
fn tick_from_another_thread_never_sees_partial_intent() {
    let shared = SharedBuzzer::from_buzzer(variable_buzzer(1));

    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..2_000 {
                shared.tick();
            }
        });

        for round in 0..200u32 {
            if round % 2 == 0 {
                shared.start_timed(1_000 + round, 2, LoopMode::Once);
            } else {
                shared.play(Melody::new(&DURATIONS, &FREQUENCIES).unwrap());
            }

            let consistent = shared
                .with(|buzzer| {
                    let intent = buzzer.intent();
                    let len_matches = match intent.melody() {
                        Some(melody) => intent.len() == melody.len(),
                        None => intent.len() == 2,
                    };
                    len_matches && intent.index() <= intent.len()
                })
                .unwrap();
            assert!(consistent);
        }
    });

    shared.stop();
    assert!(!shared.is_active());
}

#[test]
fn reentrant_access_from_completion_handler_is_skipped() {
    static SHARED: SharedBuzzer<'static, MockOutput, MockOutput> = SharedBuzzer::new();

    fn on_done(_: &TestBuzzer<'_>) {
        assert_eq!(SHARED.with(|_| ()), None);
        assert!(!SHARED.is_active());
    }

    SHARED.with(|buzzer| {
        buzzer.configure(OutputCapability::Level(MockOutput::new()), 1);
        buzzer.set_completion_handler(on_done);
    });
    SHARED.handle_action(BuzzerAction::Start {
        frequency: 0,
        period: 1,
        mode: LoopMode::Once,
    });

    assert_eq!(SHARED.tick(), TickEvent::Hold);
    assert_eq!(SHARED.tick(), TickEvent::Advanced { index: 1 });
    assert_eq!(SHARED.tick(), TickEvent::Hold);
    assert_eq!(SHARED.tick(), TickEvent::Complete);
    assert!(!SHARED.is_active());
}

#[test]
fn into_inner_returns_buzzer_state() {
    let shared: SharedBuzzer<'_, MockOutput, MockOutput> = SharedBuzzer::new();
    shared.turn_on(1_000);

    let buzzer: Buzzer<'_, MockOutput, MockOutput> = shared.into_inner();
    assert!(buzzer.is_active());
    assert!(buzzer.output().is_none());
}
