//! Runner invariants over long runs: score monotonicity, the crash freeze,
//! and the speed-factor range.

use std::cell::Cell;

use engine::{shared_audio, NullAudio};
use proptest::prelude::*;
use runner::{Rect, RunOutcome, RunnerEngine, SpatialQuery, TrackEntity};

struct ScriptedTrack {
    colliding: Cell<bool>,
}

impl ScriptedTrack {
    fn clear() -> Self {
        Self {
            colliding: Cell::new(false),
        }
    }
}

impl SpatialQuery for ScriptedTrack {
    fn bounds(&self, entity: TrackEntity) -> Option<Rect> {
        match entity {
            TrackEntity::Player => Some(if self.colliding.get() {
                Rect::new(130.0, 40.0, 150.0, 55.0)
            } else {
                Rect::new(10.0, 40.0, 20.0, 55.0)
            }),
            TrackEntity::Obstacle => Some(Rect::new(100.0, 20.0, 200.0, 60.0)),
        }
    }
}

#[test]
fn score_rises_until_the_crash_then_freezes() {
    let mut engine = RunnerEngine::new(shared_audio(NullAudio));
    let track = ScriptedTrack::clear();
    engine.input(0);

    let mut prev = 0;
    for i in 1..=500u64 {
        engine.tick(i * 50, &track);
        let score = engine.snapshot().score;
        assert!(score >= prev, "score regressed at sample {i}");
        prev = score;
    }
    assert_eq!(prev, 500);

    track.colliding.set(true);
    assert_eq!(
        engine.tick(501 * 50, &track),
        Some(RunOutcome::Lose)
    );
    let frozen = engine.snapshot().score;

    track.colliding.set(false);
    for i in 502..=600u64 {
        assert!(engine.tick(i * 50, &track).is_none());
        assert_eq!(engine.snapshot().score, frozen);
    }
}

proptest! {
    #[test]
    fn jump_spam_never_bends_the_invariants(
        presses in prop::collection::vec(0u64..30_000, 0..24),
    ) {
        let mut engine = RunnerEngine::new(shared_audio(NullAudio));
        let track = ScriptedTrack::clear();
        engine.input(0);

        let mut presses = presses;
        presses.sort_unstable();
        let mut press_cursor = 0;
        let mut prev_score = 0;

        for i in 1..=600u64 {
            let now = i * 50;
            while press_cursor < presses.len() && presses[press_cursor] <= now {
                engine.input(presses[press_cursor]);
                press_cursor += 1;
            }
            engine.tick(now, &track);

            let snapshot = engine.snapshot();
            prop_assert!(snapshot.score >= prev_score);
            prop_assert!(snapshot.speed_factor >= 0.9 - 1e-4);
            prop_assert!(snapshot.speed_factor <= 2.2 + 1e-4);
            prev_score = snapshot.score;
        }
    }
}
