// src/runner/src/lib.rs

//! Real-time obstacle-avoidance engine: a 50 ms sampling loop over external
//! geometry, a fixed jump window, and difficulty scaling tied to score.
//!
//! The tick logic is pure given bounds — the engine never owns positions,
//! it only judges the rectangles the [`SpatialQuery`] collaborator reports.

pub mod collision;


use engine::{CueId, SharedAudio, TimerRegistry};
use serde::Serialize;

pub use crate::collision::{Rect, SpatialQuery, TrackEntity};

mod tuning {
    /// Collision sampling period.
    pub const SAMPLE_INTERVAL_MS: u64 = 50;
    /// How long a jump keeps the player airborne.
    pub const JUMP_WINDOW_MS: u64 = 750;

    /// Obstacle traversal duration in seconds; lower is faster.
    pub const START_SPEED: f32 = 2.2;
    pub const MIN_SPEED: f32 = 0.9;
    pub const SPEED_STEP: f32 = 0.1;
    /// Every positive multiple of this score tightens the speed.
    pub const SCALE_EVERY: u32 = 300;

    /// Grace margins: fraction of obstacle width trimmed per side and of
    /// obstacle height trimmed from the top.
    pub const GRACE_X: f32 = 0.25;
    pub const GRACE_Y: f32 = 0.35;

    /// The engine cue fades to silence shortly after each replay.
    pub const ENGINE_FADE_AFTER_MS: u64 = 800;
    pub const ENGINE_FADE_MS: u64 = 200;
}

#[derive(Debug, Clone, Copy)]
enum RunnerEvent {
    /// Periodic collision sample.
    Sample,
    /// The jump window runs out.
    JumpExpire,
    /// The obstacle finished one traversal cycle.
    CycleDone,
    /// Fade the engine cue down after its replay.
    FadeEngineCue,
}

/// Terminal result of a run. Runs only ever end in a crash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Lose,
}

/// Structured snapshot for the display surface. `cycle_started_ms` plus
/// `speed_factor` let a presentation layer interpolate the obstacle.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RunnerSnapshot {
    pub score: u32,
    pub speed_factor: f32,
    pub jumping: bool,
    pub started: bool,
    pub crashed: bool,
    pub cycle_started_ms: u64,
}

/// The endless-run simulation. Created on entering the running scene,
/// discarded on leaving it.
pub struct RunnerEngine {
    score: u32,
    speed_factor: f32,
    jumping: bool,
    started: bool,
    crashed: bool,
    cycle_started_ms: u64,
    timers: TimerRegistry<RunnerEvent>,
    audio: SharedAudio,
}

impl RunnerEngine {
    pub fn new(audio: SharedAudio) -> Self {
        Self {
            score: 0,
            speed_factor: tuning::START_SPEED,
            jumping: false,
            started: false,
            crashed: false,
            cycle_started_ms: 0,
            timers: TimerRegistry::new(),
            audio,
        }
    }

    /// Begin the run: arm the sampling loop and the first obstacle cycle.
    /// Idempotent; a crashed run never restarts.
    pub fn start(&mut self, now_ms: u64) {
        if self.started || self.crashed {
            return;
        }
        self.started = true;
        self.timers
            .schedule_repeating(now_ms, tuning::SAMPLE_INTERVAL_MS, RunnerEvent::Sample);
        self.begin_cycle(now_ms);
    }

    /// Jump trigger. The first press starts the run; afterwards it jumps,
    /// unless a jump is already in flight (no queuing).
    pub fn input(&mut self, now_ms: u64) {
        if self.crashed {
            return;
        }
        if !self.started {
            self.start(now_ms);
            return;
        }
        if !self.jumping {
            self.jumping = true;
            self.timers
                .schedule(now_ms, tuning::JUMP_WINDOW_MS, RunnerEvent::JumpExpire);
        }
    }

    pub fn snapshot(&self) -> RunnerSnapshot {
        RunnerSnapshot {
            score: self.score,
            speed_factor: self.speed_factor,
            jumping: self.jumping,
            started: self.started,
            crashed: self.crashed,
            cycle_started_ms: self.cycle_started_ms,
        }
    }

    /// Flush every pending timer. Called by the owner on scene exit.
    pub fn shutdown(&mut self) {
        self.timers.cancel_all();
    }

    /// Pump due timers against the environment's current geometry. Returns
    /// the crash result exactly once.
    pub fn tick(&mut self, now_ms: u64, track: &dyn SpatialQuery) -> Option<RunOutcome> {
        let mut finished = None;
        for event in self.timers.advance(now_ms) {
            if let Some(outcome) = self.handle(event, now_ms, track) {
                finished = Some(outcome);
            }
        }
        finished
    }

    fn handle(
        &mut self,
        event: RunnerEvent,
        now_ms: u64,
        track: &dyn SpatialQuery,
    ) -> Option<RunOutcome> {
        // Latch guard for events drained in the same batch as the crash.
        if self.crashed {
            return None;
        }

        match event {
            RunnerEvent::Sample => self.sample(track),
            RunnerEvent::JumpExpire => {
                self.jumping = false;
                None
            }
            RunnerEvent::CycleDone => {
                self.begin_cycle(now_ms);
                None
            }
            RunnerEvent::FadeEngineCue => {
                self.audio
                    .borrow_mut()
                    .fade(CueId::Engine, 0.0, tuning::ENGINE_FADE_MS);
                None
            }
        }
    }

    fn sample(&mut self, track: &dyn SpatialQuery) -> Option<RunOutcome> {
        // Missing geometry on either side skips the tick entirely.
        let (Some(player), Some(obstacle)) = (
            track.bounds(TrackEntity::Player),
            track.bounds(TrackEntity::Obstacle),
        ) else {
            return None;
        };

        if collision::collides(player, obstacle) {
            self.crash();
            return Some(RunOutcome::Lose);
        }

        self.score += 1;
        if self.score % tuning::SCALE_EVERY == 0 {
            self.speed_factor = (self.speed_factor - tuning::SPEED_STEP).max(tuning::MIN_SPEED);
        }
        None
    }

    /// (Re)start an obstacle traversal at the current speed and replay the
    /// engine cue, fading it down shortly after.
    fn begin_cycle(&mut self, now_ms: u64) {
        self.cycle_started_ms = now_ms;
        {
            let mut audio = self.audio.borrow_mut();
            audio.stop(CueId::Engine);
            audio.play(CueId::Engine);
        }
        self.timers.schedule(
            now_ms,
            tuning::ENGINE_FADE_AFTER_MS,
            RunnerEvent::FadeEngineCue,
        );
        self.timers.schedule(
            now_ms,
            (self.speed_factor * 1000.0) as u64,
            RunnerEvent::CycleDone,
        );
    }

    /// One-way crash latch: stop the loop before anything else can fire.
    fn crash(&mut self) {
        self.crashed = true;
        self.timers.cancel_all();
        let mut audio = self.audio.borrow_mut();
        audio.stop(CueId::Engine);
        audio.play(CueId::Scream);
    }
}
