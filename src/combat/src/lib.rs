// src/combat/src/lib.rs

//! Turn-exchange fighting engine: randomized damage, blocking, combo
//! tracking and an adaptive enemy AI, all driven by one timer registry.
//!
//! Every public operation takes the current time in milliseconds and the
//! engine is pumped by [`CombatEngine::tick`]; it never reads a clock of its
//! own. All randomness flows through an injected [`RandomSource`].

pub mod state;

mod enemy;


use engine::{CueId, RandomSource, SharedAudio, TimerRegistry};

pub use crate::state::{
    CombatFeedback, CombatSnapshot, CombatState, EndBanner, MatchOutcome, Pose,
};

/// Combat tuning constants.
mod tuning {
    pub const MAX_HP: u32 = 100;

    /// Chance the enemy blocks a player punch.
    pub const ENEMY_BLOCK_CHANCE: f32 = 0.20;
    /// Chance an unblocked player punch is critical (double damage).
    pub const CRIT_CHANCE: f32 = 0.20;
    /// Player damage: floor(random() * span) + base, i.e. 10..=17.
    pub const PLAYER_DAMAGE_SPAN: u32 = 8;
    pub const PLAYER_DAMAGE_BASE: u32 = 10;
    /// Enemy damage: 15..=24.
    pub const ENEMY_DAMAGE_SPAN: u32 = 10;
    pub const ENEMY_DAMAGE_BASE: u32 = 15;

    /// Delay between a punch starting and its hit resolving.
    pub const RESOLVE_DELAY_MS: u64 = 100;
    /// Player punch pose recovery, from the punch itself.
    pub const PLAYER_RECOVER_MS: u64 = 300;
    /// Defender pose recovery (hurt/block), from the resolution instant.
    pub const DEFENDER_RECOVER_MS: u64 = 250;
    /// Enemy punch pose recovery, from the punch itself.
    pub const ENEMY_PUNCH_RECOVER_MS: u64 = 300;
    /// How long a player block holds.
    pub const BLOCK_WINDOW_MS: u64 = 500;

    /// Chance the enemy counters after a player attack resolves.
    pub const COUNTER_CHANCE: f32 = 0.70;
    /// Counter reaction time; a wounded enemy retaliates fast.
    pub const WOUNDED_HP: u32 = 50;
    pub const WOUNDED_REACTION_MS: u64 = 300;
    pub const STEADY_REACTION_MS: u64 = 600;

    /// Below this hp the enemy may chain a second punch.
    pub const RAGE_HP: u32 = 40;
    pub const RAGE_CHANCE: f32 = 0.50;
    pub const RAGE_DELAY_MS: u64 = 400;

    /// End banner display window before the result is reported.
    pub const END_BANNER_MS: u64 = 3000;
}

/// Timer payloads. Each carries only what was decided at scheduling time;
/// everything else is read from live state when the event fires.
#[derive(Debug, Clone, Copy)]
enum CombatEvent {
    /// The player's punch lands (or is blocked) after the resolve delay.
    ResolvePlayerHit {
        blocked: bool,
        critical: bool,
        damage: u32,
    },
    /// The enemy's punch lands after the resolve delay; whether it is
    /// absorbed depends on the player's pose at this instant.
    ResolveEnemyHit { damage: u32 },
    /// Guarded pose reset: only clears the pose it was armed for.
    PlayerRecover { from: Pose },
    EnemyRecover { from: Pose },
    /// The 500 ms block window runs out.
    BlockExpire,
    /// The enemy considers a counter-attack.
    CounterWindow,
    /// A rage follow-up punch.
    EnemyAttack,
    /// The end banner window elapses; report the result.
    EndOfMatch,
}

/// The fighting simulation. Created on entering the fight scene, discarded
/// on leaving it.
pub struct CombatEngine {
    state: CombatState,
    timers: TimerRegistry<CombatEvent>,
    rng: Box<dyn RandomSource>,
    audio: SharedAudio,
    feedback: Vec<CombatFeedback>,
    banner: Option<EndBanner>,
    outcome: Option<MatchOutcome>,
    started: bool,
}

impl CombatEngine {
    pub fn new(rng: Box<dyn RandomSource>, audio: SharedAudio) -> Self {
        Self {
            state: CombatState::new(tuning::MAX_HP),
            timers: TimerRegistry::new(),
            rng,
            audio,
            feedback: Vec::new(),
            banner: None,
            outcome: None,
            started: false,
        }
    }

    /// Open the match for input.
    pub fn start(&mut self, _now_ms: u64) {
        self.started = true;
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn snapshot(&self) -> CombatSnapshot {
        CombatSnapshot {
            player_hp: self.state.player_hp,
            enemy_hp: self.state.enemy_hp,
            player_pose: self.state.player_pose,
            enemy_pose: self.state.enemy_pose,
            combo: self.state.combo,
            match_over: self.state.match_over,
            banner: self.banner,
        }
    }

    /// Hand accumulated presentation feedback to the display layer.
    pub fn drain_feedback(&mut self) -> Vec<CombatFeedback> {
        std::mem::take(&mut self.feedback)
    }

    /// Flush every pending timer. Called by the owner on scene exit.
    pub fn shutdown(&mut self) {
        self.timers.cancel_all();
    }

    /// Player throws a punch. Rejected (no-op) while either fighter is
    /// mid-action, either hp is 0, or the match is over.
    pub fn player_attack(&mut self, now_ms: u64) {
        if !self.accepting_input()
            || self.state.player_pose != Pose::Idle
            || self.state.enemy_pose != Pose::Idle
        {
            return;
        }

        self.state.player_pose = Pose::Punch;
        self.audio.borrow_mut().play(CueId::Punch);

        // The whole exchange is drawn up front; only application is delayed.
        let blocked = self.rng.chance(tuning::ENEMY_BLOCK_CHANCE);
        let critical = !blocked && self.rng.chance(tuning::CRIT_CHANCE);
        let mut damage = self
            .rng
            .damage_roll(tuning::PLAYER_DAMAGE_SPAN, tuning::PLAYER_DAMAGE_BASE);
        if critical {
            damage *= 2;
        }
        if blocked {
            damage = 0;
        }

        self.timers.schedule(
            now_ms,
            tuning::RESOLVE_DELAY_MS,
            CombatEvent::ResolvePlayerHit {
                blocked,
                critical,
                damage,
            },
        );
        self.timers.schedule(
            now_ms,
            tuning::PLAYER_RECOVER_MS,
            CombatEvent::PlayerRecover { from: Pose::Punch },
        );

        // Counter window is armed off the enemy hp visible now (pre-hit);
        // liveness and the 70% roll are checked when it fires.
        let reaction = if self.state.enemy_hp < tuning::WOUNDED_HP {
            tuning::WOUNDED_REACTION_MS
        } else {
            tuning::STEADY_REACTION_MS
        };
        self.timers.schedule(
            now_ms,
            tuning::RESOLVE_DELAY_MS + reaction,
            CombatEvent::CounterWindow,
        );
    }

    /// Player raises a block for exactly 500 ms. Rejected while mid-action,
    /// dead, or terminal.
    pub fn player_block(&mut self, now_ms: u64) {
        if !self.accepting_input() || self.state.player_pose != Pose::Idle {
            return;
        }
        self.state.player_pose = Pose::Block;
        self.timers
            .schedule(now_ms, tuning::BLOCK_WINDOW_MS, CombatEvent::BlockExpire);
    }

    /// Pump due timers. Returns the terminal result exactly once, 3000 ms
    /// after a fighter fell.
    pub fn tick(&mut self, now_ms: u64) -> Option<MatchOutcome> {
        let mut finished = None;
        for event in self.timers.advance(now_ms) {
            if let Some(outcome) = self.handle(event, now_ms) {
                finished = Some(outcome);
            }
        }
        finished
    }

    fn accepting_input(&self) -> bool {
        self.started
            && !self.state.match_over
            && self.state.player_hp > 0
            && self.state.enemy_hp > 0
    }

    fn handle(&mut self, event: CombatEvent, now_ms: u64) -> Option<MatchOutcome> {
        // Latch guard: events drained in the same batch as the terminal
        // transition must not touch state any further.
        if self.state.match_over && !matches!(event, CombatEvent::EndOfMatch) {
            return None;
        }

        match event {
            CombatEvent::ResolvePlayerHit {
                blocked,
                critical,
                damage,
            } => {
                self.resolve_player_hit(blocked, critical, damage, now_ms);
                None
            }
            CombatEvent::ResolveEnemyHit { damage } => {
                self.resolve_enemy_hit(damage, now_ms);
                None
            }
            CombatEvent::PlayerRecover { from } => {
                if self.state.player_pose == from {
                    self.state.player_pose = Pose::Idle;
                }
                None
            }
            CombatEvent::EnemyRecover { from } => {
                if self.state.enemy_pose == from {
                    self.state.enemy_pose = Pose::Idle;
                }
                None
            }
            CombatEvent::BlockExpire => {
                if self.state.player_hp > 0 && self.state.player_pose == Pose::Block {
                    self.state.player_pose = Pose::Idle;
                }
                None
            }
            CombatEvent::CounterWindow => {
                if self.state.enemy_hp > 0 && self.rng.chance(tuning::COUNTER_CHANCE) {
                    self.enemy_attack(now_ms);
                }
                None
            }
            CombatEvent::EnemyAttack => {
                self.enemy_attack(now_ms);
                None
            }
            CombatEvent::EndOfMatch => self.outcome.take(),
        }
    }

    fn resolve_player_hit(&mut self, blocked: bool, critical: bool, damage: u32, now_ms: u64) {
        if blocked {
            self.state.enemy_pose = Pose::Block;
            self.feedback.push(CombatFeedback::EnemyBlocked);
            self.audio.borrow_mut().play(CueId::Block);
        } else {
            self.state.enemy_hp = self.state.enemy_hp.saturating_sub(damage);
            self.state.enemy_pose = Pose::Hurt;
            self.state.combo += 1;
            self.feedback
                .push(CombatFeedback::EnemyHit { damage, critical });
            self.audio.borrow_mut().play(CueId::Hurt);
        }
        self.timers.schedule(
            now_ms,
            tuning::DEFENDER_RECOVER_MS,
            CombatEvent::EnemyRecover {
                from: self.state.enemy_pose,
            },
        );
        self.check_end(now_ms);
    }

    /// Latch the terminal flag the first time a fighter's hp hits zero,
    /// flush every pending timer, and arm the single end-of-match report.
    fn check_end(&mut self, now_ms: u64) {
        if self.state.match_over {
            return;
        }
        let outcome = if self.state.enemy_hp == 0 {
            MatchOutcome::Win
        } else if self.state.player_hp == 0 {
            MatchOutcome::Lose
        } else {
            return;
        };

        self.state.match_over = true;
        self.timers.cancel_all();
        self.banner = Some(EndBanner::for_outcome(outcome));
        self.outcome = Some(outcome);
        self.timers
            .schedule(now_ms, tuning::END_BANNER_MS, CombatEvent::EndOfMatch);
    }

    #[cfg(test)]
    pub(crate) fn force_hp(&mut self, player_hp: u32, enemy_hp: u32) {
        self.state.player_hp = player_hp;
        self.state.enemy_hp = enemy_hp;
    }
}
