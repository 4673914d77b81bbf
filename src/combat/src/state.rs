// src/combat/src/state.rs

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// A fighter's current action state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Pose {
    Idle,
    Punch,
    Hurt,
    Block,
}

/// Terminal result of a match, from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Win,
    Lose,
}

/// Mutable match state, owned exclusively by the combat engine.
///
/// `match_over` is a one-way latch: it flips to true exactly once and from
/// then on every input and every already-drained timer event is defused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombatState {
    pub player_hp: u32,
    pub enemy_hp: u32,
    pub player_pose: Pose,
    pub enemy_pose: Pose,
    pub combo: u32,
    pub match_over: bool,
}

impl CombatState {
    pub(crate) fn new(max_hp: u32) -> Self {
        Self {
            player_hp: max_hp,
            enemy_hp: max_hp,
            player_pose: Pose::Idle,
            enemy_pose: Pose::Idle,
            combo: 0,
            match_over: false,
        }
    }
}

/// Presentation-facing feedback drained by the display layer: floating
/// damage numbers, "BLOCKED" markers, shake cues. Draining never mutates
/// match state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CombatFeedback {
    /// The enemy took an unblocked hit; criticals render in their own tier.
    EnemyHit { damage: u32, critical: bool },
    /// The enemy blocked the player's punch.
    EnemyBlocked,
    /// The player took an unblocked hit.
    PlayerHit { damage: u32 },
    /// The player's block window absorbed an enemy punch.
    PlayerBlocked,
}

/// Banner shown during the 3000 ms end-of-match window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EndBanner {
    pub text: &'static str,
    pub outcome: MatchOutcome,
}

impl EndBanner {
    pub(crate) fn for_outcome(outcome: MatchOutcome) -> Self {
        match outcome {
            MatchOutcome::Win => Self {
                text: "THE RIVAL FALLS",
                outcome,
            },
            MatchOutcome::Lose => Self {
                text: "THE HERO IS DOWN",
                outcome,
            },
        }
    }
}

/// Structured snapshot for the display surface; the core never reads
/// rendering state back.
#[derive(Debug, Clone, Serialize)]
pub struct CombatSnapshot {
    pub player_hp: u32,
    pub enemy_hp: u32,
    pub player_pose: Pose,
    pub enemy_pose: Pose,
    pub combo: u32,
    pub match_over: bool,
    pub banner: Option<EndBanner>,
}
