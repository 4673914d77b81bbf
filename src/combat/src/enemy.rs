// src/combat/src/enemy.rs
//
// Enemy side of the exchange: punches scheduled by the counter window and
// the rage chain. The block check happens at resolution time against the
// player's live pose; the 500 ms block window is the single source of truth.

use engine::CueId;

use crate::state::{CombatFeedback, Pose};
use crate::{tuning, CombatEngine, CombatEvent};

impl CombatEngine {
    /// Start an enemy punch. Safe to call from any timer; a dead enemy or a
    /// finished match defuses it.
    pub(crate) fn enemy_attack(&mut self, now_ms: u64) {
        if self.state.match_over || self.state.enemy_hp == 0 {
            return;
        }

        self.state.enemy_pose = Pose::Punch;
        self.audio.borrow_mut().play(CueId::Punch);

        let damage = self
            .rng
            .damage_roll(tuning::ENEMY_DAMAGE_SPAN, tuning::ENEMY_DAMAGE_BASE);

        self.timers.schedule(
            now_ms,
            tuning::RESOLVE_DELAY_MS,
            CombatEvent::ResolveEnemyHit { damage },
        );
        self.timers.schedule(
            now_ms,
            tuning::ENEMY_PUNCH_RECOVER_MS,
            CombatEvent::EnemyRecover { from: Pose::Punch },
        );
    }

    pub(crate) fn resolve_enemy_hit(&mut self, damage: u32, now_ms: u64) {
        if self.state.player_pose == Pose::Block {
            // Fully absorbed: no damage, no combo reset, just a thud.
            self.feedback.push(CombatFeedback::PlayerBlocked);
            self.audio.borrow_mut().play(CueId::Block);
            return;
        }

        self.state.player_hp = self.state.player_hp.saturating_sub(damage);
        self.state.player_pose = Pose::Hurt;
        self.state.combo = 0;
        self.feedback.push(CombatFeedback::PlayerHit { damage });
        self.audio.borrow_mut().play(CueId::Hurt);

        // Rage chain: a wounded enemy may queue a second punch. The roll
        // happens here; the follow-up dies with the registry if the match
        // latches first.
        if self.state.enemy_hp < tuning::RAGE_HP && self.rng.chance(tuning::RAGE_CHANCE) {
            self.timers
                .schedule(now_ms, tuning::RAGE_DELAY_MS, CombatEvent::EnemyAttack);
        }

        self.timers.schedule(
            now_ms,
            tuning::DEFENDER_RECOVER_MS,
            CombatEvent::PlayerRecover { from: Pose::Hurt },
        );
        self.check_end(now_ms);
    }
}
