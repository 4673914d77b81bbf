// src/scene/src/lib.rs

//! 场景编排器：顶层有限状态机
//!
//! 菜单 → 加载 → 过场/玩法 → 过场 → 菜单。编排器决定哪个引擎处于
//! 活动状态；活动引擎在自己的定时器上自治运行，直到上报终局结果。
//! 过场的自然播完与玩家跳过走同一个转移入口，绝不是两条代码路径。

pub mod cinematic;
pub mod overlay;

#[cfg(test)]
mod tests;

use std::rc::Rc;

use combat::{CombatEngine, CombatFeedback, CombatSnapshot, MatchOutcome};
use engine::{GameRng, SharedAudio, TimerHandle, TimerRegistry};
use runner::{RunOutcome, RunnerEngine, RunnerSnapshot, SpatialQuery};
use serde::Serialize;
use strum_macros::Display;

pub use crate::cinematic::{shared_cinematics, CinematicPlayer, ClipId, SharedCinematics};
pub use crate::overlay::{Accent, OverlayCard};

mod timing {
    /// Synthetic load delay between the menu and whatever was picked.
    pub const LOAD_DELAY_MS: u64 = 2000;
    /// How long an overlay card stays up, independent of the clip.
    pub const OVERLAY_MS: u64 = 2000;
}

/// 顶层场景。同一时刻恰有一个处于活动状态，仅由编排器持有与改写。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SceneState {
    Menu,
    Loading,
    IntroHero,
    IntroRival,
    Fighting,
    Running,
    CutsceneWin,
    CutsceneLose,
    Outro,
}

/// 菜单三选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    EndlessRun,
    FightMode,
    Bonus,
}

#[derive(Debug, Clone, Copy)]
enum SceneTimer {
    /// 加载结束，进入所选模式
    LoadingDone(MenuChoice),
    /// 覆盖卡片到期隐藏
    HideOverlay,
}

/// Display-surface aggregate: the scene plus whichever engine is live.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSnapshot {
    pub scene: SceneState,
    pub overlay: Option<OverlayCard>,
    pub combat: Option<CombatSnapshot>,
    pub runner: Option<RunnerSnapshot>,
}

/// The top-level sequencer. Owns the scene tag, the presentation timers,
/// and the lifecycle of both gameplay engines.
pub struct SceneOrchestrator {
    scene: SceneState,
    timers: TimerRegistry<SceneTimer>,
    overlay: Option<OverlayCard>,
    overlay_timer: Option<TimerHandle>,
    cinematics: SharedCinematics,
    audio: SharedAudio,
    /// Master generator; each engine instance gets a forked child so one
    /// base seed reproduces a whole session.
    rng: GameRng,
    combat: Option<CombatEngine>,
    runner: Option<RunnerEngine>,
}

impl SceneOrchestrator {
    pub fn new(seed: u64, cinematics: SharedCinematics, audio: SharedAudio) -> Self {
        Self {
            scene: SceneState::Menu,
            timers: TimerRegistry::new(),
            overlay: None,
            overlay_timer: None,
            cinematics,
            audio,
            rng: GameRng::new(seed),
            combat: None,
            runner: None,
        }
    }

    pub fn scene(&self) -> SceneState {
        self.scene
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            scene: self.scene,
            overlay: self.overlay,
            combat: self.combat.as_ref().map(|c| c.snapshot()),
            runner: self.runner.as_ref().map(|r| r.snapshot()),
        }
    }

    /// Menu pick: show the loading screen for 2000 ms, then enter the mode.
    /// Rejected outside the menu.
    pub fn select_menu(&mut self, choice: MenuChoice, now_ms: u64) {
        if self.scene != SceneState::Menu {
            return;
        }
        self.enter(SceneState::Loading, now_ms);
        self.timers.schedule(
            now_ms,
            timing::LOAD_DELAY_MS,
            SceneTimer::LoadingDone(choice),
        );
    }

    /// The single transition entry point for a finished cinematic — natural
    /// end-of-playback and user skip both land here. Rejected outside
    /// cinematic scenes.
    pub fn cinematic_finished(&mut self, now_ms: u64) {
        match self.scene {
            SceneState::IntroHero => self.enter(SceneState::IntroRival, now_ms),
            SceneState::IntroRival => self.enter(SceneState::Fighting, now_ms),
            SceneState::CutsceneWin | SceneState::CutsceneLose | SceneState::Outro => {
                self.enter(SceneState::Menu, now_ms)
            }
            _ => {}
        }
    }

    /// Explicit skip — by design nothing but an alias for completion.
    pub fn skip_cinematic(&mut self, now_ms: u64) {
        self.cinematic_finished(now_ms);
    }

    /// Forwarded fight input; ignored outside the fight scene.
    pub fn player_attack(&mut self, now_ms: u64) {
        if let Some(combat) = self.combat.as_mut() {
            combat.player_attack(now_ms);
        }
    }

    pub fn player_block(&mut self, now_ms: u64) {
        if let Some(combat) = self.combat.as_mut() {
            combat.player_block(now_ms);
        }
    }

    /// Forwarded run input; ignored outside the running scene.
    pub fn runner_input(&mut self, now_ms: u64) {
        if let Some(runner) = self.runner.as_mut() {
            runner.input(now_ms);
        }
    }

    /// Presentation feedback accumulated by the fight since the last drain.
    pub fn take_feedback(&mut self) -> Vec<CombatFeedback> {
        self.combat
            .as_mut()
            .map(|c| c.drain_feedback())
            .unwrap_or_default()
    }

    /// Pump the orchestrator's own timers, then the active engine, and
    /// consume any terminal result into the next scene.
    pub fn tick(&mut self, now_ms: u64, track: &dyn SpatialQuery) {
        for event in self.timers.advance(now_ms) {
            match event {
                SceneTimer::LoadingDone(choice) => {
                    if self.scene == SceneState::Loading {
                        let next = match choice {
                            MenuChoice::EndlessRun => SceneState::Running,
                            MenuChoice::FightMode => SceneState::IntroHero,
                            MenuChoice::Bonus => SceneState::Outro,
                        };
                        self.enter(next, now_ms);
                    }
                }
                SceneTimer::HideOverlay => {
                    self.overlay = None;
                    self.overlay_timer = None;
                }
            }
        }

        let fight_result = self.combat.as_mut().and_then(|c| c.tick(now_ms));
        if let Some(outcome) = fight_result {
            let next = match outcome {
                MatchOutcome::Win => SceneState::CutsceneWin,
                MatchOutcome::Lose => SceneState::CutsceneLose,
            };
            self.enter(next, now_ms);
        }

        let run_result = self.runner.as_mut().and_then(|r| r.tick(now_ms, track));
        if let Some(RunOutcome::Lose) = run_result {
            self.enter(SceneState::CutsceneLose, now_ms);
        }
    }

    /// 唯一的状态切换函数：撤销上一状态的覆盖卡片计时，回收不再活动的
    /// 引擎（连同其全部挂起定时器），再执行新状态的副作用。
    fn enter(&mut self, next: SceneState, now_ms: u64) {
        if let Some(handle) = self.overlay_timer.take() {
            self.timers.cancel(handle);
        }
        self.overlay = None;

        if next != SceneState::Fighting {
            if let Some(mut combat) = self.combat.take() {
                combat.shutdown();
            }
        }
        if next != SceneState::Running {
            if let Some(mut runner) = self.runner.take() {
                runner.shutdown();
            }
        }

        self.scene = next;

        if let Some(card) = OverlayCard::for_scene(next) {
            self.overlay = Some(card);
            self.overlay_timer = Some(self.timers.schedule(
                now_ms,
                timing::OVERLAY_MS,
                SceneTimer::HideOverlay,
            ));
        }

        match next {
            SceneState::IntroHero => self.cinematics.borrow_mut().play(ClipId::HeroIntro),
            SceneState::IntroRival => self.cinematics.borrow_mut().play(ClipId::RivalIntro),
            SceneState::CutsceneWin => self.cinematics.borrow_mut().play(ClipId::RivalDefeated),
            SceneState::CutsceneLose => self.cinematics.borrow_mut().play(ClipId::HeroDefeated),
            SceneState::Outro => self.cinematics.borrow_mut().play(ClipId::BonusOutro),
            SceneState::Fighting => {
                let mut combat =
                    CombatEngine::new(Box::new(self.rng.fork()), Rc::clone(&self.audio));
                combat.start(now_ms);
                self.combat = Some(combat);
            }
            SceneState::Running => {
                // The run arms itself on the player's first input.
                self.runner = Some(RunnerEngine::new(Rc::clone(&self.audio)));
            }
            SceneState::Menu | SceneState::Loading => {}
        }
    }
}
