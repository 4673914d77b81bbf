//! 前端装配与主循环
//!
//! 前端只做三件事：把按键翻译成编排器输入，按帧推进编排器，把状态
//! 快照画到终端。协作者接口在这里落地：过场片段放成定长的标题卡，
//! 空间查询来自前端自己的赛道布局，音频是静默通道。
//! 前端不携带任何玩法逻辑。

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::Backend;
use ratatui::Terminal;

use combat::CombatFeedback;
use engine::{shared_audio, Clock, NullAudio, SystemClock};
use error::GameError;
use runner::{Rect, RunnerSnapshot, SpatialQuery, TrackEntity};
use scene::{
    CinematicPlayer, ClipId, MenuChoice, SceneOrchestrator, SceneSnapshot, SceneState,
};

use crate::input::{self, AppInput};
use crate::render;

/// 每帧输入轮询预算
const FRAME_POLL: Duration = Duration::from_millis(16);
/// 浮动战斗文字存活时长
const FLOATER_MS: u64 = 800;
/// 标题卡时长（代替真实片段播放）
const CLIP_LENGTH: Duration = Duration::from_secs(4);

/// Stand-in cinematic playback: each clip is a fixed-length title card.
pub struct TitleCardPlayer {
    active: Option<(ClipId, Instant)>,
}

impl TitleCardPlayer {
    fn new() -> Self {
        Self { active: None }
    }

    /// Active clip and its playback progress in `[0, 1]`.
    pub fn current(&self) -> Option<(ClipId, f64)> {
        self.active.map(|(clip, started)| {
            let progress =
                (started.elapsed().as_secs_f64() / CLIP_LENGTH.as_secs_f64()).min(1.0);
            (clip, progress)
        })
    }

    fn finished(&self) -> bool {
        self.active
            .is_some_and(|(_, started)| started.elapsed() >= CLIP_LENGTH)
    }

    fn clear(&mut self) {
        self.active = None;
    }
}

impl CinematicPlayer for TitleCardPlayer {
    fn play(&mut self, clip: ClipId) {
        self.active = Some((clip, Instant::now()));
    }
}

/// 赛道虚拟坐标空间（伪像素），渲染与碰撞共用。
pub const VIEW_W: f32 = 240.0;
pub const VIEW_H: f32 = 64.0;

pub(crate) const GROUND_Y: f32 = 56.0;
const PLAYER_LEFT: f32 = 24.0;
const PLAYER_SIZE: f32 = 10.0;
const JUMP_RISE: f32 = 22.0;
const OBSTACLE_W: f32 = 28.0;
const OBSTACLE_H: f32 = 16.0;
/// 障碍滑出左边界的余量
const OFFSCREEN: f32 = 20.0;

/// Front-end track layout. Lays the player and the obstacle out in the
/// virtual space and answers the runner engine's spatial queries; obstacle
/// position is interpolated from the engine's cycle timestamp.
pub struct TrackModel {
    runner: Option<RunnerSnapshot>,
    now_ms: u64,
}

impl TrackModel {
    fn new() -> Self {
        Self {
            runner: None,
            now_ms: 0,
        }
    }

    fn sync(&mut self, runner: Option<RunnerSnapshot>, now_ms: u64) {
        self.runner = runner;
        self.now_ms = now_ms;
    }

    pub fn player_rect(&self) -> Option<Rect> {
        let snapshot = self.runner?;
        let bottom = if snapshot.jumping {
            GROUND_Y - JUMP_RISE
        } else {
            GROUND_Y
        };
        Some(Rect::new(
            PLAYER_LEFT,
            bottom - PLAYER_SIZE,
            PLAYER_LEFT + PLAYER_SIZE,
            bottom,
        ))
    }

    pub fn obstacle_rect(&self) -> Option<Rect> {
        let snapshot = self.runner?;
        if !snapshot.started {
            return None;
        }
        let duration_ms = (snapshot.speed_factor * 1000.0).max(1.0);
        let progress =
            (self.now_ms.saturating_sub(snapshot.cycle_started_ms) as f32 / duration_ms).min(1.0);
        let left = VIEW_W - progress * (VIEW_W + OBSTACLE_W + OFFSCREEN);
        Some(Rect::new(
            left,
            GROUND_Y - OBSTACLE_H,
            left + OBSTACLE_W,
            GROUND_Y,
        ))
    }
}

impl SpatialQuery for TrackModel {
    fn bounds(&self, entity: TrackEntity) -> Option<Rect> {
        match entity {
            TrackEntity::Player => self.player_rect(),
            TrackEntity::Obstacle => self.obstacle_rect(),
        }
    }
}

/// A floating combat text, expiring shortly after it spawns.
pub struct Floater {
    pub feedback: CombatFeedback,
    born_ms: u64,
}

/// The assembled front-end: orchestrator plus collaborator implementations.
pub struct App {
    clock: SystemClock,
    orchestrator: SceneOrchestrator,
    cinematics: Rc<RefCell<TitleCardPlayer>>,
    track: TrackModel,
    pub(crate) menu_cursor: usize,
    pub(crate) floaters: Vec<Floater>,
    should_quit: bool,
}

impl App {
    pub fn new(seed: u64) -> Self {
        let cinematics = Rc::new(RefCell::new(TitleCardPlayer::new()));
        let shared: scene::SharedCinematics = cinematics.clone();
        let orchestrator = SceneOrchestrator::new(seed, shared, shared_audio(NullAudio));
        Self {
            clock: SystemClock::new(),
            orchestrator,
            cinematics,
            track: TrackModel::new(),
            menu_cursor: 0,
            floaters: Vec::new(),
            should_quit: false,
        }
    }

    pub(crate) fn snapshot(&self) -> SceneSnapshot {
        self.orchestrator.snapshot()
    }

    pub(crate) fn track(&self) -> &TrackModel {
        &self.track
    }

    pub(crate) fn clip_progress(&self) -> Option<(ClipId, f64)> {
        self.cinematics.borrow().current()
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), GameError> {
        while !self.should_quit {
            let now = self.clock.now_ms();
            self.poll_input(now)?;
            self.advance(now);
            terminal.draw(|frame| render::draw(frame, self))?;
        }
        Ok(())
    }

    fn poll_input(&mut self, now_ms: u64) -> Result<(), GameError> {
        if !event::poll(FRAME_POLL)? {
            return Ok(());
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }
            if let Some(action) = input::map_key(self.orchestrator.scene(), key.code) {
                self.apply(action, now_ms);
            }
        }
        Ok(())
    }

    fn apply(&mut self, action: AppInput, now_ms: u64) {
        match action {
            AppInput::Quit => self.should_quit = true,
            AppInput::MenuUp => self.menu_cursor = self.menu_cursor.saturating_sub(1),
            AppInput::MenuDown => self.menu_cursor = (self.menu_cursor + 1).min(2),
            AppInput::MenuConfirm => {
                let choice = match self.menu_cursor {
                    0 => MenuChoice::EndlessRun,
                    1 => MenuChoice::FightMode,
                    _ => MenuChoice::Bonus,
                };
                self.orchestrator.select_menu(choice, now_ms);
            }
            AppInput::Attack => self.orchestrator.player_attack(now_ms),
            AppInput::Block => self.orchestrator.player_block(now_ms),
            AppInput::Jump => self.orchestrator.runner_input(now_ms),
            AppInput::Skip => self.orchestrator.skip_cinematic(now_ms),
        }
    }

    /// One frame of simulation: report title-card completion, refresh the
    /// track geometry, pump the orchestrator, collect fight feedback.
    fn advance(&mut self, now_ms: u64) {
        if is_cinematic(self.orchestrator.scene()) && self.cinematics.borrow().finished() {
            self.cinematics.borrow_mut().clear();
            self.orchestrator.cinematic_finished(now_ms);
        }

        self.track.sync(self.orchestrator.snapshot().runner, now_ms);
        self.orchestrator.tick(now_ms, &self.track);

        for feedback in self.orchestrator.take_feedback() {
            self.floaters.push(Floater {
                feedback,
                born_ms: now_ms,
            });
        }
        self.floaters
            .retain(|f| now_ms.saturating_sub(f.born_ms) < FLOATER_MS);
    }
}

fn is_cinematic(scene: SceneState) -> bool {
    matches!(
        scene,
        SceneState::IntroHero
            | SceneState::IntroRival
            | SceneState::CutsceneWin
            | SceneState::CutsceneLose
            | SceneState::Outro
    )
}
