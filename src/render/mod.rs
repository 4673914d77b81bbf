//! 渲染模块：按场景分发到对应的屏幕绘制。
//! 渲染只消费状态快照，从不回写核心状态。

pub mod cinematic;
pub mod fight;
pub mod menu;
pub mod track;

use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::Frame;
use scene::{Accent, SceneState};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App) {
    let snapshot = app.snapshot();
    match snapshot.scene {
        SceneState::Menu => menu::draw(frame, app.menu_cursor),
        SceneState::Loading => menu::draw_loading(frame),
        SceneState::Fighting => fight::draw(frame, app, &snapshot),
        SceneState::Running => track::draw(frame, app, &snapshot),
        SceneState::IntroHero
        | SceneState::IntroRival
        | SceneState::CutsceneWin
        | SceneState::CutsceneLose
        | SceneState::Outro => cinematic::draw(frame, app, &snapshot),
    }
}

pub(crate) fn accent_color(accent: Accent) -> Color {
    match accent {
        Accent::Green => Color::Green,
        Accent::Purple => Color::Magenta,
        Accent::Yellow => Color::Yellow,
        Accent::Red => Color::Red,
    }
}

/// A centered sub-rectangle, clamped to the parent.
pub(crate) fn centered(parent: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(parent.width);
    let height = height.min(parent.height);
    Rect {
        x: parent.x + (parent.width - width) / 2,
        y: parent.y + (parent.height - height) / 2,
        width,
        height,
    }
}
