// src/scene/src/overlay.rs

use serde::Serialize;
use strum_macros::Display;

use crate::SceneState;

/// Accent color of an overlay card; the presentation layer maps it to its
/// own palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Accent {
    Green,
    Purple,
    Yellow,
    Red,
}

/// The arena card flashed over a cinematic for its first two seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverlayCard {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub accent: Accent,
}

impl OverlayCard {
    /// Card for a scene, if it carries one. Only cinematic scenes do.
    pub(crate) fn for_scene(scene: SceneState) -> Option<Self> {
        let card = match scene {
            SceneState::IntroHero => Self {
                title: "HERO",
                subtitle: "ENTERING ARENA",
                accent: Accent::Green,
            },
            SceneState::IntroRival => Self {
                title: "RIVAL",
                subtitle: "THE CHALLENGER",
                accent: Accent::Purple,
            },
            SceneState::CutsceneWin => Self {
                title: "VICTORY",
                subtitle: "HERO WINS",
                accent: Accent::Yellow,
            },
            SceneState::CutsceneLose => Self {
                title: "DEFEAT",
                subtitle: "TRY AGAIN",
                accent: Accent::Red,
            },
            SceneState::Outro => Self {
                title: "BONUS",
                subtitle: "SPECIAL SCENE",
                accent: Accent::Purple,
            },
            _ => return None,
        };
        Some(card)
    }
}
