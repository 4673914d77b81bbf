//! Key mapping. Bindings depend on the active scene: space jumps on the
//! track and punches in the arena.

use crossterm::event::KeyCode;
use scene::SceneState;

/// A device-independent action the front-end feeds to the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppInput {
    Quit,
    MenuUp,
    MenuDown,
    MenuConfirm,
    Attack,
    Block,
    Jump,
    Skip,
}

pub fn map_key(scene: SceneState, code: KeyCode) -> Option<AppInput> {
    // Quit wins everywhere.
    if matches!(code, KeyCode::Char('q') | KeyCode::Esc) {
        return Some(AppInput::Quit);
    }

    match scene {
        SceneState::Menu => match code {
            KeyCode::Up => Some(AppInput::MenuUp),
            KeyCode::Down => Some(AppInput::MenuDown),
            KeyCode::Enter => Some(AppInput::MenuConfirm),
            _ => None,
        },
        SceneState::Fighting => match code {
            KeyCode::Char('j') | KeyCode::Char(' ') => Some(AppInput::Attack),
            KeyCode::Char('k') => Some(AppInput::Block),
            _ => None,
        },
        SceneState::Running => match code {
            KeyCode::Char(' ') | KeyCode::Up => Some(AppInput::Jump),
            _ => None,
        },
        SceneState::IntroHero
        | SceneState::IntroRival
        | SceneState::CutsceneWin
        | SceneState::CutsceneLose
        | SceneState::Outro => match code {
            KeyCode::Char('s') | KeyCode::Enter => Some(AppInput::Skip),
            _ => None,
        },
        SceneState::Loading => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_works_in_every_scene() {
        for scene in [
            SceneState::Menu,
            SceneState::Loading,
            SceneState::Fighting,
            SceneState::Running,
            SceneState::Outro,
        ] {
            assert_eq!(map_key(scene, KeyCode::Char('q')), Some(AppInput::Quit));
            assert_eq!(map_key(scene, KeyCode::Esc), Some(AppInput::Quit));
        }
    }

    #[test]
    fn space_means_different_things_per_scene() {
        assert_eq!(
            map_key(SceneState::Fighting, KeyCode::Char(' ')),
            Some(AppInput::Attack)
        );
        assert_eq!(
            map_key(SceneState::Running, KeyCode::Char(' ')),
            Some(AppInput::Jump)
        );
        assert_eq!(map_key(SceneState::Menu, KeyCode::Char(' ')), None);
    }

    #[test]
    fn loading_swallows_everything_but_quit() {
        assert_eq!(map_key(SceneState::Loading, KeyCode::Enter), None);
        assert_eq!(map_key(SceneState::Loading, KeyCode::Char(' ')), None);
    }
}
