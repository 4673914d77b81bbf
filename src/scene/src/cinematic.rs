// src/scene/src/cinematic.rs

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

/// The five clips the orchestrator can queue up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ClipId {
    HeroIntro,
    RivalIntro,
    /// Played on a win.
    RivalDefeated,
    /// Played on a loss.
    HeroDefeated,
    BonusOutro,
}

/// Playback collaborator. The orchestrator only pushes clips; completion
/// (natural or skipped) comes back through its own transition entry point.
pub trait CinematicPlayer {
    fn play(&mut self, clip: ClipId);
}

/// Shared handle on the single-threaded loop.
pub type SharedCinematics = Rc<RefCell<dyn CinematicPlayer>>;

pub fn shared_cinematics<P: CinematicPlayer + 'static>(player: P) -> SharedCinematics {
    Rc::new(RefCell::new(player))
}
