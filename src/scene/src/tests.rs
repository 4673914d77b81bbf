//! Scene orchestrator tests: the transition table, the shared
//! completion/skip path, overlay timing, and engine lifecycles.

use std::cell::RefCell;
use std::rc::Rc;

use engine::{shared_audio, NullAudio};
use runner::{Rect, SpatialQuery, TrackEntity};

use crate::{
    shared_cinematics, CinematicPlayer, ClipId, MenuChoice, SceneOrchestrator, SceneState,
};

struct RecordingPlayer {
    clips: Rc<RefCell<Vec<ClipId>>>,
}

impl CinematicPlayer for RecordingPlayer {
    fn play(&mut self, clip: ClipId) {
        self.clips.borrow_mut().push(clip);
    }
}

/// No geometry at all: runner ticks are skipped.
struct EmptyTrack;

impl SpatialQuery for EmptyTrack {
    fn bounds(&self, _entity: TrackEntity) -> Option<Rect> {
        None
    }
}

/// Grounded player dead center in the obstacle.
struct CollidingTrack;

impl SpatialQuery for CollidingTrack {
    fn bounds(&self, entity: TrackEntity) -> Option<Rect> {
        match entity {
            TrackEntity::Player => Some(Rect::new(130.0, 40.0, 150.0, 55.0)),
            TrackEntity::Obstacle => Some(Rect::new(100.0, 20.0, 200.0, 60.0)),
        }
    }
}

fn orchestrator() -> (SceneOrchestrator, Rc<RefCell<Vec<ClipId>>>) {
    let clips = Rc::new(RefCell::new(Vec::new()));
    let player = RecordingPlayer {
        clips: Rc::clone(&clips),
    };
    let orch = SceneOrchestrator::new(7, shared_cinematics(player), shared_audio(NullAudio));
    (orch, clips)
}

/// Walk Menu -> Loading -> IntroHero -> IntroRival -> Fighting.
fn into_fight(orch: &mut SceneOrchestrator) -> u64 {
    orch.select_menu(MenuChoice::FightMode, 0);
    orch.tick(2000, &EmptyTrack);
    orch.cinematic_finished(2500);
    orch.cinematic_finished(3000);
    assert_eq!(orch.scene(), SceneState::Fighting);
    3000
}

#[test]
fn starts_at_menu() {
    let (orch, clips) = orchestrator();
    assert_eq!(orch.scene(), SceneState::Menu);
    assert!(clips.borrow().is_empty());
    assert!(orch.snapshot().combat.is_none());
    assert!(orch.snapshot().runner.is_none());
}

#[test]
fn endless_run_loads_for_two_seconds() {
    let (mut orch, _clips) = orchestrator();

    orch.select_menu(MenuChoice::EndlessRun, 0);
    assert_eq!(orch.scene(), SceneState::Loading);

    orch.tick(1999, &EmptyTrack);
    assert_eq!(orch.scene(), SceneState::Loading);

    orch.tick(2000, &EmptyTrack);
    assert_eq!(orch.scene(), SceneState::Running);
    assert!(orch.snapshot().runner.is_some());
}

#[test]
fn fight_campaign_plays_both_intros_then_fights() {
    let (mut orch, clips) = orchestrator();

    orch.select_menu(MenuChoice::FightMode, 0);
    orch.tick(2000, &EmptyTrack);
    assert_eq!(orch.scene(), SceneState::IntroHero);
    assert_eq!(*clips.borrow(), vec![ClipId::HeroIntro]);
    assert_eq!(orch.snapshot().overlay.map(|o| o.title), Some("HERO"));

    orch.cinematic_finished(2500);
    assert_eq!(orch.scene(), SceneState::IntroRival);
    assert_eq!(
        *clips.borrow(),
        vec![ClipId::HeroIntro, ClipId::RivalIntro]
    );

    orch.cinematic_finished(3000);
    assert_eq!(orch.scene(), SceneState::Fighting);
    assert!(orch.snapshot().combat.is_some());
    assert!(orch.snapshot().overlay.is_none());
}

#[test]
fn skip_and_natural_completion_are_the_same_transition() {
    let (mut natural, _) = orchestrator();
    let (mut skipped, _) = orchestrator();

    for orch in [&mut natural, &mut skipped] {
        orch.select_menu(MenuChoice::FightMode, 0);
        orch.tick(2000, &EmptyTrack);
    }

    natural.cinematic_finished(2100);
    skipped.skip_cinematic(2100);

    assert_eq!(natural.scene(), skipped.scene());
    assert_eq!(natural.scene(), SceneState::IntroRival);
}

#[test]
fn bonus_outro_loops_back_to_menu() {
    let (mut orch, clips) = orchestrator();

    orch.select_menu(MenuChoice::Bonus, 0);
    orch.tick(2000, &EmptyTrack);
    assert_eq!(orch.scene(), SceneState::Outro);
    assert_eq!(*clips.borrow(), vec![ClipId::BonusOutro]);
    assert_eq!(orch.snapshot().overlay.map(|o| o.title), Some("BONUS"));

    orch.cinematic_finished(4000);
    assert_eq!(orch.scene(), SceneState::Menu);
    assert!(orch.snapshot().combat.is_none());
    assert!(orch.snapshot().runner.is_none());
}

#[test]
fn overlay_hides_after_its_window_while_clip_runs_on() {
    let (mut orch, _clips) = orchestrator();

    orch.select_menu(MenuChoice::FightMode, 0);
    orch.tick(2000, &EmptyTrack); // IntroHero entered, card up

    orch.tick(3999, &EmptyTrack);
    assert!(orch.snapshot().overlay.is_some());

    orch.tick(4000, &EmptyTrack);
    assert_eq!(orch.scene(), SceneState::IntroHero);
    assert!(orch.snapshot().overlay.is_none());
}

#[test]
fn quick_transition_resets_the_overlay_window() {
    let (mut orch, _clips) = orchestrator();

    orch.select_menu(MenuChoice::FightMode, 0);
    orch.tick(2000, &EmptyTrack);

    // Move on after 500 ms; the old hide timer (due 4000) must not clip the
    // new card, which runs until 4500.
    orch.cinematic_finished(2500);
    assert_eq!(orch.snapshot().overlay.map(|o| o.title), Some("RIVAL"));

    orch.tick(4100, &EmptyTrack);
    assert!(orch.snapshot().overlay.is_some());

    orch.tick(4500, &EmptyTrack);
    assert!(orch.snapshot().overlay.is_none());
}

#[test]
fn runner_crash_leads_to_the_defeat_cutscene() {
    let (mut orch, clips) = orchestrator();

    orch.select_menu(MenuChoice::EndlessRun, 0);
    orch.tick(2000, &EmptyTrack);
    assert_eq!(orch.scene(), SceneState::Running);

    orch.runner_input(2100);
    orch.tick(2150, &CollidingTrack);

    assert_eq!(orch.scene(), SceneState::CutsceneLose);
    assert_eq!(*clips.borrow(), vec![ClipId::HeroDefeated]);
    // The runner died with its scene.
    assert!(orch.snapshot().runner.is_none());

    orch.cinematic_finished(3000);
    assert_eq!(orch.scene(), SceneState::Menu);
}

#[test]
fn fight_terminal_maps_to_the_matching_cutscene() {
    let (mut orch, clips) = orchestrator();
    let mut now = into_fight(&mut orch);

    let mut banner_outcome = None;
    for _ in 0..4000 {
        now += 40;
        orch.player_attack(now);
        orch.tick(now, &EmptyTrack);
        if let Some(combat) = orch.snapshot().combat {
            if let Some(banner) = combat.banner {
                banner_outcome = Some(banner.outcome);
            }
        }
        if orch.scene() != SceneState::Fighting {
            break;
        }
    }

    let outcome = banner_outcome.expect("fight reached a terminal banner");
    match outcome {
        combat::MatchOutcome::Win => {
            assert_eq!(orch.scene(), SceneState::CutsceneWin);
            assert_eq!(clips.borrow().last(), Some(&ClipId::RivalDefeated));
        }
        combat::MatchOutcome::Lose => {
            assert_eq!(orch.scene(), SceneState::CutsceneLose);
            assert_eq!(clips.borrow().last(), Some(&ClipId::HeroDefeated));
        }
    }
    // The combat engine died with its scene.
    assert!(orch.snapshot().combat.is_none());
}

#[test]
fn triggers_outside_their_scene_are_rejected() {
    let (mut orch, clips) = orchestrator();

    // Finishing a cinematic in the menu does nothing.
    orch.cinematic_finished(0);
    assert_eq!(orch.scene(), SceneState::Menu);

    // A second menu pick while loading is ignored.
    orch.select_menu(MenuChoice::EndlessRun, 0);
    orch.select_menu(MenuChoice::FightMode, 100);
    orch.tick(2100, &EmptyTrack);
    assert_eq!(orch.scene(), SceneState::Running);
    assert!(clips.borrow().is_empty());

    // Fight input outside the fight scene is ignored.
    orch.player_attack(2200);
    orch.tick(2300, &EmptyTrack);
    assert_eq!(orch.scene(), SceneState::Running);
}
