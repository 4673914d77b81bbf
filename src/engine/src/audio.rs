// src/engine/src/audio.rs

use std::cell::RefCell;
use std::rc::Rc;

/// The handful of sound cues the engines fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CueId {
    /// Either fighter throwing a punch.
    Punch,
    /// A fighter taking an unblocked hit.
    Hurt,
    /// An absorbed hit, either side.
    Block,
    /// The obstacle's looping engine noise.
    Engine,
    /// The crash.
    Scream,
}

/// Fire-and-forget audio sink. Implementations must never fail loudly;
/// a missing or broken channel degrades to silence.
pub trait AudioChannel {
    fn play(&mut self, cue: CueId);

    fn stop(&mut self, cue: CueId);

    /// Optional volume ramp; the default implementation ignores it.
    fn fade(&mut self, _cue: CueId, _to_volume: f32, _duration_ms: u64) {}
}

/// Channel that swallows every cue.
pub struct NullAudio;

impl AudioChannel for NullAudio {
    fn play(&mut self, _cue: CueId) {}

    fn stop(&mut self, _cue: CueId) {}
}

/// Shared handle: both engines and the orchestrator talk to the same channel
/// on the single-threaded loop.
pub type SharedAudio = Rc<RefCell<dyn AudioChannel>>;

pub fn shared_audio<A: AudioChannel + 'static>(channel: A) -> SharedAudio {
    Rc::new(RefCell::new(channel))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recording {
        cues: Rc<RefCell<Vec<CueId>>>,
    }

    impl AudioChannel for Recording {
        fn play(&mut self, cue: CueId) {
            self.cues.borrow_mut().push(cue);
        }

        fn stop(&mut self, _cue: CueId) {}
    }

    #[test]
    fn shared_channel_is_reachable_through_clones() {
        let cues = Rc::new(RefCell::new(Vec::new()));
        let audio = shared_audio(Recording {
            cues: Rc::clone(&cues),
        });
        let other = Rc::clone(&audio);

        audio.borrow_mut().play(CueId::Punch);
        other.borrow_mut().play(CueId::Scream);

        // Both clones fed the same underlying channel.
        assert_eq!(*cues.borrow(), vec![CueId::Punch, CueId::Scream]);
    }
}
