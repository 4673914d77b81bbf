// src/engine/src/lib.rs

pub mod audio;
pub mod clock;
pub mod rng;
pub mod timer;

pub use crate::audio::{shared_audio, AudioChannel, CueId, NullAudio, SharedAudio};
pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::rng::{GameRng, RandomSource, ScriptedRandom};
pub use crate::timer::{TimerHandle, TimerRegistry};
