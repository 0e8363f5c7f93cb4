pub mod engine;
pub mod event;
pub mod frame_loop;
pub mod geometry;
pub mod input;
pub mod time;

pub use engine::{EngineError, EngineInstance, EngineSlot};
pub use event::{Event, EventOutOfRange};
pub use frame_loop::{FrameBackend, FrameLoop, FrameOutcome, GeometrySource, LoopState};
pub use geometry::{GeometryError, Quad, Triangle, Vertex};
pub use input::{map_input, Key, KeyBinding, KeyState, RawInput, KEY_BINDINGS};
pub use time::FrameStats;
