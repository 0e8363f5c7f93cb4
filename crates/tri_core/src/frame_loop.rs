//! Frame loop state machine.
//!
//! One call to [`FrameLoop::run_frame`] is one frame: drain input, then (if
//! still running) acquire geometry, draw it, and present. The loop is
//! `Running` until it sees `turn_off` or `select_released`, after which it is
//! `Stopped` for good and every later call is a no-op.
//!
//! The loop does not own the window or GPU. The host reacts to
//! [`FrameOutcome::Stopped`] by tearing those down.

use crate::event::Event;
use crate::geometry::Triangle;
use crate::input::{map_input, RawInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was presented with this many triangles (0 if geometry was unavailable).
    Presented { triangles: usize },
    /// A stopping event was seen during this frame. Returned once per run.
    Stopped,
    /// The loop had already stopped; nothing was done.
    Halted,
}

/// Where per-frame geometry comes from. `None` means "nothing to draw this frame".
pub trait GeometrySource {
    fn acquire(&mut self) -> Option<Vec<Triangle>>;
}

/// The graphics side of a frame.
pub trait FrameBackend {
    fn draw_triangle(&mut self, triangle: &Triangle);
    /// Present the frame and clear for the next one.
    fn present(&mut self);
}

/// Events that end the loop.
pub fn is_stop_event(event: Event) -> bool {
    matches!(event, Event::TurnOff | Event::SelectReleased)
}

#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    frames_presented: u64,
    last_event: Option<Event>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Running,
            frames_presented: 0,
            last_event: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn last_event(&self) -> Option<Event> {
        self.last_event
    }

    /// Feeds one logical event. Returns true if this event stopped the loop.
    pub fn handle_event(&mut self, event: Event) -> bool {
        if !self.is_running() {
            return false;
        }
        log::info!("{event}");
        self.last_event = Some(event);
        if is_stop_event(event) {
            log::info!("Stop event '{event}' received, leaving frame loop");
            self.state = LoopState::Stopped;
            return true;
        }
        false
    }

    pub fn run_frame<I, G, B>(
        &mut self,
        inputs: I,
        geometry: &mut G,
        backend: &mut B,
    ) -> FrameOutcome
    where
        I: IntoIterator<Item = RawInput>,
        G: GeometrySource + ?Sized,
        B: FrameBackend + ?Sized,
    {
        if !self.is_running() {
            return FrameOutcome::Halted;
        }

        for raw in inputs {
            if let Some(event) = map_input(raw) {
                if self.handle_event(event) {
                    return FrameOutcome::Stopped;
                }
            }
        }

        let triangles = match geometry.acquire() {
            Some(triangles) => {
                for triangle in &triangles {
                    backend.draw_triangle(triangle);
                }
                triangles.len()
            }
            None => 0,
        };

        backend.present();
        self.frames_presented += 1;
        FrameOutcome::Presented { triangles }
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vertex;
    use crate::input::Key;

    struct FixedGeometry {
        triangles: Option<Vec<Triangle>>,
        calls: usize,
    }

    impl FixedGeometry {
        fn with(count: usize) -> Self {
            let tri = Triangle {
                v: [Vertex::new([0.0, 0.5, 0.0], [1.0, 0.0, 0.0]); 3],
            };
            Self {
                triangles: Some(vec![tri; count]),
                calls: 0,
            }
        }

        fn unavailable() -> Self {
            Self {
                triangles: None,
                calls: 0,
            }
        }
    }

    impl GeometrySource for FixedGeometry {
        fn acquire(&mut self) -> Option<Vec<Triangle>> {
            self.calls += 1;
            self.triangles.clone()
        }
    }

    fn no_input() -> Vec<RawInput> {
        Vec::new()
    }

    #[derive(Default)]
    struct RecordingBackend {
        draws: usize,
        presents: usize,
    }

    impl FrameBackend for RecordingBackend {
        fn draw_triangle(&mut self, _triangle: &Triangle) {
            self.draws += 1;
        }

        fn present(&mut self) {
            self.presents += 1;
        }
    }

    #[test]
    fn test_starts_running() {
        let frame_loop = FrameLoop::new();
        assert_eq!(frame_loop.state(), LoopState::Running);
        assert_eq!(frame_loop.frames_presented(), 0);
    }

    #[test]
    fn test_frame_without_input_draws_and_presents() {
        let mut frame_loop = FrameLoop::new();
        let mut geometry = FixedGeometry::with(2);
        let mut backend = RecordingBackend::default();

        let outcome = frame_loop.run_frame(no_input(), &mut geometry, &mut backend);

        assert_eq!(outcome, FrameOutcome::Presented { triangles: 2 });
        assert_eq!(backend.draws, 2);
        assert_eq!(backend.presents, 1);
        assert_eq!(frame_loop.frames_presented(), 1);
    }

    #[test]
    fn test_missing_geometry_skips_draw_but_keeps_running() {
        let mut frame_loop = FrameLoop::new();
        let mut geometry = FixedGeometry::unavailable();
        let mut backend = RecordingBackend::default();

        let outcome = frame_loop.run_frame(no_input(), &mut geometry, &mut backend);

        assert_eq!(outcome, FrameOutcome::Presented { triangles: 0 });
        assert_eq!(backend.draws, 0);
        assert_eq!(backend.presents, 1);
        assert!(frame_loop.is_running());
    }

    #[test]
    fn test_non_stop_events_do_not_stop() {
        let mut frame_loop = FrameLoop::new();
        let mut geometry = FixedGeometry::with(1);
        let mut backend = RecordingBackend::default();
        let inputs = vec![
            RawInput::pressed(Key::W),
            RawInput::released(Key::W),
            RawInput::pressed(Key::Escape),
            RawInput::pressed(Key::F1),
        ];

        let outcome = frame_loop.run_frame(inputs, &mut geometry, &mut backend);

        assert_eq!(outcome, FrameOutcome::Presented { triangles: 1 });
        assert_eq!(frame_loop.last_event(), Some(Event::SelectPressed));
    }

    #[test]
    fn test_quit_stops_before_drawing() {
        let mut frame_loop = FrameLoop::new();
        let mut geometry = FixedGeometry::with(2);
        let mut backend = RecordingBackend::default();

        let outcome = frame_loop.run_frame(vec![RawInput::Quit], &mut geometry, &mut backend);

        assert_eq!(outcome, FrameOutcome::Stopped);
        assert_eq!(frame_loop.state(), LoopState::Stopped);
        assert_eq!(geometry.calls, 0);
        assert_eq!(backend.draws, 0);
        assert_eq!(backend.presents, 0);
    }

    #[test]
    fn test_select_release_stops_and_skips_remaining_input() {
        let mut frame_loop = FrameLoop::new();
        let mut geometry = FixedGeometry::with(1);
        let mut backend = RecordingBackend::default();
        let inputs = vec![
            RawInput::pressed(Key::Escape),
            RawInput::released(Key::Escape),
            RawInput::pressed(Key::Enter),
        ];

        let outcome = frame_loop.run_frame(inputs, &mut geometry, &mut backend);

        assert_eq!(outcome, FrameOutcome::Stopped);
        assert_eq!(frame_loop.last_event(), Some(Event::SelectReleased));
        assert_eq!(backend.presents, 0);
    }

    #[test]
    fn test_stopped_is_reported_exactly_once() {
        let mut frame_loop = FrameLoop::new();
        let mut geometry = FixedGeometry::with(1);
        let mut backend = RecordingBackend::default();

        frame_loop.run_frame(no_input(), &mut geometry, &mut backend);
        let first = frame_loop.run_frame(vec![RawInput::Quit], &mut geometry, &mut backend);
        let second = frame_loop.run_frame(vec![RawInput::Quit], &mut geometry, &mut backend);
        let third = frame_loop.run_frame(no_input(), &mut geometry, &mut backend);

        assert_eq!(first, FrameOutcome::Stopped);
        assert_eq!(second, FrameOutcome::Halted);
        assert_eq!(third, FrameOutcome::Halted);
        assert_eq!(geometry.calls, 1);
        assert_eq!(backend.presents, 1);
        assert_eq!(frame_loop.frames_presented(), 1);
    }

    #[test]
    fn test_handle_event_after_stop_is_ignored() {
        let mut frame_loop = FrameLoop::new();
        assert!(frame_loop.handle_event(Event::TurnOff));
        assert!(!frame_loop.handle_event(Event::TurnOff));
        assert!(!frame_loop.handle_event(Event::UpPressed));
        assert_eq!(frame_loop.last_event(), Some(Event::TurnOff));
    }

    #[test]
    fn test_only_turn_off_and_select_released_stop() {
        let stoppers: Vec<Event> = Event::ALL.into_iter().filter(|e| is_stop_event(*e)).collect();
        assert_eq!(stoppers, vec![Event::SelectReleased, Event::TurnOff]);
    }
}
