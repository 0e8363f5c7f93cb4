//! Triangle demo -- window, input mapping and the frame loop.
//!
//! winit drives the event loop via `ApplicationHandler`. Keyboard and close
//! events are queued as `RawInput` as they arrive; each `RedrawRequested`
//! hands the queue to `FrameLoop::run_frame`, which maps the input, reads the
//! vertex file, draws, and presents.
//!
//! When the frame loop stops (`turn_off` or `select_released`), the GPU
//! resources and the window are dropped once, in reverse order of creation,
//! and the engine slot is released before the event loop exits.

mod config;
mod geometry_source;

use std::path::Path;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use config::{load_config_from_path, GameConfig, CONFIG_PATH};
use geometry_source::FileGeometrySource;
use tri_core::{
    EngineInstance, EngineSlot, FrameLoop, FrameOutcome, FrameStats, Key, KeyState, RawInput,
};
use tri_platform::context::{platform_name, select_context};
use tri_render::{GpuContext, Renderer, ShaderProgram};

static ENGINE: EngineSlot = EngineSlot::new();

/// Graphics state, created in `resumed`. Fields drop top to bottom, so the
/// renderer (program, buffers, device, surface) goes before the window.
struct GraphicsState {
    renderer: Renderer,
    window: Arc<Window>,
}

impl GraphicsState {
    fn new(event_loop: &ActiveEventLoop, config: &GameConfig) -> Result<Self, String> {
        let window = tri_platform::window::create_window(event_loop, &config.platform())?;
        log::info!("Window created: {}x{}", config.width, config.height);

        let platform = platform_name();
        let context = select_context(platform, config.prefer_core_profile);
        log::info!("Platform: {platform}");

        let gpu = GpuContext::new(window.clone(), context)?;
        let program = ShaderProgram::build(&gpu.device, gpu.surface_format, &config.shader_sources())?;
        let renderer = Renderer::new(gpu, program, config.clear_color);

        Ok(Self { renderer, window })
    }
}

struct App {
    config: GameConfig,
    engine: Option<EngineInstance<'static>>,
    graphics: Option<GraphicsState>,
    frame_loop: FrameLoop,
    pending_input: Vec<RawInput>,
    geometry: FileGeometrySource,
    stats: FrameStats,
    init_error: Option<String>,
}

impl App {
    fn new(config: GameConfig, engine: EngineInstance<'static>) -> Self {
        let geometry =
            FileGeometrySource::new(config.geometry_path.clone(), config.triangles_per_frame);
        Self {
            config,
            engine: Some(engine),
            graphics: None,
            frame_loop: FrameLoop::new(),
            pending_input: Vec::new(),
            geometry,
            stats: FrameStats::new(),
            init_error: None,
        }
    }

    /// Releases graphics, window and engine. Safe to call more than once.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(graphics) = self.graphics.take() {
            drop(graphics);
            log::info!("Graphics resources released");
        }
        if let Some(engine) = self.engine.take() {
            if let Err(err) = ENGINE.release(Some(engine)) {
                log::error!("Engine release failed: {err}");
            }
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() || !self.frame_loop.is_running() {
            return;
        }
        match GraphicsState::new(event_loop, &self.config) {
            Ok(graphics) => self.graphics = Some(graphics),
            Err(err) => {
                log::error!("Initialization failed: {err}");
                self.init_error = Some(err);
                self.shutdown(event_loop);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(graphics) = &self.graphics {
            graphics.window.request_redraw();
        }
    }

    /// Close and key events are queued for the next frame. Unlike SDL's
    /// `SDL_KEYDOWN` stream, OS key auto-repeat is dropped here, so holding a
    /// key yields one `*_pressed` event instead of one per repeat.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.graphics.is_none() {
            return;
        }

        if let Some(input) = raw_input(&event) {
            if input == RawInput::Quit {
                log::info!("Close requested");
            }
            self.pending_input.push(input);
            return;
        }

        match event {
            WindowEvent::Resized(physical_size) => {
                if let Some(graphics) = self.graphics.as_mut() {
                    graphics
                        .renderer
                        .resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(graphics) = self.graphics.as_mut() else {
                    return;
                };
                self.stats.begin_frame();

                let outcome = self.frame_loop.run_frame(
                    self.pending_input.drain(..),
                    &mut self.geometry,
                    &mut graphics.renderer,
                );

                if outcome == FrameOutcome::Stopped {
                    log::info!(
                        "Stopped after {} frames ({:.1} fps)",
                        self.frame_loop.frames_presented(),
                        self.stats.smoothed_fps
                    );
                    self.shutdown(event_loop);
                }
            }

            _ => {}
        }
    }
}

/// Windowing event to engine input. `None` for events the frame loop ignores.
fn raw_input(event: &WindowEvent) -> Option<RawInput> {
    match event {
        WindowEvent::CloseRequested => Some(RawInput::Quit),
        WindowEvent::KeyboardInput { event, .. } => {
            key_input(event.physical_key, event.state, event.repeat)
        }
        _ => None,
    }
}

fn key_input(physical_key: PhysicalKey, state: ElementState, repeat: bool) -> Option<RawInput> {
    if repeat {
        return None;
    }
    let PhysicalKey::Code(key_code) = physical_key else {
        return None;
    };
    let key = map_key(key_code)?;
    let state = match state {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    };
    Some(RawInput::Key { key, state })
}

fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::ControlLeft => Some(Key::ControlLeft),
        KeyCode::Space => Some(Key::Space),
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::F1 => Some(Key::F1),
        KeyCode::F3 => Some(Key::F3),
        _ => None,
    }
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Triangle demo starting...");

    let config = load_config_from_path(Path::new(CONFIG_PATH))?;
    let engine = ENGINE.acquire().map_err(|e| e.to_string())?;

    let event_loop = EventLoop::new().map_err(|e| format!("failed to create event loop: {e}"))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, engine);
    event_loop
        .run_app(&mut app)
        .map_err(|e| format!("event loop error: {e}"))?;

    // Covers exits that did not go through the frame loop.
    drop(app.graphics.take());
    if let Some(engine) = app.engine.take() {
        ENGINE.release(Some(engine)).map_err(|e| e.to_string())?;
    }

    match app.init_error {
        Some(err) => Err(err),
        None => {
            log::info!("Goodbye");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tri_core::input::{binding_for, map_input};
    use tri_core::Event;

    #[test]
    fn bound_winit_keys_reach_bindings() {
        let bound = [
            (KeyCode::KeyW, Event::UpPressed),
            (KeyCode::KeyA, Event::LeftPressed),
            (KeyCode::KeyS, Event::DownPressed),
            (KeyCode::KeyD, Event::RightPressed),
            (KeyCode::ControlLeft, Event::Button1Pressed),
            (KeyCode::Space, Event::Button2Pressed),
            (KeyCode::Escape, Event::SelectPressed),
            (KeyCode::Enter, Event::StartPressed),
        ];
        for (code, expected) in bound {
            let key = map_key(code).expect("bound key should map");
            assert_eq!(map_input(RawInput::pressed(key)), Some(expected));
        }
    }

    #[test]
    fn arrows_map_to_keys_without_bindings() {
        for code in [
            KeyCode::ArrowLeft,
            KeyCode::ArrowRight,
            KeyCode::ArrowUp,
            KeyCode::ArrowDown,
        ] {
            let key = map_key(code).expect("arrow maps to a key");
            assert!(binding_for(key).is_none());
        }
    }

    #[test]
    fn close_request_becomes_quit() {
        assert_eq!(raw_input(&WindowEvent::CloseRequested), Some(RawInput::Quit));
        assert_eq!(
            map_input(raw_input(&WindowEvent::CloseRequested).expect("quit")),
            Some(Event::TurnOff)
        );
    }

    #[test]
    fn unrelated_window_events_are_ignored() {
        assert_eq!(raw_input(&WindowEvent::RedrawRequested), None);
        assert_eq!(raw_input(&WindowEvent::Focused(true)), None);
    }

    #[test]
    fn key_state_is_carried_through() {
        let code = PhysicalKey::Code(KeyCode::Escape);
        assert_eq!(
            key_input(code, ElementState::Pressed, false),
            Some(RawInput::pressed(Key::Escape))
        );
        assert_eq!(
            key_input(code, ElementState::Released, false),
            Some(RawInput::released(Key::Escape))
        );
    }

    #[test]
    fn auto_repeat_is_dropped() {
        let code = PhysicalKey::Code(KeyCode::KeyW);
        assert_eq!(key_input(code, ElementState::Pressed, true), None);
        assert_eq!(key_input(code, ElementState::Released, true), None);
    }

    #[test]
    fn unidentified_and_unmapped_keys_are_ignored() {
        use winit::keyboard::NativeKeyCode;
        let unidentified = PhysicalKey::Unidentified(NativeKeyCode::Unidentified);
        assert_eq!(key_input(unidentified, ElementState::Pressed, false), None);
        assert_eq!(
            key_input(PhysicalKey::Code(KeyCode::KeyQ), ElementState::Pressed, false),
            None
        );
    }

    #[test]
    fn unknown_codes_map_to_none() {
        assert_eq!(map_key(KeyCode::KeyQ), None);
        assert_eq!(map_key(KeyCode::F12), None);
        assert_eq!(map_key(KeyCode::ControlRight), None);
    }
}
