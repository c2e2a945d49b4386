use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{InputEvent, InputState, Key, KeyState};
use crate::render::RenderCtx;

/// Window/runtime configuration.
///
/// The size is in physical pixels and is final: the window is created
/// non-resizable and the surface is never reconfigured for a new size.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub size: PhysicalSize<u32>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "cellula".to_string(),
            size: PhysicalSize::new(1920, 1080),
        }
    }
}

/// Runtime context passed to application callbacks.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    /// Requests one redraw of the window.
    ///
    /// The runtime never redraws on its own; every frame after the startup
    /// frame originates here.
    pub fn request_redraw(&mut self) {
        self.commands.push(Command::RequestRedraw);
    }

    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }

    /// Whether a redraw has been queued in this callback.
    pub fn has_redraw_request(&self) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, Command::RequestRedraw))
    }

    /// Whether an exit has been queued in this callback.
    pub fn has_exit_request(&self) -> bool {
        self.commands.iter().any(|c| matches!(c, Command::Exit))
    }

    /// Whether the callback queued no commands at all.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

enum Command {
    RequestRedraw,
    Exit,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs the event loop until the window closes or the app exits.
    ///
    /// Setup order inside the loop is fixed: window → GPU context →
    /// `App::on_ready` → first redraw request. Any failure along that
    /// chain terminates the loop before a frame is drawn.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.setup_result
    }
}

#[self_referencing]
struct WindowEntry {
    input: InputState,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    /// Error captured if window/GPU setup or `on_ready` failed.
    setup_result: Result<()>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            setup_result: Ok(()),
            exit_requested: false,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Window → GPU → `on_ready`, in that order.
    fn setup(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.size)
            .with_resizable(false);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            input: InputState::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        entry.with_gpu(|gpu| {
            let ctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format());
            self.app.on_ready(&ctx)
        })?;

        // The startup frame: the window is never left blank.
        entry.with_window(|w| w.request_redraw());

        self.entry = Some(entry);
        Ok(())
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, mut ctx: RuntimeCtx) {
        for cmd in ctx.commands.drain(..) {
            match cmd {
                Command::RequestRedraw => {
                    if let Some(entry) = &self.entry {
                        entry.with_window(|w| w.request_redraw());
                    }
                }
                Command::Exit => self.request_exit(),
            }
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.setup(event_loop) {
            // Propagated to the caller of `Runtime::run` once the loop stops.
            self.setup_result = Err(e);
            self.request_exit();
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Redraw-on-demand: sleep until the next window event. No redraw
        // request is issued here.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, entry) = (&mut self.app, &mut self.entry);

        let Some(entry) = entry else {
            return;
        };

        match &event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                self.request_exit();
                event_loop.exit();
            }

            // Fixed-size window: resize-family events carry no work. A
            // lost/outdated surface is handled at frame acquisition instead.
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {}

            WindowEvent::Focused(_) | WindowEvent::KeyboardInput { .. } => {
                let Some(ev) = translate_input_event(&event) else {
                    return;
                };

                let mut runtime_ctx = RuntimeCtx::default();
                let mut app_control = AppControl::Continue;

                entry.with_input_mut(|input| {
                    if let Some(key) = input.apply_event(&ev) {
                        app_control = app.on_key_pressed(key, &mut runtime_ctx);
                    }
                });

                if app_control == AppControl::Exit {
                    runtime_ctx.exit();
                }

                self.apply_commands(event_loop, runtime_ctx);
            }

            WindowEvent::RedrawRequested => {
                let mut runtime_ctx = RuntimeCtx::default();
                let mut app_control = AppControl::Continue;

                entry.with_mut(|fields| {
                    let mut ctx = FrameCtx {
                        window: fields.window,
                        gpu: fields.gpu,
                        runtime: &mut runtime_ctx,
                    };

                    app_control = app.on_frame(&mut ctx);
                });

                if app_control == AppControl::Exit {
                    runtime_ctx.exit();
                }

                self.apply_commands(event_loop, runtime_ctx);
            }

            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}

fn translate_input_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::KeyboardInput {
            event,
            is_synthetic,
            ..
        } => translate_key_event(event.state, event.physical_key, event.repeat, *is_synthetic),

        _ => None,
    }
}

/// Synthetic key events (re-delivered on focus gain for keys already held
/// before the window had focus) are dropped: they are not new physical
/// presses, and focus loss already cleared the held-key set.
fn translate_key_event(
    state: ElementState,
    physical_key: PhysicalKey,
    repeat: bool,
    is_synthetic: bool,
) -> Option<InputEvent> {
    if is_synthetic {
        return None;
    }

    let state = match state {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    };

    Some(InputEvent::Key {
        key: map_key(physical_key),
        state,
        repeat,
    })
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter => Key::Enter,
            KeyCode::Space => Key::Space,

            KeyCode::KeyA => Key::A,
            KeyCode::KeyB => Key::B,
            KeyCode::KeyC => Key::C,
            KeyCode::KeyD => Key::D,
            KeyCode::KeyE => Key::E,
            KeyCode::KeyF => Key::F,
            KeyCode::KeyG => Key::G,
            KeyCode::KeyH => Key::H,
            KeyCode::KeyI => Key::I,
            KeyCode::KeyJ => Key::J,
            KeyCode::KeyK => Key::K,
            KeyCode::KeyL => Key::L,
            KeyCode::KeyM => Key::M,
            KeyCode::KeyN => Key::N,
            KeyCode::KeyO => Key::O,
            KeyCode::KeyP => Key::P,
            KeyCode::KeyQ => Key::Q,
            KeyCode::KeyR => Key::R,
            KeyCode::KeyS => Key::S,
            KeyCode::KeyT => Key::T,
            KeyCode::KeyU => Key::U,
            KeyCode::KeyV => Key::V,
            KeyCode::KeyW => Key::W,
            KeyCode::KeyX => Key::X,
            KeyCode::KeyY => Key::Y,
            KeyCode::KeyZ => Key::Z,

            KeyCode::Digit0 => Key::Digit0,
            KeyCode::Digit1 => Key::Digit1,
            KeyCode::Digit2 => Key::Digit2,
            KeyCode::Digit3 => Key::Digit3,
            KeyCode::Digit4 => Key::Digit4,
            KeyCode::Digit5 => Key::Digit5,
            KeyCode::Digit6 => Key::Digit6,
            KeyCode::Digit7 => Key::Digit7,
            KeyCode::Digit8 => Key::Digit8,
            KeyCode::Digit9 => Key::Digit9,

            other => Key::Unknown(other as u32),
        },

        // NativeKeyCode is not a u32 in winit 0.30; preserve "unknown"
        // without a stable numeric.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const F_KEY: PhysicalKey = PhysicalKey::Code(KeyCode::KeyF);

    // ── key translation ───────────────────────────────────────────────────

    #[test]
    fn physical_press_translates() {
        let ev = translate_key_event(ElementState::Pressed, F_KEY, false, false);
        assert_eq!(
            ev,
            Some(InputEvent::Key {
                key: Key::F,
                state: KeyState::Pressed,
                repeat: false,
            })
        );
    }

    #[test]
    fn repeat_flag_is_preserved() {
        let ev = translate_key_event(ElementState::Pressed, F_KEY, true, false);
        assert_eq!(
            ev,
            Some(InputEvent::Key {
                key: Key::F,
                state: KeyState::Pressed,
                repeat: true,
            })
        );
    }

    // ── synthetic events ──────────────────────────────────────────────────

    #[test]
    fn synthetic_press_is_dropped() {
        // Delivered on focus gain for a key held before the window had
        // focus; must not look like a fresh press.
        assert_eq!(
            translate_key_event(ElementState::Pressed, F_KEY, false, true),
            None
        );
    }

    #[test]
    fn synthetic_release_is_dropped() {
        assert_eq!(
            translate_key_event(ElementState::Released, F_KEY, false, true),
            None
        );
    }
}
