use anyhow::{anyhow, Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, ExitSignals, FrameCtx, InitCtx, LoopState, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState, Key};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Key that stops the loop. `None` leaves only the window close button.
    pub exit_key: Option<Key>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tricam".to_string(),
            initial_size: LogicalSize::new(1024.0, 768.0),
            exit_key: Some(Key::Escape),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, initializes the GPU and `app`, and renders until the
    /// loop stops.
    ///
    /// Returns `Err` if anything failed before or during the loop; in that
    /// case no further frames were rendered.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.finish()
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    loop_state: LoopState,
    close_requested: bool,

    /// First fatal error; stops the loop and is returned from `Runtime::run`.
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            window: None,
            loop_state: LoopState::Running,
            close_requested: false,
            fatal: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.record_failure(err);
        event_loop.exit();
    }

    /// Keeps the first fatal error and stops the loop. No frame is drawn after
    /// this; if it happens during startup the window entry is never stored.
    fn record_failure(&mut self, err: anyhow::Error) {
        log::error!("{err:#}");
        self.fatal.get_or_insert(err);
        self.loop_state = LoopState::Stopped;
    }

    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }

    /// Calls `App::on_init` with the freshly created window and GPU.
    fn init_app(&mut self, entry: &WindowEntry) -> Result<()> {
        let app = &mut self.app;
        entry.with(|fields| {
            let mut ctx = InitCtx {
                window: WindowCtx {
                    id: fields.window.id(),
                    window: fields.window,
                },
                gpu: fields.gpu,
            };
            app.on_init(&mut ctx)
        })
    }

    /// Feeds this iteration's observations through the loop state machine.
    fn update_loop_state(&mut self, event_loop: &ActiveEventLoop) {
        let exit_key = match (self.config.exit_key, self.window.as_ref()) {
            (Some(key), Some(entry)) => {
                entry.with(|f| f.input_state.key_hit(f.input_frame, key))
            }
            _ => false,
        };

        let signals = ExitSignals {
            exit_key,
            close_requested: self.close_requested,
        };

        let next = self.loop_state.advance(signals);
        if self.loop_state.is_running() && !next.is_running() {
            if let Some(reason) = signals.reason() {
                log::info!("stopping: {reason}");
            }
            event_loop.exit();
        }
        self.loop_state = next;
    }

    fn redraw(&mut self) -> Result<()> {
        let (app, entry) = (&mut self.app, &mut self.window);
        let Some(entry) = entry.as_mut() else {
            return Ok(());
        };

        entry.with_mut(|fields| {
            let time = fields.clock.tick();

            let result = {
                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        id: fields.window.id(),
                        window: fields.window,
                    },
                    gpu: fields.gpu,
                    input: fields.input_state,
                    input_frame: fields.input_frame,
                    time,
                };
                app.on_frame(&mut ctx)
            };

            // Per-frame deltas are consumed by the frame that saw them.
            fields.input_frame.clear();
            result
        })
    }

    /// Runs app teardown and releases the window and GPU objects.
    fn finish(mut self) -> Result<()> {
        self.app.on_exit();
        drop(self.window.take());
        log::debug!("GPU resources released");

        match self.fatal.take() {
            Some(err) => Err(err),
            None if self.loop_state.is_running() => {
                Err(anyhow!("event loop exited before the render loop stopped"))
            }
            None => Ok(()),
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || !self.loop_state.is_running() {
            return;
        }

        let entry = match self.create_window_entry(event_loop) {
            Ok(entry) => entry,
            Err(e) => return self.fail(event_loop, e),
        };

        if let Err(e) = self.init_app(&entry) {
            return self.fail(event_loop, e);
        }

        entry.with_window(|w| w.request_redraw());
        self.window = Some(entry);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.loop_state.is_running() {
            event_loop.exit();
            return;
        }

        // Continuous redraw; FIFO presentation paces the loop.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(entry) = &self.window {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if !self.loop_state.is_running() {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.window.as_mut() else {
            return;
        };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        if let Some(ev) = translate_window_event(&event) {
            entry.with_mut(|fields| fields.input_state.apply_event(fields.input_frame, ev));
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.close_requested = true;
            }

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::RedrawRequested => {
                // Check before drawing so a stop signal never costs another frame.
                self.update_loop_state(event_loop);
                if !self.loop_state.is_running() {
                    return;
                }

                if let Err(e) = self.redraw() {
                    return self.fail(event_loop, e.context("frame failed"));
                }
                return;
            }

            _ => {}
        }

        self.update_loop_state(event_loop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Calls {
        frames: Cell<u32>,
        exits: Cell<u32>,
    }

    struct CountingApp(Rc<Calls>);

    impl App for CountingApp {
        fn on_frame(&mut self, _ctx: &mut FrameCtx<'_, '_>) -> Result<()> {
            self.0.frames.set(self.0.frames.get() + 1);
            Ok(())
        }

        fn on_exit(&mut self) {
            self.0.exits.set(self.0.exits.get() + 1);
        }
    }

    fn state() -> (AppState<CountingApp>, Rc<Calls>) {
        let calls = Rc::new(Calls::default());
        let state = AppState::new(
            RuntimeConfig::default(),
            GpuInit::default(),
            CountingApp(calls.clone()),
        );
        (state, calls)
    }

    #[test]
    fn startup_failure_never_reaches_on_frame() {
        let (mut state, calls) = state();

        // What `resumed` does when window, GPU or `on_init` fails.
        state.record_failure(anyhow!("failed to load shader program"));
        assert!(state.window.is_none());
        assert!(!state.loop_state.is_running());

        state.redraw().unwrap();
        assert_eq!(calls.frames.get(), 0);

        let err = state.finish().unwrap_err();
        assert!(format!("{err:#}").contains("failed to load shader program"));
        assert_eq!(calls.frames.get(), 0);
        assert_eq!(calls.exits.get(), 1);
    }

    #[test]
    fn first_failure_is_the_one_reported() {
        let (mut state, _) = state();

        state.record_failure(anyhow!("GPU initialization failed"));
        state.record_failure(anyhow!("frame failed"));

        let err = state.finish().unwrap_err();
        assert_eq!(err.to_string(), "GPU initialization failed");
    }

    #[test]
    fn loop_ending_while_running_is_an_error() {
        let (state, calls) = state();
        assert!(state.finish().is_err());
        assert_eq!(calls.exits.get(), 1);
    }

    #[test]
    fn stopped_loop_without_failure_is_ok() {
        let (mut state, _) = state();
        state.loop_state = state.loop_state.advance(ExitSignals {
            exit_key: true,
            close_requested: false,
        });
        assert!(state.finish().is_ok());
    }
}
