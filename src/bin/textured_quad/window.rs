//! Window, GL context and event handling.

use std::num::NonZeroU32;

use anyhow::{anyhow, Context as _};
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::config::DemoConfig;
use crate::scene::Scene;

/// A window with a current GL context.
///
/// Field order is drop order: the surface goes before the window it draws to.
struct GlWindowState {
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

/// Drives the frame loop from winit events.
pub struct App {
    config: DemoConfig,
    // Dropped before `gl`, while the context is still current.
    scene: Option<Scene>,
    gl: Option<GlWindowState>,
    failure: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: DemoConfig) -> Self {
        Self {
            config,
            scene: None,
            gl: None,
            failure: None,
        }
    }

    /// The error that stopped the event loop, if any.
    pub fn into_result(self) -> anyhow::Result<()> {
        self.failure.map_or(Ok(()), Err)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure.get_or_insert(err);
        self.scene = None;
        event_loop.exit();
    }

    fn create_window(
        &self,
        event_loop: &ActiveEventLoop,
    ) -> anyhow::Result<(GlWindowState, Scene)> {
        let attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, ConfigTemplateBuilder::new(), |configs| {
                configs
                    .reduce(|best, config| {
                        if config.num_samples() > best.num_samples() {
                            config
                        } else {
                            best
                        }
                    })
                    .expect("display offered no GL configs")
            })
            .map_err(|err| anyhow!("failed to create window: {err}"))?;
        let window = window.context("display builder returned no window")?;

        let raw_handle = window.window_handle().ok().map(|handle| handle.as_raw());
        let display = gl_config.display();
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(raw_handle);

        // SAFETY: `raw_handle` belongs to `window`, which outlives the context.
        let not_current = unsafe { display.create_context(&gl_config, &context_attributes) }
            .context("failed to create GL context")?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .context("failed to describe window surface")?;
        // SAFETY: the surface is dropped before `window`.
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attributes) }
            .context("failed to create window surface")?;
        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        let interval = if self.config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(err) = surface.set_swap_interval(&context, interval) {
            log::warn!("failed to set swap interval: {err}");
        }

        // SAFETY: the context was just made current on this thread.
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name))
        };
        // SAFETY: the context stays current until `App` drops the scene, which
        // holds every clone of this handle, ahead of the window state.
        let ctx = unsafe { gl_quad::Context::new(gl) };
        log::info!("OpenGL {}", ctx.version());

        let scene = Scene::new(&ctx, &self.config)?;
        let size = window.inner_size();
        scene.resize(size.width, size.height);

        Ok((
            GlWindowState {
                surface,
                context,
                window,
            },
            scene,
        ))
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gl.is_some() {
            return;
        }
        match self.create_window(event_loop) {
            Ok((gl, scene)) => {
                self.scene = Some(scene);
                self.gl = Some(gl);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                self.scene = None;
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                let (Some(gl), Some(width), Some(height)) = (
                    &self.gl,
                    NonZeroU32::new(size.width),
                    NonZeroU32::new(size.height),
                ) else {
                    return;
                };
                gl.surface.resize(&gl.context, width, height);
                if let Some(scene) = &self.scene {
                    scene.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                let (Some(gl), Some(scene)) = (&self.gl, &mut self.scene) else {
                    return;
                };
                let result = scene
                    .frame()
                    .context("frame failed")
                    .and_then(|()| {
                        gl.surface
                            .swap_buffers(&gl.context)
                            .context("failed to swap buffers")
                    });
                if let Err(err) = result {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let (Some(gl), Some(_)) = (&self.gl, &self.scene) {
            gl.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.scene = None;
    }
}
