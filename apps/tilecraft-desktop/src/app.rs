use crate::keymap::{pointer_event, translate_key};
use egui::Context as EguiContext;
use std::path::PathBuf;
use std::sync::Arc;
use tilecraft_assets::{TextureCatalog, TextureTable};
use tilecraft_input::{EventQueue, RawEvent};
use tilecraft_render::{FrameView, draw_frame};
use tilecraft_render_egui::{EguiCanvas, load_block_textures};
use tilecraft_session::{LoopState, Session};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalPosition, LogicalSize, PhysicalSize};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

/// Fatal startup failures. The event loop exits and `main` reports them.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("unable to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("unable to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter")]
    NoAdapter,
    #[error("unable to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface supports no texture formats")]
    NoSurfaceFormat,
}

/// Game state plus the input gathered since the last frame.
struct AppState {
    session: Session,
    events: EventQueue,
    catalog: TextureCatalog,
    texture_dir: PathBuf,
    textures: TextureTable<egui::TextureHandle>,
    cursor: Option<LogicalPosition<f64>>,
}

impl AppState {
    fn new(session: Session, catalog: TextureCatalog, texture_dir: PathBuf) -> Self {
        Self {
            session,
            events: EventQueue::new(),
            catalog,
            texture_dir,
            textures: TextureTable::new(),
            cursor: None,
        }
    }

    /// Apply everything queued since the last frame.
    fn pump(&mut self) -> LoopState {
        self.session.pump(&mut self.events)
    }

    /// Queue a quit behind any pending input and apply the batch at once.
    /// Redraws can be suspended while the window is hidden or minimized.
    fn request_close(&mut self) -> LoopState {
        self.events.push(RawEvent::Quit);
        self.pump()
    }

    fn draw(&self, ctx: &EguiContext) {
        let mut canvas = EguiCanvas::new(ctx.layer_painter(egui::LayerId::background()));
        let view = FrameView::new(
            self.session.config(),
            self.session.grid(),
            self.session.player(),
            self.session.selection(),
        );
        if let Err(e) = draw_frame(&mut canvas, &self.textures, &view) {
            tracing::error!("frame failed: {e}");
        }
    }
}

/// Window, surface and egui plumbing, created once the event loop resumes.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(
        event_loop: &ActiveEventLoop,
        egui_ctx: &EguiContext,
        world_dim: u32,
    ) -> Result<Self, InitError> {
        let attrs = Window::default_attributes()
            .with_title("Tilecraft")
            .with_inner_size(LogicalSize::new(world_dim, world_dim))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(InitError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("tilecraft_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        // egui blends in gamma space, so prefer a non-sRGB target.
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or(caps.formats.first())
            .copied()
            .ok_or(InitError::NoSurfaceFormat)?;

        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, format, None, 1, false);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            width = config.width,
            height = config.height,
            "GPU initialized"
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw the frame through egui and present it.
    fn render(&mut self, egui_ctx: &EguiContext, state: &AppState) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| state.draw(ctx));
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        let extra = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("frame_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer.render(&mut pass, &paint_jobs, &screen);
        }
        self.queue
            .submit(extra.into_iter().chain(std::iter::once(encoder.finish())));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        output.present();
    }
}

/// Leave the event loop once the session has stopped. Returns whether it did.
fn exit_if_stopped(event_loop: &ActiveEventLoop, state: LoopState) -> bool {
    if state == LoopState::Stopped {
        event_loop.exit();
        return true;
    }
    false
}

/// winit application: queues input as `RawEvent`s and runs one frame per
/// redraw.
pub struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
    init_error: Option<InitError>,
}

impl GpuApp {
    pub fn new(session: Session, catalog: TextureCatalog, texture_dir: PathBuf) -> Self {
        Self {
            state: AppState::new(session, catalog, texture_dir),
            gpu: None,
            egui_ctx: EguiContext::default(),
            init_error: None,
        }
    }

    /// The session after the event loop has returned, or the startup error
    /// that ended it.
    pub fn finish(self) -> Result<Session, InitError> {
        match self.init_error {
            Some(e) => Err(e),
            None => Ok(self.state.session),
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() || self.init_error.is_some() {
            return;
        }
        let world_dim = self.state.session.config().world_dim();
        match Gpu::new(event_loop, &self.egui_ctx, world_dim) {
            Ok(gpu) => {
                self.state.textures = load_block_textures(
                    &self.egui_ctx,
                    &self.state.catalog,
                    &self.state.texture_dir,
                );
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("initialization failed: {e}");
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        // egui only paints here; it sees every event but never swallows one.
        let _ = gpu.egui_winit.on_window_event(&gpu.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                exit_if_stopped(event_loop, self.state.request_close());
            }
            WindowEvent::Resized(size) => gpu.resize(size),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.state
                    .events
                    .push(RawEvent::KeyDown(translate_key(&logical_key)));
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state.cursor = Some(position.to_logical(gpu.window.scale_factor()));
            }
            WindowEvent::CursorLeft { .. } => self.state.cursor = None,
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => {
                if let Some(position) = self.state.cursor {
                    self.state.events.push(pointer_event(position, button));
                }
            }
            WindowEvent::RedrawRequested => {
                if exit_if_stopped(event_loop, self.state.pump()) {
                    return;
                }
                gpu.render(&self.egui_ctx, &self.state);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}
