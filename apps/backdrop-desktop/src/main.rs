use anyhow::Result;
use backdrop_common::Viewport;
use backdrop_input::PointerTracker;
use backdrop_render::{PerspectiveCamera, sync_viewport};
use backdrop_render_wgpu::{GpuContext, WgpuRenderer};
use backdrop_scene::{SHAPE_COUNT, Scene};
use clap::Parser;
use glam::Vec2;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "backdrop-desktop", about = "Floating-shapes backdrop with cursor parallax")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Seed for a reproducible shape population
    #[arg(long)]
    seed: Option<u64>,
}

/// Everything the frame loop reads and writes, independent of the GPU.
struct AppState {
    scene: Scene,
    camera: PerspectiveCamera,
    tracker: PointerTracker,
    viewport: Viewport,
}

impl AppState {
    fn new(seed: Option<u64>) -> Self {
        let scene = match seed {
            Some(seed) => Scene::with_seed(seed),
            None => Scene::from_entropy(),
        };
        let viewport = Viewport::new(1280, 720);
        Self {
            scene,
            camera: PerspectiveCamera::new(viewport.aspect()),
            tracker: PointerTracker::new(),
            viewport,
        }
    }

    fn on_cursor_moved(&mut self, position: Vec2) {
        self.tracker.on_pointer_move(position, self.viewport);
    }

    fn advance_frame(&mut self) {
        self.scene.advance_frame(self.tracker.pointer());
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<WgpuRenderer>,
}

impl GpuApp {
    fn new(seed: Option<u64>) -> Self {
        Self {
            state: AppState::new(seed),
            window: None,
            gpu: None,
            renderer: None,
        }
    }

    fn redraw(&mut self) {
        self.state.advance_frame();

        let (Some(gpu), Some(renderer)) = (&self.gpu, &mut self.renderer) else {
            return;
        };
        let Some(output) = gpu.acquire_frame() else {
            return;
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        renderer.render(
            gpu,
            &view,
            &self.state.scene,
            &self.state.camera,
            self.state.tracker.glow(),
        );
        output.present();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let size = self.state.viewport;
        let attrs = Window::default_attributes()
            .with_title("Backdrop")
            .with_transparent(true)
            .with_inner_size(PhysicalSize::new(size.width, size.height));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let viewport = Viewport::new(inner.width, inner.height);
        let mut gpu = match GpuContext::new(window.clone(), viewport) {
            Ok(gpu) => gpu,
            Err(e) => {
                tracing::error!("failed to initialize GPU: {e}");
                event_loop.exit();
                return;
            }
        };

        self.state.viewport = viewport;
        sync_viewport(&mut self.state.camera, &mut gpu, viewport);
        let renderer = WgpuRenderer::new(&gpu, SHAPE_COUNT as u32);

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                let viewport = Viewport::new(new_size.width, new_size.height);
                self.state.viewport = viewport;
                if let Some(gpu) = &mut self.gpu {
                    sync_viewport(&mut self.state.camera, gpu, viewport);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state
                    .on_cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                // Reschedule for the next display refresh.
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("backdrop-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = GpuApp::new(cli.seed);
    event_loop.run_app(&mut app)?;

    tracing::info!(frames = app.state.scene.frame(), "backdrop-desktop exiting");
    Ok(())
}
