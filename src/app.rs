//! Visualizer window: mic capture, phrase hint, scene and rendering.

use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use echoscape::audio::{MicCapture, SoundType};
use echoscape::camera::CameraSystem;
use echoscape::mood::{MotionParameters, PhraseHint};
use echoscape::params::{CameraOrbit, CaptureConfig, RenderConfig};
use echoscape::phrase::PhraseService;
use echoscape::rendering::{RenderSystem, Uniforms};
use echoscape::scene::{FrameClock, Scene};

/// Client-side timeout for phrase requests
const PHRASE_TIMEOUT: Duration = Duration::from_secs(20);

/// Visualizer options from the command line
pub struct VisualizeOptions {
    pub description: Option<String>,
    pub server: String,
    pub device: Option<String>,
    pub listen: bool,
}

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation
    scene: Scene,
    camera: CameraSystem,
    clock: FrameClock,

    // Microphone
    capture_config: CaptureConfig,
    capture: Option<MicCapture>,
    listen_on_start: bool,
    last_sound_type: Option<SoundType>,

    // Phrase
    phrase_service: PhraseService,
    description: Option<String>,
    pending_phrase: Option<Receiver<PhraseHint>>,
    hint: Option<PhraseHint>,

    render_config: RenderConfig,

    /// Set when setup fails inside the event loop
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(options: VisualizeOptions) -> anyhow::Result<Self> {
        let phrase_service = PhraseService::new(&options.server, PHRASE_TIMEOUT)
            .context("failed to create phrase client")?;

        Ok(Self {
            window: None,
            render_system: None,
            scene: Scene::default(),
            camera: CameraSystem::new(CameraOrbit::default()),
            clock: FrameClock::new(),
            capture_config: CaptureConfig {
                device_query: options.device,
                ..Default::default()
            },
            capture: None,
            listen_on_start: options.listen,
            last_sound_type: None,
            phrase_service,
            description: options
                .description
                .filter(|d| !d.trim().is_empty()),
            pending_phrase: None,
            hint: None,
            render_config: RenderConfig::default(),
            fatal: None,
        })
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("Echoscape")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let size = window.inner_size();
        self.render_config.window_width = size.width;
        self.render_config.window_height = size.height;

        let render_system = pollster::block_on(RenderSystem::new(Arc::clone(&window), &self.scene))
            .context("failed to initialize rendering")?;

        self.window = Some(window);
        self.render_system = Some(render_system);

        if self.listen_on_start {
            self.start_listening();
        }
        self.request_phrase();
        self.update_title();

        tracing::info!("Echoscape is running (M: toggle mic, R: new phrase, Esc: quit)");
        Ok(())
    }

    /// Open the microphone; failure leaves listening off
    fn start_listening(&mut self) {
        match MicCapture::start(self.capture_config.clone()) {
            Ok(capture) => {
                tracing::info!("listening on {}", capture.device_name());
                self.capture = Some(capture);
            }
            Err(e) => {
                tracing::warn!("microphone unavailable, listening stays off: {}", e);
                self.capture = None;
            }
        }
    }

    fn toggle_listening(&mut self) {
        match self.capture.take() {
            Some(mut capture) => {
                capture.stop();
                self.last_sound_type = None;
                tracing::info!("listening stopped");
            }
            None => self.start_listening(),
        }
        self.update_title();
    }

    fn request_phrase(&mut self) {
        let Some(description) = &self.description else {
            return;
        };
        tracing::info!("requesting phrase for '{}'", description);
        self.pending_phrase = Some(self.phrase_service.spawn_request(description.clone()));
    }

    /// Take the phrase once the background request has answered
    fn poll_phrase(&mut self) {
        let Some(rx) = &self.pending_phrase else {
            return;
        };
        match rx.try_recv() {
            Ok(hint) => {
                tracing::info!("phrase: {}", hint.phrase);
                self.hint = Some(hint);
                self.pending_phrase = None;
                self.update_title();
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => self.pending_phrase = None,
        }
    }

    fn update_title(&self) {
        let Some(window) = &self.window else {
            return;
        };
        let mic = if self.capture.is_some() { "listening" } else { "mic off" };
        let title = match &self.hint {
            Some(hint) => format!("Echoscape | {} | {}", hint.phrase, mic),
            None => format!("Echoscape | {}", mic),
        };
        window.set_title(&title);
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode) {
        match code {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::KeyM => self.toggle_listening(),
            KeyCode::KeyR => self.request_phrase(),
            _ => {}
        }
    }

    /// Render a single frame
    fn render_frame(&mut self) {
        self.poll_phrase();

        let (time_s, dt_s) = self.clock.tick();

        let features = self.capture.as_ref().and_then(|c| c.features());
        if let Some(f) = &features {
            if self.last_sound_type != Some(f.sound_type) {
                tracing::debug!(
                    "mood: {} (intensity {:.2}, rhythm {:.2})",
                    f.sound_type,
                    f.intensity,
                    f.rhythm_score
                );
                self.last_sound_type = Some(f.sound_type);
            }
        }

        let mut motion = MotionParameters::from_optional(features.as_ref());
        if let Some(hint) = &self.hint {
            motion = motion.with_hint(hint);
        }

        self.scene.update(time_s, dt_s, &motion);

        let Some(render_system) = &mut self.render_system else {
            return;
        };

        let (view_proj, _camera_pos) = self
            .camera
            .create_view_proj_matrix(time_s, &self.render_config);

        render_system.update_vertices(&self.scene);
        render_system.update_uniforms(&Uniforms::new(view_proj, &motion, time_s));

        if let Err(e) = render_system.render() {
            tracing::error!("render error: {}", e);
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init(event_loop) {
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, code),
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    self.render_config.window_width = size.width;
                    self.render_config.window_height = size.height;
                }
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut capture) = self.capture.take() {
            capture.stop();
        }
        self.pending_phrase = None;
        self.render_system = None;
        self.window = None;
        tracing::info!("shut down");
    }
}

/// Open the window and run until it closes
pub fn run(options: VisualizeOptions) -> anyhow::Result<()> {
    let mut app = App::new(options)?;
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop
        .run_app(&mut app)
        .context("event loop terminated abnormally")?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
