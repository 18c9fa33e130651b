//! Standalone viewer window backed by winit.
//!
//! Assets named in [`Options`] are loaded on short-lived background
//! threads; each thread drives its async loader to completion and posts the
//! result to a [`LoadQueue`] that the frame loop drains every redraw.
//!
//! ```no_run
//! # use vantage::Viewer;
//! Viewer::builder()
//!     .with_title("Showroom")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    assets::{
        loads::{environment_event, model_event},
        AssetSource, FileSource, LoadEvent, LoadQueue, LoadSender,
    },
    error::VantageError,
    gpu::{clear_pass, EnvironmentTexture, GpuContext},
    input::InputEvent,
    options::{AssetOptions, Options},
    session::ViewerSession,
    util::FrameTiming,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "Vantage", default
    /// options).
    fn new() -> Self {
        Self {
            options: None,
            title: "Vantage".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window showing the configured environment and models.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    pub fn run(self) -> Result<(), VantageError> {
        let event_loop =
            EventLoop::new().map_err(|e| VantageError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            gpu: None,
            environment: None,
            timing: FrameTiming::new(self.options.display.target_fps),
            loads: LoadQueue::new(),
            session: ViewerSession::new(self.options),
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| VantageError::Viewer(e.to_string()))
    }
}

// ── Native asset loading ─────────────────────────────────────────────────

/// Local files, or HTTP when the asset base is a URL.
#[derive(Debug, Clone)]
enum NativeSource {
    File(FileSource),
    #[cfg(feature = "http")]
    Http(crate::assets::HttpSource),
}

impl NativeSource {
    fn for_base(base: &str) -> Self {
        let remote = base.starts_with("http://") || base.starts_with("https://");
        #[cfg(feature = "http")]
        if remote {
            return Self::Http(crate::assets::HttpSource);
        }
        #[cfg(not(feature = "http"))]
        if remote {
            log::warn!("asset base {base} is remote but the http feature is off");
        }
        Self::File(FileSource::default())
    }
}

impl AssetSource for NativeSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, VantageError> {
        match self {
            Self::File(source) => source.fetch(location).await,
            #[cfg(feature = "http")]
            Self::Http(source) => source.fetch(location).await,
        }
    }
}

/// Run `load` on its own thread and post the event when it finishes.
fn spawn_load<F>(name: &str, tx: LoadSender, load: F) -> Result<(), VantageError>
where
    F: FnOnce() -> LoadEvent + Send + 'static,
{
    let _ = std::thread::Builder::new()
        .name(format!("load-{name}"))
        .spawn(move || {
            if tx.send(load()).is_err() {
                log::debug!("load finished after the viewer shut down");
            }
        })
        .map_err(VantageError::ThreadSpawn)?;
    Ok(())
}

/// Start the environment chain and every configured model, all in
/// parallel.
fn spawn_asset_loads(assets: &AssetOptions, queue: &LoadQueue) -> Result<(), VantageError> {
    let source = NativeSource::for_base(&assets.base_path);

    {
        let (source, assets) = (source.clone(), assets.clone());
        spawn_load("environment", queue.sender(), move || {
            pollster::block_on(environment_event(&source, &assets))
        })?;
    }

    for model in &assets.models {
        let (source, assets, model) = (source.clone(), assets.clone(), model.clone());
        let name = model.display_name().to_owned();
        spawn_load(&name, queue.sender(), move || {
            pollster::block_on(model_event(&source, &assets, model))
        })?;
    }
    Ok(())
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    environment: Option<EnvironmentTexture>,
    timing: FrameTiming,
    loads: LoadQueue,
    session: ViewerSession,
    title: String,
}

/// Surface size for a window: the full inner size, never zero.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    /// Apply finished loads and upload a newly installed environment.
    fn drain_loads(&mut self) {
        for event in self.loads.drain() {
            let _ = self.session.handle_load(event);
        }

        let (Some(gpu), Some(env)) = (&self.gpu, self.session.scene().environment())
        else {
            return;
        };
        if !gpu.environment_supported {
            return;
        }
        let stale = self
            .environment
            .as_ref()
            .is_none_or(|uploaded| uploaded.source != env.source);
        if stale {
            self.environment = Some(EnvironmentTexture::new(&gpu.device, &gpu.queue, env));
        }
    }

    fn render(&self) -> Result<(), wgpu::SurfaceError> {
        let Some(gpu) = &self.gpu else {
            return Ok(());
        };
        gpu.render_frame(|encoder, view| {
            clear_pass(encoder, view, self.session.scene());
        })
    }

    fn input(&mut self, event: InputEvent) {
        if self.session.handle_input(event) {
            if let Some(w) = &self.window {
                w.request_redraw();
            }
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let (vp_w, vp_h) = viewport_size(window.inner_size());
        let gpu = match pollster::block_on(GpuContext::new(
            window.clone(),
            (vp_w, vp_h),
        )) {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("Failed to initialize GPU: {e}");
                event_loop.exit();
                return;
            }
        };
        self.session.resize(vp_w, vp_h);

        if let Err(e) = spawn_asset_loads(&self.session.options().assets, &self.loads) {
            log::error!("Failed to start asset loads: {e}");
        }

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(gpu);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and GPU must be initialised.
        if self.window.is_none() || self.gpu.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(vp_w, vp_h);
                }
                self.session.resize(vp_w, vp_h);
            }

            WindowEvent::Focused(false) => self.session.release_input(),

            WindowEvent::RedrawRequested => {
                self.drain_loads();

                if self.timing.should_render() {
                    let dt = self.timing.tick();
                    self.session.update(dt);
                    if let Err(e) = self.render() {
                        log::error!("render error: {e:?}");
                    }
                }

                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let pressed = event.state == ElementState::Pressed;
                let _ = self.session.handle_key(&format!("{code:?}"), pressed);
            }

            other => {
                if let Some(input) = InputEvent::from_window_event(&other) {
                    self.input(input);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_base_picks_http_when_available() {
        let source = NativeSource::for_base("https://cdn.example/app/");
        #[cfg(feature = "http")]
        assert!(matches!(source, NativeSource::Http(_)));
        #[cfg(not(feature = "http"))]
        assert!(matches!(source, NativeSource::File(_)));
        assert!(matches!(NativeSource::for_base("assets/"), NativeSource::File(_)));
    }

    #[test]
    fn spawned_loads_report_back() {
        let queue = LoadQueue::new();
        let mut assets = AssetOptions::default();
        assets.base_path = "/nonexistent-vantage-assets/".into();
        spawn_asset_loads(&assets, &queue).unwrap();

        let mut events = Vec::new();
        let deadline = web_time::Instant::now() + std::time::Duration::from_secs(10);
        while events.len() < 3 && web_time::Instant::now() < deadline {
            events.extend(queue.drain());
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| match e {
            LoadEvent::Environment(r) => r.is_err(),
            LoadEvent::Model { result, .. } => result.is_err(),
        }));
    }
}
