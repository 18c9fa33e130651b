//! Window surface, device and queue for the native viewer.

use std::fmt;

use super::environment::ENVIRONMENT_FORMAT;

/// Why the GPU could not be brought up for a window.
#[derive(Debug)]
pub enum GpuInitError {
    /// The window handle could not back a surface.
    Surface(wgpu::CreateSurfaceError),
    /// No adapter can present to the surface.
    Adapter(wgpu::RequestAdapterError),
    /// The adapter refused the device request.
    Device(wgpu::RequestDeviceError),
    /// The surface reports no presentable format.
    NoSurfaceFormat,
}

impl fmt::Display for GpuInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(e) => write!(f, "cannot create window surface: {e}"),
            Self::Adapter(e) => write!(f, "no adapter for window surface: {e}"),
            Self::Device(e) => write!(f, "device request rejected: {e}"),
            Self::NoSurfaceFormat => write!(f, "window surface has no formats"),
        }
    }
}

impl std::error::Error for GpuInitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(e) => Some(e),
            Self::Adapter(e) => Some(e),
            Self::Device(e) => Some(e),
            Self::NoSurfaceFormat => None,
        }
    }
}

/// Presentation format for the window.
///
/// Clear colors and tone-mapped environment radiance are linear, so an
/// sRGB format is preferred: the hardware then applies the transfer
/// curve on store.
#[must_use]
pub fn surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(wgpu::TextureFormat::is_srgb)
        .or_else(|| formats.first().copied())
}

/// Whether `adapter` can receive and sample half-float environment maps.
fn supports_environment(adapter: &wgpu::Adapter) -> bool {
    adapter
        .get_texture_format_features(ENVIRONMENT_FORMAT)
        .allowed_usages
        .contains(wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST)
}

/// The viewer's GPU state for one window.
pub struct GpuContext {
    /// Logical device.
    pub device: wgpu::Device,
    /// Command queue.
    pub queue: wgpu::Queue,
    /// `false` when the adapter cannot hold an environment texture; the
    /// background then stays on the flat or mean-radiance color only.
    pub environment_supported: bool,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

impl GpuContext {
    /// Bring up a surface, adapter and device for `window` at `size`
    /// (physical pixels, zero clamped to one).
    ///
    /// # Errors
    ///
    /// Returns [`GpuInitError`] when any step of the setup fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
    ) -> Result<Self, GpuInitError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(GpuInitError::Surface)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .map_err(GpuInitError::Adapter)?;

        // One clear pass and one texture fit the downlevel limits.
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Vantage Device"),
                required_limits: wgpu::Limits::downlevel_defaults(),
                ..Default::default()
            })
            .await
            .map_err(GpuInitError::Device)?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface_format(&caps.formats).ok_or(GpuInitError::NoSurfaceFormat)?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.0.max(1),
            height: size.1.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let environment_supported = supports_environment(&adapter);
        if !environment_supported {
            log::warn!(
                "adapter cannot sample {ENVIRONMENT_FORMAT:?}, environment upload disabled"
            );
        }
        log::info!(
            "GPU ready on {} ({format:?}, {}x{})",
            adapter.get_info().name,
            config.width,
            config.height
        );

        Ok(Self {
            device,
            queue,
            environment_supported,
            surface,
            config,
        })
    }

    /// Presentation format chosen at startup.
    #[must_use]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Current surface size in physical pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Follow a window resize. Zero or unchanged sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == self.size() {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Acquire the next frame, let `record` encode into it, then submit and
    /// present. A lost or outdated surface is reconfigured and the frame
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns the [`wgpu::SurfaceError`] for timeouts and out-of-memory.
    pub fn render_frame(
        &self,
        record: impl FnOnce(&mut wgpu::CommandEncoder, &wgpu::TextureView),
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });
        record(&mut encoder, &view);
        let _ = self.queue.submit([encoder.finish()]);
        frame.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use wgpu::TextureFormat;

    use super::*;

    #[test]
    fn prefers_srgb_surface() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(surface_format(&formats), Some(TextureFormat::Bgra8UnormSrgb));
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [TextureFormat::Rgba16Float, TextureFormat::Rgb10a2Unorm];
        assert_eq!(surface_format(&formats), Some(TextureFormat::Rgba16Float));
        assert_eq!(surface_format(&[]), None);
    }
}
