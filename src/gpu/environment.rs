//! GPU upload of the installed environment map.

use crate::scene::Environment;

/// Texel format used for environment maps.
pub const ENVIRONMENT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// The installed environment map, resident on the GPU as a 2D
/// equirectangular texture.
///
/// No pass samples it yet: the background clear reads only the
/// environment's mean radiance from the scene. The frame loop keeps one
/// upload per installed source.
pub struct EnvironmentTexture {
    /// The uploaded texture.
    pub texture: wgpu::Texture,
    /// Location the map was loaded from.
    pub source: String,
}

impl EnvironmentTexture {
    /// Create the texture and upload `environment`'s half-float texels.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        environment: &Environment,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: environment.width,
            height: environment.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Environment Map"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: ENVIRONMENT_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            environment.texel_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                // 4 channels * 2 bytes
                bytes_per_row: Some(environment.width * 8),
                rows_per_image: Some(environment.height),
            },
            size,
        );

        log::debug!(
            "uploaded environment {} ({}x{})",
            environment.source,
            environment.width,
            environment.height
        );

        Self {
            texture,
            source: environment.source.clone(),
        }
    }
}
