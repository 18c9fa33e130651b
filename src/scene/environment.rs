//! Installed environment: half-float texels plus a mean radiance term used
//! for ambient lighting and as the background clear color.

use glam::Vec3;
use half::f16;
use image::Rgba32FImage;

/// An equirectangular environment ready for GPU upload.
///
/// Built by consuming the decoded float image; the full-precision working
/// copy is dropped once the texels are packed.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    /// Location the image was loaded from.
    pub source: String,
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// Row-major RGBA texels, `Rgba16Float` layout.
    pub texels: Vec<[f16; 4]>,
    /// Solid-angle weighted mean radiance (linear RGB).
    pub ambient: Vec3,
}

impl Environment {
    /// Pack `image` into half-float texels and integrate its radiance.
    #[must_use]
    pub fn from_equirect(source: impl Into<String>, image: Rgba32FImage) -> Self {
        let (width, height) = image.dimensions();
        let ambient = mean_radiance(&image);
        let texels = image
            .pixels()
            .map(|p| p.0.map(f16::from_f32))
            .collect();
        Self {
            source: source.into(),
            width,
            height,
            texels,
            ambient,
        }
    }

    /// Raw texel bytes for a `queue.write_texture` upload.
    #[must_use]
    pub fn texel_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texels)
    }

    /// Ambient radiance squashed into a displayable `[0, 1]` color
    /// (Reinhard), used as the background clear color.
    #[must_use]
    pub fn background_color(&self) -> [f32; 3] {
        let mapped = self.ambient / (Vec3::ONE + self.ambient);
        mapped.to_array()
    }
}

/// Mean radiance of an equirectangular image. Rows are weighted by
/// `sin(theta)` so the stretched polar rows do not dominate.
fn mean_radiance(image: &Rgba32FImage) -> Vec3 {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Vec3::ZERO;
    }
    let mut sum = Vec3::ZERO;
    let mut weight_sum = 0.0_f32;
    for (y, row) in image.rows().enumerate() {
        let theta = (y as f32 + 0.5) / height as f32 * std::f32::consts::PI;
        let weight = theta.sin();
        let row_sum = row.fold(Vec3::ZERO, |acc, p| {
            acc + Vec3::new(p.0[0], p.0[1], p.0[2])
        });
        sum += row_sum * weight;
        weight_sum += weight * width as f32;
    }
    if weight_sum > 0.0 {
        sum / weight_sum
    } else {
        Vec3::ZERO
    }
}
