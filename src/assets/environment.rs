//! Environment map loading: extension dispatch plus HDR/EXR decoding.

use image::{ImageFormat, Rgba32FImage};

use super::path::extension;
use super::resolver::{resolve_first, LoadOrder, Resolved};
use super::source::AssetSource;
use crate::error::VantageError;

/// Decoders available for environment maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvFormat {
    /// OpenEXR (`.exr`).
    Exr,
    /// Radiance RGBE (`.hdr`).
    Hdr,
}

impl EnvFormat {
    /// Pick the decoder for `location` by extension. Anything other than
    /// `.exr` / `.hdr` is rejected outright.
    pub fn from_location(location: &str) -> Result<Self, VantageError> {
        match extension(location).as_deref() {
            Some("exr") => Ok(Self::Exr),
            Some("hdr") => Ok(Self::Hdr),
            _ => Err(VantageError::UnsupportedFormat(location.to_owned())),
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            Self::Exr => ImageFormat::OpenExr,
            Self::Hdr => ImageFormat::Hdr,
        }
    }
}

/// Decode an environment image to linear RGBA32F.
pub fn decode_environment(
    bytes: &[u8],
    format: EnvFormat,
) -> Result<Rgba32FImage, VantageError> {
    let image = image::load_from_memory_with_format(bytes, format.image_format())?;
    Ok(image.into_rgba32f())
}

/// Fetch and decode a single candidate. Unsupported extensions fail before
/// any fetch is issued.
pub async fn load_environment_candidate<S: AssetSource>(
    source: &S,
    location: &str,
) -> Result<Rgba32FImage, VantageError> {
    let format = EnvFormat::from_location(location)?;
    let bytes = source.fetch(location).await?;
    decode_environment(&bytes, format)
}

/// Walk the candidate list until one environment map decodes.
pub async fn load_environment<S, I, C>(
    source: &S,
    candidates: I,
) -> Result<Resolved<Rgba32FImage>, VantageError>
where
    S: AssetSource,
    I: IntoIterator<Item = C>,
    C: Into<String>,
{
    resolve_first(LoadOrder::new(candidates), |location| async move {
        load_environment_candidate(source, &location).await
    })
    .await
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io::Cursor;

    use image::{DynamicImage, Rgb, Rgb32FImage, Rgba};

    use super::*;

    /// In-memory source that records every fetch.
    #[derive(Default)]
    struct MemorySource {
        files: HashMap<String, Vec<u8>>,
        fetched: RefCell<Vec<String>>,
    }

    impl AssetSource for MemorySource {
        async fn fetch(&self, location: &str) -> Result<Vec<u8>, VantageError> {
            self.fetched.borrow_mut().push(location.to_owned());
            self.files.get(location).cloned().ok_or_else(|| VantageError::Fetch {
                location: location.to_owned(),
                reason: "not found".into(),
            })
        }
    }

    fn hdr_bytes(value: f32) -> Vec<u8> {
        let image = Rgb32FImage::from_pixel(4, 2, Rgb([value, value, value]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb32F(image)
            .write_to(&mut out, ImageFormat::Hdr)
            .unwrap();
        out.into_inner()
    }

    /// 3x2 EXR whose texel at (x, y) is `[x, y, base, 0.5]`.
    fn exr_bytes(base: f32) -> Vec<u8> {
        let image = Rgba32FImage::from_fn(3, 2, |x, y| Rgba([x as f32, y as f32, base, 0.5]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba32F(image)
            .write_to(&mut out, ImageFormat::OpenExr)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn dispatch_by_extension() {
        assert_eq!(EnvFormat::from_location("a/b.EXR").unwrap(), EnvFormat::Exr);
        assert_eq!(EnvFormat::from_location("b.hdr").unwrap(), EnvFormat::Hdr);
        assert!(matches!(
            EnvFormat::from_location("sky.png"),
            Err(VantageError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn decodes_radiance_hdr() {
        let image = decode_environment(&hdr_bytes(0.5), EnvFormat::Hdr).unwrap();
        assert_eq!(image.dimensions(), (4, 2));
        let px = image.get_pixel(0, 0).0;
        assert!((px[0] - 0.5).abs() < 0.01);
        assert_eq!(px[3], 1.0);
    }

    #[test]
    fn decodes_openexr() {
        let image = decode_environment(&exr_bytes(4.0), EnvFormat::Exr).unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(0, 0).0, [0.0, 0.0, 4.0, 0.5]);
        assert_eq!(image.get_pixel(2, 1).0, [2.0, 1.0, 4.0, 0.5]);
    }

    #[test]
    fn primary_exr_candidate_wins() {
        let mut source = MemorySource::default();
        let _ = source.files.insert("HDR/studio.exr".into(), exr_bytes(1.5));
        let _ = source.files.insert("HDR/studio.hdr".into(), hdr_bytes(0.25));

        let resolved = pollster::block_on(load_environment(
            &source,
            ["HDR/studio.exr", "HDR/studio.hdr", "HDR/neutral.hdr"],
        ))
        .unwrap();

        assert_eq!(resolved.location, "HDR/studio.exr");
        assert_eq!(resolved.attempts, 1);
        assert_eq!(resolved.value.get_pixel(1, 0).0, [1.0, 0.0, 1.5, 0.5]);
        assert_eq!(*source.fetched.borrow(), ["HDR/studio.exr"]);
    }

    #[test]
    fn garbage_fails_to_decode() {
        let result = decode_environment(b"not an image", EnvFormat::Exr);
        assert!(matches!(result, Err(VantageError::EnvironmentDecode(_))));
    }

    #[test]
    fn falls_back_past_missing_and_unsupported_candidates() {
        let mut source = MemorySource::default();
        let _ = source.files.insert("env/broken.hdr".into(), b"junk".to_vec());
        let _ = source.files.insert("env/good.hdr".into(), hdr_bytes(2.0));
        let _ = source.files.insert("env/never.hdr".into(), hdr_bytes(9.0));

        let resolved = pollster::block_on(load_environment(
            &source,
            [
                "env/missing.exr",
                "env/sky.png",
                "",
                "env/broken.hdr",
                "env/good.hdr",
                "env/never.hdr",
            ],
        ))
        .unwrap();

        assert_eq!(resolved.location, "env/good.hdr");
        assert_eq!(resolved.attempts, 4);
        // the .png candidate is rejected without a fetch
        assert_eq!(
            *source.fetched.borrow(),
            ["env/missing.exr", "env/broken.hdr", "env/good.hdr"]
        );
    }

    #[test]
    fn all_failing_candidates_leave_error() {
        let source = MemorySource::default();
        let result = pollster::block_on(load_environment(
            &source,
            ["a.exr", "b.hdr", "c.hdr"],
        ));
        assert!(matches!(
            result,
            Err(VantageError::AllCandidatesFailed { attempts: 3 })
        ));
    }
}
