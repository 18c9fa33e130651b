//! Byte sources for assets: local files, HTTP, and the browser's `fetch`.

use std::future::Future;
use std::path::PathBuf;

use crate::error::VantageError;

/// Anything that can turn a location into bytes.
///
/// Locations are the already-joined strings produced by
/// [`asset_url`](super::path::asset_url); each source decides how to
/// interpret them.
pub trait AssetSource {
    /// Fetch the full contents at `location`.
    fn fetch(
        &self,
        location: &str,
    ) -> impl Future<Output = Result<Vec<u8>, VantageError>>;
}

/// Reads assets from the local filesystem, relative to `root`.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    /// Source rooted at `root`. Relative locations are joined onto it;
    /// absolute ones are used as-is.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for FileSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, VantageError> {
        let path = self.root.join(location);
        std::fs::read(&path).map_err(|e| VantageError::Fetch {
            location: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Environment maps routinely exceed ureq's default 10 MiB body limit.
#[cfg(feature = "http")]
const MAX_HTTP_BODY: u64 = 512 * 1024 * 1024;

/// Blocking HTTP(S) source for native builds pointed at a remote base.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpSource;

#[cfg(feature = "http")]
impl AssetSource for HttpSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, VantageError> {
        let fetch_err = |reason: String| VantageError::Fetch {
            location: location.to_owned(),
            reason,
        };
        let response = ureq::get(location)
            .call()
            .map_err(|e| fetch_err(e.to_string()))?;
        let mut body = response.into_body();
        body.with_config()
            .limit(MAX_HTTP_BODY)
            .read_to_vec()
            .map_err(|e| fetch_err(e.to_string()))
    }
}

/// Browser `fetch()` source.
#[cfg(feature = "web")]
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchSource;

#[cfg(feature = "web")]
impl AssetSource for FetchSource {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, VantageError> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;

        let js_err = |e: wasm_bindgen::JsValue| VantageError::Fetch {
            location: location.to_owned(),
            reason: format!("{e:?}"),
        };

        let win = web_sys::window().ok_or_else(|| VantageError::Fetch {
            location: location.to_owned(),
            reason: "no window".into(),
        })?;
        let resp_val = JsFuture::from(win.fetch_with_str(location))
            .await
            .map_err(js_err)?;
        let resp: web_sys::Response = resp_val.dyn_into().map_err(js_err)?;

        if !resp.ok() {
            return Err(VantageError::Fetch {
                location: location.to_owned(),
                reason: format!("HTTP {} {}", resp.status(), resp.status_text()),
            });
        }

        let buf_promise = resp.array_buffer().map_err(js_err)?;
        let buf_val = JsFuture::from(buf_promise).await.map_err(js_err)?;
        let bytes = js_sys::Uint8Array::new(&buf_val);
        let mut out = vec![0u8; bytes.length() as usize];
        bytes.copy_to(&mut out);
        Ok(out)
    }
}
