/// Join an asset base (directory or URL prefix) and a relative location.
///
/// Leading slashes on `relative` are stripped and exactly one `/` separates
/// the two parts. An empty base yields the stripped relative part alone.
#[must_use]
pub fn asset_url(base: &str, relative: &str) -> String {
    let relative = relative.trim_start_matches('/');
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return relative.to_owned();
    }
    format!("{base}/{relative}")
}

/// Resolve `uri` relative to the directory containing `location`
/// (e.g. a glTF buffer next to its `.gltf` file).
#[must_use]
pub fn sibling(location: &str, uri: &str) -> String {
    match location.rfind('/') {
        Some(idx) => asset_url(&location[..=idx], uri),
        None => uri.trim_start_matches('/').to_owned(),
    }
}

/// Lower-cased file extension of a location, ignoring any query string or
/// fragment.
#[must_use]
pub fn extension(location: &str) -> Option<String> {
    let path = location
        .split(['?', '#'])
        .next()
        .unwrap_or(location);
    let file = path.rsplit('/').next().unwrap_or(path);
    file.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_slash_is_not_doubled() {
        assert_eq!(asset_url("app/", "/HDR/x.exr"), "app/HDR/x.exr");
    }

    #[test]
    fn separator_is_inserted_once() {
        assert_eq!(asset_url("app", "HDR/x.exr"), "app/HDR/x.exr");
        assert_eq!(asset_url("app//", "///HDR/x.exr"), "app/HDR/x.exr");
        assert_eq!(
            asset_url("https://host/base/", "models/a.glb"),
            "https://host/base/models/a.glb"
        );
    }

    #[test]
    fn empty_base_keeps_relative() {
        assert_eq!(asset_url("", "/models/a.glb"), "models/a.glb");
    }

    #[test]
    fn sibling_resolves_next_to_file() {
        assert_eq!(sibling("app/models/a.gltf", "a.bin"), "app/models/a.bin");
        assert_eq!(sibling("a.gltf", "a.bin"), "a.bin");
    }

    #[test]
    fn extension_is_lowercased_and_query_free() {
        assert_eq!(extension("HDR/Sky.EXR").as_deref(), Some("exr"));
        assert_eq!(extension("x.hdr?v=2").as_deref(), Some("hdr"));
        assert_eq!(extension("dir.v2/noext"), None);
        assert_eq!(extension("trailing."), None);
    }
}
