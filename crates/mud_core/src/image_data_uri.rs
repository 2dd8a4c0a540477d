//! Inlining of local images as `data:` URIs.

use std::fs;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::trace;
use url::Url;

/// Image extensions that can be inlined, with their MIME types.
pub const MIME_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("webp", "image/webp"),
];

/// Looks up the MIME type of a lowercase file extension.
pub fn mime_type(extension: &str) -> Option<&'static str> {
    MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

/// Whether an image source points off the local file system.
///
/// ```rust
/// use mud_core::image_data_uri::is_external;
///
/// assert!(is_external("HTTPS://example.com/a.png"));
/// assert!(!is_external("images/a.png"));
/// ```
pub fn is_external(source: &str) -> bool {
    const SCHEMES: [&str; 4] = ["http://", "https://", "data:", "mailto:"];
    SCHEMES.iter().any(|scheme| {
        source
            .get(..scheme.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
    })
}

/// Reads a local image and encodes it as a `data:` URI.
///
/// `source` is resolved against `base`, the URL of the Markdown file, so a
/// relative path is looked up next to that file. Returns `None` for external
/// sources, unsupported extensions, and unreadable files.
pub fn encode(source: &str, base: &Url) -> Option<String> {
    if is_external(source) {
        return None;
    }

    let resolved = base.join(source).ok()?;
    let path = resolved.to_file_path().ok()?;
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let Some(mime) = mime_type(&extension) else {
        trace!(source, extension, "unsupported image type");
        return None;
    };

    match fs::read(&path) {
        Ok(bytes) => Some(format!("data:{};base64,{}", mime, STANDARD.encode(bytes))),
        Err(e) => {
            trace!(path = %path.display(), error = %e, "image not embedded");
            None
        }
    }
}
