use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

static MIME_TYPES: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from_iter([
        ("html", "text/html"),
        ("htm", "text/html"),
        ("css", "text/css"),
        ("js", "application/javascript"),
        ("json", "application/json"),
        ("xml", "application/xml"),
        ("txt", "text/plain"),
        ("ico", "image/x-icon"),
        ("png", "image/png"),
        ("jpg", "image/jpeg"),
        ("jpeg", "image/jpeg"),
        ("gif", "image/gif"),
        ("svg", "image/svg+xml"),
        ("pdf", "application/pdf"),
    ])
});

/// Content type for a file, keyed by extension (case-insensitive).
/// Unknown or missing extensions fall back to `application/octet-stream`.
pub fn mime_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => MIME_TYPES
            .get(ext.to_ascii_lowercase().as_str())
            .copied()
            .unwrap_or("application/octet-stream"),
        None => "application/octet-stream",
    }
}
