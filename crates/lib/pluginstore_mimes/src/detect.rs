use mime::{self, Mime};
use std::{ffi::OsStr, path::Path};

/// Guess the content type of a file from its extension.
///
/// `mime_guess` misses or disagrees on a few types that frontend plugins
/// ship, those are overridden here. Unknown extensions are served as
/// `application/octet-stream`.
pub fn detect_mime(file_path: impl AsRef<Path>) -> Mime {
    let file_path = file_path.as_ref();

    match file_path.extension().and_then(OsStr::to_str) {
        Some("js" | "mjs") => mime::TEXT_JAVASCRIPT,
        Some("map") => mime::APPLICATION_JSON,
        Some("woff2") => crate::FONT_WOFF2.clone(),
        Some("ttf") => crate::FONT_TTF.clone(),
        Some("eot") => crate::APPLICATION_VND_MS_FONTOBJECT.clone(),
        _ => mime_guess::from_path(file_path).first_or_octet_stream(),
    }
}
