//! Plain text rendering for renditions.

use super::Rendition;

/// Convert a rendition to plain text.
///
/// A warning, when present, is written on its own line above the grid.
pub fn to_text(rendition: &Rendition) -> String {
    let body = rendition.grid.to_text();
    match &rendition.warning {
        Some(warning) if body.is_empty() => warning.clone(),
        Some(warning) => format!("{}\n{}", warning, body),
        None => body,
    }
}
