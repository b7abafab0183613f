use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;

/// Whether `path` names a gzip-compressed document (`.svgz` or `.gz`)
pub fn is_compressed(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("svgz" | "gz")
    )
}

/// Load an SVG file, decompressing `.svgz` and `.gz` inputs
pub fn load_svg_file(path: &Path) -> Result<String> {
    if is_compressed(path) {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open compressed file: {:?}", path))?;

        let mut content = String::new();
        GzDecoder::new(file)
            .read_to_string(&mut content)
            .with_context(|| format!("Failed to decompress file: {:?}", path))?;

        Ok(content)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
    }
}
