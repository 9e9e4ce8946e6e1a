//! Report rendering
//!
//! Produces the static HTML dashboard and the optional JSON snapshot, and
//! writes them to their well-known locations.

pub mod html;
pub mod snapshot;

pub use html::{format_timestamp, render_html};
pub use snapshot::Snapshot;

use crate::error::RenderError;
use std::path::Path;

/// Overwrite `path` with `contents`, creating parent directories
pub fn write_artifact(path: &Path, contents: &str) -> Result<(), RenderError> {
    let to_err = |source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_err)?;
    }
    std::fs::write(path, contents).map_err(to_err)?;

    log::info!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}
