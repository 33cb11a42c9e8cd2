use std::env;
use std::path::{Path, PathBuf};

use airgauge_common::error::ScanError;

/// Whether the process runs with root privileges.
///
/// Pure environment query, meant to be called once per command.
pub fn is_elevated() -> bool {
    is_root::is_root()
}

/// Fails with [`ScanError::PermissionDenied`] unless the process is elevated.
pub fn ensure_elevated() -> Result<(), ScanError> {
    if is_elevated() {
        Ok(())
    } else {
        Err(ScanError::PermissionDenied)
    }
}

/// Finds an executable named `tool` on `PATH`.
///
/// A `tool` with more than one path component is taken as a path and only
/// checked for existence.
pub fn locate_tool(tool: &str) -> Option<PathBuf> {
    let path = Path::new(tool);
    if path.components().count() > 1 {
        return path.is_file().then(|| path.to_path_buf());
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(tool))
        .find(|candidate| candidate.is_file())
}
