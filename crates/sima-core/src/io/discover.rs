use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, SimaError};

/// True when the path has a `.tif`/`.tiff` extension (any case).
pub fn is_tiff_path(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("tif") || s.eq_ignore_ascii_case("tiff"))
        .unwrap_or(false)
}

/// Check that an input exists and is a TIFF file.
pub fn validate_input(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(SimaError::InvalidInput {
            path: path.to_path_buf(),
            reason: "file not found".into(),
        });
    }
    if !is_tiff_path(path) {
        return Err(SimaError::InvalidInput {
            path: path.to_path_buf(),
            reason: "not a .tif/.tiff file".into(),
        });
    }
    Ok(())
}

/// Collect the TIFF files under a directory, sorted by path.
pub fn discover_tiffs(root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(SimaError::InvalidInput {
            path: root.to_path_buf(),
            reason: "directory not found".into(),
        });
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_tiff_path(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();
    found.sort();

    if found.is_empty() {
        return Err(SimaError::NoInputs(root.to_path_buf()));
    }
    Ok(found)
}

/// Expand a mix of files and directories into a validated list of TIFF files.
///
/// Every file is validated before any is returned, so a bad path fails the
/// batch before processing starts.
pub fn resolve_inputs(inputs: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(discover_tiffs(input, recursive)?);
        } else {
            validate_input(input)?;
            files.push(input.clone());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_tiff_path() {
        assert!(is_tiff_path(Path::new("A5.tif")));
        assert!(is_tiff_path(Path::new("a/b/A5.TIFF")));
        assert!(!is_tiff_path(Path::new("A5.png")));
        assert!(!is_tiff_path(Path::new("A5")));
    }
}
