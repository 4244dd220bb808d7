use crate::error::{ConversionError, Result};
use crate::utils::constants::{OUTPUT_EXTENSION, OUTPUT_INFIX};
use std::path::{Path, PathBuf};

/// Derive the output filename for a source raster.
///
/// Source filenames encode a year as the second underscore-delimited field
/// (e.g. `austin_2023_800m.tif`). The derived name substitutes the fixed
/// template: `austin_2023_800m.tif` -> `austin_embeddings_2023_800m_64d.npy`.
pub fn derive_output_filename(source: &Path, dims: u32) -> Result<String> {
    let filename = source
        .file_name()
        .and_then(|f| f.to_str())
        .ok_or_else(|| ConversionError::MalformedFilename {
            filename: source.display().to_string(),
        })?;

    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);

    let parts: Vec<&str> = stem.split('_').collect();

    // The year token must sit at the second position and be all digits
    let year = parts.get(1).copied().unwrap_or("");
    if year.is_empty() || !year.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConversionError::MalformedFilename {
            filename: filename.to_string(),
        });
    }

    let prefix = parts[0];
    let suffix = parts[2..].join("_");

    let name = if suffix.is_empty() {
        format!("{prefix}_{OUTPUT_INFIX}_{year}_{dims}d.{OUTPUT_EXTENSION}")
    } else {
        format!("{prefix}_{OUTPUT_INFIX}_{year}_{suffix}_{dims}d.{OUTPUT_EXTENSION}")
    };

    Ok(name)
}

/// Derive the full output path, defaulting to the source file's directory.
pub fn derive_output_path(source: &Path, output_dir: Option<&Path>, dims: u32) -> Result<PathBuf> {
    let filename = derive_output_filename(source, dims)?;

    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => source
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    Ok(dir.join(filename))
}
