use crate::error::Result;
use ndarray::Array3;
use ndarray_npy::write_npy;
use std::fs;
use std::path::Path;

/// Persists arrays in the `.npy` format: self-describing (dtype and shape
/// embedded in the header), loadable without the source raster metadata.
pub struct NpyWriter;

impl NpyWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write the array to `path`, creating parent directories as needed.
    /// Returns the size of the written file in bytes.
    pub fn write_array(&self, array: &Array3<f32>, path: &Path) -> Result<u64> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        write_npy(path, array)?;

        Ok(fs::metadata(path)?.len())
    }
}

impl Default for NpyWriter {
    fn default() -> Self {
        Self::new()
    }
}
