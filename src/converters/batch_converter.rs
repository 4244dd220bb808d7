use crate::converters::converter::Converter;
use crate::converters::report::BatchReport;
use crate::error::{ConversionError, Result};
use crate::utils::constants::DEFAULT_FILE_PATTERN;
use crate::utils::progress::ProgressReporter;
use std::path::PathBuf;
use tracing::warn;

/// Scans a directory for candidate rasters and converts them one by one.
///
/// The input directory, filename glob, and dimensionality suffix are all
/// injected configuration. Conversions run sequentially; a failed file is
/// recorded in the report and the batch moves on.
pub struct BatchConverter {
    input_dir: PathBuf,
    pattern: String,
    converter: Converter,
}

impl BatchConverter {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            pattern: DEFAULT_FILE_PATTERN.to_string(),
            converter: Converter::new(),
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn with_converter(mut self, converter: Converter) -> Self {
        self.converter = converter;
        self
    }

    /// List candidate source files, sorted by path for a stable order.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        if !self.input_dir.is_dir() {
            return Err(ConversionError::Config(format!(
                "Not a directory: {}",
                self.input_dir.display()
            )));
        }

        let glob_path = self.input_dir.join(&self.pattern);
        let glob_str = glob_path.to_str().ok_or_else(|| {
            ConversionError::Config(format!(
                "Non-UTF-8 path: {}",
                glob_path.display()
            ))
        })?;

        let entries = glob::glob(glob_str).map_err(|e| {
            ConversionError::Config(format!("Invalid file pattern '{}': {}", self.pattern, e))
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_file())
            .collect();
        files.sort();

        Ok(files)
    }

    /// Convert every candidate, tolerating per-file failures.
    pub fn run(&self, progress: Option<&ProgressReporter>) -> Result<BatchReport> {
        let candidates = self.discover()?;

        if candidates.is_empty() {
            return Err(ConversionError::Config(format!(
                "No raster files matching '{}' in {}",
                self.pattern,
                self.input_dir.display()
            )));
        }

        let mut report = BatchReport::new();

        for path in candidates {
            if let Some(pb) = progress {
                let name = path
                    .file_name()
                    .map(|f| f.to_string_lossy().into_owned())
                    .unwrap_or_default();
                pb.set_message(&format!("Converting {name}"));
            }

            match self.converter.convert(&path) {
                Ok(conversion) => report.record_success(conversion),
                Err(error) => {
                    warn!(source = %path.display(), %error, "conversion failed");
                    report.record_failure(path, &error);
                }
            }

            if let Some(pb) = progress {
                pb.increment(1);
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;
    use tiff::encoder::{colortype, TiffEncoder};

    fn write_test_tiff(path: &std::path::Path) {
        let file = File::create(path).unwrap();
        let mut encoder = TiffEncoder::new(file).unwrap();
        encoder
            .write_image::<colortype::Gray32Float>(2, 2, &[1.0, 2.0, 3.0, 4.0])
            .unwrap();
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        write_test_tiff(&temp_dir.path().join("austin_2024_800m.tif"));
        write_test_tiff(&temp_dir.path().join("austin_2022_800m.tif"));
        write_test_tiff(&temp_dir.path().join("austin_2023_800m.tif"));
        std::fs::write(temp_dir.path().join("notes.txt"), b"skip me").unwrap();

        let batch = BatchConverter::new(temp_dir.path()).with_pattern("austin_*_800m.tif");
        let files = batch.discover().unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "austin_2022_800m.tif",
                "austin_2023_800m.tif",
                "austin_2024_800m.tif"
            ]
        );
    }

    #[test]
    fn test_discover_rejects_missing_directory() {
        let batch = BatchConverter::new("/nonexistent/directory");
        assert!(matches!(
            batch.discover().unwrap_err(),
            ConversionError::Config(_)
        ));
    }

    #[test]
    fn test_run_tolerates_partial_failure() {
        let temp_dir = TempDir::new().unwrap();
        write_test_tiff(&temp_dir.path().join("austin_2021_800m.tif"));
        // Corrupt middle candidate (sorts between 2021 and 2023)
        std::fs::write(temp_dir.path().join("austin_2022_800m.tif"), b"garbage").unwrap();
        write_test_tiff(&temp_dir.path().join("austin_2023_800m.tif"));

        let batch = BatchConverter::new(temp_dir.path()).with_pattern("austin_*_800m.tif");
        let report = batch.run(None).unwrap();

        assert_eq!(report.converted.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0]
            .source
            .to_string_lossy()
            .contains("austin_2022_800m.tif"));
        assert!(temp_dir
            .path()
            .join("austin_embeddings_2021_800m_64d.npy")
            .exists());
        assert!(temp_dir
            .path()
            .join("austin_embeddings_2023_800m_64d.npy")
            .exists());
    }

    #[test]
    fn test_run_skips_already_converted() {
        let temp_dir = TempDir::new().unwrap();
        write_test_tiff(&temp_dir.path().join("austin_2020_800m.tif"));

        let batch = BatchConverter::new(temp_dir.path()).with_pattern("*.tif");
        let first = batch.run(None).unwrap();
        assert_eq!(first.converted.len(), 1);

        let second = batch.run(None).unwrap();
        assert_eq!(second.converted.len(), 0);
        assert_eq!(second.skipped.len(), 1);
    }

    #[test]
    fn test_run_empty_scan_is_config_error() {
        let temp_dir = TempDir::new().unwrap();

        let batch = BatchConverter::new(temp_dir.path());
        assert!(matches!(
            batch.run(None).unwrap_err(),
            ConversionError::Config(_)
        ));
    }
}
