use crate::error::Result;
use crate::models::ArrayStats;
use crate::readers::GeoTiffReader;
use crate::utils::constants::DEFAULT_EMBEDDING_DIMS;
use crate::utils::filename::derive_output_path;
use crate::writers::NpyWriter;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Outcome of a single conversion.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    pub source: PathBuf,
    pub output: PathBuf,
    #[serde(flatten)]
    pub status: ConversionStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConversionStatus {
    Converted {
        shape: [usize; 3],
        stats: ArrayStats,
        bytes_written: u64,
    },
    SkippedExisting,
}

impl Conversion {
    pub fn was_converted(&self) -> bool {
        matches!(self.status, ConversionStatus::Converted { .. })
    }
}

/// Converts one GeoTIFF raster into a `.npy` array artifact.
///
/// The output path is a pure function of the source filename: the year
/// token (second underscore-delimited field) is substituted into the
/// `<prefix>_embeddings_<year>_<suffix>_<dim>d.npy` template. An existing
/// output file is proof of prior success and short-circuits the whole
/// read/clean/write pipeline.
pub struct Converter {
    output_dir: Option<PathBuf>,
    dims: u32,
    reader: GeoTiffReader,
    writer: NpyWriter,
}

impl Converter {
    pub fn new() -> Self {
        Self {
            output_dir: None,
            dims: DEFAULT_EMBEDDING_DIMS,
            reader: GeoTiffReader::new(),
            writer: NpyWriter::new(),
        }
    }

    /// Override the output directory. Defaults to the source file's parent.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Override the dimensionality suffix encoded in output filenames.
    pub fn with_dims(mut self, dims: u32) -> Self {
        self.dims = dims;
        self
    }

    pub fn convert(&self, source: &Path) -> Result<Conversion> {
        // Filename validation happens before any file I/O
        let output = derive_output_path(source, self.output_dir.as_deref(), self.dims)?;

        if output.exists() {
            info!(output = %output.display(), "already converted, skipping");
            return Ok(Conversion {
                source: source.to_path_buf(),
                output,
                status: ConversionStatus::SkippedExisting,
            });
        }

        let mut raster = self.reader.read_raster(source)?;
        debug!(
            bands = raster.bands(),
            height = raster.height(),
            width = raster.width(),
            "decoded raster"
        );

        let nan_replaced = raster.zero_fill_nan();
        if nan_replaced > 0 {
            let zeroed = raster.zero_band_indices();
            if !zeroed.is_empty() {
                warn!(
                    source = %source.display(),
                    bands = ?zeroed,
                    "bands are entirely zero after NaN replacement"
                );
            }
        }

        let stats = ArrayStats::from_cleaned(raster.as_array(), nan_replaced);
        info!(source = %source.display(), "{}", stats.summary());

        let bytes_written = self.writer.write_array(raster.as_array(), &output)?;

        Ok(Conversion {
            source: source.to_path_buf(),
            output,
            status: ConversionStatus::Converted {
                shape: raster.shape(),
                stats,
                bytes_written,
            },
        })
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConversionError;
    use ndarray::Array3;
    use ndarray_npy::read_npy;
    use std::fs::File;
    use tempfile::TempDir;
    use tiff::encoder::{colortype, TiffEncoder};

    fn write_test_tiff(path: &Path, bands: &[Vec<f32>], width: u32, height: u32) {
        let file = File::create(path).unwrap();
        let mut encoder = TiffEncoder::new(file).unwrap();
        for band in bands {
            encoder
                .write_image::<colortype::Gray32Float>(width, height, band)
                .unwrap();
        }
    }

    #[test]
    fn test_convert_writes_cleaned_array() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("austin_2023_800m.tif");
        write_test_tiff(&source, &[vec![f32::NAN, 1.5, 2.0, f32::NAN]], 2, 2);

        let conversion = Converter::new().convert(&source).unwrap();

        assert_eq!(
            conversion.output,
            temp_dir.path().join("austin_embeddings_2023_800m_64d.npy")
        );
        assert!(conversion.was_converted());

        let loaded: Array3<f32> = read_npy(&conversion.output).unwrap();
        assert_eq!(loaded.shape(), &[1, 2, 2]);
        assert_eq!(loaded[[0, 0, 0]], 0.0);
        assert_eq!(loaded[[0, 0, 1]], 1.5);
        assert_eq!(loaded[[0, 1, 0]], 2.0);
        assert_eq!(loaded[[0, 1, 1]], 0.0);
    }

    #[test]
    fn test_convert_reports_stats() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("austin_2022_800m.tif");
        write_test_tiff(&source, &[vec![1.0, 2.0, 3.0, f32::NAN]], 2, 2);

        let conversion = Converter::new().convert(&source).unwrap();

        match conversion.status {
            ConversionStatus::Converted { shape, stats, bytes_written } => {
                assert_eq!(shape, [1, 2, 2]);
                assert_eq!(stats.min, 0.0);
                assert_eq!(stats.max, 3.0);
                assert_eq!(stats.nan_replaced, 1);
                assert!(bytes_written > 0);
            }
            ConversionStatus::SkippedExisting => panic!("expected a conversion"),
        }
    }

    #[test]
    fn test_convert_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("austin_2023_800m.tif");
        write_test_tiff(&source, &[vec![1.0, 2.0, 3.0, 4.0]], 2, 2);

        let converter = Converter::new();
        let first = converter.convert(&source).unwrap();
        assert!(first.was_converted());

        let mtime = std::fs::metadata(&first.output).unwrap().modified().unwrap();

        let second = converter.convert(&source).unwrap();
        assert_eq!(second.output, first.output);
        assert!(matches!(second.status, ConversionStatus::SkippedExisting));
        assert_eq!(
            std::fs::metadata(&second.output).unwrap().modified().unwrap(),
            mtime
        );
    }

    #[test]
    fn test_convert_respects_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("austin_2021_800m.tif");
        write_test_tiff(&source, &[vec![1.0, 2.0, 3.0, 4.0]], 2, 2);

        let conversion = Converter::new()
            .with_output_dir(out_dir.path())
            .convert(&source)
            .unwrap();

        assert_eq!(
            conversion.output,
            out_dir.path().join("austin_embeddings_2021_800m_64d.npy")
        );
        assert!(conversion.output.exists());
    }

    #[test]
    fn test_malformed_filename_fails_before_io() {
        // The source file deliberately does not exist: a malformed name
        // must fail on derivation, not on open.
        let err = Converter::new()
            .convert(Path::new("/nonexistent/data.tif"))
            .unwrap_err();
        assert!(matches!(err, ConversionError::MalformedFilename { .. }));
    }

    #[test]
    fn test_unreadable_source_propagates() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("austin_2020_800m.tif");
        std::fs::write(&source, b"not a tiff").unwrap();

        let err = Converter::new().convert(&source).unwrap_err();
        assert!(matches!(err, ConversionError::Decode(_)));
    }
}
