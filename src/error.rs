use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConversionError>;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Raster decode error: {0}")]
    Decode(#[from] tiff::TiffError),

    #[error("Unsupported sample format: {0}")]
    UnsupportedSampleFormat(String),

    #[error("Malformed filename '{filename}': expected <prefix>_<year>_<suffix>.tif")]
    MalformedFilename { filename: String },

    #[error("Band shape mismatch: directory {directory} is {height}x{width}, expected {expected_height}x{expected_width}")]
    BandShapeMismatch {
        directory: usize,
        height: usize,
        width: usize,
        expected_height: usize,
        expected_width: usize,
    },

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("NumPy write error: {0}")]
    NpyWrite(#[from] ndarray_npy::WriteNpyError),

    #[error("Report serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
