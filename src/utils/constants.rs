/// Output filename template pieces: <prefix>_embeddings_<year>_<suffix>_<dim>d.npy
pub const OUTPUT_INFIX: &str = "embeddings";
pub const OUTPUT_EXTENSION: &str = "npy";

/// Number of embedding dimensions encoded in the output filename suffix
pub const DEFAULT_EMBEDDING_DIMS: u32 = 64;

/// Default glob used when scanning a directory for candidate rasters
pub const DEFAULT_FILE_PATTERN: &str = "*_*_*.tif";
