use crate::utils::constants::{DEFAULT_EMBEDDING_DIMS, DEFAULT_FILE_PATTERN};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "embeddings-converter")]
#[command(about = "Batch GeoTIFF-to-NumPy converter for satellite embedding rasters")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a single GeoTIFF raster to a .npy array file
    Convert {
        #[arg(short, long, help = "Source raster file (<prefix>_<year>_<suffix>.tif)")]
        input_file: PathBuf,

        #[arg(
            short,
            long,
            help = "Output directory [default: the source file's directory]"
        )]
        output_dir: Option<PathBuf>,

        #[arg(
            short,
            long,
            default_value_t = DEFAULT_EMBEDDING_DIMS,
            help = "Embedding dimensionality encoded in the output filename"
        )]
        dims: u32,
    },

    /// Convert every matching raster in a directory
    ConvertDirectory {
        #[arg(short, long, help = "Input directory containing raster files")]
        input_dir: PathBuf,

        #[arg(
            short,
            long,
            help = "Output directory [default: alongside each source file]"
        )]
        output_dir: Option<PathBuf>,

        #[arg(
            short,
            long,
            default_value = DEFAULT_FILE_PATTERN,
            help = "Filename glob for candidate rasters (e.g. 'austin_*_800m.tif')"
        )]
        pattern: String,

        #[arg(
            short,
            long,
            default_value_t = DEFAULT_EMBEDDING_DIMS,
            help = "Embedding dimensionality encoded in output filenames"
        )]
        dims: u32,

        #[arg(long, default_value = "false", help = "Print the report as JSON")]
        json: bool,
    },

    /// Display shape and statistics of a raster without converting it
    Info {
        #[arg(short, long, help = "Raster file to inspect")]
        file: PathBuf,
    },
}
