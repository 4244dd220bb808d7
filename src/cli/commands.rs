use crate::cli::args::{Cli, Commands};
use crate::converters::{BatchConverter, ConversionStatus, Converter};
use crate::error::Result;
use crate::models::ArrayStats;
use crate::readers::GeoTiffReader;
use crate::utils::progress::ProgressReporter;
use tracing_subscriber::EnvFilter;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Commands::Convert {
            input_file,
            output_dir,
            dims,
        } => {
            println!("Converting {}...", input_file.display());

            let mut converter = Converter::new().with_dims(dims);
            if let Some(dir) = output_dir {
                converter = converter.with_output_dir(dir);
            }

            let conversion = converter.convert(&input_file)?;

            match conversion.status {
                ConversionStatus::Converted {
                    shape,
                    stats,
                    bytes_written,
                } => {
                    println!("  Bands: {}, Shape: [{}, {}]", shape[0], shape[1], shape[2]);
                    println!("  {}", stats.summary());
                    println!("  ✓ Saved to: {}", conversion.output.display());
                    println!(
                        "  Size: {:.1} MB",
                        bytes_written as f64 / (1024.0 * 1024.0)
                    );
                }
                ConversionStatus::SkippedExisting => {
                    println!("Already exists: {}", conversion.output.display());
                }
            }
        }

        Commands::ConvertDirectory {
            input_dir,
            output_dir,
            pattern,
            dims,
            json,
        } => {
            println!("Converting rasters in {}...", input_dir.display());
            println!("Pattern: {}", pattern);

            let mut converter = Converter::new().with_dims(dims);
            if let Some(dir) = output_dir {
                converter = converter.with_output_dir(dir);
            }

            let batch = BatchConverter::new(&input_dir)
                .with_pattern(&pattern)
                .with_converter(converter);

            let candidates = batch.discover()?;
            println!("Found {} candidate files", candidates.len());

            let progress =
                ProgressReporter::new(candidates.len() as u64, "Converting rasters...", json);
            let report = batch.run(Some(&progress))?;
            progress.finish_with_message(&format!(
                "Converted {} files ({} skipped, {} failed)",
                report.converted.len(),
                report.skipped.len(),
                report.failures.len()
            ));

            if json {
                println!("{}", report.to_json()?);
            } else {
                println!("\n{}", report.summary());
            }
        }

        Commands::Info { file } => {
            println!("Inspecting {}...", file.display());

            let mut raster = GeoTiffReader::new().read_raster(&file)?;
            let [bands, height, width] = raster.shape();
            println!("  Bands: {}, Shape: [{}, {}]", bands, height, width);

            let nan_replaced = raster.zero_fill_nan();
            let stats = ArrayStats::from_cleaned(raster.as_array(), nan_replaced);
            println!("  {}", stats.summary());
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignore the error if a subscriber is already installed (e.g. in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
