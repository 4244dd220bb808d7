use clap::Parser;
use embeddings_converter::cli::{run, Cli};
use embeddings_converter::error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
